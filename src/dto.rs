//! Raw record shapes of the external sources and their normalization
//! into the [`crate::models`] domain entities.
//!
//! Every conversion is a pure function. Numeric fields arrive as
//! strings from the deals source; an unparsable value fails the whole
//! conversion with [`GameDealsError::MalformedRecord`] — no partial
//! entities are ever produced.

mod account;
mod deal;
mod game_search;
mod store;

pub use account::AccountDto;
pub use deal::DealDto;
pub use game_search::GameSearchDto;
pub use store::{StoreDto, StoreImagesDto};

use crate::error::{GameDealsError, Result};

/// Parses a price/percentage field that the source transmits as a
/// string.
fn parse_numeric(field: &'static str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_parse_err| GameDealsError::MalformedRecord {
            field,
            value: value.to_owned(),
        })
}
