//! Raw game record from the title-search endpoint.

use serde::Deserialize;

use super::parse_numeric;
use crate::config::DealsConfig;
use crate::error::Result;
use crate::models::{Deal, DealId, GameId, StoreId};

/// Prefix applied to synthesized deal IDs so search results can never
/// collide with listing-based deal IDs.
const SEARCH_ID_PREFIX: &str = "SEARCH-";

/// Exact JSON shape of one record returned by `GET /games`.
///
/// The search endpoint returns games with their cheapest current price,
/// not full offers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSearchDto {
    /// Game identifier.
    #[serde(rename = "gameID")]
    pub game_id: String,
    /// Steam app identifier, when the game is on Steam.
    #[serde(rename = "steamAppID", default)]
    pub steam_app_id: Option<String>,
    /// Cheapest current price as a string.
    pub cheapest: String,
    /// Game title (the source calls this `external`).
    pub external: String,
    /// Cover thumbnail URL.
    pub thumb: String,
}

impl GameSearchDto {
    /// Normalizes this record into a domain [`Deal`].
    ///
    /// Fields the search shape lacks are defaulted: `normal_price` and
    /// `savings` to `0.0`, `store_id` to the unknown sentinel `"0"`.
    /// The deal ID is synthesized as `SEARCH-{gameID}` and the purchase
    /// link uses the `gameID` redirect parameter rather than `dlid` —
    /// the source uses a distinct redirect convention for game pages.
    ///
    /// # Errors
    ///
    /// Returns [`GameDealsError::MalformedRecord`] when `cheapest` is
    /// not numeric.
    ///
    /// [`GameDealsError::MalformedRecord`]: crate::error::GameDealsError::MalformedRecord
    pub fn into_deal(self, config: &DealsConfig) -> Result<Deal> {
        let sale_price = parse_numeric("cheapest", &self.cheapest)?;
        let purchase_link = format!("{}?gameID={}", config.redirect_base_url, self.game_id);
        let deal_id = DealId::new(format!("{SEARCH_ID_PREFIX}{}", self.game_id));

        Ok(Deal {
            deal_id,
            game_id: GameId::new(self.game_id),
            title: self.external,
            sale_price,
            normal_price: 0.0,
            savings: 0.0,
            store_id: StoreId::new("0".to_owned()),
            thumb_url: self.thumb,
            purchase_link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> GameSearchDto {
        serde_json::from_str(
            r#"{
                "gameID": "146",
                "steamAppID": null,
                "cheapest": "3.49",
                "external": "Batman: Arkham City",
                "thumb": "https://img.example/bac.jpg"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn into_deal_synthesizes_prefixed_deal_id() {
        let deal = dto().into_deal(&DealsConfig::default()).unwrap();
        assert_eq!(deal.deal_id.as_inner(), "SEARCH-146");
        assert_eq!(deal.game_id.as_inner(), "146");
    }

    #[test]
    fn into_deal_zero_fills_missing_fields() {
        let deal = dto().into_deal(&DealsConfig::default()).unwrap();
        assert!((deal.sale_price - 3.49).abs() < f64::EPSILON);
        assert!(deal.normal_price.abs() < f64::EPSILON);
        assert!(deal.savings.abs() < f64::EPSILON);
        assert_eq!(deal.store_id.as_inner(), "0");
    }

    #[test]
    fn into_deal_links_by_game_id() {
        let deal = dto().into_deal(&DealsConfig::default()).unwrap();
        assert_eq!(
            deal.purchase_link,
            "https://www.cheapshark.com/redirect?gameID=146"
        );
    }

    #[test]
    fn into_deal_takes_title_from_external() {
        let deal = dto().into_deal(&DealsConfig::default()).unwrap();
        assert_eq!(deal.title, "Batman: Arkham City");
    }

    #[test]
    fn into_deal_fails_on_unparsable_cheapest() {
        let mut bad = dto();
        bad.cheapest = "???".to_owned();
        let err = bad.into_deal(&DealsConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::GameDealsError::MalformedRecord {
                field: "cheapest",
                ..
            }
        ));
    }
}
