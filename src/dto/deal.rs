//! Raw deal record from the recent-deals endpoint.

use serde::Deserialize;

use super::parse_numeric;
use crate::config::DealsConfig;
use crate::error::Result;
use crate::models::{Deal, DealId, GameId, StoreId};

/// Exact JSON shape of one record returned by `GET /deals`.
///
/// All numeric fields are transmitted as strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealDto {
    /// Game identifier.
    #[serde(rename = "gameID")]
    pub game_id: String,
    /// Steam app identifier, when the game is on Steam.
    #[serde(rename = "steamAppID", default)]
    pub steam_app_id: Option<String>,
    /// Offer identifier.
    #[serde(rename = "dealID")]
    pub deal_id: String,
    /// Discount percentage as a string.
    pub savings: String,
    /// Current price as a string.
    pub sale_price: String,
    /// Regular price as a string.
    pub normal_price: String,
    /// Source-computed quality rating for the offer.
    #[serde(default)]
    pub deal_rating: Option<String>,
    /// Cover thumbnail URL.
    pub thumb: String,
    /// Game title.
    pub title: String,
    /// Store identifier.
    #[serde(rename = "storeID")]
    pub store_id: String,
}

impl DealDto {
    /// Normalizes this record into a domain [`Deal`].
    ///
    /// The purchase link is derived as `{redirect_base}?dlid={dealID}`
    /// so the source can attribute the redirect.
    ///
    /// # Errors
    ///
    /// Returns [`GameDealsError::MalformedRecord`] when any of the
    /// price/savings strings is not numeric.
    ///
    /// [`GameDealsError::MalformedRecord`]: crate::error::GameDealsError::MalformedRecord
    pub fn into_deal(self, config: &DealsConfig) -> Result<Deal> {
        let sale_price = parse_numeric("salePrice", &self.sale_price)?;
        let normal_price = parse_numeric("normalPrice", &self.normal_price)?;
        let savings = parse_numeric("savings", &self.savings)?;
        let purchase_link = format!("{}?dlid={}", config.redirect_base_url, self.deal_id);

        Ok(Deal {
            deal_id: DealId::new(self.deal_id),
            game_id: GameId::new(self.game_id),
            title: self.title,
            sale_price,
            normal_price,
            savings,
            store_id: StoreId::new(self.store_id),
            thumb_url: self.thumb,
            purchase_link,
        })
    }
}
