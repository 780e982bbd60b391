//! Game discount (deal) model.

use serde::{Deserialize, Serialize};

use super::{DealId, GameId, StoreId};

/// A normalized, store-attributed game discount record.
///
/// Instances are created fresh on every fetch; identity is value
/// equality only. `deal_id` is unique within any single listing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    /// Unique identifier of the offer (distinct from the game ID).
    pub deal_id: DealId,
    /// Identifier of the discounted game.
    pub game_id: GameId,
    /// Game title.
    pub title: String,
    /// Current discounted price. Never negative.
    pub sale_price: f64,
    /// Regular price; `0.0` means unknown.
    pub normal_price: f64,
    /// Discount percentage in `0..=100`; `0.0` means unknown.
    pub savings: f64,
    /// Store offering the deal; `"0"` means unknown.
    pub store_id: StoreId,
    /// Cover thumbnail URL.
    pub thumb_url: String,
    /// Fully-qualified redirect link for the purchase.
    pub purchase_link: String,
}
