//! Digital storefront model.

use serde::{Deserialize, Serialize};

use super::StoreId;

/// A digital game storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Unique identifier, referenced by [`Deal::store_id`](super::Deal).
    pub store_id: StoreId,
    /// Human-readable store name.
    pub store_name: String,
    /// Whether the source still lists deals for this store.
    pub is_active: bool,
    /// Fully-qualified icon URL.
    pub icon_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_roundtrip() {
        let store = Store {
            store_id: StoreId::new("1".to_owned()),
            store_name: "Steam".to_owned(),
            is_active: true,
            icon_url: "https://www.cheapshark.com/img/stores/icons/0.png".to_owned(),
        };
        let json = serde_json::to_string(&store).unwrap();
        let deserialized: Store = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, store);
    }
}
