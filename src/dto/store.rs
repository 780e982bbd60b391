//! Raw store record from the store-directory endpoint.

use serde::Deserialize;

use crate::config::DealsConfig;
use crate::models::{Store, StoreId};

/// Exact JSON shape of one record returned by `GET /stores`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDto {
    /// Store identifier.
    #[serde(rename = "storeID")]
    pub store_id: String,
    /// Store name.
    pub store_name: String,
    /// Activity flag: `1` means active, anything else inactive.
    pub is_active: i64,
    /// Relative image paths for the store.
    pub images: StoreImagesDto,
}

/// Relative image paths attached to a store record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreImagesDto {
    /// Wide banner image path.
    pub banner: String,
    /// Logo image path.
    pub logo: String,
    /// Small icon image path.
    pub icon: String,
}

impl StoreDto {
    /// Normalizes this record into a domain [`Store`].
    ///
    /// The activity flag maps to a boolean by equality with `1`
    /// exactly; negative values and values above one are inactive. The
    /// icon URL is the image host concatenated with the relative path.
    #[must_use]
    pub fn into_store(self, config: &DealsConfig) -> Store {
        let icon_url = format!("{}{}", config.image_base_url, self.images.icon);
        Store {
            store_id: StoreId::new(self.store_id),
            store_name: self.store_name,
            is_active: self.is_active == 1,
            icon_url,
        }
    }
}
