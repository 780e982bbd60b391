//! Store catalog state.

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::{Store, StoreId};
use crate::repository::GameRepository;
use crate::usecases::GetStores;
use crate::viewmodel::user_message;

/// Placeholder name for a store missing from the catalog.
const UNKNOWN_STORE_NAME: &str = "Unknown Store";

/// Published store catalog state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoresSnapshot {
    /// Active stores, in catalog order.
    pub stores: Vec<Store>,
    /// Whether a catalog load is in flight.
    pub loading: bool,
    /// Last failure as display-ready text.
    pub error: Option<String>,
}

/// Reactive store catalog.
///
/// Resolves store identifiers on deals to display names and icons.
#[derive(Debug)]
pub struct StoreDirectory<R> {
    /// Catalog loader.
    stores: GetStores<R>,
    /// Snapshot publisher.
    state: watch::Sender<StoresSnapshot>,
}

impl<R: GameRepository> StoreDirectory<R> {
    /// Creates a directory over the given repository. The catalog is
    /// empty until [`Self::load`] is called.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            stores: GetStores::new(repository),
            state: watch::Sender::new(StoresSnapshot::default()),
        }
    }

    /// Subscribes to snapshot changes. The receiver starts at the
    /// current snapshot.
    #[inline]
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<StoresSnapshot> {
        self.state.subscribe()
    }

    /// Returns the current snapshot.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> StoresSnapshot {
        self.state.borrow().clone()
    }

    /// Loads or reloads the store catalog. A failed reload keeps the
    /// previously loaded catalog.
    pub async fn load(&self) {
        self.publish(|snapshot| {
            snapshot.loading = true;
        });

        match self.stores.execute().await {
            Ok(stores) => self.publish(|snapshot| {
                snapshot.stores = stores;
                snapshot.loading = false;
                snapshot.error = None;
            }),
            Err(error) => {
                tracing::warn!(%error, "store catalog load failed");
                self.publish(|snapshot| {
                    snapshot.loading = false;
                    snapshot.error = Some(user_message(&error));
                });
            }
        }
    }

    /// Resolves a store identifier to its display name, falling back
    /// to a placeholder for stores missing from the catalog.
    #[must_use]
    pub fn store_name(&self, store_id: &StoreId) -> String {
        self.state
            .borrow()
            .stores
            .iter()
            .find(|store| store.store_id == *store_id)
            .map_or_else(|| UNKNOWN_STORE_NAME.to_owned(), |store| store.store_name.clone())
    }

    /// Resolves a store identifier to its icon URL, if the store is in
    /// the catalog.
    #[must_use]
    pub fn store_icon(&self, store_id: &StoreId) -> Option<String> {
        self.state
            .borrow()
            .stores
            .iter()
            .find(|store| store.store_id == *store_id)
            .map(|store| store.icon_url.clone())
    }

    /// Publishes a snapshot update. `send_modify` runs the closure
    /// under the channel lock, so concurrent publishers cannot lose
    /// each other's writes.
    fn publish<F: FnOnce(&mut StoresSnapshot)>(&self, update: F) {
        self.state.send_modify(update);
    }
}
