//! Deal browsing state with debounced search.
//!
//! [`DealBrowser`] owns the baseline deals page and the search term,
//! and publishes a [`BrowseSnapshot`] on every change. Keystrokes
//! reset a debounce timer; only the timer that survives the full
//! window issues a network search. A pending timer can be truly
//! canceled, an in-flight response cannot, so every resolution is
//! checked against the live term and silently discarded when stale.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::models::Deal;
use crate::repository::GameRepository;
use crate::usecases::{GetLatestDeals, MIN_SEARCH_LEN, SearchGameOffers};
use crate::viewmodel::user_message;

/// Published browsing state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowseSnapshot {
    /// Current search term.
    pub search_term: String,
    /// Deals currently on screen. The baseline page when the term is
    /// empty or too short, search results otherwise.
    pub displayed: Vec<Deal>,
    /// Whether a load or search is in flight.
    pub pending: bool,
    /// Last failure as display-ready text. Cleared by the next
    /// successful load or search.
    pub error: Option<String>,
}

/// Mutable state behind the lock.
#[derive(Debug, Default)]
struct BrowseState {
    /// Live search term. Resolutions carrying another term are stale.
    term: String,
    /// Most recent baseline page.
    baseline: Vec<Deal>,
    /// Armed debounce timer, if any.
    timer: Option<JoinHandle<()>>,
}

/// State shared between the browser handle and its timer tasks.
#[derive(Debug)]
struct Shared<R> {
    /// Baseline loader.
    load: GetLatestDeals<R>,
    /// Title search.
    search: SearchGameOffers<R>,
    /// Snapshot publisher.
    state: watch::Sender<BrowseSnapshot>,
    /// Term, baseline and timer, guarded together.
    inner: Mutex<BrowseState>,
}

impl<R> Shared<R> {
    /// Locks the inner state, recovering from poisoning.
    fn lock(&self) -> std::sync::MutexGuard<'_, BrowseState> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Publishes a snapshot update. `send_modify` runs the closure
    /// under the channel lock, so concurrent publishers cannot lose
    /// each other's writes.
    fn publish<F: FnOnce(&mut BrowseSnapshot)>(&self, update: F) {
        self.state.send_modify(update);
    }
}

/// Reactive deal browser.
///
/// Cheap to clone; all clones share the same state. Dropping every
/// handle aborts any armed timer.
#[derive(Debug)]
pub struct DealBrowser<R> {
    /// Shared state.
    shared: Arc<Shared<R>>,
    /// Debounce window for keystroke-driven searches.
    debounce: Duration,
}

impl<R> Drop for DealBrowser<R> {
    fn drop(&mut self) {
        if Arc::strong_count(&self.shared) == 1
            && let Some(timer) = self.shared.lock().timer.take()
        {
            timer.abort();
        }
    }
}

impl<R> Clone for DealBrowser<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            debounce: self.debounce,
        }
    }
}

impl<R: GameRepository + 'static> DealBrowser<R> {
    /// Creates a browser over the given repository with the given
    /// debounce window.
    #[must_use]
    pub fn new(repository: Arc<R>, debounce: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                load: GetLatestDeals::new(Arc::clone(&repository)),
                search: SearchGameOffers::new(repository),
                state: watch::Sender::new(BrowseSnapshot::default()),
                inner: Mutex::new(BrowseState::default()),
            }),
            debounce,
        }
    }

    /// Subscribes to snapshot changes. The receiver starts at the
    /// current snapshot.
    #[inline]
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<BrowseSnapshot> {
        self.shared.state.subscribe()
    }

    /// Returns the current snapshot.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> BrowseSnapshot {
        self.shared.state.borrow().clone()
    }

    /// Loads or reloads the baseline deals page.
    ///
    /// Also serves as the retry trigger after a failed load. When a
    /// search term is active, the refreshed baseline is kept for the
    /// next revert but the displayed results are left alone.
    pub async fn load_baseline(&self) {
        self.shared.publish(|snapshot| {
            snapshot.pending = true;
        });

        let result = self.shared.load.execute().await;
        match result {
            Ok(deals) => {
                let mut st = self.shared.lock();
                st.baseline = deals.clone();
                // A late-arriving baseline shows only when no term is
                // active at all; short terms keep whatever is on screen
                // and pick up the refreshed page on the next keystroke.
                let show = st.term.is_empty();
                self.shared.publish(|snapshot| {
                    snapshot.pending = false;
                    snapshot.error = None;
                    if show {
                        snapshot.displayed = deals;
                    }
                });
                drop(st);
            }
            Err(error) => {
                tracing::warn!(%error, "baseline load failed");
                self.shared.publish(|snapshot| {
                    snapshot.pending = false;
                    snapshot.error = Some(user_message(&error));
                });
            }
        }
    }

    /// Records a keystroke.
    ///
    /// Any armed timer is reset. An empty term reverts to the baseline
    /// immediately; a term shorter than the search minimum shows the
    /// baseline without arming a timer; otherwise a fresh debounce
    /// timer is armed and the search fires only if no further
    /// keystroke arrives within the window.
    pub fn set_search_term<T: Into<String>>(&self, term: T) {
        let term = term.into();
        let mut st = self.shared.lock();
        if let Some(timer) = st.timer.take() {
            timer.abort();
        }
        st.term.clone_from(&term);

        // Publishing while the state lock is held keeps the snapshot
        // consistent with the term a concurrent resolution checks
        // against.
        if term.chars().count() < MIN_SEARCH_LEN {
            let baseline = st.baseline.clone();
            self.shared.publish(|snapshot| {
                snapshot.search_term = term;
                snapshot.displayed = baseline;
                snapshot.pending = false;
            });
            drop(st);
            return;
        }

        // The timer holds the shared state weakly so an armed timer
        // cannot outlive the last browser handle.
        let shared = Arc::downgrade(&self.shared);
        let debounce = self.debounce;
        let armed_term = term.clone();
        st.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if let Some(live) = shared.upgrade() {
                run_search(live, armed_term).await;
            }
        }));
        self.shared.publish(|snapshot| {
            snapshot.search_term = term;
        });
        drop(st);
    }

    /// Runs the search for the current term immediately, bypassing the
    /// debounce window. Terms below the search minimum behave as in
    /// [`Self::set_search_term`].
    pub async fn search_now(&self) {
        let term = {
            let mut st = self.shared.lock();
            if let Some(timer) = st.timer.take() {
                timer.abort();
            }
            if st.term.chars().count() < MIN_SEARCH_LEN {
                let baseline = st.baseline.clone();
                self.shared.publish(|snapshot| {
                    snapshot.displayed = baseline;
                    snapshot.pending = false;
                });
                return;
            }
            st.term.clone()
        };

        run_search(Arc::clone(&self.shared), term).await;
    }
}

/// Issues the network search for `term` and applies the result unless
/// the term changed while the request was in flight.
async fn run_search<R: GameRepository>(shared: Arc<Shared<R>>, term: String) {
    {
        let mut st = shared.lock();
        if st.term != term {
            return;
        }
        // Past this point the request cannot be aborted, only its
        // result discarded. The timer slot is cleared so a later
        // keystroke does not abort the task mid-request, and the
        // pending flag is raised under the same lock a keystroke would
        // take to change the term.
        st.timer = None;
        shared.publish(|snapshot| {
            snapshot.pending = true;
        });
    }

    let result = shared.search.execute(&term).await;

    let st = shared.lock();
    if st.term != term {
        // A newer term took over while this search was in flight.
        tracing::debug!(stale = %term, live = %st.term, "discarding stale search result");
        return;
    }

    match result {
        Ok(deals) => shared.publish(|snapshot| {
            snapshot.pending = false;
            snapshot.error = None;
            snapshot.displayed = deals;
        }),
        Err(error) => {
            tracing::warn!(%error, term = %term, "search failed");
            shared.publish(|snapshot| {
                snapshot.pending = false;
                snapshot.error = Some(user_message(&error));
            });
        }
    }
    drop(st);
}
