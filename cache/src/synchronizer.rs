//! Cache synchronizer
//! ------------------
//! Owns the local mirror of the user's shopping lists. It is responsible
//! for:
//!
//!  - full-replace refreshes, manual or on a timer; a failed refresh never
//!    touches the last good snapshot
//!  - keeping the in-memory copy and the persisted copy identical after
//!    every successful refresh (persist first, then swap, one lock)
//!  - discarding stale completions: each refresh carries a monotonic issue
//!    number and only the highest one seen may apply
//!  - deterministic auto-sync teardown: once `stop_auto_sync` returns, no
//!    new refresh is spawned; already-spawned ones finish normally
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn, Instrument};

use api::types::ShoppingList;
use common::logger::child_span;
use store::{keys, StateStore};

use crate::error::SyncError;
use crate::source::ListSource;

/// Default refresh period when auto-sync is enabled.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_millis(15_000);

/// Snapshot and the issue number of the refresh that produced it, under
/// one lock so a reader never sees them out of step.
struct SnapshotState {
    lists: Option<Vec<ShoppingList>>,
    applied_seq: u64,
}

struct AutoSyncHandle {
    task: JoinHandle<()>,
    stopped: Arc<parking_lot::Mutex<bool>>,
}

struct Inner<S, L> {
    source: Arc<L>,
    store: Arc<S>,
    state: tokio::sync::Mutex<SnapshotState>,
    /// Monotonic issue counter for refresh attempts.
    issued: AtomicU64,
    auto: parking_lot::Mutex<Option<AutoSyncHandle>>,
}

/// Cheap-to-clone handle; clones share one snapshot and one timer.
pub struct CacheSynchronizer<S, L> {
    inner: Arc<Inner<S, L>>,
}

impl<S, L> Clone for CacheSynchronizer<S, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, L> CacheSynchronizer<S, L>
where
    S: StateStore + 'static,
    L: ListSource + 'static,
{
    pub fn new(source: Arc<L>, store: Arc<S>) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                store,
                state: tokio::sync::Mutex::new(SnapshotState {
                    lists: None,
                    applied_seq: 0,
                }),
                issued: AtomicU64::new(0),
                auto: parking_lot::Mutex::new(None),
            }),
        }
    }

    /// Fetch the full list set and replace the snapshot, store first, then
    /// memory. Concurrent refreshes are not deduplicated; the issue number
    /// decides, and a completion older than what is already applied is
    /// discarded (the currently applied snapshot is returned instead).
    pub async fn refresh(&self) -> Result<Vec<ShoppingList>, SyncError> {
        let seq = self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let lists = self.inner.source.fetch_all().await?;

        let mut state = self.inner.state.lock().await;
        if seq <= state.applied_seq {
            debug!(
                issued = seq,
                applied = state.applied_seq,
                "discarding stale refresh completion"
            );
            return Ok(state.lists.clone().unwrap_or_default());
        }

        let raw = serde_json::to_string(&lists).map_err(|e| SyncError::Store(e.into()))?;
        self.inner.store.put(keys::SHOPPING_LISTS, &raw).await?;

        state.lists = Some(lists.clone());
        state.applied_seq = seq;
        debug!(count = lists.len(), seq, "snapshot replaced");

        Ok(lists)
    }

    /// Load the persisted snapshot into memory without contacting the
    /// server. Unparsable persisted data reads as absent. Returns whether
    /// a snapshot is now present.
    pub async fn hydrate(&self) -> Result<bool, SyncError> {
        let mut state = self.inner.state.lock().await;
        if state.lists.is_some() {
            return Ok(true);
        }

        let Some(raw) = self.inner.store.get(keys::SHOPPING_LISTS).await? else {
            return Ok(false);
        };

        match serde_json::from_str::<Vec<ShoppingList>>(&raw) {
            Ok(lists) => {
                debug!(count = lists.len(), "snapshot hydrated from store");
                state.lists = Some(lists);
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "persisted snapshot is unparsable; ignoring it");
                Ok(false)
            }
        }
    }

    /// Cache-first startup: hydrate from the store, refresh only when
    /// nothing was persisted.
    pub async fn bootstrap(&self) -> Result<Vec<ShoppingList>, SyncError> {
        if self.hydrate().await? {
            let state = self.inner.state.lock().await;
            Ok(state.lists.clone().unwrap_or_default())
        } else {
            self.refresh().await
        }
    }

    /// The current snapshot; `None` means never loaded.
    pub async fn snapshot(&self) -> Option<Vec<ShoppingList>> {
        self.inner.state.lock().await.lists.clone()
    }

    /// Case-insensitive name filter over the snapshot.
    pub async fn search(&self, term: &str) -> Vec<ShoppingList> {
        let needle = term.to_lowercase();
        let state = self.inner.state.lock().await;
        state
            .lists
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|l| l.shopping_list_name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub async fn cached_list(&self, id: i64) -> Result<ShoppingList, SyncError> {
        let state = self.inner.state.lock().await;
        state
            .lists
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|l| l.shopping_list_id == id)
            .cloned()
            .ok_or(SyncError::CacheMiss(id))
    }

    /// The list from the snapshot, falling back to the server on a miss.
    pub async fn list_detail(&self, id: i64) -> Result<ShoppingList, SyncError> {
        match self.cached_list(id).await {
            Ok(list) => Ok(list),
            Err(SyncError::CacheMiss(_)) => {
                debug!(list_id = id, "snapshot miss; fetching list from server");
                Ok(self.inner.source.fetch_by_id(id).await?)
            }
            Err(e) => Err(e),
        }
    }

    /// Start the repeating refresh timer. The first tick fires one full
    /// period after start; a slow refresh never delays the timer (each
    /// tick spawns the refresh detached) and missed ticks are skipped, not
    /// bursted. A live timer is replaced, never doubled.
    pub fn start_auto_sync(&self, every: Duration) {
        self.stop_auto_sync();

        let stopped = Arc::new(parking_lot::Mutex::new(false));
        let flag = Arc::clone(&stopped);
        let sync = self.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                // Checking the flag and spawning happen under one lock
                // acquisition, so a stop that has returned can no longer
                // be overtaken by a spawn from this tick.
                let guard = flag.lock();
                if *guard {
                    break;
                }
                let sync = sync.clone();
                tokio::spawn(
                    async move {
                        if let Err(e) = sync.refresh().await {
                            warn!(error = %e, "auto-sync refresh failed");
                        }
                    }
                    .instrument(child_span("auto_sync_refresh")),
                );
                drop(guard);
            }
        });

        *self.inner.auto.lock() = Some(AutoSyncHandle { task, stopped });
        info!(every_ms = every.as_millis() as u64, "auto-sync started");
    }

    /// Deterministic cancellation of the timer only: after this returns no
    /// new refresh is spawned. A refresh already in flight completes and
    /// applies normally, subject to the issue-number guard.
    pub fn stop_auto_sync(&self) {
        if let Some(handle) = self.inner.auto.lock().take() {
            *handle.stopped.lock() = true;
            handle.task.abort();
            info!("auto-sync stopped");
        }
    }

    /// Logout path: stop the timer, drop the in-memory snapshot, and
    /// advance the applied sequence past every attempt issued so far so
    /// that refreshes in flight at this moment land stale and are
    /// discarded. Persisted keys are the token keeper's to remove.
    pub async fn invalidate(&self) {
        self.stop_auto_sync();

        let mut state = self.inner.state.lock().await;
        let count = state.lists.as_deref().map(<[_]>::len).unwrap_or(0);
        state.lists = None;
        state.applied_seq = self.inner.issued.load(Ordering::SeqCst);

        info!(count, "list snapshot invalidated");
    }
}
