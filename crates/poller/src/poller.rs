//! Generic snapshot poller.
//!
//! [`StatusPoller`] fetches an ordered list of entries from a
//! [`SnapshotSource`] on a fixed period and replaces the contents of a
//! shared [`Snapshot`] in place. `start` is idempotent; `stop` cancels
//! the schedule. A failed fetch is logged and skipped, leaving the
//! previous snapshot intact until the next tick.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_util::sync::CancellationToken;

/// Source of snapshot data: one async fetch returning an ordered list.
///
/// The poller treats entries as opaque; their shape is defined entirely
/// by the source.
#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    type Item: Send + Sync + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch a fresh snapshot. Entry order is preserved on apply.
    async fn fetch(&self) -> Result<Vec<Self::Item>, Self::Error>;
}

/// Cloneable handle to a poller's shared entry collection.
///
/// All clones point at the same underlying collection, which is created
/// once per poller and never replaced. Refreshes swap the contents in a
/// single assignment under the write lock, so a reader never observes a
/// half-applied snapshot.
#[derive(Debug)]
pub struct Snapshot<T> {
    entries: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Snapshot<T> {
    fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Read access to the current entries.
    pub async fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.entries.read().await
    }

    /// Number of entries in the current snapshot.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the current snapshot is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Whether two handles share the same underlying collection.
    pub fn same_collection(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<T: Clone> Snapshot<T> {
    /// Copy of the current entries, in snapshot order.
    pub async fn to_vec(&self) -> Vec<T> {
        self.entries.read().await.clone()
    }
}

/// Errors from poller configuration.
#[derive(Debug, thiserror::Error)]
pub enum PollerError {
    /// The configured poll period is not a positive duration.
    #[error("poll period must be positive, got {0:?}")]
    InvalidPeriod(Duration),
}

/// Polls a [`SnapshotSource`] on a fixed period and keeps a shared
/// [`Snapshot`] up to date.
///
/// Created once at application startup, wrapped in an `Arc`, and
/// started with [`StatusPoller::start`]. Each tick spawns its fetch so
/// a slow round-trip never delays the schedule; a monotonic fetch
/// sequence ensures a late response can never overwrite a newer one.
pub struct StatusPoller<S: SnapshotSource> {
    /// Short name used in log lines (e.g. `executors`).
    name: String,
    source: S,
    period: Duration,
    snapshot: Snapshot<S::Item>,
    started: AtomicBool,
    /// Sequence number of the most recently issued fetch.
    issued_seq: AtomicU64,
    /// Sequence number of the most recently applied response. Written
    /// only while holding the snapshot write lock.
    applied_seq: AtomicU64,
    /// Cancelled by `stop()`; ends the polling task.
    cancel: CancellationToken,
}

impl<S: SnapshotSource> StatusPoller<S> {
    /// Create a poller. Nothing is scheduled until [`start`](Self::start).
    pub fn new(name: impl Into<String>, source: S, period: Duration) -> Self {
        Self {
            name: name.into(),
            source,
            period,
            snapshot: Snapshot::new(),
            started: AtomicBool::new(false),
            issued_seq: AtomicU64::new(0),
            applied_seq: AtomicU64::new(0),
            cancel: CancellationToken::new(),
        }
    }

    /// Handle to the shared entry collection.
    ///
    /// The handle stays valid for the poller's lifetime; clones taken
    /// before `start` observe every later refresh.
    pub fn snapshot(&self) -> Snapshot<S::Item> {
        self.snapshot.clone()
    }

    /// Configured poll period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether `start` has been called successfully.
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Start polling: one immediate fetch, then one every period.
    ///
    /// Idempotent -- a second call logs at info and schedules nothing.
    /// Fails fast with [`PollerError::InvalidPeriod`] for a zero period
    /// instead of scheduling a busy loop.
    pub fn start(self: &Arc<Self>) -> Result<(), PollerError> {
        if self.period.is_zero() {
            return Err(PollerError::InvalidPeriod(self.period));
        }

        if self.started.swap(true, Ordering::SeqCst) {
            tracing::info!(poller = %self.name, "Status poller already started");
            return Ok(());
        }

        tracing::info!(
            poller = %self.name,
            period_secs = self.period.as_secs(),
            "Starting status poller"
        );

        let poller = Arc::clone(self);
        tokio::spawn(async move { poller.run().await });
        Ok(())
    }

    /// Stop polling. In-flight fetches are allowed to finish; no new
    /// ticks fire afterwards. There is no restart -- `start` after
    /// `stop` remains a no-op.
    pub fn stop(&self) {
        tracing::info!(poller = %self.name, "Stopping status poller");
        self.cancel.cancel();
    }

    /// Tick loop. The first interval tick fires immediately, giving the
    /// eager initial fetch.
    async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.period);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!(poller = %self.name, "Status poller stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let seq = self.issued_seq.fetch_add(1, Ordering::SeqCst) + 1;
                    let poller = Arc::clone(&self);
                    tokio::spawn(async move { poller.refresh(seq).await });
                }
            }
        }
    }

    /// One fetch-and-apply cycle.
    async fn refresh(&self, seq: u64) {
        tracing::debug!(poller = %self.name, seq, "Fetching snapshot");

        match self.source.fetch().await {
            Ok(entries) => self.apply(seq, entries).await,
            Err(e) => {
                // Skip the tick; the interval owns the schedule and
                // fires again regardless.
                tracing::warn!(
                    poller = %self.name,
                    seq,
                    error = %e,
                    "Snapshot fetch failed, keeping previous entries"
                );
            }
        }
    }

    /// Replace the snapshot contents unless a newer response has
    /// already been applied.
    async fn apply(&self, seq: u64, entries: Vec<S::Item>) {
        let mut guard = self.snapshot.entries.write().await;

        if seq <= self.applied_seq.load(Ordering::SeqCst) {
            tracing::debug!(poller = %self.name, seq, "Discarding stale snapshot response");
            return;
        }
        self.applied_seq.store(seq, Ordering::SeqCst);

        tracing::debug!(
            poller = %self.name,
            seq,
            count = entries.len(),
            "Snapshot refreshed"
        );
        *guard = entries;
    }
}
