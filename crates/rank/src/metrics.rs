// Metrics hooks for the `rank` crate.
//
// Callers install a global `RankMetrics` implementation via
// [`set_rank_metrics`], then `Ranker` reports per-session latency and
// candidate/match counts for every drive loop. This keeps instrumentation
// decoupled from any specific metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Metrics observer for ranking sessions.
pub trait RankMetrics: Send + Sync {
    /// Record the outcome of one ranking session.
    ///
    /// `query_len` is the char length of the session query, `latency` is
    /// the wall-clock duration of the drive loop, `candidates` is the
    /// number of candidates offered by the source, and `matched` is the
    /// number accepted before any limit was applied on emission.
    fn record_session(&self, query_len: usize, latency: Duration, candidates: usize, matched: usize);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn RankMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn RankMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn RankMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global rank metrics recorder.
///
/// Typically called once during startup so all `Ranker` instances share
/// the same metrics backend.
pub fn set_rank_metrics(recorder: Option<Arc<dyn RankMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
