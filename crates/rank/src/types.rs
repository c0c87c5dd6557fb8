use score::{MatchInfo, OptionsError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for one ranking session.
///
/// Cheap to clone and serde-friendly so it can be embedded in higher-level
/// configs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RankConfig {
    /// Maximum number of results retained and emitted. `None` keeps every
    /// match. When set, the driver maintains a bounded min-structure
    /// rather than sorting the full candidate set.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Number of scoring worker threads for the parallel drive loop.
    /// `None` uses the global pool. Ignored by the sequential loops.
    #[serde(default)]
    pub threads: Option<usize>,
}

impl RankConfig {
    /// Validate the configuration for a single session.
    pub fn validate(&self) -> Result<(), RankError> {
        if self.limit == Some(0) {
            return Err(RankError::InvalidConfig(
                "limit must be greater than zero when set".into(),
            ));
        }
        if self.threads == Some(0) {
            return Err(RankError::InvalidConfig(
                "threads must be greater than zero when set".into(),
            ));
        }
        Ok(())
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}

/// An accepted candidate, its score, and optional diagnostics.
///
/// `info` is populated only when the session options request match info.
#[derive(Debug, Clone, PartialEq)]
pub struct Matched<T> {
    pub item: T,
    pub score: f64,
    pub info: Option<MatchInfo>,
}

/// Errors produced by the ranking layer.
#[derive(Debug, Error)]
pub enum RankError {
    /// Invalid rank configuration for this session.
    #[error("invalid rank config: {0}")]
    InvalidConfig(String),
    /// Invalid match options for this session.
    #[error("invalid match options: {0}")]
    Options(#[from] OptionsError),
    /// The candidate source reported a failure; results are discarded and
    /// the failure is surfaced instead of silently truncating.
    #[error("candidate source failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    /// The dedicated scoring thread pool could not be built.
    #[error("failed to build scoring thread pool: {0}")]
    ThreadPool(String),
}
