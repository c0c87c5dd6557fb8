//! # pathsieve ranking driver
//!
//! Sits on top of the scoring engine (`score`) and turns a lazy stream of
//! candidates into an ordered result set. It is responsible for invoking
//! the scorer once per candidate, discarding non-matches, keeping at most
//! `limit` results in a bounded min-structure, and emitting accepted
//! candidates in score order — descending score, then ascending structural
//! distance to the reference path, then unspecified.
//!
//! ## Core Types
//!
//! - [`Candidate`]: anything exposing matchable text; implemented for
//!   string types and for [`PayloadItem`] when a caller payload must ride
//!   along.
//! - [`RankConfig`]: per-session knobs — result limit, worker threads.
//! - [`Ranker`]: the driver. Sequential ([`Ranker::rank`]), fallible
//!   ([`Ranker::try_rank`]), and, behind the `parallel` feature, parallel
//!   ([`Ranker::par_rank`]) drive loops share one accumulation path, so
//!   the emitted order never depends on arrival order.
//! - [`Matched`]: an accepted candidate with its score and optional
//!   diagnostics.
//!
//! ## Example
//!
//! ```
//! use rank::{RankConfig, Ranker};
//! use score::MatchOptions;
//!
//! let ranker = Ranker::new("fb", MatchOptions::default(), RankConfig::default())
//!     .expect("valid session");
//! let matches = ranker.rank(vec!["fbar", "barfoo", "foo/foo_bar"]);
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[0].item, "fbar");
//! ```
//!
//! ## Observability
//!
//! Install a [`RankMetrics`] implementation via [`set_rank_metrics`] to
//! record per-session latency, candidate counts, and match counts; this is
//! typically done once at startup so every `Ranker` shares the same
//! backend.

mod engine;
mod metrics;
mod source;
mod types;

pub use crate::engine::Ranker;
pub use crate::metrics::{set_rank_metrics, RankMetrics};
pub use crate::source::{Candidate, PayloadItem};
pub use crate::types::{Matched, RankConfig, RankError};
