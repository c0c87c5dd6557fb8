//! # pathsieve
//!
//! Fuzzy path matching and ranking: given a short query and a large set of
//! path-like candidates, decide which candidates contain the query as an
//! ordered subsequence and rank the matches so the most relevant come
//! first. This is the algorithmic core of an interactive file picker;
//! directory traversal and presentation belong to the caller.
//!
//! The umbrella crate stitches the pipeline stages together:
//!
//! - `boundary` — segments candidates into path components and words, and
//!   measures structural distance between paths.
//! - `score` — the subsequence alignment engine and its options.
//! - `rank` — the driver: filtering, bounded top-K accumulation, parallel
//!   scoring, ordered delivery.
//!
//! ## Example
//!
//! ```
//! use pathsieve::{rank_paths, MatchOptions, RankConfig};
//!
//! let matches = rank_paths(
//!     "fb",
//!     MatchOptions::default(),
//!     RankConfig::default(),
//!     vec!["fbar", "barfoo", "foo/foo_bar"],
//! )
//! .expect("valid session");
//!
//! let texts: Vec<&str> = matches.iter().map(|m| m.item).collect();
//! assert_eq!(texts, vec!["fbar", "foo/foo_bar"]);
//! ```
//!
//! ## Ordering guarantees
//!
//! Matches are emitted by score descending, then by structural distance to
//! the configured reference path ascending. Order beyond that key is
//! deliberately unspecified: two candidates with equal score and equal
//! reference distance may appear in either order, and callers must not
//! depend on one.

pub use boundary::{analyze, path_distance, Boundaries};
pub use rank::{
    set_rank_metrics, Candidate, Matched, PayloadItem, RankConfig, RankError, RankMetrics, Ranker,
};
pub use score::{CaseMode, MatchInfo, MatchOptions, OptionsError, Query, Scorer};

mod config;

pub use crate::config::{ConfigError, SessionConfig};

/// Rank `candidates` against `query` in one call.
///
/// Convenience wrapper over [`Ranker`] for callers that do not reuse the
/// session across candidate sources.
pub fn rank_paths<I>(
    query: &str,
    options: MatchOptions,
    config: RankConfig,
    candidates: I,
) -> Result<Vec<Matched<I::Item>>, RankError>
where
    I: IntoIterator,
    I::Item: Candidate,
{
    Ok(Ranker::new(query, options, config)?.rank(candidates))
}

/// Invoke `consume` for every match of `query`, in rank order.
///
/// Diagnostics are passed to the callback only when
/// [`MatchOptions::want_match_info`] is set.
pub fn for_each_match<I, F>(
    query: &str,
    options: MatchOptions,
    candidates: I,
    consume: F,
) -> Result<(), RankError>
where
    I: IntoIterator,
    I::Item: Candidate,
    F: FnMut(I::Item, Option<&MatchInfo>),
{
    Ranker::new(query, options, RankConfig::default())?.for_each_match(candidates, consume);
    Ok(())
}
