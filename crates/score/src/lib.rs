//! # pathsieve scoring engine
//!
//! Decides, for one (query, candidate) pair, whether the query is a
//! subsequence of the candidate under the active case policy, and if so
//! assigns a totally ordered score rewarding the alignments a person
//! scanning a file list would consider best.
//!
//! ## Core Types
//!
//! - [`MatchOptions`]: per-session configuration — case mode, diagnostics
//!   toggle, reference path, path separator.
//! - [`Query`]: the query prepared once per session (original and
//!   case-folded characters, resolved case sensitivity).
//! - [`Scorer`]: reusable scoring state; one per worker thread. Scoring is
//!   a pure function of its inputs, so independent `Scorer`s may run over
//!   disjoint candidates in parallel.
//! - [`MatchInfo`]: optional per-match diagnostics — score, matched char
//!   positions, and a human-readable breakdown of score components.
//!
//! ## Scoring model
//!
//! The engine searches all subsequence alignments with a dynamic program
//! over candidate positions and picks the alignment maximizing the sum of
//! a small weight table: word-start and basename-start bonuses, a
//! compounding contiguity bonus, an adjacent-word bonus that decays with
//! skipped words, penalties for scattered mid-word hits and for crossing
//! path components, a dominant bonus for consuming the whole query as an
//! unbroken basename prefix, and a small penalty per trailing unmatched
//! character. The exact weights live in `engine.rs`; only the resulting
//! *order* of candidates is a compatibility surface.
//!
//! ## Example
//!
//! ```
//! use score::{MatchOptions, Query, Scorer};
//!
//! let options = MatchOptions::default();
//! let query = Query::new("fb", &options);
//! let mut scorer = Scorer::new();
//!
//! let full_prefix = scorer.score(&query, "fbar", &options).unwrap();
//! let boundary = scorer.score(&query, "foo_bar", &options).unwrap();
//! assert!(full_prefix > boundary);
//! assert!(scorer.score(&query, "barfoo", &options).is_none());
//! ```

mod config;
mod engine;
mod types;

pub use crate::config::{CaseMode, MatchOptions, OptionsError};
pub use crate::engine::{Query, Scorer};
pub use crate::types::MatchInfo;
