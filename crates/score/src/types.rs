use serde::{Deserialize, Serialize};

/// Diagnostics for one accepted match.
///
/// Produced only when [`MatchOptions::want_match_info`](crate::MatchOptions)
/// is set; created fresh per scoring call and owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchInfo {
    /// Final score; the total order key for ranking.
    pub score: f64,
    /// Char indices of the candidate characters consumed by the query,
    /// ascending. Intended for highlighting.
    pub positions: Vec<usize>,
    /// Human-readable breakdown of score components. Stable and
    /// debuggable, but not a compatibility surface.
    pub breakdown: String,
}
