use boundary::{analyze, Boundaries};

use crate::config::{CaseMode, MatchOptions};
use crate::types::MatchInfo;

#[cfg(test)]
mod tests;

// Weight table for the alignment search. One conforming assignment of the
// observable ordering constraints; the weights themselves are not a
// compatibility surface, only the order of candidates they induce is.
const WORD_START_BONUS: f64 = 40.0;
const BASENAME_START_BONUS: f64 = 40.0;
const CONSECUTIVE_BONUS: f64 = 30.0;
const CONSECUTIVE_COMPOUND: f64 = 4.0;
const ADJACENT_WORD_BONUS: f64 = 16.0;
const WORD_SKIP_DECAY: f64 = 8.0;
const COMPONENT_CROSS_PENALTY: f64 = 20.0;
const GAP_PENALTY_CAP: f64 = 15.0;
const FULL_PREFIX_BONUS: f64 = 100.0;
const FULL_PREFIX_PER_CHAR: f64 = 30.0;
const TRAILING_PENALTY: f64 = 0.5;
const TRAILING_PENALTY_CAP: f64 = 30.0;

/// A query prepared once per match session.
///
/// Holds the original and case-folded characters plus the case sensitivity
/// resolved from the configured [`CaseMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    chars: Vec<char>,
    folded: Vec<char>,
    case_sensitive: bool,
}

impl Query {
    pub fn new(text: &str, options: &MatchOptions) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let case_sensitive = match options.case_mode {
            CaseMode::Sensitive => true,
            CaseMode::Insensitive => false,
            CaseMode::Smart => chars.iter().any(|c| c.is_uppercase()),
        };
        let folded = chars.iter().map(|&c| fold_char(c)).collect();
        Self {
            chars,
            folded,
            case_sensitive,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

#[derive(Clone, Copy)]
struct Cell {
    score: f64,
    streak: u32,
    parent: u32,
}

const NO_PARENT: u32 = u32::MAX;

/// Reusable scoring state.
///
/// Scoring is a pure function of (query, candidate, options); the struct
/// only carries scratch buffers so repeated calls avoid reallocation.
/// Parallel callers create one `Scorer` per worker.
#[derive(Default)]
pub struct Scorer {
    chars: Vec<char>,
    folded: Vec<char>,
    positions: Vec<Vec<u32>>,
    cells: Vec<Vec<Cell>>,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `text` against `query`, or `None` when the query is not a
    /// subsequence of the candidate under the active case policy.
    pub fn score(&mut self, query: &Query, text: &str, options: &MatchOptions) -> Option<f64> {
        if query.is_empty() {
            return Some(0.0);
        }
        self.align(query, text, options).map(|(score, _)| score)
    }

    /// Like [`score`](Self::score), but also reports matched positions and
    /// a human-readable breakdown of score components.
    pub fn match_info(
        &mut self,
        query: &Query,
        text: &str,
        options: &MatchOptions,
    ) -> Option<MatchInfo> {
        if query.is_empty() {
            return Some(MatchInfo {
                score: 0.0,
                positions: Vec::new(),
                breakdown: "empty query".to_string(),
            });
        }
        let (score, positions) = self.align(query, text, options)?;
        let bounds = analyze(&self.chars, options.path_separator);
        let parts = Parts::from_alignment(&bounds, self.chars.len(), &positions);
        debug_assert!((parts.total() - score).abs() < 1e-6);
        Some(MatchInfo {
            score,
            positions,
            breakdown: parts.render(),
        })
    }

    /// Finds the maximum-score subsequence alignment of a non-empty query.
    ///
    /// Dynamic program over the candidate positions at which each query
    /// character can land; the full-basename-prefix alignment is scored
    /// separately because its bonus is a property of the whole alignment,
    /// which a per-cell maximum cannot carry.
    fn align(
        &mut self,
        query: &Query,
        text: &str,
        options: &MatchOptions,
    ) -> Option<(f64, Vec<usize>)> {
        let m = query.len();
        self.chars.clear();
        self.chars.extend(text.chars());
        let n = self.chars.len();
        if n == 0 || m > n {
            return None;
        }
        self.folded.clear();
        self.folded.extend(self.chars.iter().map(|&c| fold_char(c)));
        let bounds = analyze(&self.chars, options.path_separator);

        while self.positions.len() < m {
            self.positions.push(Vec::new());
            self.cells.push(Vec::new());
        }

        // Candidate positions per query char, restricted to the window in
        // which a full alignment is still feasible.
        for i in 0..m {
            let qc = query.chars[i];
            let qf = query.folded[i];
            let sensitive = query.case_sensitive;
            let chars = &self.chars;
            let folded = &self.folded;
            let row = &mut self.positions[i];
            row.clear();
            for j in i..=(n - m + i) {
                let hit = if sensitive {
                    chars[j] == qc
                } else {
                    folded[j] == qf
                };
                if hit {
                    row.push(j as u32);
                }
            }
            if row.is_empty() {
                return None;
            }
        }

        self.cells[0].clear();
        for &j in &self.positions[0] {
            self.cells[0].push(Cell {
                score: char_bonus(&bounds, j as usize),
                streak: 1,
                parent: NO_PARENT,
            });
        }

        for i in 1..m {
            let (done, rest) = self.cells.split_at_mut(i);
            let prev_cells = &done[i - 1];
            let prev_pos = &self.positions[i - 1];
            let cur = &mut rest[0];
            cur.clear();
            for &j in &self.positions[i] {
                let j = j as usize;
                let bonus = char_bonus(&bounds, j);
                let mut best = Cell {
                    score: f64::NEG_INFINITY,
                    streak: 1,
                    parent: NO_PARENT,
                };
                for (k_idx, &k) in prev_pos.iter().enumerate() {
                    let k = k as usize;
                    if k >= j {
                        break;
                    }
                    let prev = prev_cells[k_idx];
                    if prev.score == f64::NEG_INFINITY {
                        continue;
                    }
                    let (pair, streak) = if k + 1 == j {
                        (
                            CONSECUTIVE_BONUS + CONSECUTIVE_COMPOUND * f64::from(prev.streak - 1),
                            prev.streak + 1,
                        )
                    } else {
                        (transition(&bounds, k, j), 1)
                    };
                    let score = prev.score + pair + bonus;
                    if score > best.score {
                        best = Cell {
                            score,
                            streak,
                            parent: k_idx as u32,
                        };
                    }
                }
                cur.push(best);
            }
        }

        let last = m - 1;
        let mut best: Option<(f64, usize)> = None;
        for (idx, cell) in self.cells[last].iter().enumerate() {
            if cell.score == f64::NEG_INFINITY {
                continue;
            }
            let j = self.positions[last][idx] as usize;
            let total = cell.score - trailing_penalty(n, j);
            if best.map_or(true, |(s, _)| total > s) {
                best = Some((total, idx));
            }
        }

        let bs = bounds.basename_start();
        let prefix_feasible = bs + m <= n && (0..m).all(|i| self.hit(query, i, bs + i));
        if prefix_feasible {
            let mut s = FULL_PREFIX_BONUS + FULL_PREFIX_PER_CHAR * m as f64;
            for i in 0..m {
                s += char_bonus(&bounds, bs + i);
                if i > 0 {
                    s += CONSECUTIVE_BONUS + CONSECUTIVE_COMPOUND * (i - 1) as f64;
                }
            }
            s -= trailing_penalty(n, bs + m - 1);
            // The prefix alignment wins ties so the trace reflects it.
            if best.map_or(true, |(dp, _)| s >= dp) {
                return Some((s, (bs..bs + m).collect()));
            }
        }

        let (score, mut idx) = best?;
        let mut positions = vec![0usize; m];
        for row in (0..m).rev() {
            positions[row] = self.positions[row][idx] as usize;
            idx = self.cells[row][idx].parent as usize;
        }
        Some((score, positions))
    }

    fn hit(&self, query: &Query, i: usize, j: usize) -> bool {
        if query.case_sensitive {
            self.chars[j] == query.chars[i]
        } else {
            self.folded[j] == query.folded[i]
        }
    }
}

/// Bonus for consuming the candidate character at `j`.
fn char_bonus(bounds: &Boundaries, j: usize) -> f64 {
    if !bounds.is_word_start(j) {
        return 0.0;
    }
    if j == bounds.basename_start() {
        WORD_START_BONUS + BASENAME_START_BONUS
    } else {
        WORD_START_BONUS
    }
}

/// Score contribution of a non-contiguous transition from a match at `k`
/// to the next match at `j`.
fn transition(bounds: &Boundaries, k: usize, j: usize) -> f64 {
    let cross = bounds.component_of(k) != bounds.component_of(j);
    let mut t = 0.0;
    if bounds.is_word_start(j) {
        if !cross {
            let skipped = f64::from(bounds.word_of(j) - bounds.word_of(k) - 1);
            t += (ADJACENT_WORD_BONUS - WORD_SKIP_DECAY * skipped).max(0.0);
        }
    } else {
        t -= ((j - k - 1) as f64).min(GAP_PENALTY_CAP);
    }
    if cross {
        t -= COMPONENT_CROSS_PENALTY;
    }
    t
}

fn trailing_penalty(n: usize, last_match: usize) -> f64 {
    (TRAILING_PENALTY * (n - 1 - last_match) as f64).min(TRAILING_PENALTY_CAP)
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Score components attributed to one concrete alignment; feeds the
/// breakdown string in [`MatchInfo`].
#[derive(Debug, Default, Clone, Copy)]
struct Parts {
    word_start: f64,
    basename: f64,
    consecutive: f64,
    adjacency: f64,
    gap: f64,
    cross: f64,
    full_prefix: f64,
    trailing: f64,
}

impl Parts {
    fn from_alignment(bounds: &Boundaries, n: usize, positions: &[usize]) -> Self {
        let mut parts = Parts::default();
        let mut streak = 1u32;
        for (i, &j) in positions.iter().enumerate() {
            if bounds.is_word_start(j) {
                parts.word_start += WORD_START_BONUS;
                if j == bounds.basename_start() {
                    parts.basename += BASENAME_START_BONUS;
                }
            }
            if i == 0 {
                continue;
            }
            let k = positions[i - 1];
            if k + 1 == j {
                parts.consecutive +=
                    CONSECUTIVE_BONUS + CONSECUTIVE_COMPOUND * f64::from(streak - 1);
                streak += 1;
            } else {
                streak = 1;
                let cross = bounds.component_of(k) != bounds.component_of(j);
                if bounds.is_word_start(j) {
                    if !cross {
                        let skipped = f64::from(bounds.word_of(j) - bounds.word_of(k) - 1);
                        parts.adjacency += (ADJACENT_WORD_BONUS - WORD_SKIP_DECAY * skipped).max(0.0);
                    }
                } else {
                    parts.gap -= ((j - k - 1) as f64).min(GAP_PENALTY_CAP);
                }
                if cross {
                    parts.cross -= COMPONENT_CROSS_PENALTY;
                }
            }
        }
        if let (Some(&first), Some(&last)) = (positions.first(), positions.last()) {
            let m = positions.len();
            if first == bounds.basename_start() && last + 1 == first + m {
                parts.full_prefix = FULL_PREFIX_BONUS + FULL_PREFIX_PER_CHAR * m as f64;
            }
            parts.trailing = -trailing_penalty(n, last);
        }
        parts
    }

    fn total(&self) -> f64 {
        self.word_start
            + self.basename
            + self.consecutive
            + self.adjacency
            + self.gap
            + self.cross
            + self.full_prefix
            + self.trailing
    }

    fn render(&self) -> String {
        use std::fmt::Write as _;

        let mut out = String::new();
        let fields = [
            ("word_start", self.word_start),
            ("basename", self.basename),
            ("consecutive", self.consecutive),
            ("adjacency", self.adjacency),
            ("gap", self.gap),
            ("cross", self.cross),
            ("full_prefix", self.full_prefix),
            ("trailing", self.trailing),
        ];
        for (name, value) in fields {
            if value != 0.0 {
                let _ = write!(out, "{name}={value:+.1} ");
            }
        }
        let _ = write!(out, "total={:.1}", self.total());
        out
    }
}
