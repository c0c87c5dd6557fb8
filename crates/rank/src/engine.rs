use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::time::Instant;

use boundary::path_distance;
use score::{MatchInfo, MatchOptions, Query, Scorer};
use tracing::{debug, span, Level};

use crate::metrics::metrics_recorder;
use crate::source::Candidate;
use crate::types::{Matched, RankConfig, RankError};

/// Driver for one ranking session.
///
/// Holds the prepared query, the immutable match options, and the rank
/// configuration. All drive loops are read-only over `self`, so a
/// `Ranker` can be shared freely across threads.
#[derive(Debug)]
pub struct Ranker {
    query: Query,
    options: MatchOptions,
    config: RankConfig,
}

impl Ranker {
    /// Construct a session driver, validating options and config.
    pub fn new(
        query_text: &str,
        options: MatchOptions,
        config: RankConfig,
    ) -> Result<Self, RankError> {
        options.validate()?;
        config.validate()?;
        let query = Query::new(query_text, &options);
        Ok(Self {
            query,
            options,
            config,
        })
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Score every candidate and return the accepted ones in rank order.
    pub fn rank<I>(&self, candidates: I) -> Vec<Matched<I::Item>>
    where
        I: IntoIterator,
        I::Item: Candidate,
    {
        self.rank_with_cancel(candidates, &AtomicBool::new(false))
    }

    /// Like [`rank`](Self::rank), stopping early once `cancel` is set.
    ///
    /// A cancelled session returns the results accumulated so far; the
    /// partial set still satisfies the full ordering rule.
    pub fn rank_with_cancel<I>(&self, candidates: I, cancel: &AtomicBool) -> Vec<Matched<I::Item>>
    where
        I: IntoIterator,
        I::Item: Candidate,
    {
        let span = span!(Level::DEBUG, "rank.session", query_len = self.query.len());
        let _guard = span.enter();
        let start = Instant::now();
        let mut scorer = Scorer::new();
        let mut acc = TopK::new(self.config.limit);
        let mut seen = 0usize;
        for item in candidates {
            if cancel.load(AtomicOrdering::Relaxed) {
                break;
            }
            seen += 1;
            if let Some(entry) = self.score_item(&mut scorer, item) {
                acc.insert(entry);
            }
        }
        self.finish(start, seen, acc)
    }

    /// Drive a fallible candidate source.
    ///
    /// The first source error aborts the session and is propagated;
    /// silently truncating the result set would misreport the corpus.
    pub fn try_rank<T, E, I>(&self, candidates: I) -> Result<Vec<Matched<T>>, RankError>
    where
        T: Candidate,
        E: std::error::Error + Send + Sync + 'static,
        I: IntoIterator<Item = Result<T, E>>,
    {
        let span = span!(Level::DEBUG, "rank.session", query_len = self.query.len());
        let _guard = span.enter();
        let start = Instant::now();
        let mut scorer = Scorer::new();
        let mut acc = TopK::new(self.config.limit);
        let mut seen = 0usize;
        for result in candidates {
            let item = result.map_err(|err| RankError::Source(Box::new(err)))?;
            seen += 1;
            if let Some(entry) = self.score_item(&mut scorer, item) {
                acc.insert(entry);
            }
        }
        Ok(self.finish(start, seen, acc))
    }

    /// Rank, then hand each accepted candidate to `consume` in rank order.
    ///
    /// Diagnostics are passed only when the session options request match
    /// info. Already-emitted results are never revisited or mutated.
    pub fn for_each_match<I, F>(&self, candidates: I, mut consume: F)
    where
        I: IntoIterator,
        I::Item: Candidate,
        F: FnMut(I::Item, Option<&MatchInfo>),
    {
        for matched in self.rank(candidates) {
            consume(matched.item, matched.info.as_ref());
        }
    }

    fn score_item<T: Candidate>(&self, scorer: &mut Scorer, item: T) -> Option<Ranked<T>> {
        let (score, info, dist) = {
            let text = item.matchable_text();
            if !self.options.match_reference
                && !self.options.reference.is_empty()
                && text == self.options.reference
            {
                return None;
            }
            let (score, info) = if self.options.want_match_info {
                let info = scorer.match_info(&self.query, text, &self.options)?;
                (info.score, Some(info))
            } else {
                (scorer.score(&self.query, text, &self.options)?, None)
            };
            let dist = path_distance(text, &self.options.reference, self.options.path_separator);
            (score, info, dist)
        };
        Some(Ranked {
            score,
            dist,
            item,
            info,
        })
    }

    fn finish<T>(&self, start: Instant, seen: usize, acc: TopK<T>) -> Vec<Matched<T>> {
        let matched = acc.accepted();
        let results = acc.into_sorted();
        let latency = start.elapsed();
        debug!(
            candidates = seen,
            matched,
            emitted = results.len(),
            elapsed_micros = latency.as_micros() as u64,
            "rank_session_complete"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_session(self.query.len(), latency, seen, matched);
        }
        results
            .into_iter()
            .map(|entry| Matched {
                item: entry.item,
                score: entry.score,
                info: entry.info,
            })
            .collect()
    }
}

#[cfg(feature = "parallel")]
impl Ranker {
    /// Score candidates on a rayon pool and return ranked results.
    ///
    /// Emitted order is identical to the sequential loops: scoring is pure
    /// and the ordering rule is applied after accumulation, so arrival
    /// interleaving never leaks into the output.
    pub fn par_rank<I>(&self, candidates: I) -> Result<Vec<Matched<I::Item>>, RankError>
    where
        I: IntoIterator + Send,
        I::IntoIter: Send,
        I::Item: Candidate + Send,
    {
        self.par_rank_with_cancel(candidates, &AtomicBool::new(false))
    }

    /// Like [`par_rank`](Self::par_rank), stopping early once `cancel` is
    /// set.
    pub fn par_rank_with_cancel<I>(
        &self,
        candidates: I,
        cancel: &AtomicBool,
    ) -> Result<Vec<Matched<I::Item>>, RankError>
    where
        I: IntoIterator + Send,
        I::IntoIter: Send,
        I::Item: Candidate + Send,
    {
        use std::sync::atomic::AtomicUsize;
        use std::sync::Mutex;

        use rayon::iter::{ParallelBridge, ParallelIterator};

        let span = span!(
            Level::DEBUG,
            "rank.session",
            query_len = self.query.len(),
            parallel = true
        );
        let _guard = span.enter();
        let start = Instant::now();
        let acc = Mutex::new(TopK::new(self.config.limit));
        let seen = AtomicUsize::new(0);

        let run = || {
            candidates
                .into_iter()
                .par_bridge()
                .map_init(Scorer::new, |scorer, item| {
                    if cancel.load(AtomicOrdering::Relaxed) {
                        return None;
                    }
                    seen.fetch_add(1, AtomicOrdering::Relaxed);
                    self.score_item(scorer, item)
                })
                .for_each(|entry| {
                    if let Some(entry) = entry {
                        // The lock covers insert/evict only, never scoring.
                        let mut acc = acc.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                        acc.insert(entry);
                    }
                });
        };

        match self.config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|err| RankError::ThreadPool(err.to_string()))?
                .install(run),
            None => run(),
        }

        let acc = acc
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(self.finish(start, seen.load(AtomicOrdering::Relaxed), acc))
    }
}

struct Ranked<T> {
    score: f64,
    dist: usize,
    item: T,
    info: Option<MatchInfo>,
}

impl<T> Ranked<T> {
    /// Rank key: score descending, then reference distance ascending.
    /// `Greater` means "ranks higher". Order beyond the key is
    /// deliberately unspecified.
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.dist.cmp(&self.dist))
    }
}

impl<T> PartialEq for Ranked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Ranked<T> {}

impl<T> PartialOrd for Ranked<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.key_cmp(other))
    }
}

impl<T> Ord for Ranked<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other)
    }
}

/// Accumulator for accepted candidates.
///
/// Unbounded sessions collect into a vector sorted once at the end;
/// bounded sessions keep the best `limit` entries in a min-heap, evicting
/// the worst kept entry whenever a better one arrives.
enum TopK<T> {
    All {
        entries: Vec<Ranked<T>>,
        accepted: usize,
    },
    Bounded {
        limit: usize,
        heap: BinaryHeap<Reverse<Ranked<T>>>,
        accepted: usize,
    },
}

impl<T> TopK<T> {
    fn new(limit: Option<usize>) -> Self {
        match limit {
            None => TopK::All {
                entries: Vec::new(),
                accepted: 0,
            },
            Some(limit) => TopK::Bounded {
                limit,
                heap: BinaryHeap::with_capacity(limit + 1),
                accepted: 0,
            },
        }
    }

    fn insert(&mut self, entry: Ranked<T>) {
        match self {
            TopK::All { entries, accepted } => {
                *accepted += 1;
                entries.push(entry);
            }
            TopK::Bounded {
                limit,
                heap,
                accepted,
            } => {
                *accepted += 1;
                if heap.len() < *limit {
                    heap.push(Reverse(entry));
                } else if let Some(Reverse(worst)) = heap.peek() {
                    if entry.key_cmp(worst) == Ordering::Greater {
                        heap.pop();
                        heap.push(Reverse(entry));
                    }
                }
            }
        }
    }

    fn accepted(&self) -> usize {
        match self {
            TopK::All { accepted, .. } | TopK::Bounded { accepted, .. } => *accepted,
        }
    }

    fn into_sorted(self) -> Vec<Ranked<T>> {
        match self {
            TopK::All { mut entries, .. } => {
                entries.sort_unstable_by(|a, b| b.key_cmp(a));
                entries
            }
            TopK::Bounded { heap, .. } => heap
                .into_sorted_vec()
                .into_iter()
                .map(|Reverse(entry)| entry)
                .collect(),
        }
    }
}
