//! Scoring and ranking must be bit-for-bit reproducible: same inputs,
//! same options, same output, across calls and across fresh scorers.

use pathsieve::{rank_paths, MatchOptions, Query, RankConfig, Scorer};

fn corpus() -> Vec<String> {
    (0..64)
        .map(|i| format!("src/widget{i}/mod_{i}.rs"))
        .chain([
            "fbar".to_string(),
            "foo/fbar".to_string(),
            "foo/foo_bar".to_string(),
            "foo/FooBar".to_string(),
            "foob/ar".to_string(),
        ])
        .collect()
}

#[test]
fn repeated_scoring_is_bit_identical() {
    let options = MatchOptions::default();
    let query = Query::new("fob", &options);
    let mut scorer = Scorer::new();

    for candidate in corpus() {
        let Some(first) = scorer.score(&query, &candidate, &options) else {
            continue;
        };
        for _ in 0..10 {
            let again = scorer
                .score(&query, &candidate, &options)
                .expect("same candidate must still match");
            assert_eq!(first.to_bits(), again.to_bits(), "for {candidate:?}");
        }
        // A fresh scorer carries no state over from previous calls.
        let fresh = Scorer::new()
            .score(&query, &candidate, &options)
            .expect("same candidate must still match");
        assert_eq!(first.to_bits(), fresh.to_bits(), "for {candidate:?}");
    }
}

#[test]
fn match_info_is_reproducible() {
    let options = MatchOptions::default().with_want_match_info(true);
    let query = Query::new("fb", &options);
    let mut scorer = Scorer::new();

    let first = scorer
        .match_info(&query, "foo/foo_bar", &options)
        .expect("should match");
    let again = scorer
        .match_info(&query, "foo/foo_bar", &options)
        .expect("should match");
    assert_eq!(first, again);
}

#[test]
fn full_sessions_are_reproducible() {
    let run = || {
        rank_paths(
            "fb",
            MatchOptions::default().with_reference("foo/open.rs"),
            RankConfig::default(),
            corpus(),
        )
        .expect("valid session")
        .into_iter()
        .map(|m| (m.item, m.score.to_bits()))
        .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}
