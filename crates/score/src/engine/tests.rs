use super::*;

fn score_of(query: &str, candidate: &str) -> Option<f64> {
    let options = MatchOptions::default();
    let query = Query::new(query, &options);
    Scorer::new().score(&query, candidate, &options)
}

fn assert_ranks_above(query: &str, better: &str, worse: &str) {
    let hi = score_of(query, better).expect("better candidate should match");
    let lo = score_of(query, worse).expect("worse candidate should match");
    assert!(
        hi > lo,
        "expected {better:?} ({hi}) to outrank {worse:?} ({lo}) for query {query:?}"
    );
}

#[test]
fn query_must_be_a_subsequence() {
    assert!(score_of("fb", "fbar").is_some());
    assert!(score_of("fb", "barfoo").is_none());
    assert!(score_of("fb", "foo/qux").is_none());
    assert!(score_of("abc", "ab").is_none());
}

#[test]
fn empty_query_matches_everything_with_minimal_score() {
    assert_eq!(score_of("", "anything"), Some(0.0));
    assert_eq!(score_of("", ""), Some(0.0));
}

#[test]
fn empty_candidate_never_matches_a_nonempty_query() {
    assert!(score_of("a", "").is_none());
}

#[test]
fn full_prefix_outranks_boundary_match() {
    assert_ranks_above("fb", "fbar", "foo_bar");
    assert_ranks_above("fb", "fbar", "FooBar");
}

#[test]
fn basename_start_outranks_inner_component_start() {
    assert_ranks_above("a", "x/abc", "abc/x");
}

#[test]
fn consecutive_words_outrank_scattered_words() {
    assert_ranks_above("fb", "foo/foo_bar_test", "foo/foo_test_bar");
}

#[test]
fn crossing_components_is_penalized() {
    assert_ranks_above("fb", "foo_bar", "foo/bar");
}

#[test]
fn fewer_trailing_characters_rank_higher() {
    assert_ranks_above("fb", "foo/foo_bar", "foo/foo_bar_test");
}

#[test]
fn word_start_hit_outranks_pure_scatter() {
    // "ob" lands on two word starts in the first candidate, on none in the
    // second.
    assert_ranks_above("ob", "one_bottle", "foobar");
}

#[test]
fn scattered_mid_word_hits_are_penalized_by_distance() {
    // Neither hit after 'f' lands on a word start; the nearer one loses
    // less to the distance penalty than the farther one gains back from
    // the trailing penalty.
    assert_ranks_above("fr", "fxrxxx", "fxxxxr");
}

#[test]
fn camel_case_boundary_counts_as_word_start() {
    let camel = score_of("fb", "foo/FooBar").expect("camel candidate should match");
    let snake = score_of("fb", "foo/foo_bar").expect("snake candidate should match");
    assert_eq!(camel, snake);
}

#[test]
fn case_insensitive_by_default() {
    assert!(score_of("FB", "fbar").is_some());
    assert!(score_of("fb", "FBAR").is_some());
}

#[test]
fn sensitive_mode_requires_exact_case() {
    let options = MatchOptions::default().with_case_mode(CaseMode::Sensitive);
    let query = Query::new("FB", &options);
    let mut scorer = Scorer::new();
    assert!(scorer.score(&query, "fbar", &options).is_none());
    assert!(scorer.score(&query, "FBar", &options).is_some());
}

#[test]
fn smart_mode_follows_query_case() {
    let options = MatchOptions::default().with_case_mode(CaseMode::Smart);
    let lower = Query::new("fb", &options);
    let upper = Query::new("fB", &options);
    assert!(!lower.is_case_sensitive());
    assert!(upper.is_case_sensitive());

    let mut scorer = Scorer::new();
    assert!(scorer.score(&lower, "FBAR", &options).is_some());
    assert!(scorer.score(&upper, "fbar", &options).is_none());
    assert!(scorer.score(&upper, "fBar", &options).is_some());
}

#[test]
fn scoring_is_idempotent_to_the_bit() {
    let options = MatchOptions::default();
    let query = Query::new("fbt", &options);
    let mut scorer = Scorer::new();
    let first = scorer
        .score(&query, "foo/foo_bar_test", &options)
        .expect("should match");
    for _ in 0..100 {
        let again = scorer
            .score(&query, "foo/foo_bar_test", &options)
            .expect("should match");
        assert_eq!(first.to_bits(), again.to_bits());
    }
}

#[test]
fn match_info_reports_positions_for_highlighting() {
    let options = MatchOptions::default().with_want_match_info(true);
    let query = Query::new("fb", &options);
    let info = Scorer::new()
        .match_info(&query, "foo/foo_bar", &options)
        .expect("should match");
    assert_eq!(info.positions, vec![4, 8]);
}

#[test]
fn match_info_prefers_the_prefix_alignment() {
    let options = MatchOptions::default().with_want_match_info(true);
    let query = Query::new("fb", &options);
    let info = Scorer::new()
        .match_info(&query, "foo/fbar", &options)
        .expect("should match");
    assert_eq!(info.positions, vec![4, 5]);
    assert!(info.breakdown.contains("full_prefix"));
}

#[test]
fn match_info_score_agrees_with_plain_scoring() {
    let options = MatchOptions::default();
    let mut scorer = Scorer::new();
    for candidate in ["fbar", "foo/foo_bar", "foo/abar", "foob/ar"] {
        let query = Query::new("fb", &options);
        let plain = scorer.score(&query, candidate, &options).expect("match");
        let info = scorer
            .match_info(&query, candidate, &options)
            .expect("match");
        assert_eq!(plain.to_bits(), info.score.to_bits(), "for {candidate:?}");
        assert!(info.breakdown.contains("total="));
    }
}

#[test]
fn custom_separator_changes_component_structure() {
    let options = MatchOptions {
        path_separator: '\\',
        ..MatchOptions::default()
    };
    let query = Query::new("fb", &options);
    let mut scorer = Scorer::new();
    let confined = scorer
        .score(&query, "foo_bar", &options)
        .expect("should match");
    let crossing = scorer
        .score(&query, "foo\\bar", &options)
        .expect("should match");
    assert!(confined > crossing);
}

#[test]
fn exact_match_leaves_no_trailing_penalty() {
    let exact = score_of("fbar", "fbar").expect("exact match");
    let longer = score_of("fbar", "fbarx").expect("prefix match");
    assert!(exact > longer);
}
