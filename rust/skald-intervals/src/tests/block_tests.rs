use crate::source::IntervalsSource;
use crate::tests::util::{docs_of, index, matches_of};

fn block(terms: &[&str]) -> IntervalsSource {
    IntervalsSource::phrase(terms.iter().copied())
}

#[test]
fn adjacent_terms_match_exactly_once() {
    let idx = index(&["a b"]);
    assert_eq!(matches_of(&block(&["a", "b"]), &idx), vec![(0, vec![(0, 1, 0)])]);
}

#[test]
fn gap_breaks_the_block() {
    let idx = index(&["a x b"]);
    assert!(matches_of(&block(&["a", "b"]), &idx).is_empty());
}

#[test]
fn scan_skips_early_positions_of_later_terms() {
    // "b" also occurs before "a"; the scan must pass over it.
    let idx = index(&["b a b c"]);
    assert_eq!(
        matches_of(&block(&["a", "b", "c"]), &idx),
        vec![(0, vec![(1, 3, 0)])]
    );
}

#[test]
fn chain_restarts_from_first_term() {
    // The first (a, b) pair at 0..1 has no adjacent c; the match uses the
    // second pair.
    let idx = index(&["a b a b c"]);
    assert_eq!(
        matches_of(&block(&["a", "b", "c"]), &idx),
        vec![(0, vec![(2, 4, 0)])]
    );
}

#[test]
fn repeated_blocks_yield_monotonic_intervals() {
    let idx = index(&["a b a b"]);
    assert_eq!(
        matches_of(&block(&["a", "b"]), &idx),
        vec![(0, vec![(0, 1, 0), (2, 3, 0)])]
    );
}

#[test]
fn document_conjunction_filters_docs() {
    let idx = index(&["a b", "b a", "x y", "a b"]);
    assert_eq!(docs_of(&block(&["a", "b"]), &idx), vec![0, 3]);
}

#[test]
fn single_operand_block_is_the_operand() {
    let idx = index(&["x a x a"]);
    assert_eq!(
        matches_of(&block(&["a"]), &idx),
        vec![(0, vec![(1, 1, 0), (3, 3, 0)])]
    );
}
