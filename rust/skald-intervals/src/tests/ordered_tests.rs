use crate::source::IntervalsSource;
use crate::tests::util::{docs_of, index, matches_of};

fn ordered(terms: &[&str]) -> IntervalsSource {
    IntervalsSource::ordered(terms.iter().copied().map(IntervalsSource::term).collect())
}

#[test]
fn gaps_count_unmatched_positions() {
    let idx = index(&["a x x b"]);
    assert_eq!(
        matches_of(&ordered(&["a", "b"]), &idx),
        vec![(0, vec![(0, 3, 2)])]
    );
}

#[test]
fn later_occurrence_tightens_the_span() {
    // Both a@0 and a@1 chain to b@2; each start produces its own minimal
    // interval.
    let idx = index(&["a a b"]);
    assert_eq!(
        matches_of(&ordered(&["a", "b"]), &idx),
        vec![(0, vec![(0, 2, 1), (1, 2, 0)])]
    );
}

#[test]
fn three_term_chain() {
    let idx = index(&["a b c"]);
    assert_eq!(
        matches_of(&ordered(&["a", "b", "c"]), &idx),
        vec![(0, vec![(0, 2, 0)])]
    );
}

#[test]
fn wrong_order_does_not_match() {
    let idx = index(&["b a"]);
    assert!(matches_of(&ordered(&["a", "b"]), &idx).is_empty());
}

#[test]
fn interleaved_occurrences() {
    // a@0 chains to b@1; a@2 chains to b@4.
    let idx = index(&["a b a x b"]);
    assert_eq!(
        matches_of(&ordered(&["a", "b"]), &idx),
        vec![(0, vec![(0, 1, 0), (2, 4, 1)])]
    );
}

#[test]
fn gaps_sum_across_links() {
    let idx = index(&["a x b x x c"]);
    assert_eq!(
        matches_of(&ordered(&["a", "b", "c"]), &idx),
        vec![(0, vec![(0, 5, 3)])]
    );
}

#[test]
fn ordered_near_filters_by_width() {
    let idx = index(&["a x x b x a b"]);
    let near = IntervalsSource::ordered_near(
        0,
        3,
        vec![IntervalsSource::term("a"), IntervalsSource::term("b")],
    );
    // The a@0..b@3 chain is four positions wide and is dropped.
    assert_eq!(matches_of(&near, &idx), vec![(0, vec![(5, 6, 0)])]);
}

#[test]
fn ordered_requires_all_terms() {
    let idx = index(&["a b", "a", "b", "a x b"]);
    assert_eq!(docs_of(&ordered(&["a", "b"]), &idx), vec![0, 3]);
}
