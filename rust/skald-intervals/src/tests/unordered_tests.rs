use crate::source::IntervalsSource;
use crate::tests::util::{index, matches_of, spans_of, FIELD};
use crate::memory::MemoryPositionSource;

fn unordered(terms: &[&str]) -> IntervalsSource {
    IntervalsSource::unordered(terms.iter().copied().map(IntervalsSource::term).collect())
}

#[test]
fn picks_the_minimal_enclosing_interval() {
    // a at {0, 5}, b at {2}: the minimal combination is [0, 2], never [0, 5]
    // or a spurious [2, 5]-first ordering.
    let idx = index(&["a x b x x a"]);
    let spans = spans_of(&unordered(&["a", "b"]), &idx, 0);
    assert_eq!(spans.first(), Some(&(0, 2)));
    assert!(spans.iter().all(|&(s, e)| !(s == 0 && e == 5)));
}

#[test]
fn order_does_not_matter() {
    let idx = index(&["b x a"]);
    assert_eq!(
        matches_of(&unordered(&["a", "b"]), &idx),
        vec![(0, vec![(0, 2, 1)])]
    );
}

#[test]
fn gaps_sum_between_placed_subintervals() {
    // a@0, b@3, c@5 in any order: two gaps of 2 and 1.
    let idx = index(&["a x x b x c"]);
    assert_eq!(
        matches_of(&unordered(&["a", "b", "c"]), &idx),
        vec![(0, vec![(0, 5, 3)])]
    );
}

#[test]
fn duplicate_term_may_reuse_a_position_when_overlaps_allowed() {
    let idx = index(&["a x a"]);
    let spans = spans_of(&unordered(&["a", "a"]), &idx, 0);
    assert_eq!(spans.first(), Some(&(0, 0)));
}

#[test]
fn no_overlap_forces_distinct_positions() {
    let idx = index(&["a x a"]);
    let source = IntervalsSource::unordered_no_overlap(vec![
        IntervalsSource::term("a"),
        IntervalsSource::term("a"),
    ]);
    assert_eq!(spans_of(&source, &idx, 0), vec![(0, 2)]);
}

#[test]
fn no_overlap_rejects_crossing_spans() {
    let mut idx = MemoryPositionSource::new();
    idx.add_span(FIELD, "p", 0, 0, 2);
    idx.add_span(FIELD, "q", 0, 1, 3);

    let overlapping = IntervalsSource::unordered(vec![
        IntervalsSource::term("p"),
        IntervalsSource::term("q"),
    ]);
    assert_eq!(spans_of(&overlapping, &idx, 0), vec![(0, 3)]);

    let strict = IntervalsSource::unordered_no_overlap(vec![
        IntervalsSource::term("p"),
        IntervalsSource::term("q"),
    ]);
    assert!(matches_of(&strict, &idx).is_empty());
}

#[test]
fn unordered_near_bounds_the_span_width() {
    let idx = index(&["b x x x a x b a"]);
    let near = IntervalsSource::unordered_near(
        0,
        2,
        vec![IntervalsSource::term("a"), IntervalsSource::term("b")],
    );
    assert_eq!(spans_of(&near, &idx, 0), vec![(6, 7)]);
}

#[test]
fn exhausts_when_any_term_is_missing_later() {
    let idx = index(&["a b", "a x", "b b a"]);
    let matched: Vec<i32> = matches_of(&unordered(&["a", "b"]), &idx)
        .into_iter()
        .map(|(d, _)| d)
        .collect();
    assert_eq!(matched, vec![0, 2]);
}
