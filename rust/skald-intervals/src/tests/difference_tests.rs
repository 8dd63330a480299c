use crate::source::IntervalsSource;
use crate::tests::util::{docs_of, index, matches_of, spans_of, FIELD};

fn term(t: &str) -> IntervalsSource {
    IntervalsSource::term(t)
}

#[test]
fn absent_subtrahend_passes_the_minuend_through() {
    let idx = index(&["a x a"]);
    let plain = matches_of(&term("a"), &idx);
    let diff = matches_of(&IntervalsSource::non_overlapping(term("a"), term("zz")), &idx);
    assert_eq!(plain, diff);
}

#[test]
fn non_overlapping_drops_touched_minuend_intervals() {
    let mut idx = index(&[""]);
    idx.add_span(FIELD, "wide", 0, 0, 3);
    idx.add_span(FIELD, "wide", 0, 6, 8);
    idx.add_span(FIELD, "spot", 0, 2, 2);
    let source = IntervalsSource::non_overlapping(term("wide"), term("spot"));
    assert_eq!(spans_of(&source, &idx, 0), vec![(6, 8)]);
}

#[test]
fn subtrahend_on_other_documents_is_ignored() {
    let idx = index(&["a", "a b"]);
    let source = IntervalsSource::non_overlapping(term("a"), term("b"));
    assert_eq!(docs_of(&source, &idx), vec![0, 1]);
}

#[test]
fn subtrahend_exhaustion_passes_remaining_minuend() {
    // b's only span excludes a@0; a@5 comes after b exhausted.
    let mut idx = index(&[""]);
    idx.add_span(FIELD, "a", 0, 0, 0);
    idx.add_span(FIELD, "a", 0, 5, 5);
    idx.add_span(FIELD, "b", 0, 0, 1);
    let source = IntervalsSource::non_overlapping(term("a"), term("b"));
    assert_eq!(spans_of(&source, &idx, 0), vec![(5, 5)]);
}

#[test]
fn not_within_widens_the_exclusion_zone() {
    let idx = index(&["a x x b x x a"]);
    // b@3 widened by 1 covers [2, 4]: both a positions stay.
    let lax = IntervalsSource::not_within(term("a"), 1, term("b"));
    assert_eq!(spans_of(&lax, &idx, 0), vec![(0, 0), (6, 6)]);
    // b@3 widened by 3 covers [0, 6]: nothing survives.
    let strict = IntervalsSource::not_within(term("a"), 3, term("b"));
    assert!(matches_of(&strict, &idx).is_empty());
}

#[test]
fn absent_minuend_matches_nothing() {
    let idx = index(&["a b"]);
    let source = IntervalsSource::non_overlapping(term("zz"), term("b"));
    assert!(source.intervals(FIELD, &idx).unwrap().is_none());
}

#[test]
fn difference_over_combined_minuend() {
    // phrase "a b" occurs at [0,1] and [4,5]; c@3 widened by 1 covers [2,4]
    // and excludes only the second occurrence.
    let idx = index(&["a b x c a b"]);
    let source = IntervalsSource::not_within(IntervalsSource::phrase(["a", "b"]), 1, term("c"));
    assert_eq!(spans_of(&source, &idx, 0), vec![(0, 1)]);
}
