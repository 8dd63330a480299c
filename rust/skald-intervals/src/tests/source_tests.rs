use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::matches::MatchesIterator;
use crate::source::IntervalsSource;
use crate::tests::util::{index, FIELD};
use crate::visitor::{Occur, TermCollector};

fn term(t: &str) -> IntervalsSource {
    IntervalsSource::term(t)
}

fn hash_of(source: &IntervalsSource) -> u64 {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn equality_is_configuration_based() {
    let a = IntervalsSource::ordered(vec![term("x"), term("y")]);
    let b = IntervalsSource::ordered(vec![term("x"), term("y")]);
    let c = IntervalsSource::ordered(vec![term("y"), term("x")]);
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(a, c);

    let n1 = IntervalsSource::not_within(term("x"), 2, term("y"));
    let n2 = IntervalsSource::not_within(term("x"), 2, term("y"));
    let n3 = IntervalsSource::not_within(term("x"), 3, term("y"));
    assert_eq!(n1, n2);
    assert_eq!(hash_of(&n1), hash_of(&n2));
    assert_ne!(n1, n3);
}

#[test]
fn display_reflects_the_tree() {
    let source = IntervalsSource::containing(
        IntervalsSource::block(vec![term("a"), term("b")]),
        term("c"),
    );
    assert_eq!(source.to_string(), "CONTAINING(BLOCK(a,b),c)");

    let diff = IntervalsSource::not_within(term("a"), 2, term("b"));
    assert_eq!(diff.to_string(), "NOT_WITHIN(2)(a, b)");

    let or = IntervalsSource::or_of(vec![term("a"), term("b")]);
    assert_eq!(or.to_string(), "or(a,b)");
}

#[test]
fn min_extent_per_combinator() {
    assert_eq!(term("a").min_extent(), 1);
    assert_eq!(IntervalsSource::phrase(["a", "b", "c"]).min_extent(), 3);
    assert_eq!(
        IntervalsSource::unordered(vec![term("a"), term("b")]).min_extent(),
        2
    );
    assert_eq!(
        IntervalsSource::ordered_near(5, 10, vec![term("a"), term("b")]).min_extent(),
        5
    );
    assert_eq!(
        IntervalsSource::containing(IntervalsSource::phrase(["a", "b"]), term("c")).min_extent(),
        2
    );
    assert_eq!(
        IntervalsSource::or_of(vec![IntervalsSource::phrase(["a", "b"]), term("c")]).min_extent(),
        1
    );
    assert_eq!(
        IntervalsSource::non_overlapping(IntervalsSource::phrase(["a", "b"]), term("c"))
            .min_extent(),
        2
    );
}

#[test]
fn visitor_sees_clause_roles() {
    let source = IntervalsSource::not_within(
        IntervalsSource::ordered(vec![term("a"), term("b")]),
        1,
        IntervalsSource::or_of(vec![term("c"), term("d")]),
    );
    let mut collector = TermCollector::new();
    source.visit(FIELD, Occur::Must, &mut collector);
    let roles: Vec<(&str, Occur)> = collector
        .terms()
        .iter()
        .map(|(_, t, o)| (t.as_str(), *o))
        .collect();
    assert_eq!(
        roles,
        vec![
            ("a", Occur::Must),
            ("b", Occur::Must),
            ("c", Occur::MustNot),
            ("d", Occur::MustNot),
        ]
    );
}

#[test]
fn missing_field_yields_no_iterator() {
    let idx = index(&["a b"]);
    assert!(term("a").intervals("title", &idx).unwrap().is_none());
    assert!(
        IntervalsSource::phrase(["a", "b"])
            .intervals("title", &idx)
            .unwrap()
            .is_none()
    );
}

#[test]
fn matches_adapter_walks_one_document() {
    let idx = index(&["a b x a b", "a b"]);
    let source = IntervalsSource::phrase(["a", "b"]);
    let mut matches = source.matches(FIELD, &idx, 0).unwrap().unwrap();
    assert!(matches.next().unwrap());
    assert_eq!((matches.start_position(), matches.end_position()), (0, 1));
    assert!(matches.next().unwrap());
    assert_eq!((matches.start_position(), matches.end_position()), (3, 4));
    assert!(!matches.next().unwrap());
}

#[test]
fn matches_adapter_rejects_non_matching_documents() {
    let idx = index(&["a b", "b a"]);
    let source = IntervalsSource::phrase(["a", "b"]);
    assert!(source.matches(FIELD, &idx, 1).unwrap().is_none());
    assert!(source.matches(FIELD, &idx, 5).unwrap().is_none());
}
