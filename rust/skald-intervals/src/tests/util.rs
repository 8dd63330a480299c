//! Shared fixtures for the combinator tests.

use crate::iterator::{DocId, Pos, NO_MORE_DOCS, NO_MORE_INTERVALS};
use crate::memory::MemoryPositionSource;
use crate::source::IntervalsSource;

pub(crate) const FIELD: &str = "body";

/// Indexes whitespace-tokenized documents with ascending ids starting at 0.
pub(crate) fn index(docs: &[&str]) -> MemoryPositionSource {
    let mut source = MemoryPositionSource::new();
    for (doc, text) in docs.iter().enumerate() {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        source.add_doc(FIELD, doc as DocId, &tokens);
    }
    source
}

/// Drains the source over the whole index, checking the iteration contract
/// along the way: unpositioned accessors, non-decreasing starts, idempotent
/// exhaustion. Documents yielding no interval are omitted.
pub(crate) fn matches_of(
    source: &IntervalsSource,
    index: &MemoryPositionSource,
) -> Vec<(DocId, Vec<(Pos, Pos, u32)>)> {
    let Some(mut it) = source.intervals(FIELD, index).expect("bind source") else {
        return Vec::new();
    };
    let mut out = Vec::new();
    loop {
        let doc = it.next_doc().expect("advance doc");
        if doc == NO_MORE_DOCS {
            break;
        }
        assert_eq!(doc, it.doc_id());
        assert!(
            it.start() == -1 || it.start() == NO_MORE_INTERVALS,
            "unpositioned start on doc {doc}: {}",
            it.start()
        );
        let mut spans = Vec::new();
        loop {
            let start = it.next_interval().expect("advance interval");
            if start == NO_MORE_INTERVALS {
                break;
            }
            assert_eq!(start, it.start());
            assert!(start <= it.end(), "inverted interval on doc {doc}");
            if let Some(&(prev, _, _)) = spans.last() {
                assert!(prev <= start, "starts must not decrease on doc {doc}");
            }
            spans.push((start, it.end(), it.gaps()));
        }
        assert_eq!(it.start(), NO_MORE_INTERVALS);
        assert_eq!(it.end(), NO_MORE_INTERVALS);
        assert_eq!(it.next_interval().expect("exhausted pull"), NO_MORE_INTERVALS);
        if !spans.is_empty() {
            out.push((doc, spans));
        }
    }
    out
}

/// Document ids with at least one matching interval.
pub(crate) fn docs_of(source: &IntervalsSource, index: &MemoryPositionSource) -> Vec<DocId> {
    matches_of(source, index).into_iter().map(|(d, _)| d).collect()
}

/// Intervals without their gap counts, for assertions that only care about
/// spans.
pub(crate) fn spans_of(
    source: &IntervalsSource,
    index: &MemoryPositionSource,
    doc: DocId,
) -> Vec<(Pos, Pos)> {
    matches_of(source, index)
        .into_iter()
        .find(|(d, _)| *d == doc)
        .map(|(_, spans)| spans.into_iter().map(|(s, e, _)| (s, e)).collect())
        .unwrap_or_default()
}
