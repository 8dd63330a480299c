//! In-memory position source for tests, doctests and small embedders.
//!
//! Holds per-`(field, term)` posting lists entirely on the heap. This is a
//! fixture for driving the engine deterministically, not an index format:
//! there is no compression, no persistence and no term dictionary.

use std::collections::BTreeMap;
use std::sync::Arc;

use skald_common::Result;

use crate::iterator::{DocId, Pos, NO_MORE_DOCS};
use crate::postings::{PositionSource, PositionsCursor};

#[derive(Clone, Debug)]
struct Posting {
    doc: DocId,
    spans: Vec<(Pos, Pos)>,
}

/// Builder-style in-memory implementation of [`PositionSource`].
///
/// Documents must be added in ascending `doc` order per term, and spans in
/// ascending `(start, end)` order within a document; [`add_doc`] satisfies
/// both by construction.
///
/// [`add_doc`]: MemoryPositionSource::add_doc
#[derive(Debug, Default)]
pub struct MemoryPositionSource {
    fields: BTreeMap<String, BTreeMap<String, Arc<Vec<Posting>>>>,
}

impl MemoryPositionSource {
    pub fn new() -> MemoryPositionSource {
        MemoryPositionSource::default()
    }

    /// Indexes a tokenized document: token `i` occupies position `i`.
    pub fn add_doc(&mut self, field: &str, doc: DocId, tokens: &[&str]) {
        for (position, token) in tokens.iter().enumerate() {
            self.add_span(field, token, doc, position as Pos, position as Pos);
        }
    }

    /// Records one occurrence span for a term. Useful for multi-position
    /// tokens that an analyzer would emit with a width greater than one.
    pub fn add_span(&mut self, field: &str, term: &str, doc: DocId, start: Pos, end: Pos) {
        debug_assert!(doc >= 0 && start >= 0 && end >= start);
        let postings = Arc::make_mut(
            self.fields
                .entry(field.to_string())
                .or_default()
                .entry(term.to_string())
                .or_default(),
        );
        let new_doc = match postings.last_mut() {
            Some(last) if last.doc == doc => {
                debug_assert!(last.spans.last().is_none_or(|&(s, e)| (s, e) <= (start, end)));
                last.spans.push((start, end));
                false
            }
            Some(last) => {
                debug_assert!(last.doc < doc);
                true
            }
            None => true,
        };
        if new_doc {
            postings.push(Posting {
                doc,
                spans: vec![(start, end)],
            });
        }
    }
}

impl PositionSource for MemoryPositionSource {
    fn positions(&self, field: &str, term: &str) -> Result<Option<Box<dyn PositionsCursor>>> {
        let postings = self.fields.get(field).and_then(|terms| terms.get(term));
        Ok(postings.map(|p| {
            Box::new(MemoryCursor {
                postings: Arc::clone(p),
                index: None,
                span: 0,
            }) as Box<dyn PositionsCursor>
        }))
    }
}

struct MemoryCursor {
    postings: Arc<Vec<Posting>>,
    /// Index of the current posting; `None` before the first advance.
    index: Option<usize>,
    span: usize,
}

impl MemoryCursor {
    fn posting(&self) -> Option<&Posting> {
        self.index.and_then(|i| self.postings.get(i))
    }
}

impl PositionsCursor for MemoryCursor {
    fn doc_id(&self) -> DocId {
        match self.index {
            None => -1,
            Some(i) => self.postings.get(i).map_or(NO_MORE_DOCS, |p| p.doc),
        }
    }

    fn next_doc(&mut self) -> Result<DocId> {
        let next = self.index.map_or(0, |i| i.saturating_add(1));
        self.index = Some(next.min(self.postings.len()));
        self.span = 0;
        Ok(self.doc_id())
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        while self.doc_id() < target {
            self.next_doc()?;
        }
        Ok(self.doc_id())
    }

    fn cost(&self) -> u64 {
        self.postings.len() as u64
    }

    fn next_span(&mut self) -> Result<Option<(Pos, Pos)>> {
        let span = self.span;
        match self.posting().and_then(|p| p.spans.get(span)) {
            Some(&s) => {
                self.span += 1;
                Ok(Some(s))
            }
            None => Ok(None),
        }
    }
}
