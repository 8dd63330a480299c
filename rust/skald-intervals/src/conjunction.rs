//! Document-level synchronization shared by every conjunction combinator.
//!
//! A [`ConjunctionIntervalIterator`] owns its sub-iterators and is the only
//! code allowed to move their document cursors: it leapfrogs all of them to
//! the next document every stream agrees on, then hands interval-level
//! control to its [`IntervalCombiner`]. Combiners never advance documents
//! themselves; they only pull their sub-iterators' interval cursors.

use skald_common::Result;

use crate::iterator::{BoxedIntervalIterator, DocId, IntervalIterator, Pos, NO_MORE_DOCS};

/// Interval-level strategy plugged into a [`ConjunctionIntervalIterator`].
///
/// `reset` re-initializes the combiner for a freshly selected document;
/// `next_interval` advances the combined interval cursor. Both receive the
/// sub-iterators already positioned on the shared document.
pub(crate) trait IntervalCombiner {
    fn reset(&mut self, subs: &mut [BoxedIntervalIterator]) -> Result<()>;

    fn next_interval(&mut self, subs: &mut [BoxedIntervalIterator]) -> Result<Pos>;

    fn start(&self, subs: &[BoxedIntervalIterator]) -> Pos;

    fn end(&self, subs: &[BoxedIntervalIterator]) -> Pos;

    fn gaps(&self, subs: &[BoxedIntervalIterator]) -> u32;
}

/// Conjunction of N sub-iterators' document approximations plus one
/// combiner-defined interval stream.
pub(crate) struct ConjunctionIntervalIterator<C: IntervalCombiner> {
    subs: Vec<BoxedIntervalIterator>,
    combiner: C,
    doc: DocId,
    cost: u64,
    match_cost: f32,
}

impl<C: IntervalCombiner> ConjunctionIntervalIterator<C> {
    pub(crate) fn new(subs: Vec<BoxedIntervalIterator>, combiner: C) -> Self {
        debug_assert!(!subs.is_empty());
        let cost = subs.iter().map(|s| s.cost()).min().unwrap_or(0);
        let match_cost = subs.iter().map(|s| s.match_cost()).sum();
        ConjunctionIntervalIterator {
            subs,
            combiner,
            doc: -1,
            cost,
            match_cost,
        }
    }

    /// Leapfrogs the remaining sub-iterators until every document cursor
    /// agrees on `candidate` (the lead iterator's current document).
    fn align(&mut self, mut candidate: DocId) -> Result<DocId> {
        'restart: loop {
            if candidate == NO_MORE_DOCS {
                return Ok(NO_MORE_DOCS);
            }
            for i in 1..self.subs.len() {
                if self.subs[i].doc_id() < candidate {
                    let doc = self.subs[i].advance(candidate)?;
                    if doc > candidate {
                        candidate = self.subs[0].advance(doc)?;
                        continue 'restart;
                    }
                } else if self.subs[i].doc_id() > candidate {
                    let next = self.subs[i].doc_id();
                    candidate = self.subs[0].advance(next)?;
                    continue 'restart;
                }
            }
            return Ok(candidate);
        }
    }

    fn settle(&mut self, lead: DocId) -> Result<DocId> {
        self.doc = self.align(lead)?;
        if self.doc != NO_MORE_DOCS {
            self.combiner.reset(&mut self.subs)?;
        }
        Ok(self.doc)
    }
}

impl<C: IntervalCombiner> IntervalIterator for ConjunctionIntervalIterator<C> {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        let lead = self.subs[0].next_doc()?;
        self.settle(lead)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        let lead = self.subs[0].advance(target)?;
        self.settle(lead)
    }

    fn cost(&self) -> u64 {
        self.cost
    }

    fn start(&self) -> Pos {
        self.combiner.start(&self.subs)
    }

    fn end(&self) -> Pos {
        self.combiner.end(&self.subs)
    }

    fn gaps(&self) -> u32 {
        self.combiner.gaps(&self.subs)
    }

    fn next_interval(&mut self) -> Result<Pos> {
        self.combiner.next_interval(&mut self.subs)
    }

    fn match_cost(&self) -> f32 {
        self.match_cost
    }
}
