//! Set subtraction: minuend intervals not excluded by the subtrahend.

use skald_common::Result;

use crate::iterator::{
    BoxedIntervalIterator, DocId, IntervalIterator, Pos, NO_MORE_DOCS, NO_MORE_INTERVALS,
};

/// Emits minuend intervals that do not overlap any subtrahend interval.
///
/// The minuend drives the document cursor; the subtrahend is advanced
/// opportunistically to the minuend's document. On documents where the
/// subtrahend is absent or exhausts, the remaining minuend intervals pass
/// through untouched.
pub(crate) struct NonOverlappingIntervals {
    minuend: BoxedIntervalIterator,
    subtrahend: BoxedIntervalIterator,
    /// Whether the subtrahend shares the current document and still has
    /// intervals that could exclude minuend matches.
    bpos: bool,
}

impl NonOverlappingIntervals {
    pub(crate) fn new(
        minuend: BoxedIntervalIterator,
        subtrahend: BoxedIntervalIterator,
    ) -> NonOverlappingIntervals {
        NonOverlappingIntervals {
            minuend,
            subtrahend,
            bpos: false,
        }
    }

    fn reset(&mut self) -> Result<()> {
        let doc = self.minuend.doc_id();
        if self.subtrahend.doc_id() < doc {
            self.subtrahend.advance(doc)?;
        }
        self.bpos = self.subtrahend.doc_id() == doc;
        Ok(())
    }
}

impl IntervalIterator for NonOverlappingIntervals {
    fn doc_id(&self) -> DocId {
        self.minuend.doc_id()
    }

    fn next_doc(&mut self) -> Result<DocId> {
        let doc = self.minuend.next_doc()?;
        if doc != NO_MORE_DOCS {
            self.reset()?;
        }
        Ok(doc)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        let doc = self.minuend.advance(target)?;
        if doc != NO_MORE_DOCS {
            self.reset()?;
        }
        Ok(doc)
    }

    fn cost(&self) -> u64 {
        self.minuend.cost()
    }

    fn start(&self) -> Pos {
        self.minuend.start()
    }

    fn end(&self) -> Pos {
        self.minuend.end()
    }

    fn gaps(&self) -> u32 {
        self.minuend.gaps()
    }

    fn next_interval(&mut self) -> Result<Pos> {
        if !self.bpos {
            return self.minuend.next_interval();
        }
        while self.minuend.next_interval()? != NO_MORE_INTERVALS {
            while self.subtrahend.end() < self.minuend.start() {
                if self.subtrahend.next_interval()? == NO_MORE_INTERVALS {
                    // No further exclusions possible on this document.
                    self.bpos = false;
                    return Ok(self.minuend.start());
                }
            }
            if self.subtrahend.start() > self.minuend.end() {
                return Ok(self.minuend.start());
            }
        }
        Ok(NO_MORE_INTERVALS)
    }

    fn match_cost(&self) -> f32 {
        self.minuend.match_cost() + self.subtrahend.match_cost()
    }
}

/// Widens every inner interval by `before` positions on the left (floored at
/// zero) and `after` positions on the right. Used to express "not within N
/// positions" as a plain non-overlap test.
pub(crate) struct ExtendedIntervals {
    inner: BoxedIntervalIterator,
    before: Pos,
    after: Pos,
    start: Pos,
    end: Pos,
}

impl ExtendedIntervals {
    pub(crate) fn new(inner: BoxedIntervalIterator, before: u32, after: u32) -> ExtendedIntervals {
        ExtendedIntervals {
            inner,
            before: before.min(Pos::MAX as u32) as Pos,
            after: after.min(Pos::MAX as u32) as Pos,
            start: -1,
            end: -1,
        }
    }
}

impl IntervalIterator for ExtendedIntervals {
    fn doc_id(&self) -> DocId {
        self.inner.doc_id()
    }

    fn next_doc(&mut self) -> Result<DocId> {
        let doc = self.inner.next_doc()?;
        self.start = -1;
        self.end = -1;
        Ok(doc)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        let doc = self.inner.advance(target)?;
        self.start = -1;
        self.end = -1;
        Ok(doc)
    }

    fn cost(&self) -> u64 {
        self.inner.cost()
    }

    fn start(&self) -> Pos {
        self.start
    }

    fn end(&self) -> Pos {
        self.end
    }

    fn gaps(&self) -> u32 {
        self.inner.gaps()
    }

    fn next_interval(&mut self) -> Result<Pos> {
        if self.inner.next_interval()? == NO_MORE_INTERVALS {
            self.start = NO_MORE_INTERVALS;
            self.end = NO_MORE_INTERVALS;
            return Ok(NO_MORE_INTERVALS);
        }
        self.start = (self.inner.start() - self.before).max(0);
        // Keep the widened end below the sentinel.
        self.end = self
            .inner
            .end()
            .saturating_add(self.after)
            .min(NO_MORE_INTERVALS - 1);
        Ok(self.start)
    }

    fn match_cost(&self) -> f32 {
        self.inner.match_cost()
    }
}
