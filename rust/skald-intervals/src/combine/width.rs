//! Width window applied on top of a combined interval stream.

use skald_common::Result;

use crate::iterator::{BoxedIntervalIterator, DocId, IntervalIterator, Pos, NO_MORE_INTERVALS};

/// Passes through only intervals whose width `end - start + 1` lies within
/// the inclusive `[min_width, max_width]` window. Backs the `*_near`
/// combinators.
pub(crate) struct WidthFilterIntervals {
    inner: BoxedIntervalIterator,
    min_width: Pos,
    max_width: Pos,
}

impl WidthFilterIntervals {
    pub(crate) fn new(inner: BoxedIntervalIterator, min_width: u32, max_width: u32) -> Self {
        WidthFilterIntervals {
            inner,
            min_width: min_width.min(Pos::MAX as u32) as Pos,
            max_width: max_width.min(Pos::MAX as u32) as Pos,
        }
    }
}

impl IntervalIterator for WidthFilterIntervals {
    fn doc_id(&self) -> DocId {
        self.inner.doc_id()
    }

    fn next_doc(&mut self) -> Result<DocId> {
        self.inner.next_doc()
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        self.inner.advance(target)
    }

    fn cost(&self) -> u64 {
        self.inner.cost()
    }

    fn start(&self) -> Pos {
        self.inner.start()
    }

    fn end(&self) -> Pos {
        self.inner.end()
    }

    fn gaps(&self) -> u32 {
        self.inner.gaps()
    }

    fn next_interval(&mut self) -> Result<Pos> {
        loop {
            let start = self.inner.next_interval()?;
            if start == NO_MORE_INTERVALS {
                return Ok(NO_MORE_INTERVALS);
            }
            let width = self.inner.end() - start + 1;
            if width >= self.min_width && width <= self.max_width {
                return Ok(start);
            }
        }
    }

    fn match_cost(&self) -> f32 {
        self.inner.match_cost()
    }
}
