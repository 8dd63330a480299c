//! Leaf iterator exposing one term's occurrences as intervals.

use skald_common::{verify_data, Result};

use crate::iterator::{DocId, IntervalIterator, Pos, NO_MORE_DOCS, NO_MORE_INTERVALS};
use crate::postings::PositionsCursor;

/// Baseline per-document pull estimate for a single term stream.
const TERM_MATCH_COST: f32 = 1.0;

/// Wraps a [`PositionsCursor`]; every occurrence span becomes one interval.
pub(crate) struct TermIntervals {
    cursor: Box<dyn PositionsCursor>,
    start: Pos,
    end: Pos,
}

impl TermIntervals {
    pub(crate) fn new(cursor: Box<dyn PositionsCursor>) -> TermIntervals {
        TermIntervals {
            cursor,
            start: -1,
            end: -1,
        }
    }

    fn reset(&mut self) {
        self.start = -1;
        self.end = -1;
    }
}

impl IntervalIterator for TermIntervals {
    fn doc_id(&self) -> DocId {
        self.cursor.doc_id()
    }

    fn next_doc(&mut self) -> Result<DocId> {
        let doc = self.cursor.next_doc()?;
        self.reset();
        Ok(doc)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        let doc = self.cursor.advance(target)?;
        self.reset();
        Ok(doc)
    }

    fn cost(&self) -> u64 {
        self.cursor.cost()
    }

    fn start(&self) -> Pos {
        self.start
    }

    fn end(&self) -> Pos {
        self.end
    }

    fn gaps(&self) -> u32 {
        0
    }

    fn next_interval(&mut self) -> Result<Pos> {
        if self.doc_id() == NO_MORE_DOCS || self.start == NO_MORE_INTERVALS {
            self.start = NO_MORE_INTERVALS;
            self.end = NO_MORE_INTERVALS;
            return Ok(NO_MORE_INTERVALS);
        }
        match self.cursor.next_span()? {
            Some((start, end)) => {
                verify_data!(position_span, start >= 0 && end >= start);
                self.start = start;
                self.end = end;
                Ok(start)
            }
            None => {
                self.start = NO_MORE_INTERVALS;
                self.end = NO_MORE_INTERVALS;
                Ok(NO_MORE_INTERVALS)
            }
        }
    }

    fn match_cost(&self) -> f32 {
        TERM_MATCH_COST
    }
}
