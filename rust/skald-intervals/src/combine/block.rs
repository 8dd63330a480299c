//! Contiguous concatenation: every sub-interval starts exactly one position
//! after the previous one ends.

use skald_common::Result;

use crate::conjunction::IntervalCombiner;
use crate::iterator::{BoxedIntervalIterator, Pos, NO_MORE_INTERVALS};

/// Scans the ordered sub-iterators for a perfectly adjacent chain, restarting
/// from the first sub-iterator's next interval whenever adjacency breaks.
/// Gaps are zero by construction.
pub(crate) struct BlockCombiner {
    start: Pos,
    end: Pos,
}

impl BlockCombiner {
    pub(crate) fn new() -> BlockCombiner {
        BlockCombiner { start: -1, end: -1 }
    }

    fn exhaust(&mut self) -> Pos {
        self.start = NO_MORE_INTERVALS;
        self.end = NO_MORE_INTERVALS;
        NO_MORE_INTERVALS
    }
}

impl IntervalCombiner for BlockCombiner {
    fn reset(&mut self, _subs: &mut [BoxedIntervalIterator]) -> Result<()> {
        self.start = -1;
        self.end = -1;
        Ok(())
    }

    fn next_interval(&mut self, subs: &mut [BoxedIntervalIterator]) -> Result<Pos> {
        if subs[0].next_interval()? == NO_MORE_INTERVALS {
            return Ok(self.exhaust());
        }
        let mut i = 1;
        while i < subs.len() {
            // Skip sub-interval positions that start at or before the
            // previous link's end.
            while subs[i].start() <= subs[i - 1].end() {
                if subs[i].next_interval()? == NO_MORE_INTERVALS {
                    return Ok(self.exhaust());
                }
            }
            if subs[i].start() == subs[i - 1].end() + 1 {
                i += 1;
            } else {
                // Adjacency broke; restart the chain from the first
                // sub-iterator's next interval.
                if subs[0].next_interval()? == NO_MORE_INTERVALS {
                    return Ok(self.exhaust());
                }
                i = 1;
            }
        }
        self.start = subs[0].start();
        self.end = subs[subs.len() - 1].end();
        Ok(self.start)
    }

    fn start(&self, _subs: &[BoxedIntervalIterator]) -> Pos {
        self.start
    }

    fn end(&self, _subs: &[BoxedIntervalIterator]) -> Pos {
        self.end
    }

    fn gaps(&self, _subs: &[BoxedIntervalIterator]) -> u32 {
        0
    }
}
