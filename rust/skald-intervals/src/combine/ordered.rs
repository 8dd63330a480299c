//! Ordered sequence with gaps allowed, minimized to the tightest enclosing
//! span.

use skald_common::Result;

use crate::conjunction::IntervalCombiner;
use crate::iterator::{BoxedIntervalIterator, Pos, NO_MORE_INTERVALS};

/// Builds a strictly increasing chain of sub-intervals in listed order.
///
/// The start of the last-placed sub-interval from the previous match acts as
/// a right bound `b`: once any link's end reaches `b`, no tighter chain can
/// start at the current first-link position, so the current candidate stands.
pub(crate) struct OrderedCombiner {
    start: Pos,
    end: Pos,
    first_end: Pos,
    i: usize,
}

impl OrderedCombiner {
    pub(crate) fn new() -> OrderedCombiner {
        OrderedCombiner {
            start: -1,
            end: -1,
            first_end: -1,
            i: 1,
        }
    }
}

impl IntervalCombiner for OrderedCombiner {
    fn reset(&mut self, subs: &mut [BoxedIntervalIterator]) -> Result<()> {
        subs[0].next_interval()?;
        self.i = 1;
        self.start = -1;
        self.end = -1;
        self.first_end = -1;
        Ok(())
    }

    fn next_interval(&mut self, subs: &mut [BoxedIntervalIterator]) -> Result<Pos> {
        self.start = NO_MORE_INTERVALS;
        self.end = NO_MORE_INTERVALS;
        let mut b = Pos::MAX;
        self.i = 1;
        loop {
            loop {
                if subs[self.i - 1].end() >= b {
                    return Ok(self.start);
                }
                if self.i == subs.len() || subs[self.i].start() > subs[self.i - 1].end() {
                    break;
                }
                loop {
                    if subs[self.i].end() >= b
                        || subs[self.i].next_interval()? == NO_MORE_INTERVALS
                    {
                        return Ok(self.start);
                    }
                    if subs[self.i].start() > subs[self.i - 1].end() {
                        break;
                    }
                }
                self.i += 1;
            }
            self.start = subs[0].start();
            if self.start == NO_MORE_INTERVALS {
                self.end = NO_MORE_INTERVALS;
                return Ok(self.end);
            }
            self.first_end = subs[0].end();
            self.end = subs[subs.len() - 1].end();
            b = subs[subs.len() - 1].start();
            self.i = 1;
            // Pre-advance the first link so the next call can look for a
            // later, possibly tighter chain.
            if subs[0].next_interval()? == NO_MORE_INTERVALS {
                return Ok(self.start);
            }
        }
    }

    fn start(&self, _subs: &[BoxedIntervalIterator]) -> Pos {
        self.start
    }

    fn end(&self, _subs: &[BoxedIntervalIterator]) -> Pos {
        self.end
    }

    fn gaps(&self, subs: &[BoxedIntervalIterator]) -> u32 {
        // The first link was pre-advanced when the match was produced, so its
        // end at match time is kept in `first_end` rather than re-read.
        let mut gaps = subs[1].start() - self.first_end - 1;
        for i in 2..subs.len() {
            gaps += subs[i].start() - subs[i - 1].end() - 1;
        }
        gaps as u32
    }
}
