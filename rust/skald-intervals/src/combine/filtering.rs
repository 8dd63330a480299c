//! Pairwise filters: emit the subject operand's intervals accepted by a
//! predicate against the filter operand.

use skald_common::Result;

use crate::conjunction::IntervalCombiner;
use crate::iterator::{BoxedIntervalIterator, Pos, NO_MORE_INTERVALS};

#[derive(Clone, Copy, Debug)]
pub(crate) enum FilterKind {
    Containing,
    ContainedBy,
    Overlapping,
}

/// Advances the subject `a` and, for each of its intervals, advances the
/// filter `b` just far enough to evaluate the predicate.
///
/// Once `b` exhausts such that no further match is possible on this
/// document, the cursor latches: `start()`/`end()` report the exhaustion
/// sentinel for the rest of the document.
pub(crate) struct FilteringCombiner {
    kind: FilterKind,
    bpos: bool,
}

impl FilteringCombiner {
    pub(crate) fn new(kind: FilterKind) -> FilteringCombiner {
        FilteringCombiner { kind, bpos: false }
    }
}

impl IntervalCombiner for FilteringCombiner {
    fn reset(&mut self, subs: &mut [BoxedIntervalIterator]) -> Result<()> {
        self.bpos = subs[1].next_interval()? != NO_MORE_INTERVALS;
        Ok(())
    }

    fn next_interval(&mut self, subs: &mut [BoxedIntervalIterator]) -> Result<Pos> {
        if !self.bpos {
            return Ok(NO_MORE_INTERVALS);
        }
        let (a, b) = subs.split_at_mut(1);
        let a = &mut a[0];
        let b = &mut b[0];
        match self.kind {
            FilterKind::Containing => {
                while a.next_interval()? != NO_MORE_INTERVALS {
                    while b.start() < a.start() && b.end() < a.end() {
                        if b.next_interval()? == NO_MORE_INTERVALS {
                            self.bpos = false;
                            return Ok(NO_MORE_INTERVALS);
                        }
                    }
                    if a.start() <= b.start() && a.end() >= b.end() {
                        return Ok(a.start());
                    }
                }
            }
            FilterKind::ContainedBy => {
                while a.next_interval()? != NO_MORE_INTERVALS {
                    while b.end() < a.end() {
                        if b.next_interval()? == NO_MORE_INTERVALS {
                            self.bpos = false;
                            return Ok(NO_MORE_INTERVALS);
                        }
                    }
                    if b.start() <= a.start() {
                        return Ok(a.start());
                    }
                }
            }
            FilterKind::Overlapping => {
                while a.next_interval()? != NO_MORE_INTERVALS {
                    while b.end() < a.start() {
                        if b.next_interval()? == NO_MORE_INTERVALS {
                            self.bpos = false;
                            return Ok(NO_MORE_INTERVALS);
                        }
                    }
                    if b.start() <= a.end() {
                        return Ok(a.start());
                    }
                }
            }
        }
        self.bpos = false;
        Ok(NO_MORE_INTERVALS)
    }

    fn start(&self, subs: &[BoxedIntervalIterator]) -> Pos {
        if !self.bpos {
            return NO_MORE_INTERVALS;
        }
        subs[0].start()
    }

    fn end(&self, subs: &[BoxedIntervalIterator]) -> Pos {
        if !self.bpos {
            return NO_MORE_INTERVALS;
        }
        subs[0].end()
    }

    fn gaps(&self, subs: &[BoxedIntervalIterator]) -> u32 {
        subs[0].gaps()
    }
}
