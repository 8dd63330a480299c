//! Any-order proximity, minimized through a priority queue over the
//! sub-iterators' current intervals.

use std::collections::BinaryHeap;

use skald_common::Result;

use crate::conjunction::IntervalCombiner;
use crate::iterator::{BoxedIntervalIterator, Pos, NO_MORE_INTERVALS};

/// Queue entry snapshotting one sub-iterator's current interval.
///
/// Entries carry their own ordering key so the heap never needs to reach
/// back into the iterators: a snapshot only becomes stale when its iterator
/// is popped and advanced, at which point a fresh entry is pushed.
#[derive(Debug, PartialEq, Eq)]
struct QueueEntry {
    start: Pos,
    end: Pos,
    index: usize,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Max-heap: make the desired top (smallest start, ties broken by
        // larger end) compare greatest.
        other
            .start
            .cmp(&self.start)
            .then(self.end.cmp(&other.end))
            .then(other.index.cmp(&self.index))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Minimal enclosing span over all sub-iterators in any order.
///
/// The enclosing span runs from the queue minimum's start to the largest end
/// seen so far (`queue_end`). Repeatedly advancing the sub-iterator with the
/// smallest interval either tightens the span or proves the current one
/// minimal. With `allow_overlaps == false`, a replacement interval must not
/// overlap any interval currently held by another sub-iterator in the queue.
pub(crate) struct UnorderedCombiner {
    allow_overlaps: bool,
    queue: BinaryHeap<QueueEntry>,
    queue_end: Pos,
    start: Pos,
    end: Pos,
    first_end: Pos,
}

impl UnorderedCombiner {
    pub(crate) fn new(allow_overlaps: bool) -> UnorderedCombiner {
        UnorderedCombiner {
            allow_overlaps,
            queue: BinaryHeap::new(),
            queue_end: -1,
            start: -1,
            end: -1,
            first_end: -1,
        }
    }

    fn update_right_extreme(&mut self, end: Pos) {
        if end > self.queue_end {
            self.queue_end = end;
        }
    }

    /// Whether the candidate interval overlaps any interval currently
    /// resident in the queue. Popped-but-not-yet-reinserted intervals are
    /// deliberately not consulted.
    fn has_overlaps(&self, start: Pos, end: Pos) -> bool {
        for it in self.queue.iter() {
            if it.start < start {
                if it.end >= start {
                    return true;
                }
                continue;
            }
            if it.start == start {
                return true;
            }
            if it.start <= end {
                return true;
            }
        }
        false
    }

    fn exhaust(&mut self) -> Pos {
        self.start = NO_MORE_INTERVALS;
        self.end = NO_MORE_INTERVALS;
        NO_MORE_INTERVALS
    }
}

impl IntervalCombiner for UnorderedCombiner {
    fn reset(&mut self, subs: &mut [BoxedIntervalIterator]) -> Result<()> {
        self.queue_end = -1;
        self.start = -1;
        self.end = -1;
        self.first_end = -1;
        self.queue.clear();
        for index in 0..subs.len() {
            if subs[index].next_interval()? == NO_MORE_INTERVALS {
                break;
            }
            if !self.allow_overlaps {
                let mut placed = true;
                while self.has_overlaps(subs[index].start(), subs[index].end()) {
                    if subs[index].next_interval()? == NO_MORE_INTERVALS {
                        placed = false;
                        break;
                    }
                }
                if !placed {
                    break;
                }
            }
            let (start, end) = (subs[index].start(), subs[index].end());
            self.queue.push(QueueEntry { start, end, index });
            self.update_right_extreme(end);
        }
        Ok(())
    }

    fn next_interval(&mut self, subs: &mut [BoxedIntervalIterator]) -> Result<Pos> {
        // First, find a combination covering every sub-iterator.
        while self.queue.len() == subs.len()
            && self.queue.peek().expect("non-empty queue").start == self.start
        {
            let entry = self.queue.pop().expect("non-empty queue");
            if subs[entry.index].next_interval()? != NO_MORE_INTERVALS {
                if !self.allow_overlaps {
                    while self.has_overlaps(subs[entry.index].start(), subs[entry.index].end()) {
                        if subs[entry.index].next_interval()? == NO_MORE_INTERVALS {
                            return Ok(self.exhaust());
                        }
                    }
                }
                let (start, end) = (subs[entry.index].start(), subs[entry.index].end());
                let index = entry.index;
                self.queue.push(QueueEntry { start, end, index });
                self.update_right_extreme(end);
            }
        }
        if self.queue.len() < subs.len() {
            return Ok(self.exhaust());
        }
        // Then minimize it: keep replacing the smallest interval until the
        // popped interval's end touches the right extreme.
        loop {
            let top = self.queue.peek().expect("full queue");
            self.start = top.start;
            self.first_end = top.end;
            self.end = self.queue_end;
            if top.end == self.end {
                return Ok(self.start);
            }
            let entry = self.queue.pop().expect("full queue");
            if subs[entry.index].next_interval()? != NO_MORE_INTERVALS {
                if !self.allow_overlaps {
                    while self.has_overlaps(subs[entry.index].start(), subs[entry.index].end()) {
                        if subs[entry.index].next_interval()? == NO_MORE_INTERVALS {
                            return Ok(self.start);
                        }
                    }
                }
                let (start, end) = (subs[entry.index].start(), subs[entry.index].end());
                let index = entry.index;
                self.queue.push(QueueEntry { start, end, index });
                self.update_right_extreme(end);
            }
            if !(self.queue.len() == subs.len() && self.end == self.queue_end) {
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
        // Sub-iterators advanced beyond the produced interval stand in for
        // the queue-top placement recorded at match time.
        let mut inner: Vec<Pos> = Vec::with_capacity(subs.len() * 2);
        for sub in subs {
            if sub.end() > self.end {
                inner.push(self.start);
                inner.push(self.first_end);
            } else {
                inner.push(sub.start());
                inner.push(sub.end());
            }
        }
        inner.sort_unstable();
        let mut gaps = 0;
        for i in 1..subs.len() {
            gaps += inner[i * 2] - inner[i * 2 - 1] - 1;
        }
        gaps as u32
    }
}
