//! Document-level OR over interval streams.
//!
//! A document matches when any sub-iterator matches it; within a document
//! the sub-streams merge into one non-decreasing interval stream that skips
//! intervals strictly enclosing an already-produced one (the enclosing span
//! can never be part of a tighter outer match than the enclosed span it
//! would shadow).

use std::collections::BinaryHeap;

use skald_common::Result;

use crate::iterator::{
    BoxedIntervalIterator, DocId, IntervalIterator, Pos, NO_MORE_DOCS, NO_MORE_INTERVALS,
};

/// Queue entry snapshotting one sub-iterator's current interval, ordered by
/// (end ascending, start descending).
#[derive(Debug, PartialEq, Eq)]
struct QueueEntry {
    start: Pos,
    end: Pos,
    index: usize,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Max-heap: the desired top (smallest end, ties broken by larger
        // start) compares greatest.
        other
            .end
            .cmp(&self.end)
            .then(self.start.cmp(&other.start))
            .then(other.index.cmp(&self.index))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Copy, Debug)]
enum Cursor {
    /// Document selected, no interval pulled yet.
    Empty,
    /// Holding the interval of the sub-iterator at `index`.
    Active { start: Pos, end: Pos, index: usize },
    Exhausted,
}

pub(crate) struct DisjunctionIntervals {
    subs: Vec<BoxedIntervalIterator>,
    queue: BinaryHeap<QueueEntry>,
    cursor: Cursor,
    doc: DocId,
    cost: u64,
    match_cost: f32,
}

impl DisjunctionIntervals {
    pub(crate) fn new(subs: Vec<BoxedIntervalIterator>) -> DisjunctionIntervals {
        debug_assert!(subs.len() > 1);
        let cost = subs.iter().map(|s| s.cost()).sum();
        let match_cost = subs.iter().map(|s| s.match_cost()).sum();
        DisjunctionIntervals {
            subs,
            queue: BinaryHeap::new(),
            cursor: Cursor::Empty,
            doc: -1,
            cost,
            match_cost,
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.queue.clear();
        for index in 0..self.subs.len() {
            if self.subs[index].doc_id() == self.doc {
                let start = self.subs[index].next_interval()?;
                if start != NO_MORE_INTERVALS {
                    let end = self.subs[index].end();
                    self.queue.push(QueueEntry { start, end, index });
                }
            }
        }
        self.cursor = Cursor::Empty;
        Ok(())
    }

    fn settle(&mut self, doc: DocId) -> Result<DocId> {
        self.doc = doc;
        if doc != NO_MORE_DOCS {
            self.reset()?;
        }
        Ok(doc)
    }

    /// Makes the queue top the current interval, or latches exhaustion when
    /// the queue has drained.
    fn take_top(&mut self) -> Pos {
        match self.queue.peek() {
            Some(top) => {
                self.cursor = Cursor::Active {
                    start: top.start,
                    end: top.end,
                    index: top.index,
                };
                top.start
            }
            None => {
                self.cursor = Cursor::Exhausted;
                NO_MORE_INTERVALS
            }
        }
    }
}

impl IntervalIterator for DisjunctionIntervals {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        let mut min = NO_MORE_DOCS;
        for sub in self.subs.iter_mut() {
            if sub.doc_id() == self.doc {
                sub.next_doc()?;
            }
            min = min.min(sub.doc_id());
        }
        self.settle(min)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        let mut min = NO_MORE_DOCS;
        for sub in self.subs.iter_mut() {
            if sub.doc_id() < target {
                sub.advance(target)?;
            }
            min = min.min(sub.doc_id());
        }
        self.settle(min)
    }

    fn cost(&self) -> u64 {
        self.cost
    }

    fn start(&self) -> Pos {
        match self.cursor {
            Cursor::Empty => -1,
            Cursor::Active { start, .. } => start,
            Cursor::Exhausted => NO_MORE_INTERVALS,
        }
    }

    fn end(&self) -> Pos {
        match self.cursor {
            Cursor::Empty => -1,
            Cursor::Active { end, .. } => end,
            Cursor::Exhausted => NO_MORE_INTERVALS,
        }
    }

    fn gaps(&self) -> u32 {
        match self.cursor {
            Cursor::Active { index, .. } => self.subs[index].gaps(),
            _ => 0,
        }
    }

    fn next_interval(&mut self) -> Result<Pos> {
        let (start, end) = match self.cursor {
            Cursor::Exhausted => return Ok(NO_MORE_INTERVALS),
            Cursor::Empty => return Ok(self.take_top()),
            Cursor::Active { start, end, .. } => (start, end),
        };
        // Drop every queued interval enclosing the produced one; each popped
        // sub-iterator moves to its next interval.
        loop {
            let encloses = match self.queue.peek() {
                Some(top) => top.start <= start && top.end >= end,
                None => break,
            };
            if !encloses {
                break;
            }
            let index = self.queue.pop().expect("peeked entry").index;
            let next_start = self.subs[index].next_interval()?;
            if next_start != NO_MORE_INTERVALS {
                let next_end = self.subs[index].end();
                self.queue.push(QueueEntry {
                    start: next_start,
                    end: next_end,
                    index,
                });
            }
        }
        Ok(self.take_top())
    }

    fn match_cost(&self) -> f32 {
        self.match_cost
    }
}
