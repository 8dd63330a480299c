//! Match-explanation adapter toward highlighting.

use skald_common::Result;

use crate::iterator::{BoxedIntervalIterator, Pos, NO_MORE_INTERVALS};

/// Iterate-once-per-submatch protocol consumed by highlighting and snippet
/// assembly: call [`next`](Self::next) until it returns `false`, reading the
/// positions of the current match in between.
pub trait MatchesIterator {
    /// Moves to the next match on the document. Returns `false` when there
    /// are no more matches; position accessors are then undefined.
    fn next(&mut self) -> Result<bool>;

    fn start_position(&self) -> Pos;

    fn end_position(&self) -> Pos;
}

/// Wraps a single-document interval stream as a [`MatchesIterator`].
///
/// The wrapped iterator must already be positioned on the document of
/// interest with its first interval pulled; the first [`next`] call reports
/// that cached interval and later calls advance the cursor. The adapter
/// never moves the document cursor.
///
/// [`next`]: MatchesIterator::next
pub struct IntervalMatches {
    it: BoxedIntervalIterator,
    cached: bool,
}

impl IntervalMatches {
    pub(crate) fn new(it: BoxedIntervalIterator) -> IntervalMatches {
        IntervalMatches { it, cached: true }
    }
}

impl MatchesIterator for IntervalMatches {
    fn next(&mut self) -> Result<bool> {
        if self.cached {
            self.cached = false;
            return Ok(true);
        }
        Ok(self.it.next_interval()? != NO_MORE_INTERVALS)
    }

    fn start_position(&self) -> Pos {
        self.it.start()
    }

    fn end_position(&self) -> Pos {
        self.it.end()
    }
}
