//! Contracts toward the position-stream collaborators.
//!
//! The engine does not decode posting lists itself: for each `(field, term)`
//! pair it obtains a [`PositionsCursor`] from a [`PositionSource`] and drives
//! it forward. Decode failures raised by an implementation propagate
//! unchanged through every combinator.

use skald_common::Result;

use crate::iterator::{DocId, Pos};

/// Forward-only decoder for one term's per-document position data.
///
/// The document cursor mirrors the postings contract: unpositioned (`-1`)
/// until the first advance, increasing document ids, terminating at
/// [`NO_MORE_DOCS`](crate::NO_MORE_DOCS). Within a document,
/// [`next_span`](Self::next_span) yields the occurrence spans in increasing
/// `(start, end)` order; advancing the document cursor discards any
/// unconsumed spans.
pub trait PositionsCursor {
    /// The current document id, `-1` before the first advance.
    fn doc_id(&self) -> DocId;

    /// Advances to the next document containing the term.
    fn next_doc(&mut self) -> Result<DocId>;

    /// Advances to the first document at or beyond `target` containing the
    /// term.
    fn advance(&mut self, target: DocId) -> Result<DocId>;

    /// Approximate number of documents containing the term, for planning.
    fn cost(&self) -> u64;

    /// The next occurrence span on the current document, or `None` when the
    /// document's occurrences are exhausted.
    fn next_span(&mut self) -> Result<Option<(Pos, Pos)>>;
}

/// Per-segment factory of [`PositionsCursor`] values.
///
/// `Ok(None)` means the field carries no positional data for the term in
/// this segment. That is not an error: callers treat the affected clause as
/// matching nothing.
pub trait PositionSource {
    fn positions(&self, field: &str, term: &str) -> Result<Option<Box<dyn PositionsCursor>>>;
}
