//! Interval algebra engine for proximity queries over per-document token
//! position streams.
//!
//! This crate computes minimal matching token-position intervals for
//! structured proximity queries: phrase-like ordered and unordered matches,
//! containment filters, and set-difference constraints. It synchronizes many
//! independent position streams per document with strictly monotonic
//! advancement and selects a canonical minimal representative interval among
//! the candidate combinations without enumerating them.
//!
//! The main entry point is [`IntervalsSource`]: an immutable value tree
//! describing how term position streams combine. Binding a source to a field
//! and a [`postings::PositionSource`] produces an [`IntervalIterator`], a
//! two-level cursor that first advances across candidate documents and then
//! enumerates the matching intervals within each document.
//!
//! ```
//! use skald_intervals::{memory::MemoryPositionSource, IntervalsSource, NO_MORE_INTERVALS};
//!
//! let mut index = MemoryPositionSource::new();
//! index.add_doc("body", 0, &["the", "quick", "brown", "fox"]);
//!
//! let source = IntervalsSource::ordered(vec![
//!     IntervalsSource::term("quick"),
//!     IntervalsSource::term("fox"),
//! ]);
//! let mut it = source.intervals("body", &index).unwrap().unwrap();
//! assert_eq!(it.next_doc().unwrap(), 0);
//! assert_ne!(it.next_interval().unwrap(), NO_MORE_INTERVALS);
//! assert_eq!((it.start(), it.end(), it.gaps()), (1, 3, 1));
//! ```
//!
//! Posting-list decoding, term dictionaries, scoring and tokenization are
//! external collaborators reached through the narrow contracts in
//! [`postings`]; this crate owns only cursor state.

pub mod combine;
mod conjunction;
pub mod iterator;
pub mod matches;
pub mod memory;
pub mod postings;
pub mod source;
mod term;
pub mod visitor;

#[cfg(test)]
mod tests;

pub use combine::{DifferenceFn, IntervalFn};
pub use iterator::{
    BoxedIntervalIterator, DocId, Interval, IntervalIterator, Pos, NO_MORE_DOCS, NO_MORE_INTERVALS,
};
pub use source::IntervalsSource;
