//! Combinator functions: immutable values describing how sub-iterators'
//! intervals merge into one stream.
//!
//! A function value carries no iterator state. Equality and hashing are
//! value-based over the variant and its parameters, so two queries built
//! from the same configuration compare equal for cache keys. Binding a
//! function to concrete sub-iterators for one document-evaluation session
//! happens through [`IntervalFn::apply`] / [`DifferenceFn::apply`].

mod block;
mod difference;
mod disjunction;
mod filtering;
mod ordered;
mod unordered;
mod width;

pub(crate) use disjunction::DisjunctionIntervals;

use skald_common::{verify_arg, Result};

use crate::conjunction::ConjunctionIntervalIterator;
use crate::iterator::BoxedIntervalIterator;

use self::block::BlockCombiner;
use self::difference::{ExtendedIntervals, NonOverlappingIntervals};
use self::filtering::{FilterKind, FilteringCombiner};
use self::ordered::OrderedCombiner;
use self::unordered::UnorderedCombiner;
use self::width::WidthFilterIntervals;

/// N-ary interval combinator selector.
///
/// The `*Near` variants additionally constrain the combined interval's width
/// (`end - start + 1`) to the inclusive `[min_width, max_width]` window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntervalFn {
    /// Sub-intervals perfectly adjacent, in listed order.
    Block,
    /// Sub-intervals in listed order, gaps allowed, minimal enclosing span.
    Ordered,
    OrderedNear { min_width: u32, max_width: u32 },
    /// Sub-intervals in any order, minimal enclosing span.
    Unordered,
    /// Like `Unordered`, but placed sub-intervals must not overlap each other.
    UnorderedNoOverlap,
    UnorderedNear { min_width: u32, max_width: u32 },
    /// Emits the first operand's intervals that contain the second's.
    Containing,
    /// Emits the first operand's intervals that are contained by the second's.
    ContainedBy,
    /// Emits the first operand's intervals that overlap the second's.
    Overlapping,
}

impl IntervalFn {
    /// Whether a nested disjunction beneath this function must be split
    /// before iteration.
    ///
    /// Sequence-constrained functions need the split: `BLOCK(a, OR(b,
    /// BLOCK(b, c)), d)` would otherwise never consider the longer branch on
    /// a document containing "a b c d".
    pub fn rewrite_disjunctions(&self) -> bool {
        matches!(
            self,
            IntervalFn::Block | IntervalFn::Ordered | IntervalFn::OrderedNear { .. }
        )
    }

    /// Whether the function eagerly advances its sub-intervals to pick the
    /// tightest enclosing span.
    pub fn is_minimizing(&self) -> bool {
        !self.is_filtering()
    }

    /// Whether the function emits one operand's intervals filtered by the
    /// other, rather than merging all operands.
    pub fn is_filtering(&self) -> bool {
        matches!(
            self,
            IntervalFn::Containing | IntervalFn::ContainedBy | IntervalFn::Overlapping
        )
    }

    /// Binds this function to concrete sub-iterators.
    ///
    /// Filtering functions require exactly two operands; handing them any
    /// other number is a query-construction bug and fails immediately.
    pub fn apply(&self, subs: Vec<BoxedIntervalIterator>) -> Result<BoxedIntervalIterator> {
        match *self {
            IntervalFn::Block => {
                verify_arg!(sub_iterators, !subs.is_empty());
                Ok(merge_or_single(subs, BlockCombiner::new()))
            }
            IntervalFn::Ordered => {
                verify_arg!(sub_iterators, !subs.is_empty());
                Ok(merge_or_single(subs, OrderedCombiner::new()))
            }
            IntervalFn::OrderedNear {
                min_width,
                max_width,
            } => {
                let inner = IntervalFn::Ordered.apply(subs)?;
                Ok(Box::new(WidthFilterIntervals::new(
                    inner, min_width, max_width,
                )))
            }
            IntervalFn::Unordered => {
                verify_arg!(sub_iterators, !subs.is_empty());
                Ok(merge_or_single(subs, UnorderedCombiner::new(true)))
            }
            IntervalFn::UnorderedNoOverlap => {
                verify_arg!(sub_iterators, !subs.is_empty());
                Ok(merge_or_single(subs, UnorderedCombiner::new(false)))
            }
            IntervalFn::UnorderedNear {
                min_width,
                max_width,
            } => {
                let inner = IntervalFn::Unordered.apply(subs)?;
                Ok(Box::new(WidthFilterIntervals::new(
                    inner, min_width, max_width,
                )))
            }
            IntervalFn::Containing => apply_filter(FilterKind::Containing, subs),
            IntervalFn::ContainedBy => apply_filter(FilterKind::ContainedBy, subs),
            IntervalFn::Overlapping => apply_filter(FilterKind::Overlapping, subs),
        }
    }
}

impl std::fmt::Display for IntervalFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntervalFn::Block => write!(f, "BLOCK"),
            IntervalFn::Ordered => write!(f, "ORDERED"),
            IntervalFn::OrderedNear {
                min_width,
                max_width,
            } => write!(f, "ORDERED_NEAR({min_width},{max_width})"),
            IntervalFn::Unordered => write!(f, "UNORDERED"),
            IntervalFn::UnorderedNoOverlap => write!(f, "UNORDERED_NO_OVERLAP"),
            IntervalFn::UnorderedNear {
                min_width,
                max_width,
            } => write!(f, "UNORDERED_NEAR({min_width},{max_width})"),
            IntervalFn::Containing => write!(f, "CONTAINING"),
            IntervalFn::ContainedBy => write!(f, "CONTAINED_BY"),
            IntervalFn::Overlapping => write!(f, "OVERLAPPING"),
        }
    }
}

/// A single operand needs no combining; the combined stream is the operand.
fn merge_or_single<C>(subs: Vec<BoxedIntervalIterator>, combiner: C) -> BoxedIntervalIterator
where
    C: crate::conjunction::IntervalCombiner + 'static,
{
    if subs.len() == 1 {
        return subs.into_iter().next().expect("len checked");
    }
    Box::new(ConjunctionIntervalIterator::new(subs, combiner))
}

fn apply_filter(
    kind: FilterKind,
    subs: Vec<BoxedIntervalIterator>,
) -> Result<BoxedIntervalIterator> {
    verify_arg!(sub_iterators, subs.len() == 2);
    Ok(Box::new(ConjunctionIntervalIterator::new(
        subs,
        FilteringCombiner::new(kind),
    )))
}

/// Predicate selecting which minuend intervals a subtrahend excludes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DifferenceFn {
    /// Excludes minuend intervals overlapping any subtrahend interval.
    NonOverlapping,
    /// Excludes minuend intervals within the given number of positions of a
    /// subtrahend interval: the subtrahend is widened by that amount on both
    /// sides before the overlap test.
    NotWithin(u32),
}

impl DifferenceFn {
    /// Binds the difference to a concrete minuend and subtrahend.
    pub fn apply(
        &self,
        minuend: BoxedIntervalIterator,
        subtrahend: BoxedIntervalIterator,
    ) -> BoxedIntervalIterator {
        match *self {
            DifferenceFn::NonOverlapping => {
                Box::new(NonOverlappingIntervals::new(minuend, subtrahend))
            }
            DifferenceFn::NotWithin(positions) => {
                let widened = Box::new(ExtendedIntervals::new(subtrahend, positions, positions));
                Box::new(NonOverlappingIntervals::new(minuend, widened))
            }
        }
    }
}

impl std::fmt::Display for DifferenceFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DifferenceFn::NonOverlapping => write!(f, "NON_OVERLAPPING"),
            DifferenceFn::NotWithin(positions) => write!(f, "NOT_WITHIN({positions})"),
        }
    }
}
