//! Immutable query-side description of an interval combination.
//!
//! An [`IntervalsSource`] is a value tree: terms at the leaves, combinator
//! functions at the inner nodes. Sources compare and hash by configuration,
//! never by iterator identity, so they serve as query-cache keys. Binding a
//! source to a field and a [`PositionSource`] produces the per-segment
//! iterator that actually walks documents.
//!
//! Sequence-constrained combinators are rewritten over nested disjunctions
//! at construction time (see [`IntervalsSource::get_disjunctions`]); the
//! factory constructors below are therefore the supported way to build
//! sources.

use itertools::Itertools;

use skald_common::Result;

use crate::combine::{DifferenceFn, DisjunctionIntervals, IntervalFn};
use crate::iterator::{BoxedIntervalIterator, DocId};
use crate::matches::IntervalMatches;
use crate::postings::PositionSource;
use crate::term::TermIntervals;
use crate::visitor::{Occur, QueryVisitor};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntervalsSource {
    /// A single term's occurrences, each as one interval.
    Term(String),
    /// An n-ary combinator over sub-sources.
    Combined {
        function: IntervalFn,
        subs: Vec<IntervalsSource>,
    },
    /// Document-level OR of sub-sources.
    Disjunction(Vec<IntervalsSource>),
    /// Minuend intervals not excluded by the subtrahend.
    Difference {
        function: DifferenceFn,
        minuend: Box<IntervalsSource>,
        subtrahend: Box<IntervalsSource>,
    },
}

impl IntervalsSource {
    pub fn term(term: impl Into<String>) -> IntervalsSource {
        IntervalsSource::Term(term.into())
    }

    /// Terms matching as one contiguous block.
    pub fn phrase<I>(terms: I) -> IntervalsSource
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        IntervalsSource::block(terms.into_iter().map(IntervalsSource::term).collect())
    }

    pub fn block(subs: Vec<IntervalsSource>) -> IntervalsSource {
        IntervalsSource::combine(IntervalFn::Block, subs)
    }

    pub fn ordered(subs: Vec<IntervalsSource>) -> IntervalsSource {
        IntervalsSource::combine(IntervalFn::Ordered, subs)
    }

    pub fn ordered_near(
        min_width: u32,
        max_width: u32,
        subs: Vec<IntervalsSource>,
    ) -> IntervalsSource {
        IntervalsSource::combine(
            IntervalFn::OrderedNear {
                min_width,
                max_width,
            },
            subs,
        )
    }

    pub fn unordered(subs: Vec<IntervalsSource>) -> IntervalsSource {
        IntervalsSource::combine(IntervalFn::Unordered, subs)
    }

    pub fn unordered_no_overlap(subs: Vec<IntervalsSource>) -> IntervalsSource {
        IntervalsSource::combine(IntervalFn::UnorderedNoOverlap, subs)
    }

    pub fn unordered_near(
        min_width: u32,
        max_width: u32,
        subs: Vec<IntervalsSource>,
    ) -> IntervalsSource {
        IntervalsSource::combine(
            IntervalFn::UnorderedNear {
                min_width,
                max_width,
            },
            subs,
        )
    }

    /// Subject intervals that contain at least one filter interval.
    pub fn containing(subject: IntervalsSource, filter: IntervalsSource) -> IntervalsSource {
        IntervalsSource::combine(IntervalFn::Containing, vec![subject, filter])
    }

    /// Subject intervals contained by at least one filter interval.
    pub fn contained_by(subject: IntervalsSource, filter: IntervalsSource) -> IntervalsSource {
        IntervalsSource::combine(IntervalFn::ContainedBy, vec![subject, filter])
    }

    /// Subject intervals overlapping at least one filter interval.
    pub fn overlapping(subject: IntervalsSource, filter: IntervalsSource) -> IntervalsSource {
        IntervalsSource::combine(IntervalFn::Overlapping, vec![subject, filter])
    }

    pub fn or_of(mut subs: Vec<IntervalsSource>) -> IntervalsSource {
        if subs.len() == 1 {
            return subs.pop().expect("len checked");
        }
        IntervalsSource::Disjunction(subs)
    }

    /// Minuend intervals that do not overlap any subtrahend interval.
    pub fn non_overlapping(
        minuend: IntervalsSource,
        subtrahend: IntervalsSource,
    ) -> IntervalsSource {
        IntervalsSource::difference(DifferenceFn::NonOverlapping, minuend, subtrahend)
    }

    /// Minuend intervals further than `positions` positions away from every
    /// subtrahend interval.
    pub fn not_within(
        minuend: IntervalsSource,
        positions: u32,
        subtrahend: IntervalsSource,
    ) -> IntervalsSource {
        IntervalsSource::difference(DifferenceFn::NotWithin(positions), minuend, subtrahend)
    }

    fn combine(function: IntervalFn, subs: Vec<IntervalsSource>) -> IntervalsSource {
        if function.rewrite_disjunctions() {
            return pull_up_disjunctions(function, subs);
        }
        IntervalsSource::Combined { function, subs }
    }

    fn difference(
        function: DifferenceFn,
        minuend: IntervalsSource,
        subtrahend: IntervalsSource,
    ) -> IntervalsSource {
        let disjuncts = minuend.get_disjunctions();
        if disjuncts.len() == 1 {
            return IntervalsSource::Difference {
                function,
                minuend: Box::new(minuend),
                subtrahend: Box::new(subtrahend),
            };
        }
        log::trace!(
            "splitting difference minuend into {} disjuncts",
            disjuncts.len()
        );
        IntervalsSource::Disjunction(
            disjuncts
                .into_iter()
                .map(|d| IntervalsSource::Difference {
                    function,
                    minuend: Box::new(d),
                    subtrahend: Box::new(subtrahend.clone()),
                })
                .collect(),
        )
    }

    /// The disjuncts this source is equivalent to.
    ///
    /// A source whose primary (first) operand is not itself a top-level
    /// disjunction is its own single disjunct. When the primary operand is a
    /// disjunction of N sub-clauses, a sequence- or difference-constrained
    /// source rewrites into N copies of itself, each bound to one sub-clause
    /// in the primary position, so that composition above it stays sound.
    pub fn get_disjunctions(&self) -> Vec<IntervalsSource> {
        match self {
            IntervalsSource::Term(_) => vec![self.clone()],
            IntervalsSource::Disjunction(subs) => {
                subs.iter().flat_map(|s| s.get_disjunctions()).collect()
            }
            IntervalsSource::Combined { function, subs } => {
                if !function.rewrite_disjunctions() {
                    return vec![self.clone()];
                }
                let inner = subs[0].get_disjunctions();
                if inner.len() == 1 {
                    return vec![self.clone()];
                }
                inner
                    .into_iter()
                    .map(|first| {
                        let mut rewritten = subs.clone();
                        rewritten[0] = first;
                        IntervalsSource::Combined {
                            function: *function,
                            subs: rewritten,
                        }
                    })
                    .collect()
            }
            IntervalsSource::Difference {
                function,
                minuend,
                subtrahend,
            } => {
                let inner = minuend.get_disjunctions();
                if inner.len() == 1 {
                    return vec![self.clone()];
                }
                inner
                    .into_iter()
                    .map(|m| IntervalsSource::Difference {
                        function: *function,
                        minuend: Box::new(m),
                        subtrahend: subtrahend.clone(),
                    })
                    .collect()
            }
        }
    }

    /// Binds this source to a field of one segment.
    ///
    /// `Ok(None)` means the field has no positional data to combine for this
    /// source in this segment; the clause matches nothing. Decode failures
    /// from the underlying position streams propagate unchanged.
    pub fn intervals(
        &self,
        field: &str,
        source: &dyn PositionSource,
    ) -> Result<Option<BoxedIntervalIterator>> {
        match self {
            IntervalsSource::Term(term) => {
                let cursor = source.positions(field, term)?;
                Ok(cursor.map(|c| Box::new(TermIntervals::new(c)) as BoxedIntervalIterator))
            }
            IntervalsSource::Combined { function, subs } => {
                let mut iterators = Vec::with_capacity(subs.len());
                for sub in subs {
                    match sub.intervals(field, source)? {
                        Some(it) => iterators.push(it),
                        // A conjunction with an absent operand matches nothing.
                        None => return Ok(None),
                    }
                }
                log::trace!("binding {function} over {} sub-iterators", iterators.len());
                Ok(Some(function.apply(iterators)?))
            }
            IntervalsSource::Disjunction(subs) => {
                let mut iterators = Vec::with_capacity(subs.len());
                for sub in subs {
                    if let Some(it) = sub.intervals(field, source)? {
                        iterators.push(it);
                    }
                }
                match iterators.len() {
                    0 => Ok(None),
                    1 => Ok(iterators.pop()),
                    _ => Ok(Some(Box::new(DisjunctionIntervals::new(iterators)))),
                }
            }
            IntervalsSource::Difference {
                function,
                minuend,
                subtrahend,
            } => {
                let Some(minuend_it) = minuend.intervals(field, source)? else {
                    return Ok(None);
                };
                match subtrahend.intervals(field, source)? {
                    // Nothing to subtract: the minuend passes through.
                    None => Ok(Some(minuend_it)),
                    Some(subtrahend_it) => Ok(Some(function.apply(minuend_it, subtrahend_it))),
                }
            }
        }
    }

    /// Wraps this source's interval stream on one document as a matches
    /// iterator for highlighting.
    ///
    /// `Ok(None)` when the document does not match.
    pub fn matches(
        &self,
        field: &str,
        source: &dyn PositionSource,
        doc: DocId,
    ) -> Result<Option<IntervalMatches>> {
        let Some(mut it) = self.intervals(field, source)? else {
            return Ok(None);
        };
        if it.advance(doc)? != doc {
            return Ok(None);
        }
        // The document cursor is only an approximation; the interval
        // constraints may still reject it.
        if it.next_interval()? == crate::iterator::NO_MORE_INTERVALS {
            return Ok(None);
        }
        Ok(Some(IntervalMatches::new(it)))
    }

    /// The minimum possible span length of a match, for pruning by outer
    /// composition.
    pub fn min_extent(&self) -> u32 {
        match self {
            IntervalsSource::Term(_) => 1,
            IntervalsSource::Combined { function, subs } => match function {
                IntervalFn::Containing | IntervalFn::ContainedBy | IntervalFn::Overlapping => {
                    subs.first().map_or(0, IntervalsSource::min_extent)
                }
                IntervalFn::OrderedNear { min_width, .. }
                | IntervalFn::UnorderedNear { min_width, .. } => subs
                    .iter()
                    .map(IntervalsSource::min_extent)
                    .sum::<u32>()
                    .max(*min_width),
                _ => subs.iter().map(IntervalsSource::min_extent).sum(),
            },
            IntervalsSource::Disjunction(subs) => subs
                .iter()
                .map(IntervalsSource::min_extent)
                .min()
                .unwrap_or(0),
            IntervalsSource::Difference { minuend, .. } => minuend.min_extent(),
        }
    }

    /// Walks the source tree, reporting each term with its clause role.
    pub fn visit(&self, field: &str, occur: Occur, visitor: &mut dyn QueryVisitor) {
        match self {
            IntervalsSource::Term(term) => visitor.consume_term(field, term, occur),
            IntervalsSource::Combined { subs, .. } => {
                for sub in subs {
                    sub.visit(field, occur, visitor);
                }
            }
            IntervalsSource::Disjunction(subs) => {
                // OR branches weaken a required clause to optional, but an
                // excluded or filtering role distributes over every branch.
                let sub_occur = match occur {
                    Occur::Must => Occur::Should,
                    other => other,
                };
                for sub in subs {
                    sub.visit(field, sub_occur, visitor);
                }
            }
            IntervalsSource::Difference {
                minuend,
                subtrahend,
                ..
            } => {
                minuend.visit(field, Occur::Must, visitor);
                subtrahend.visit(field, Occur::MustNot, visitor);
            }
        }
    }
}

impl std::fmt::Display for IntervalsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntervalsSource::Term(term) => write!(f, "{term}"),
            IntervalsSource::Combined { function, subs } => {
                write!(f, "{function}({})", subs.iter().join(","))
            }
            IntervalsSource::Disjunction(subs) => {
                write!(f, "or({})", subs.iter().join(","))
            }
            IntervalsSource::Difference {
                function,
                minuend,
                subtrahend,
            } => write!(f, "{function}({minuend}, {subtrahend})"),
        }
    }
}

/// Splits nested disjunctions out of a sequence-constrained combinator.
///
/// Every operand contributes its disjuncts; the cartesian product of those
/// choices becomes a disjunction of rewritten combinators. With no nested
/// disjunction anywhere this is the identity.
fn pull_up_disjunctions(function: IntervalFn, subs: Vec<IntervalsSource>) -> IntervalsSource {
    let choices: Vec<Vec<IntervalsSource>> = subs.iter().map(|s| s.get_disjunctions()).collect();
    if choices.iter().all(|c| c.len() == 1) {
        return IntervalsSource::Combined { function, subs };
    }
    let mut combos: Vec<Vec<IntervalsSource>> = vec![Vec::new()];
    for choice in &choices {
        combos = combos
            .into_iter()
            .flat_map(|prefix| {
                choice.iter().map(move |option| {
                    let mut operands = prefix.clone();
                    operands.push(option.clone());
                    operands
                })
            })
            .collect();
    }
    log::trace!(
        "pulled {} disjuncts above {function} over {} operands",
        combos.len(),
        choices.len()
    );
    IntervalsSource::Disjunction(
        combos
            .into_iter()
            .map(|operands| IntervalsSource::Combined {
                function,
                subs: operands,
            })
            .collect(),
    )
}
