// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Timelines
//!
//! A [`Timeline`] is a sorted sequence of pairwise disjoint [`Timesegment`]s.
//! Keys not covered by any segment have no value.
//!
//! Combining overlapping segments is the central operation. The segment
//! intervals are first partitioned with [`disjoin`]; every resulting boundary
//! interval is then either covered by no input segment (a gap, emitted as
//! nothing), by exactly one (that segment restricted to the boundary), or by
//! several, in which case their value functions are folded left to right
//! through a [`NamedBinaryOperator`] in input order.
//!
//! ```
//! use tempora_core::primitives::Interval;
//! use tempora_timeline::{function::NamedBinaryOperator, segment::Timesegment, timeline::Timeline};
//!
//! let plus = NamedBinaryOperator::new("+", |a: i64, b: i64| Ok(a + b));
//! let timeline = Timeline::of_unordered(
//!     &plus,
//!     [
//!         Timesegment::constant(Interval::new(0, 10), 2),
//!         Timesegment::constant(Interval::new(5, 15), 5),
//!     ],
//! );
//! assert_eq!(timeline.len(), 3);
//! assert_eq!(timeline.value_at(7), Ok(Some(7)));
//! assert_eq!(timeline.value_at(20), Ok(None));
//! ```

use crate::{
    err::{EmptyTimelineError, OverlappingSegmentError},
    function::{NamedBinaryOperator, NamedUnaryOperator, ValueFunction},
    segment::Timesegment,
};
use num_traits::{PrimInt, Signed};
use std::{fmt::Debug, sync::Arc};
use tempora_calc::err::NumberError;
use tempora_core::{
    algebra::{disjoin, is_disjoint_and_ordered},
    primitives::Interval,
    time::{TimeDelta, TimeOverflowError, TimePoint},
};
use tracing::{debug, instrument, trace};

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Timeline<K, V> {
    segments: Vec<Timesegment<K, V>>,
}

impl<K: Clone, V> Clone for Timeline<K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            segments: self.segments.clone(),
        }
    }
}

impl<K, V> Default for Timeline<K, V> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<K, V> Timeline<K, V> {
    #[inline]
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    #[inline]
    pub fn segments(&self) -> &[Timesegment<K, V>] {
        &self.segments
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Timesegment<K, V>> {
        self.segments.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<K: Ord + Copy, V> Timeline<K, V> {
    /// Wraps segments the caller already keeps disjoint and sorted.
    ///
    /// The invariant is only checked in debug builds.
    #[inline]
    pub fn of_disjoint_and_ordered(segments: Vec<Timesegment<K, V>>) -> Self {
        debug_assert!(
            is_disjoint_and_ordered(
                &segments
                    .iter()
                    .map(Timesegment::interval)
                    .collect::<Vec<_>>()
            ),
            "segments must be disjoint and ordered"
        );
        Self { segments }
    }

    /// Builds a timeline from arbitrary, possibly overlapping segments.
    ///
    /// Where segments overlap, their functions are combined with `op` in the
    /// order the segments are given. Uncovered keys stay uncovered. Finding the
    /// segments that enclose a boundary is a linear scan per boundary, which is
    /// fine for the small segment counts timelines are built from.
    #[instrument(level = "debug", skip_all, fields(op = op.name()))]
    pub fn of_unordered<I>(op: &NamedBinaryOperator<V>, segments: I) -> Self
    where
        I: IntoIterator<Item = Timesegment<K, V>>,
    {
        let segments: Vec<Timesegment<K, V>> = segments.into_iter().collect();
        let intervals: Vec<Interval<K>> = segments.iter().map(Timesegment::interval).collect();
        let boundaries = disjoin(&intervals);
        debug!(
            segments = segments.len(),
            boundaries = boundaries.len(),
            "partitioned segment intervals"
        );

        let mut combined = Vec::with_capacity(boundaries.len());
        for boundary in boundaries.into_iter().filter(|b| !b.is_empty()) {
            let mut enclosing = segments
                .iter()
                .filter(|segment| segment.interval().encloses(&boundary));
            let Some(first) = enclosing.next() else {
                trace!(index = combined.len(), "gap between segments");
                continue;
            };
            let mut folded = first.restrict_to(boundary);
            let mut folds = 0usize;
            for next in enclosing {
                folded = folded.combine_with(op, boundary, next);
                folds += 1;
            }
            trace!(index = combined.len(), folds, "emitted segment");
            combined.push(folded);
        }

        debug_assert!(is_disjoint_and_ordered(
            &combined.iter().map(Timesegment::interval).collect::<Vec<_>>()
        ));
        Self { segments: combined }
    }

    /// Returns a new timeline with a segment over `interval` added.
    ///
    /// # Errors
    ///
    /// Returns an [`OverlappingSegmentError`] naming the first existing segment
    /// that overlaps `interval`. Touching segments do not overlap.
    pub fn add(
        &self,
        interval: Interval<K>,
        function: impl Into<Arc<ValueFunction<K, V>>>,
    ) -> Result<Self, OverlappingSegmentError<K>>
    where
        K: Debug,
    {
        if let Some(existing) = self
            .segments
            .iter()
            .find(|segment| segment.interval().overlaps(&interval))
        {
            return Err(OverlappingSegmentError::new(interval, existing.interval()));
        }
        let mut segments = self.segments.clone();
        segments.push(Timesegment::new(interval, function));
        segments.sort_by_key(Timesegment::interval);
        Ok(Self { segments })
    }

    /// Value at `key`, or `None` if no segment covers it.
    pub fn value_at(&self, key: K) -> Result<Option<V>, NumberError>
    where
        V: Clone,
    {
        self.segments
            .iter()
            .find(|segment| segment.contains(key))
            .map(|segment| segment.function().evaluate(key))
            .transpose()
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.segments.iter().any(|segment| segment.contains(key))
    }

    /// Keeps the parts of all segments that fall inside `interval`.
    pub fn restrict_to(&self, interval: Interval<K>) -> Self {
        let segments = self
            .segments
            .iter()
            .filter_map(|segment| {
                segment
                    .interval()
                    .intersection(&interval)
                    .map(|sub| segment.restrict_to(sub))
            })
            .collect();
        Self { segments }
    }

    #[inline]
    pub fn start(&self) -> Result<K, EmptyTimelineError> {
        self.segments
            .first()
            .map(Timesegment::start)
            .ok_or(EmptyTimelineError)
    }

    /// The largest segment end; with disjoint ordered segments this is the last.
    #[inline]
    pub fn end(&self) -> Result<K, EmptyTimelineError> {
        self.segments
            .last()
            .map(Timesegment::end)
            .ok_or(EmptyTimelineError)
    }

    /// The span from the first start to the last end, gaps included.
    #[inline]
    pub fn interval(&self) -> Result<Interval<K>, EmptyTimelineError> {
        Ok(Interval::new(self.start()?, self.end()?))
    }

    /// Combines both timelines, applying `op` where their segments overlap.
    pub fn combine(&self, op: &NamedBinaryOperator<V>, other: &Self) -> Self {
        Self::of_unordered(op, self.segments.iter().chain(&other.segments).cloned())
    }

    pub fn map_unary(&self, op: &NamedUnaryOperator<V>) -> Self {
        Self {
            segments: self.segments.iter().map(|segment| segment.map_unary(op)).collect(),
        }
    }
}

/// A timeline keyed by epoch-millisecond instants.
pub type InstantTimeline<V> = Timeline<TimePoint, V>;

impl<T: PrimInt + Signed, V> Timeline<TimePoint<T>, V> {
    /// Total time covered by segments, gaps excluded.
    ///
    /// # Errors
    ///
    /// A [`TimeOverflowError`] if a segment length or the sum does not fit `T`.
    pub fn covered_length(&self) -> Result<TimeDelta<T>, TimeOverflowError> {
        self.segments
            .iter()
            .try_fold(TimeDelta::zero(), |total, segment| total.checked_add(segment.length()?))
    }
}

impl<K, V> IntoIterator for Timeline<K, V> {
    type Item = Timesegment<K, V>;
    type IntoIter = std::vec::IntoIter<Timesegment<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Timeline<K, V> {
    type Item = &'a Timesegment<K, V>;
    type IntoIter = std::slice::Iter<'a, Timesegment<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
