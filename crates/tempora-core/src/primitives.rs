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

//! # Core Primitives
//!
//! The half-open interval that every timeline is built from. Intervals are
//! plain values: they are compared, sliced and recombined, but never mutated.

use std::cmp::Ordering;
use std::fmt;

/// A half-open interval `[start, end)`.
///
/// The start is inclusive and the end is exclusive, so `[start, end)` includes
/// all values `x` such that `start <= x < end`.
///
/// Intervals are ordered by `start` first and `end` second, both ascending.
/// This is the tie-break used for sorting intervals and timesegments throughout
/// the workspace.
///
/// # Examples
///
/// ```
/// use tempora_core::primitives::Interval;
/// let interval = Interval::new(1, 5);
/// assert!(interval.start() == 1);
/// assert!(interval.end() == 5);
/// assert!(interval.contains(3));
/// assert!(!interval.contains(5));
/// assert!(!interval.is_empty());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> Interval<T> {
    /// Creates a new half-open interval `[start, end)`.
    ///
    /// If `b < a` the bounds are swapped, so the interval is always well-formed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempora_core::primitives::Interval;
    ///
    /// let interval = Interval::new(5, 3);
    /// assert_eq!(interval.start(), 3);
    /// assert_eq!(interval.end(), 5);
    /// ```
    #[inline]
    pub fn new(a: T, b: T) -> Self
    where
        T: Ord,
    {
        // Every method below relies on `start_inclusive <= end_exclusive`.
        if a > b {
            Self {
                start_inclusive: b,
                end_exclusive: a,
            }
        } else {
            Self {
                start_inclusive: a,
                end_exclusive: b,
            }
        }
    }

    /// Returns the inclusive start of the interval.
    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start_inclusive
    }

    /// Returns the exclusive end of the interval.
    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end_exclusive
    }

    /// Returns `true` if the interval has no length.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempora_core::primitives::Interval;
    ///
    /// assert!(Interval::new(5, 5).is_empty());
    /// assert!(!Interval::new(1, 5).is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool
    where
        T: PartialEq,
    {
        self.start_inclusive == self.end_exclusive
    }

    /// Checks if the interval contains a point.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempora_core::primitives::Interval;
    ///
    /// let interval = Interval::new(1, 5);
    /// assert!(interval.contains(1)); // start is inclusive
    /// assert!(interval.contains(3));
    /// assert!(!interval.contains(5)); // end is exclusive
    /// assert!(!interval.contains(0));
    /// ```
    #[inline]
    pub fn contains(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        x >= self.start_inclusive && x < self.end_exclusive
    }

    /// Checks if this interval fully contains `other`.
    ///
    /// Partial overlap is not enclosure. An interval encloses itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempora_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5);
    /// assert!(a.encloses(&Interval::new(2, 4)));
    /// assert!(a.encloses(&Interval::new(1, 5)));
    /// assert!(!a.encloses(&Interval::new(0, 6)));
    /// assert!(!a.encloses(&Interval::new(4, 6)));
    /// ```
    #[inline]
    pub fn encloses(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        other.start_inclusive >= self.start_inclusive && other.end_exclusive <= self.end_exclusive
    }

    /// Checks if this interval precedes `other`, i.e. ends at or before its start.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempora_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5);
    /// assert!(a.precedes(&Interval::new(5, 10))); // touching
    /// assert!(a.precedes(&Interval::new(6, 10)));
    /// assert!(!a.precedes(&Interval::new(4, 8)));
    /// ```
    #[inline]
    pub fn precedes(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        self.end_exclusive <= other.start_inclusive
    }

    /// Checks if this interval and `other` share at least one point.
    ///
    /// Intervals that only touch at a boundary do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempora_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5);
    /// assert!(a.overlaps(&Interval::new(4, 6)));
    /// assert!(!a.overlaps(&Interval::new(5, 7)));
    /// assert!(a.overlaps(&a));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        self.start_inclusive < other.end_exclusive && other.start_inclusive < self.end_exclusive
    }

    /// Returns the intersection of this interval with `other`, or `None` if they
    /// do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempora_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5);
    /// assert_eq!(a.intersection(&Interval::new(3, 7)), Some(Interval::new(3, 5)));
    /// assert_eq!(a.intersection(&Interval::new(5, 8)), None);
    /// ```
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self>
    where
        T: Ord + Copy,
    {
        let start = self.start_inclusive.max(other.start_inclusive);
        let end = self.end_exclusive.min(other.end_exclusive);
        (start < end).then_some(Self {
            start_inclusive: start,
            end_exclusive: end,
        })
    }

    /// Returns the smallest interval covering both intervals, if they overlap or touch.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempora_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5);
    /// assert_eq!(a.union(&Interval::new(4, 7)), Some(Interval::new(1, 7)));
    /// assert_eq!(a.union(&Interval::new(5, 10)), Some(Interval::new(1, 10)));
    /// assert_eq!(a.union(&Interval::new(6, 8)), None);
    /// ```
    #[inline]
    pub fn union(&self, other: &Self) -> Option<Self>
    where
        T: Ord + Copy,
    {
        if self.start_inclusive <= other.end_exclusive && other.start_inclusive <= self.end_exclusive
        {
            Some(Self {
                start_inclusive: self.start_inclusive.min(other.start_inclusive),
                end_exclusive: self.end_exclusive.max(other.end_exclusive),
            })
        } else {
            None
        }
    }

    /// Converts the interval to a `std::ops::Range<T>`.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<T>
    where
        T: Copy,
    {
        self.start_inclusive..self.end_exclusive
    }
}

impl<T: Ord> PartialOrd for Interval<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for Interval<T> {
    /// Orders by start instant first, end instant second.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.start_inclusive
            .cmp(&other.start_inclusive)
            .then_with(|| self.end_exclusive.cmp(&other.end_exclusive))
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    /// Formats the interval as `[start, end)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempora_core::primitives::Interval;
    ///
    /// assert_eq!(format!("{}", Interval::new(1, 5)), "[1, 5)");
    /// ```
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}

impl<T: Ord> From<std::ops::Range<T>> for Interval<T> {
    #[inline]
    fn from(r: std::ops::Range<T>) -> Self {
        Interval::new(r.start, r.end)
    }
}
