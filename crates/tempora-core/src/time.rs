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

//! # Time Keys
//!
//! Instants and durations in whole milliseconds. [`TimePoint`] counts
//! milliseconds from the Unix epoch and is the default key type of a timeline;
//! [`TimeDelta`] is the signed distance between two instants. Both default to
//! `i64`, which covers roughly 292 million years either side of the epoch.
//!
//! Arithmetic is always checked. Overflow is reported as a
//! [`TimeOverflowError`] naming the operation, never as a panic or a wrapped
//! value.

use crate::primitives::Interval;
use num_traits::{NumCast, PrimInt, Signed};
use std::fmt::{self, Display};
use thiserror::Error;

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("Time arithmetic overflowed in `{operation}`")]
pub struct TimeOverflowError {
    operation: &'static str,
}

impl TimeOverflowError {
    #[inline]
    pub fn new(operation: &'static str) -> Self {
        Self { operation }
    }

    #[inline]
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// An instant, in milliseconds since the Unix epoch.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimePoint<T = i64>(T);

/// A signed duration in milliseconds.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeDelta<T = i64>(T);

/// A half-open range of instants.
pub type TimeInterval<T = i64> = Interval<TimePoint<T>>;

impl<T: PrimInt + Signed> TimePoint<T> {
    #[inline]
    pub const fn from_millis(millis: T) -> Self {
        TimePoint(millis)
    }

    #[inline]
    pub fn epoch() -> Self {
        TimePoint(T::zero())
    }

    #[inline]
    pub const fn as_millis(self) -> T {
        self.0
    }

    #[inline]
    pub fn checked_add(self, delta: TimeDelta<T>) -> Result<Self, TimeOverflowError> {
        self.0
            .checked_add(&delta.0)
            .map(TimePoint)
            .ok_or(TimeOverflowError::new("instant + duration"))
    }

    #[inline]
    pub fn checked_sub(self, delta: TimeDelta<T>) -> Result<Self, TimeOverflowError> {
        self.0
            .checked_sub(&delta.0)
            .map(TimePoint)
            .ok_or(TimeOverflowError::new("instant - duration"))
    }

    /// The duration from `earlier` to `self`; negative if `earlier` is later.
    #[inline]
    pub fn duration_since(self, earlier: Self) -> Result<TimeDelta<T>, TimeOverflowError> {
        self.0
            .checked_sub(&earlier.0)
            .map(TimeDelta)
            .ok_or(TimeOverflowError::new("instant - instant"))
    }

    /// The interval covering `length` from this instant.
    ///
    /// A negative length reaches backwards, so the interval ends at `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempora_core::time::{TimeDelta, TimePoint};
    ///
    /// let ten = TimePoint::from_millis(10i64);
    /// let forward = ten.span(TimeDelta::from_millis(5)).unwrap();
    /// assert_eq!((forward.start(), forward.end()), (ten, TimePoint::from_millis(15)));
    /// let backward = ten.span(TimeDelta::from_millis(-5)).unwrap();
    /// assert_eq!((backward.start(), backward.end()), (TimePoint::from_millis(5), ten));
    /// ```
    #[inline]
    pub fn span(self, length: TimeDelta<T>) -> Result<TimeInterval<T>, TimeOverflowError> {
        Ok(Interval::new(self, self.checked_add(length)?))
    }
}

impl<T: PrimInt + Signed> TimeDelta<T> {
    #[inline]
    pub const fn from_millis(millis: T) -> Self {
        TimeDelta(millis)
    }

    #[inline]
    pub fn from_seconds(seconds: T) -> Result<Self, TimeOverflowError> {
        Self::scaled(seconds, MILLIS_PER_SECOND, "seconds to millis")
    }

    #[inline]
    pub fn from_minutes(minutes: T) -> Result<Self, TimeOverflowError> {
        Self::scaled(minutes, MILLIS_PER_MINUTE, "minutes to millis")
    }

    #[inline]
    pub fn from_hours(hours: T) -> Result<Self, TimeOverflowError> {
        Self::scaled(hours, MILLIS_PER_HOUR, "hours to millis")
    }

    fn scaled(count: T, factor: i64, operation: &'static str) -> Result<Self, TimeOverflowError> {
        let factor: T = NumCast::from(factor).ok_or(TimeOverflowError::new(operation))?;
        count
            .checked_mul(&factor)
            .map(TimeDelta)
            .ok_or(TimeOverflowError::new(operation))
    }

    #[inline]
    pub fn zero() -> Self {
        TimeDelta(T::zero())
    }

    #[inline]
    pub const fn as_millis(self) -> T {
        self.0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0.is_negative()
    }

    #[inline]
    pub fn checked_add(self, other: Self) -> Result<Self, TimeOverflowError> {
        self.0
            .checked_add(&other.0)
            .map(TimeDelta)
            .ok_or(TimeOverflowError::new("duration + duration"))
    }

    #[inline]
    pub fn checked_neg(self) -> Result<Self, TimeOverflowError> {
        T::zero()
            .checked_sub(&self.0)
            .map(TimeDelta)
            .ok_or(TimeOverflowError::new("-duration"))
    }
}

/// Length of a time interval.
#[inline]
pub fn length_of<T: PrimInt + Signed>(
    interval: &TimeInterval<T>,
) -> Result<TimeDelta<T>, TimeOverflowError> {
    interval.end().duration_since(interval.start())
}

impl<T: PrimInt + Signed> From<T> for TimePoint<T> {
    #[inline]
    fn from(millis: T) -> Self {
        TimePoint::from_millis(millis)
    }
}

impl<T: Display> Display for TimePoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}ms", self.0)
    }
}

impl<T: Display> Display for TimeDelta<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
