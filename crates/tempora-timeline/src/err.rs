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

use std::fmt::Debug;
use tempora_calc::err::NumberError;
use tempora_core::primitives::Interval;
use thiserror::Error;

/// A timesegment was evaluated at a key outside its interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("Key {key:?} is out of bounds of segment [{:?}, {:?})", .interval.start(), .interval.end())]
pub struct KeyOutOfBoundsError<K: Copy + Debug> {
    key: K,
    interval: Interval<K>,
}

impl<K: Copy + Debug> KeyOutOfBoundsError<K> {
    #[inline]
    pub fn new(key: K, interval: Interval<K>) -> Self {
        Self { key, interval }
    }

    #[inline]
    pub fn key(&self) -> K {
        self.key
    }

    #[inline]
    pub fn interval(&self) -> Interval<K> {
        self.interval
    }
}

/// A segment was added to a timeline where it would overlap an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error(
    "Interval [{:?}, {:?}) overlaps existing segment [{:?}, {:?})",
    .interval.start(), .interval.end(), .existing.start(), .existing.end()
)]
pub struct OverlappingSegmentError<K: Copy + Debug> {
    interval: Interval<K>,
    existing: Interval<K>,
}

impl<K: Copy + Debug> OverlappingSegmentError<K> {
    #[inline]
    pub fn new(interval: Interval<K>, existing: Interval<K>) -> Self {
        Self { interval, existing }
    }

    /// The interval that was rejected.
    #[inline]
    pub fn interval(&self) -> Interval<K> {
        self.interval
    }

    /// The first existing segment interval it overlaps.
    #[inline]
    pub fn existing(&self) -> Interval<K> {
        self.existing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Error)]
#[error("Empty timeline has no start or end")]
pub struct EmptyTimelineError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError<K: Copy + Debug> {
    #[error(transparent)]
    OutOfBounds(#[from] KeyOutOfBoundsError<K>),
    #[error(transparent)]
    Arithmetic(#[from] NumberError),
}
