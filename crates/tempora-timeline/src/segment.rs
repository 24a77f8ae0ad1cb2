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

use crate::{
    err::{EvaluationError, KeyOutOfBoundsError},
    function::{NamedBinaryOperator, NamedUnaryOperator, ValueFunction},
};
use num_traits::{PrimInt, Signed};
use std::{
    fmt::{self, Debug, Display},
    sync::Arc,
};
use tempora_core::{
    primitives::Interval,
    time::{TimeDelta, TimeOverflowError, TimePoint, length_of},
};

/// A value function that is only defined on a half-open interval of keys.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Timesegment<K, V> {
    interval: Interval<K>,
    function: Arc<ValueFunction<K, V>>,
}

impl<K: Clone, V> Clone for Timesegment<K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            interval: self.interval.clone(),
            function: Arc::clone(&self.function),
        }
    }
}

impl<K, V> Timesegment<K, V> {
    #[inline]
    pub fn new(interval: Interval<K>, function: impl Into<Arc<ValueFunction<K, V>>>) -> Self {
        Self {
            interval,
            function: function.into(),
        }
    }

    #[inline]
    pub fn constant(interval: Interval<K>, value: V) -> Self {
        Self::new(interval, ValueFunction::constant(value))
    }

    #[inline]
    pub fn function(&self) -> &Arc<ValueFunction<K, V>> {
        &self.function
    }
}

impl<K: Ord + Copy, V> Timesegment<K, V> {
    #[inline]
    pub fn interval(&self) -> Interval<K> {
        self.interval
    }

    #[inline]
    pub fn start(&self) -> K {
        self.interval.start()
    }

    #[inline]
    pub fn end(&self) -> K {
        self.interval.end()
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.interval.contains(key)
    }

    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.interval.overlaps(&other.interval)
    }

    /// Evaluates the segment's function at `key`.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::OutOfBounds`] if `key` lies outside the segment,
    /// [`EvaluationError::Arithmetic`] if an operator in the function fails.
    pub fn value_at(&self, key: K) -> Result<V, EvaluationError<K>>
    where
        K: Debug,
        V: Clone,
    {
        if !self.contains(key) {
            return Err(KeyOutOfBoundsError::new(key, self.interval).into());
        }
        Ok(self.function.evaluate(key)?)
    }

    /// The same function viewed over `sub`, which must lie inside this segment.
    #[inline]
    pub fn restrict_to(&self, sub: Interval<K>) -> Self {
        debug_assert!(
            self.interval.encloses(&sub),
            "restriction must lie within the segment"
        );
        Self {
            interval: sub,
            function: Arc::clone(&self.function),
        }
    }

    /// A segment over `interval` evaluating `op(self, other)`.
    ///
    /// Both segments must enclose `interval`.
    pub fn combine_with(&self, op: &NamedBinaryOperator<V>, interval: Interval<K>, other: &Self) -> Self {
        debug_assert!(self.interval.encloses(&interval) && other.interval.encloses(&interval));
        Self {
            interval,
            function: Arc::new(ValueFunction::binary(
                op.clone(),
                Arc::clone(&self.function),
                Arc::clone(&other.function),
            )),
        }
    }

    pub fn map_unary(&self, op: &NamedUnaryOperator<V>) -> Self {
        Self {
            interval: self.interval,
            function: Arc::new(ValueFunction::unary(op.clone(), Arc::clone(&self.function))),
        }
    }
}

impl<T: PrimInt + Signed, V> Timesegment<TimePoint<T>, V> {
    #[inline]
    pub fn length(&self) -> Result<TimeDelta<T>, TimeOverflowError> {
        length_of(&self.interval)
    }
}

impl<K: Display, V: Display> Display for Timesegment<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.interval, self.function)
    }
}
