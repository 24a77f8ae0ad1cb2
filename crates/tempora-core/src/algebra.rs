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

//! # Interval Algebra
//!
//! Pure functions over collections of half-open intervals.
//!
//! - [`disjoin`] splits overlapping intervals into the finest partition in which
//!   every piece lies either fully inside or fully outside each input.
//! - [`merge`] fuses overlapping or touching intervals into maximal spans.
//!
//! Both sort their input first and then sweep it once, so they run in
//! `O(n log n)`. Zero-length intervals cover nothing and are dropped when the
//! input has more than one element. Empty and singleton inputs are returned as is.

use crate::primitives::Interval;

/// Computes the finest disjoint partition of `intervals`.
///
/// Every output interval is either fully contained in or fully disjoint from
/// every input interval, and the union of the outputs equals the union of the
/// inputs. Identical inputs collapse to one output; inputs that only touch at a
/// boundary are passed through unmodified. The result is sorted by
/// `(start, end)` and pairwise non-overlapping.
///
/// # Examples
///
/// ```
/// use tempora_core::{algebra::disjoin, primitives::Interval};
///
/// let parts = disjoin(&[Interval::new(11, 13), Interval::new(10, 12)]);
/// assert_eq!(
///     parts,
///     vec![Interval::new(10, 11), Interval::new(11, 12), Interval::new(12, 13)]
/// );
/// ```
pub fn disjoin<T>(intervals: &[Interval<T>]) -> Vec<Interval<T>>
where
    T: Ord + Copy,
{
    if intervals.len() < 2 {
        return intervals.to_vec();
    }

    // +1 opens coverage at a start, -1 closes it at an end.
    let mut events: Vec<(T, i32)> = Vec::with_capacity(intervals.len() * 2);
    for iv in intervals.iter().filter(|iv| !iv.is_empty()) {
        events.push((iv.start(), 1));
        events.push((iv.end(), -1));
    }
    events.sort_unstable_by_key(|&(point, _)| point);

    let mut partition = Vec::with_capacity(events.len());
    let mut coverage: i32 = 0;
    let mut index = 0;
    while index < events.len() {
        let point = events[index].0;
        while index < events.len() && events[index].0 == point {
            coverage += events[index].1;
            index += 1;
        }
        debug_assert!(coverage >= 0);
        if coverage > 0 {
            // Coverage is positive, so another boundary must follow.
            if let Some(&(next, _)) = events.get(index) {
                partition.push(Interval::new(point, next));
            }
        }
    }

    debug_assert!(is_disjoint_and_ordered(&partition));
    partition
}

/// Coalesces every maximal run of overlapping or touching intervals into one
/// spanning interval.
///
/// Unlike [`disjoin`], which splits, `merge` fuses. The result is sorted and
/// separated by gaps.
///
/// # Examples
///
/// ```
/// use tempora_core::{algebra::merge, primitives::Interval};
///
/// let spans = merge(&[
///     Interval::new(11, 13),
///     Interval::new(10, 11),
///     Interval::new(15, 17),
/// ]);
/// assert_eq!(spans, vec![Interval::new(10, 13), Interval::new(15, 17)]);
/// ```
pub fn merge<T>(intervals: &[Interval<T>]) -> Vec<Interval<T>>
where
    T: Ord + Copy,
{
    if intervals.len() < 2 {
        return intervals.to_vec();
    }

    let mut merged: Vec<Interval<T>> = intervals
        .iter()
        .copied()
        .filter(|iv| !iv.is_empty())
        .collect();
    merged.sort_unstable();

    let mut write_index = 0;
    for read_index in 1..merged.len() {
        // Overlapping or adjacent to the last written one: extend it.
        if merged[write_index].end() >= merged[read_index].start() {
            let merged_end = merged[write_index].end().max(merged[read_index].end());
            merged[write_index] = Interval::new(merged[write_index].start(), merged_end);
        } else {
            write_index += 1;
            merged[write_index] = merged[read_index];
        }
    }
    merged.truncate((write_index + 1).min(merged.len()));
    merged
}

/// Returns `true` if `intervals` is sorted by `(start, end)` and no two
/// intervals overlap. Touching intervals are allowed.
///
/// # Examples
///
/// ```
/// use tempora_core::{algebra::is_disjoint_and_ordered, primitives::Interval};
///
/// assert!(is_disjoint_and_ordered(&[Interval::new(1, 3), Interval::new(3, 5)]));
/// assert!(!is_disjoint_and_ordered(&[Interval::new(1, 4), Interval::new(3, 5)]));
/// assert!(!is_disjoint_and_ordered(&[Interval::new(3, 5), Interval::new(1, 3)]));
/// ```
pub fn is_disjoint_and_ordered<T>(intervals: &[Interval<T>]) -> bool
where
    T: Ord + Copy,
{
    intervals
        .windows(2)
        .all(|window| window[0] < window[1] && window[0].precedes(&window[1]))
}
