//! A validated, immutable list of sorted, non-overlapping half-open ranges.

use std::ops::{Add, Range, Sub};

use lambda_common::Result;

use crate::{
    RangeBound,
    bound::{check_comparable, check_disjoint, order_by_start},
    normalize_ranges,
    provenance::Subtraction,
    set_ops::{
        cut::cut_ranges,
        subtract::{subtract_ranges, subtract_ranges_with_mapping},
        union::union_ranges,
    },
};

/// An immutable, start-sorted list of non-overlapping half-open ranges.
///
/// `RangeSet` is a flat array of `Range<T>` records addressed by position.
/// Invariants, established by [`new`](Self::new) and preserved by every
/// operation:
/// - ranges are sorted by `(start, end)`;
/// - `inner[i].end <= inner[i + 1].start` (touching is allowed);
/// - no range is decreasing, and every bound is comparable.
///
/// Empty (zero-width) ranges may be present; use
/// [`normalized`](Self::normalized) to drop them.
///
/// Indices reported by [`subtract_with_mapping`](Self::subtract_with_mapping)
/// refer to positions in the sorted sets, not to the order the ranges were
/// originally supplied in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RangeSet<T> {
    inner: Vec<Range<T>>,
}

impl<T: RangeBound> RangeSet<T> {
    /// Builds a set from ranges in any order.
    ///
    /// Decreasing ranges are dropped; the rest are sorted by start.
    ///
    /// # Errors
    ///
    /// Fails if two ranges overlap or a bound is incomparable (NaN).
    pub fn new(ranges: Vec<Range<T>>) -> Result<RangeSet<T>> {
        check_comparable("ranges", &ranges)?;
        let order = order_by_start(&ranges, |r| r.start <= r.end);
        check_disjoint("ranges", &ranges, &order)?;
        let inner = order.into_iter().map(|i| ranges[i].clone()).collect();
        Ok(RangeSet { inner })
    }

    /// Wraps ranges that the caller guarantees are already sorted,
    /// non-overlapping and non-decreasing.
    pub fn from_unchecked(ranges: Vec<Range<T>>) -> RangeSet<T> {
        debug_assert!(
            ranges
                .windows(2)
                .all(|w| w[0].start <= w[0].end && w[0].end <= w[1].start)
        );
        RangeSet { inner: ranges }
    }

    pub fn empty() -> RangeSet<T> {
        RangeSet { inner: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_slice(&self) -> &[Range<T>] {
        &self.inner
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Range<T>> {
        self.inner.iter()
    }

    pub fn into_vec(self) -> Vec<Range<T>> {
        self.inner
    }

    /// Returns a copy without empty ranges.
    pub fn normalized(&self) -> RangeSet<T> {
        RangeSet {
            inner: normalize_ranges(&self.inner),
        }
    }

    /// Returns `self \ other`.
    pub fn subtract(&self, other: &RangeSet<T>) -> Result<RangeSet<T>> {
        subtract_ranges(&self.inner, &other.inner).map(RangeSet::from_unchecked)
    }

    /// Returns `self \ other` together with its provenance.
    pub fn subtract_with_mapping(&self, other: &RangeSet<T>) -> Result<Subtraction<T>> {
        subtract_ranges_with_mapping(&self.inner, &other.inner)
    }

    /// Merges touching ranges.
    pub fn union(&self) -> Result<RangeSet<T>> {
        union_ranges(&self.inner).map(RangeSet::from_unchecked)
    }

    /// Returns the union of both sets.
    pub fn union_with(&self, other: &RangeSet<T>) -> Result<RangeSet<T>> {
        let all = self
            .inner
            .iter()
            .chain(other.inner.iter())
            .cloned()
            .collect::<Vec<_>>();
        union_ranges(&all).map(RangeSet::from_unchecked)
    }

    /// Splits the ranges at `points`.
    pub fn cut(&self, points: &[T]) -> Result<RangeSet<T>> {
        cut_ranges(&self.inner, points).map(RangeSet::from_unchecked)
    }

    /// Returns the index of the range containing `pos`, if any.
    ///
    /// O(log n).
    pub fn search_position(&self, pos: T) -> Option<usize> {
        let idx = self.inner.partition_point(|r| r.end <= pos);
        self.inner
            .get(idx)
            .filter(|r| r.start <= pos && pos < r.end)
            .map(|_| idx)
    }

    pub fn contains_position(&self, pos: T) -> bool {
        self.search_position(pos).is_some()
    }

    /// Bounds of the whole set, from the first start to the last end.
    pub fn bounds(&self) -> Option<Range<T>> {
        match (self.inner.first(), self.inner.last()) {
            (Some(first), Some(last)) => Some(first.start..last.end),
            _ => None,
        }
    }
}

impl<T> RangeSet<T>
where
    T: RangeBound + Default + Add<Output = T> + Sub<Output = T>,
{
    /// Total length covered by the set.
    pub fn total_len(&self) -> T {
        self.inner
            .iter()
            .fold(T::default(), |acc, r| acc + (r.end - r.start))
    }
}

impl<'a, T> IntoIterator for &'a RangeSet<T> {
    type Item = &'a Range<T>;
    type IntoIter = std::slice::Iter<'a, Range<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
