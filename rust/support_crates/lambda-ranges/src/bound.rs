//! Bound types and the shared ordering/validation helpers used by the sweeps.

use std::{cmp::Ordering, ops::Range};

use itertools::Itertools;
use lambda_common::{Result, error::Error};

/// A scalar usable as a range bound: integers and floats alike.
///
/// Only `PartialOrd` is required so that `f64` coordinates work. Inputs
/// containing incomparable bounds (NaN) are rejected by the operations that
/// need to sort.
pub trait RangeBound: Copy + PartialOrd {}

impl<T: Copy + PartialOrd> RangeBound for T {}

#[inline]
pub(crate) fn is_comparable<T: PartialOrd>(v: &T) -> bool {
    v.partial_cmp(v).is_some()
}

/// Total order on already validated bounds.
#[inline]
pub(crate) fn cmp_bounds<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Fails on the first range with a bound that does not compare equal to itself.
pub(crate) fn check_comparable<T: RangeBound>(name: &str, ranges: &[Range<T>]) -> Result<()> {
    match ranges
        .iter()
        .position(|r| !is_comparable(&r.start) || !is_comparable(&r.end))
    {
        Some(index) => {
            log::debug!("range {index} of '{name}' has an incomparable bound");
            Err(Error::incomparable_bound(name, index))
        }
        None => Ok(()),
    }
}

/// Returns the indices of the ranges accepted by `keep`, ordered by
/// `(start, end)`.
///
/// The sort is stable, so ranges with identical bounds keep their input order.
pub(crate) fn order_by_start<T, F>(ranges: &[Range<T>], keep: F) -> Vec<usize>
where
    T: RangeBound,
    F: Fn(&Range<T>) -> bool,
{
    let mut order = (0..ranges.len())
        .filter(|&i| keep(&ranges[i]))
        .collect::<Vec<_>>();
    order.sort_by(|&i, &j| {
        cmp_bounds(&ranges[i].start, &ranges[j].start)
            .then_with(|| cmp_bounds(&ranges[i].end, &ranges[j].end))
    });
    order
}

/// Checks that the ranges visited in `order` do not overlap.
///
/// `order` must be sorted by start and contain no decreasing ranges; touching
/// ranges (`prev.end == next.start`) are accepted.
pub(crate) fn check_disjoint<T: RangeBound>(
    name: &str,
    ranges: &[Range<T>],
    order: &[usize],
) -> Result<()> {
    for (&i, &j) in order.iter().tuple_windows() {
        if ranges[j].start < ranges[i].end {
            log::debug!("ranges {i} and {j} of '{name}' overlap");
            return Err(Error::overlapping_ranges(name, i, j));
        }
    }
    Ok(())
}
