use std::ops::Range;

use crate::RangeBound;

/// Drops empty (`start == end`) and decreasing (`end < start`) ranges.
///
/// The remaining ranges keep their input order; nothing is sorted or merged.
/// Ranges with incomparable bounds (NaN) are dropped as well.
pub fn normalize_ranges<T: RangeBound>(ranges: &[Range<T>]) -> Vec<Range<T>> {
    ranges.iter().filter(|r| r.start < r.end).cloned().collect()
}
