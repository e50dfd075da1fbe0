use std::ops::Range;

use lambda_common::Result;

use crate::{
    RangeBound,
    bound::{check_comparable, order_by_start},
    provenance::UnionMapping,
};

/// Merges all mutually overlapping or touching ranges into a minimal list of
/// disjoint ranges.
///
/// Two ranges are merged when the next one starts at or before the current
/// end (`next.start <= end`), so `0..5` and `5..9` become `0..9`. The output
/// is sorted by start; consecutive output ranges never touch.
///
/// A decreasing range (`end < start`) takes part as the zero-width range at
/// its start.
///
/// # Errors
///
/// Fails if the input contains an incomparable bound (NaN).
pub fn union_ranges<T: RangeBound>(ranges: &[Range<T>]) -> Result<Vec<Range<T>>> {
    union_ranges_with_mapping(ranges).map(|u| u.ranges)
}

/// Same as [`union_ranges`], additionally returning for every input range
/// the index of the merged range it ended up in.
///
/// ```
/// use lambda_ranges::union_ranges_with_mapping;
///
/// let u = union_ranges_with_mapping(&[10..12, 0..5, 3..8, 8..9]).unwrap();
/// assert_eq!(u.ranges, vec![0..9, 10..12]);
/// assert_eq!(u.rmap, vec![1, 0, 0, 0]);
/// ```
pub fn union_ranges_with_mapping<T: RangeBound>(ranges: &[Range<T>]) -> Result<UnionMapping<T>> {
    check_comparable("a", ranges)?;

    let order = order_by_start(ranges, |_| true);
    let mut merged: Vec<Range<T>> = Vec::new();
    let mut rmap = vec![0; ranges.len()];

    for i in order {
        let r = &ranges[i];
        let end = if r.end < r.start { r.start } else { r.end };
        match merged.last_mut() {
            Some(cur) if r.start <= cur.end => {
                if end > cur.end {
                    cur.end = end;
                }
            }
            _ => merged.push(r.start..end),
        }
        rmap[i] = merged.len() - 1;
    }

    log::trace!("merged {} ranges into {}", ranges.len(), merged.len());
    Ok(UnionMapping {
        ranges: merged,
        rmap,
    })
}
