use std::ops::Range;

use itertools::Itertools;
use lambda_common::Result;

use crate::{
    RangeBound,
    bound::{check_comparable, check_disjoint, order_by_start},
    provenance::{Crossing, Subtraction},
};

/// Computes `A \ B`: the parts of the ranges in `a` not covered by any range
/// in `b`.
///
/// A range of `a` that is partially covered is split into its surviving
/// pieces. The output is sorted by start and non-overlapping.
///
/// Both inputs may be given in any order, but each must be internally
/// non-overlapping (touching is fine). Empty ranges of `a` and decreasing
/// ranges of either input are ignored; zero-width ranges of `b` still split
/// the range of `a` that strictly contains them.
///
/// # Errors
///
/// Fails if either input contains overlapping ranges or an incomparable
/// bound (NaN).
pub fn subtract_ranges<T: RangeBound>(a: &[Range<T>], b: &[Range<T>]) -> Result<Vec<Range<T>>> {
    subtract_ranges_with_mapping(a, b).map(Subtraction::into_ranges)
}

/// Same as [`subtract_ranges`], additionally returning the provenance of
/// every output range.
///
/// ```
/// use lambda_ranges::subtract_ranges_with_mapping;
///
/// let s = subtract_ranges_with_mapping(&[0..100, 200..1000], &[1..2, 3..4, 8..999]).unwrap();
/// assert_eq!(s.ranges, vec![0..1, 2..3, 4..8, 999..1000]);
/// assert_eq!(s.rmap, vec![0, 0, 0, 1]);
/// assert_eq!(s.signed_abmap(), vec![0, -1, 1, -2, 2, -3, 3]);
/// ```
///
/// The last line reads: moving along the number line we meet output 0
/// (`0..1`), then removed range 0 (`1..2`), output 1, removed range 1,
/// output 2, removed range 2 (`8..999`) and finally output 3 (`999..1000`).
pub fn subtract_ranges_with_mapping<T: RangeBound>(
    a: &[Range<T>],
    b: &[Range<T>],
) -> Result<Subtraction<T>> {
    check_comparable("a", a)?;
    check_comparable("b", b)?;

    let a_order = order_by_start(a, |r| r.start < r.end);
    let b_order = order_by_start(b, |r| r.start <= r.end);
    check_disjoint("a", a, &a_order)?;
    check_disjoint("b", b, &b_order)?;

    let sweep = Sweep::new(a, &a_order, b, &b_order).run();
    log::trace!(
        "subtracted {} ranges from {}: {} pieces, {} crossings",
        b_order.len(),
        a_order.len(),
        sweep.ranges.len(),
        sweep.abmap.len()
    );
    Ok(sweep)
}

/// Two-cursor merge over start-sorted views of the minuend and subtrahend.
struct Sweep<'a, T> {
    a: &'a [Range<T>],
    a_order: &'a [usize],
    b: &'a [Range<T>],
    b_order: &'a [usize],
    ranges: Vec<Range<T>>,
    rmap: Vec<usize>,
    crossings: Vec<Crossing>,
}

impl<'a, T: RangeBound> Sweep<'a, T> {
    fn new(
        a: &'a [Range<T>],
        a_order: &'a [usize],
        b: &'a [Range<T>],
        b_order: &'a [usize],
    ) -> Self {
        Sweep {
            a,
            a_order,
            b,
            b_order,
            ranges: Vec::with_capacity(a_order.len() + b_order.len()),
            rmap: Vec::with_capacity(a_order.len() + b_order.len()),
            crossings: Vec::with_capacity(2 * (a_order.len() + b_order.len())),
        }
    }

    fn run(mut self) -> Subtraction<T> {
        let (a, a_order, b, b_order) = (self.a, self.a_order, self.b, self.b_order);
        let mut bi = 0;
        for &ai in a_order {
            let cur = &a[ai];

            // Subtrahend ranges entirely to the left of `cur`.
            while bi < b_order.len() && b[b_order[bi]].end <= cur.start {
                self.crossings.push(Crossing::Removed(b_order[bi]));
                bi += 1;
            }

            let mut pstart = cur.start;
            while bi < b_order.len() && b[b_order[bi]].start <= cur.end {
                let cut = &b[b_order[bi]];
                let end = if cut.start < cur.end {
                    cut.start
                } else {
                    cur.end
                };
                self.emit(ai, pstart, end);
                self.crossings.push(Crossing::Removed(b_order[bi]));
                pstart = cut.end;
                bi += 1;
            }

            if pstart < cur.end {
                self.emit(ai, pstart, cur.end);
            } else {
                // The last subtrahend range reaches past `cur` and may cover
                // the next minuend range too. `cur` is non-empty, so at least
                // one subtrahend range was consumed above.
                debug_assert!(bi > 0);
                bi -= 1;
            }
        }

        Subtraction {
            ranges: self.ranges,
            rmap: self.rmap,
            // Stepping back can record the same removed range twice in a row.
            abmap: self.crossings.into_iter().dedup().collect(),
        }
    }

    fn emit(&mut self, source: usize, start: T, end: T) {
        if start < end {
            self.crossings.push(Crossing::Output(self.ranges.len()));
            self.rmap.push(source);
            self.ranges.push(start..end);
        }
    }
}
