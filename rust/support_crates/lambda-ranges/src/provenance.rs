//! Result types carrying the mapping between input and output ranges.

use std::ops::Range;

/// One boundary event met while sweeping along the number line during a
/// subtraction.
///
/// The full sequence (see [`Subtraction::abmap`]) interleaves the kept pieces
/// and the removed ranges in left-to-right order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Crossing {
    /// Index of a range in the subtraction output.
    Output(usize),
    /// Original (caller-visible) index of a range of the subtrahend.
    Removed(usize),
}

impl Crossing {
    /// Encodes the crossing as a single signed index: output ranges are
    /// non-negative, removed range `i` becomes `-i - 1`.
    pub fn to_signed(self) -> i64 {
        match self {
            Crossing::Output(k) => k as i64,
            Crossing::Removed(i) => -(i as i64) - 1,
        }
    }

    /// Inverse of [`to_signed`](Self::to_signed).
    pub fn from_signed(v: i64) -> Crossing {
        if v >= 0 {
            Crossing::Output(v as usize)
        } else {
            Crossing::Removed((-v - 1) as usize)
        }
    }

    pub fn is_output(&self) -> bool {
        matches!(self, Crossing::Output(_))
    }
}

/// The result of [`subtract_ranges_with_mapping`](crate::subtract_ranges_with_mapping).
#[derive(Clone, Debug, PartialEq)]
pub struct Subtraction<T> {
    /// Surviving pieces, in sweep (ascending) order.
    pub ranges: Vec<Range<T>>,
    /// `rmap[k]` is the original index of the minuend range that
    /// `ranges[k]` was cut from.
    pub rmap: Vec<usize>,
    /// Kept pieces and removed ranges in the order their boundaries were
    /// crossed. No two consecutive entries are equal.
    pub abmap: Vec<Crossing>,
}

impl<T> Subtraction<T> {
    /// `abmap` in its signed encoding.
    pub fn signed_abmap(&self) -> Vec<i64> {
        self.abmap.iter().map(|c| c.to_signed()).collect()
    }

    pub fn into_ranges(self) -> Vec<Range<T>> {
        self.ranges
    }
}

/// The result of [`union_ranges_with_mapping`](crate::union_ranges_with_mapping).
#[derive(Clone, Debug, PartialEq)]
pub struct UnionMapping<T> {
    /// Disjoint, non-touching merged ranges sorted by start.
    pub ranges: Vec<Range<T>>,
    /// `rmap[i]` is the index in `ranges` of the group that input range `i`
    /// was merged into.
    pub rmap: Vec<usize>,
}
