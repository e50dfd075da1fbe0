//! Set algebra over lists of half-open ranges.
//!
//! This crate works with plain `Range<T>` values (`[start, end)`) over any
//! `Copy + PartialOrd` bound type, so both sample indices and real-valued
//! coordinates (times, angles) are supported. It offers:
//!
//! - **Subtraction** with provenance: which input range each piece came from,
//!   and the order in which kept pieces and removed ranges are crossed
//! - **Union** of overlapping or touching ranges, with the group of each input
//! - **Cut** of a range list at a set of points
//! - **Normalization**: dropping empty and decreasing ranges
//! - Small helpers: boolean mask to ranges, consecutive de-duplication
//!
//! # Key Types
//!
//! - [`RangeSet`] - A validated, immutable, start-sorted list of non-overlapping ranges
//! - [`Subtraction`] - The result of [`subtract_ranges_with_mapping`]
//! - [`Crossing`] - One tagged boundary event in a subtraction's provenance map
//!
//! A decreasing range (`end < start`) is empty, the same as for slices. It is
//! never reversed.

pub mod bound;
pub mod dedup;
pub mod mask;
pub mod normalize;
pub mod provenance;
pub mod range_set;
pub mod set_ops;

#[cfg(test)]
mod tests;

pub use bound::RangeBound;
pub use dedup::dedup_consecutive;
pub use mask::mask_to_ranges;
pub use normalize::normalize_ranges;
pub use provenance::{Crossing, Subtraction, UnionMapping};
pub use range_set::RangeSet;
pub use set_ops::{
    cut::cut_ranges,
    subtract::{subtract_ranges, subtract_ranges_with_mapping},
    union::{union_ranges, union_ranges_with_mapping},
};
