//! Set operations over lists of half-open ranges.
//!
//! All operations take slices of `Range<T>` in any order and allocate fresh
//! output; the inputs are never modified.
//!
//! - [`subtract`]: `A \ B`, optionally with provenance
//! - [`union`]: merge overlapping or touching ranges, optionally with the
//!   group of every input range
//! - [`cut`]: split ranges at a set of points

pub mod cut;
pub mod subtract;
pub mod union;
