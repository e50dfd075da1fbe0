//! Numerical helpers of the LAMBDA archive toolset.
//!
//! - [`ranges`] - set algebra over half-open ranges (re-exported `lambda-ranges`)
//! - [`slices`] - `start:stop:step` slice descriptors
//! - [`strings`] - splitting strings outside bracketed groups
//! - [`angles`] - wrapping of cyclic coordinates
//! - [`beams`] - compressed elliptical beam covariances
//! - [`partition`] - splitting work across bins or capacities
//! - [`period`] - period estimation of sampled periodic signals
//! - [`printer`] - leveled progress output with scoped timing
//! - [`units`] - angle units and physical constants

pub mod angles;
pub mod beams;
pub mod partition;
pub mod period;
pub mod printer;
pub mod slices;
pub mod strings;
pub mod units;

pub use lambda_ranges as ranges;
pub use printer::Printer;
pub use slices::{ExpandedSlice, SliceSpec};
