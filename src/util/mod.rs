//! Utility types and functions shared by the metadata pipeline.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - [`BBox2d`] - Planar bounding box used for envelopes
//! - [`merge_defined`] - Merge-only-when-present helpers

mod error;
mod math;
mod merge;

pub use error::*;
pub use math::*;
pub use merge::*;
