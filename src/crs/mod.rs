//! Spatial references and extents.
//!
//! - [`SpatialReference`] / [`resolve_spatial_reference`] - Coordinate system
//!   identification from options and document hints
//! - [`Extent`] / [`normalize_extent`] - Bounding rectangles in the
//!   layer-info shape

mod extent;
mod spatial_reference;

pub use extent::{normalize_extent, Extent};
pub use spatial_reference::{
    resolve_spatial_reference, resolve_spatial_reference_or, SpatialReference, WEB_MERCATOR_WKID,
    WGS84_WKID,
};
