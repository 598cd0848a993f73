//! # Layer Metadata
//!
//! Derives feature-layer metadata (the layer-info descriptor a map client
//! reads before drawing or querying a vector layer) from a GeoJSON document
//! and a loosely-typed options bag.
//!
//! ## Modules
//!
//! - [`util`] - Errors, bounding boxes, merge helpers
//! - [`geojson`] - GeoJSON document model and envelopes
//! - [`crs`] - Spatial references and extents
//! - [`layer`] - Geometry type, extent, renderer and descriptor assembly
//! - [`diagnostics`] - Sink for degraded-result reports
//! - [`settings`] - Builder tunables loaded from JSON
//!
//! ## Example
//!
//! ```
//! use layer_metadata::prelude::*;
//! use serde_json::json;
//!
//! let doc = GeoJsonDocument::from_value(json!({
//!     "type": "FeatureCollection",
//!     "features": [
//!         { "type": "Feature", "geometry": { "type": "Point", "coordinates": [1, 2] }, "properties": {} },
//!         { "type": "Feature", "geometry": { "type": "Point", "coordinates": [3, 4] }, "properties": {} }
//!     ]
//! }))?;
//!
//! let layer = MetadataBuilder::new().build(&doc, &LayerOptions::default())?;
//! assert_eq!(layer.geometry_type, Some(GeometryType::Point));
//! assert_eq!(layer.extent.unwrap().bounds(), [1.0, 2.0, 3.0, 4.0]);
//! # Ok::<(), layer_metadata::Error>(())
//! ```

pub mod util;
pub mod geojson;
pub mod crs;
pub mod layer;
pub mod diagnostics;
pub mod settings;
mod builder;

// Re-export commonly used types
pub use builder::{build, MetadataBuilder};
pub use util::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::builder::{build, MetadataBuilder};
    pub use crate::crs::{Extent, SpatialReference};
    pub use crate::diagnostics::{DiagnosticSink, NoOpSink, RecordingSink, TracingSink};
    pub use crate::geojson::{Feature, GeoJsonDocument, Geometry};
    pub use crate::layer::{
        FeatureLayerDescriptor, GeometryType, LayerOptions, Renderer, TableLayerDescriptor,
    };
    pub use crate::settings::Settings;
    pub use crate::util::{Error, Result};
}
