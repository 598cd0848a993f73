//! Layer metadata derivation.
//!
//! Pipeline pieces, leaves first:
//! - [`resolve_geometry_type`] - Canonical geometry type
//! - [`compute_extent`] - Extent from override or feature envelope
//! - [`select_renderer`] - Default or caller renderer
//! - [`build_table_descriptor`] / [`extend_table_descriptor`] - Table and
//!   feature descriptor assembly
//!
//! Most callers want [`crate::MetadataBuilder`] instead.

pub mod defaults;
mod extent;
mod feature;
mod fields;
mod geometry_type;
mod input;
mod options;
mod renderer;
mod table;

pub use extent::compute_extent;
pub use feature::{extend_table_descriptor, DrawingInfo, FeatureLayerDescriptor, ScaleOverrides};
pub use fields::{derive_fields, Field, FieldSet, FieldType};
pub use geometry_type::{resolve_geometry_type, GeometryType};
pub use input::{normalize_input, NormalizedInput};
pub use options::{Capabilities, LayerOptions};
pub use renderer::{select_renderer, Color, Renderer, SimpleRenderer, Symbol};
pub use table::{build_table_descriptor, TableLayerDescriptor, UniqueIdField};
