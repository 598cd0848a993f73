//! Feature-level layer descriptor and its assembly.
//!
//! A feature descriptor is a table descriptor plus geometry-related
//! members. Assembly order matters only where a step reads an earlier one:
//! the renderer is chosen after the geometry type is known.

use serde::Serialize;
use serde_json::Value;

use super::extent::compute_extent;
use super::geometry_type::{resolve_geometry_type, GeometryType};
use super::renderer::{select_renderer, Renderer};
use super::table::TableLayerDescriptor;
use super::{defaults, LayerOptions, NormalizedInput};
use crate::crs::{Extent, SpatialReference};
use crate::diagnostics::DiagnosticSink;
use crate::util::{merge_defined, merge_defined_opt, MergeDefined, Result};

/// Renderer and labeling configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingInfo {
    pub renderer: Renderer,
    /// Caller-supplied labeling classes, verbatim.
    pub labeling_info: Option<Value>,
}

/// Feature-layer metadata: everything a client needs to draw and query the
/// layer. Serializes as one flat camelCase object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureLayerDescriptor {
    #[serde(flatten)]
    pub table: TableLayerDescriptor,
    pub geometry_type: Option<GeometryType>,
    pub drawing_info: DrawingInfo,
    pub supports_coordinates_quantization: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,
    pub min_scale: f64,
    pub max_scale: f64,
    #[serde(rename = "hasZ")]
    pub has_z: bool,
    #[serde(rename = "hasM")]
    pub has_m: bool,
    pub has_labels: bool,
    pub allow_geometry_updates: bool,
}

/// Scale thresholds from the options; absent values leave defaults alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleOverrides {
    pub min_scale: Option<f64>,
    pub max_scale: Option<f64>,
}

impl From<&LayerOptions> for ScaleOverrides {
    fn from(options: &LayerOptions) -> Self {
        Self {
            min_scale: options.min_scale,
            max_scale: options.max_scale,
        }
    }
}

impl MergeDefined<FeatureLayerDescriptor> for ScaleOverrides {
    fn merge_into(self, target: &mut FeatureLayerDescriptor) {
        merge_defined(&mut target.min_scale, self.min_scale);
        merge_defined(&mut target.max_scale, self.max_scale);
    }
}

/// Layer a feature descriptor on top of a table descriptor.
pub fn extend_table_descriptor(
    table: TableLayerDescriptor,
    input: &NormalizedInput<'_>,
    fallback: &SpatialReference,
    sink: &dyn DiagnosticSink,
) -> Result<FeatureLayerDescriptor> {
    let geojson = input.geojson;
    let options = &input.options;

    let mut layer = defaults::feature_layer_defaults(table);

    layer.geometry_type = resolve_geometry_type(geojson, options);
    layer.supports_coordinates_quantization = options.quantization();

    merge_defined_opt(&mut layer.extent, compute_extent(geojson, options, fallback, sink)?);

    layer.drawing_info.renderer = select_renderer(options.renderer.as_ref(), layer.geometry_type);

    if let Some(labeling_info) = &options.labeling_info {
        layer.drawing_info.labeling_info = Some(labeling_info.clone());
        layer.has_labels = true;
    }

    ScaleOverrides::from(options).merge_into(&mut layer);

    tracing::trace!(
        geometry_type = ?layer.geometry_type,
        has_extent = layer.extent.is_some(),
        custom_renderer = layer.drawing_info.renderer.is_custom(),
        "feature layer descriptor assembled"
    );
    Ok(layer)
}
