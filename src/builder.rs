//! High-level metadata builder.

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::geojson::GeoJsonDocument;
use crate::layer::{
    build_table_descriptor, extend_table_descriptor, normalize_input, FeatureLayerDescriptor,
    LayerOptions, TableLayerDescriptor,
};
use crate::settings::Settings;
use crate::util::Result;

/// Derives layer descriptors from GeoJSON documents.
///
/// Holds no per-call state: one builder can be shared between threads and
/// every call returns a freshly built descriptor.
#[derive(Clone)]
pub struct MetadataBuilder {
    sink: Arc<dyn DiagnosticSink>,
    settings: Settings,
}

impl MetadataBuilder {
    /// Builder with default settings reporting diagnostics to `tracing`.
    pub fn new() -> Self {
        Self {
            sink: Arc::new(TracingSink),
            settings: Settings::default(),
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build the feature-layer descriptor.
    ///
    /// Fails only when the spatial reference or an `extent` override cannot
    /// be interpreted; an extent that cannot be computed from the features
    /// is reported to the sink and left out.
    pub fn build(&self, geojson: &GeoJsonDocument, options: &LayerOptions) -> Result<FeatureLayerDescriptor> {
        let input = normalize_input(geojson, options);
        let table = build_table_descriptor(&input, &self.settings);
        extend_table_descriptor(
            table,
            &input,
            &self.settings.fallback_spatial_reference(),
            self.sink.as_ref(),
        )
    }

    /// Build only the table-level descriptor.
    pub fn build_table(&self, geojson: &GeoJsonDocument, options: &LayerOptions) -> TableLayerDescriptor {
        let input = normalize_input(geojson, options);
        build_table_descriptor(&input, &self.settings)
    }
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MetadataBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataBuilder")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Build a feature-layer descriptor with default settings.
pub fn build(geojson: &GeoJsonDocument, options: &LayerOptions) -> Result<FeatureLayerDescriptor> {
    MetadataBuilder::new().build(geojson, options)
}
