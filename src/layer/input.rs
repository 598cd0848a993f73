//! Input normalization shared by the table and feature builders.

use super::LayerOptions;
use crate::geojson::GeoJsonDocument;

/// A document paired with its effective options.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput<'a> {
    pub geojson: &'a GeoJsonDocument,
    pub options: LayerOptions,
}

/// Fold document-level hints into the options bag.
///
/// Explicit options always win. `metadata` fills unset members (except
/// `geometryType`, which stays with the resolver),
/// `capabilities` fills unset capability flags and the document `crs`
/// becomes `sourceSR` when none was given. The document itself, and with it
/// every coordinate, is left untouched. Normalizing already-normalized
/// options is a no-op.
pub fn normalize_input<'a>(geojson: &'a GeoJsonDocument, options: &LayerOptions) -> NormalizedInput<'a> {
    let mut options = options.clone();

    if let Some(metadata) = &geojson.metadata {
        options.fill_missing_from(metadata);
    }

    if let Some(capabilities) = &geojson.capabilities {
        options
            .capabilities
            .get_or_insert_with(Default::default)
            .fill_missing_from(capabilities);
    }

    if options.source_sr.is_none() {
        options.source_sr = geojson.crs.clone();
    }

    NormalizedInput { geojson, options }
}
