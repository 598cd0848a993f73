//! Layer extent calculation.

use super::LayerOptions;
use crate::crs::{normalize_extent, resolve_spatial_reference_or, Extent, SpatialReference};
use crate::diagnostics::DiagnosticSink;
use crate::geojson::{envelope_of, DocumentKind, GeoJsonDocument};
use crate::util::{Error, Result};

/// Compute the layer extent.
///
/// An `extent` option is normalized and returned without scanning features.
/// Otherwise the envelope of all feature geometries is used. Only
/// FeatureCollections are scanned; a document that was a single Feature or
/// a bare Geometry has no extent. Any failure of
/// the envelope scan, including non-finite bounds, is reported to `sink` at
/// debug level and yields `Ok(None)`. Spatial reference resolution and
/// override normalization errors are returned to the caller.
pub fn compute_extent(
    document: &GeoJsonDocument,
    options: &LayerOptions,
    fallback: &SpatialReference,
    sink: &dyn DiagnosticSink,
) -> Result<Option<Extent>> {
    let spatial_reference = resolve_spatial_reference_or(document, options, fallback)?;

    if let Some(extent) = &options.extent {
        return normalize_extent(extent, &spatial_reference).map(Some);
    }

    Ok(extent_from_features(document, spatial_reference, sink))
}

fn extent_from_features(
    document: &GeoJsonDocument,
    spatial_reference: SpatialReference,
    sink: &dyn DiagnosticSink,
) -> Option<Extent> {
    if document.kind != DocumentKind::FeatureCollection || document.is_empty() {
        return None;
    }

    let bbox = envelope_of(document).and_then(|bbox| {
        if bbox.is_finite() {
            Ok(bbox)
        } else {
            Err(Error::geometry("Feature does not contain valid geometry"))
        }
    });

    match bbox {
        Ok(bbox) => Some(Extent::from_bbox(&bbox, spatial_reference)),
        Err(e) => {
            crate::diag_debug!(sink, "Could not calculate extent from data: {}", e);
            None
        }
    }
}
