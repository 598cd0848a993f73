//! Geometry type resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::LayerOptions;
use crate::geojson::GeoJsonDocument;

/// Canonical layer geometry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    #[serde(rename = "esriGeometryPoint")]
    Point,
    #[serde(rename = "esriGeometryMultipoint")]
    Multipoint,
    #[serde(rename = "esriGeometryPolyline")]
    Polyline,
    #[serde(rename = "esriGeometryPolygon")]
    Polygon,
}

impl GeometryType {
    /// Map a GeoJSON or Esri geometry type name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Point" | "esriGeometryPoint" => Some(Self::Point),
            "MultiPoint" | "esriGeometryMultipoint" => Some(Self::Multipoint),
            "LineString" | "MultiLineString" | "esriGeometryPolyline" => Some(Self::Polyline),
            "Polygon" | "MultiPolygon" | "esriGeometryPolygon" => Some(Self::Polygon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "esriGeometryPoint",
            Self::Multipoint => "esriGeometryMultipoint",
            Self::Polyline => "esriGeometryPolyline",
            Self::Polygon => "esriGeometryPolygon",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the layer geometry type.
///
/// First declared name wins: `options.geometryType`, the document's
/// top-level `geometryType`, `metadata.geometryType`, then the type of the
/// first feature that has a geometry. An unknown name yields `None`; it is
/// not an error.
pub fn resolve_geometry_type(
    document: &GeoJsonDocument,
    options: &LayerOptions,
) -> Option<GeometryType> {
    let declared = options
        .geometry_type
        .as_deref()
        .or(document.geometry_type.as_deref())
        .or_else(|| {
            document
                .metadata
                .as_ref()
                .and_then(|m| m.geometry_type.as_deref())
        });

    let name = match declared {
        Some(name) => name,
        None => document.geometries().next()?.type_name(),
    };
    GeometryType::from_name(name)
}
