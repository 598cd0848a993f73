//! GeoJSON document, feature and geometry types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::layer::{Capabilities, LayerOptions};
use crate::util::{Error, Result};

/// A single position: x, y and optional z/m ordinates.
pub type Position = SmallVec<[f64; 3]>;

/// Typed GeoJSON geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    /// GeoJSON type name, e.g. `"LineString"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Point { .. } => "Point",
            Self::MultiPoint { .. } => "MultiPoint",
            Self::LineString { .. } => "LineString",
            Self::MultiLineString { .. } => "MultiLineString",
            Self::Polygon { .. } => "Polygon",
            Self::MultiPolygon { .. } => "MultiPolygon",
            Self::GeometryCollection { .. } => "GeometryCollection",
        }
    }

    /// Visit every position, recursing into collections.
    ///
    /// Stops at the first error returned by `f`.
    pub fn try_for_each_position<F>(&self, f: &mut F) -> Result<()>
    where
        F: FnMut(&Position) -> Result<()>,
    {
        match self {
            Self::Point { coordinates } => f(coordinates),
            Self::MultiPoint { coordinates } | Self::LineString { coordinates } => {
                coordinates.iter().try_for_each(|p| f(p))
            }
            Self::MultiLineString { coordinates } | Self::Polygon { coordinates } => coordinates
                .iter()
                .flatten()
                .try_for_each(|p| f(p)),
            Self::MultiPolygon { coordinates } => coordinates
                .iter()
                .flatten()
                .flatten()
                .try_for_each(|p| f(p)),
            Self::GeometryCollection { geometries } => geometries
                .iter()
                .try_for_each(|g| g.try_for_each_position(f)),
        }
    }

    fn is_geometry_type(name: &str) -> bool {
        matches!(
            name,
            "Point"
                | "MultiPoint"
                | "LineString"
                | "MultiLineString"
                | "Polygon"
                | "MultiPolygon"
                | "GeometryCollection"
        )
    }
}

/// A GeoJSON feature. Geometry may be `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// Create a feature with the given geometry and no properties.
    pub fn new(geometry: Option<Geometry>) -> Self {
        Self {
            geometry,
            ..Self::default()
        }
    }

    /// Builder-style properties setter.
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// Which top-level GeoJSON object the document was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentKind {
    #[default]
    FeatureCollection,
    Feature,
    Geometry,
}

/// A parsed GeoJSON payload.
///
/// Whatever the top-level object was, the document exposes a flat list of
/// features. A bare geometry becomes one feature without properties.
/// Layer-level members used by feature servers (`metadata`, `crs`,
/// `capabilities`, `geometryType`) are kept alongside.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "Value")]
pub struct GeoJsonDocument {
    pub kind: DocumentKind,
    pub features: Vec<Feature>,
    /// Layer hints; same vocabulary as the options bag.
    pub metadata: Option<LayerOptions>,
    /// Raw `crs` member, resolved later.
    pub crs: Option<Value>,
    pub capabilities: Option<Capabilities>,
    /// Top-level `geometryType` hint.
    pub geometry_type: Option<String>,
}

impl GeoJsonDocument {
    /// Build a FeatureCollection document from features.
    pub fn from_features(features: Vec<Feature>) -> Self {
        Self {
            features,
            ..Self::default()
        }
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }

    /// Parse a document from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut obj) = value else {
            return Err(Error::InvalidGeoJson(format!(
                "expected an object, got {}",
                json_kind(&value)
            )));
        };

        let type_name = obj.get("type").and_then(Value::as_str).map(str::to_owned);

        let (kind, features) = match type_name.as_deref() {
            Some("FeatureCollection") => (DocumentKind::FeatureCollection, take_features(&mut obj)?),
            // Some providers omit the type on collections.
            None if obj.contains_key("features") => {
                (DocumentKind::FeatureCollection, take_features(&mut obj)?)
            }
            Some("Feature") => {
                let feature: Feature = serde_json::from_value(Value::Object(obj.clone()))
                    .map_err(|e| Error::InvalidGeoJson(format!("feature: {e}")))?;
                (DocumentKind::Feature, vec![feature])
            }
            Some(t) if Geometry::is_geometry_type(t) => {
                let geometry: Geometry = serde_json::from_value(Value::Object(obj.clone()))
                    .map_err(|e| Error::InvalidGeoJson(format!("geometry: {e}")))?;
                (DocumentKind::Geometry, vec![Feature::new(Some(geometry))])
            }
            Some(t) => return Err(Error::InvalidGeoJson(format!("unknown type '{t}'"))),
            None => return Err(Error::InvalidGeoJson("missing 'type' member".into())),
        };

        let metadata = match obj.remove("metadata") {
            None | Some(Value::Null) => None,
            Some(v) => Some(LayerOptions::from_value(v)?),
        };
        let capabilities = match obj.remove("capabilities") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                serde_json::from_value(v)
                    .map_err(|e| Error::InvalidGeoJson(format!("capabilities: {e}")))?,
            ),
        };
        let crs = obj.remove("crs").filter(|v| !v.is_null());
        let geometry_type = obj
            .get("geometryType")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Ok(Self {
            kind,
            features,
            metadata,
            crs,
            capabilities,
            geometry_type,
        })
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True when the document holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate over the non-null feature geometries.
    pub fn geometries(&self) -> impl Iterator<Item = &Geometry> {
        self.features.iter().filter_map(|f| f.geometry.as_ref())
    }
}

impl TryFrom<Value> for GeoJsonDocument {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

fn take_features(obj: &mut Map<String, Value>) -> Result<Vec<Feature>> {
    match obj.remove("features") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(v) => serde_json::from_value(v)
            .map_err(|e| Error::InvalidGeoJson(format!("features: {e}"))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
