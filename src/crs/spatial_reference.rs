//! Spatial reference resolution.
//!
//! A layer's spatial reference comes from, in order: the `inputCrs` option,
//! the `sourceSR` option, the document's `crs` member, and finally a
//! fallback (WGS84 unless configured otherwise). Each candidate may be a
//! wkid, an EPSG/OGC URN string, a WKT string or an object carrying one of
//! those.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geojson::GeoJsonDocument;
use crate::layer::LayerOptions;
use crate::util::{Error, Result};

/// EPSG code of WGS84 geographic coordinates.
pub const WGS84_WKID: u32 = 4326;

/// EPSG code of Web Mercator.
pub const WEB_MERCATOR_WKID: u32 = 3857;

/// Esri's legacy wkid for Web Mercator.
const ESRI_WEB_MERCATOR_WKID: u32 = 102100;

/// WKT keywords that may start a well-known-text definition.
const WKT_KEYWORDS: &[&str] = &[
    "PROJCS[", "GEOGCS[", "GEOCCS[", "COMPD_CS[", "VERT_CS[", "PROJCRS[", "GEOGCRS[",
    "GEODCRS[", "COMPOUNDCRS[", "BOUNDCRS[",
];

/// Coordinate system identifier attached to extents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpatialReference {
    Wkid {
        wkid: u32,
        #[serde(rename = "latestWkid", default, skip_serializing_if = "Option::is_none")]
        latest_wkid: Option<u32>,
    },
    Wkt {
        wkt: String,
    },
}

impl SpatialReference {
    /// WGS84 (`{wkid: 4326, latestWkid: 4326}`).
    pub fn wgs84() -> Self {
        Self::from_wkid(WGS84_WKID)
    }

    /// Build from an EPSG/Esri code. Web Mercator is reported with the Esri
    /// wkid and the EPSG code as `latestWkid`.
    pub fn from_wkid(wkid: u32) -> Self {
        match wkid {
            WEB_MERCATOR_WKID | ESRI_WEB_MERCATOR_WKID => Self::Wkid {
                wkid: ESRI_WEB_MERCATOR_WKID,
                latest_wkid: Some(WEB_MERCATOR_WKID),
            },
            _ => Self::Wkid {
                wkid,
                latest_wkid: Some(wkid),
            },
        }
    }

    /// Build from a WKT definition.
    pub fn from_wkt(wkt: impl Into<String>) -> Self {
        Self::Wkt { wkt: wkt.into() }
    }

    /// The wkid, if this reference is code-based.
    pub fn wkid(&self) -> Option<u32> {
        match self {
            Self::Wkid { wkid, .. } => Some(*wkid),
            Self::Wkt { .. } => None,
        }
    }

    /// Interpret a loosely-typed CRS value.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|w| u32::try_from(w).ok())
                .map(Self::from_wkid)
                .ok_or_else(|| invalid(value)),
            Value::String(s) => Self::parse(s),
            Value::Object(obj) => {
                if let Some(wkid) = obj.get("latestWkid").or_else(|| obj.get("wkid")) {
                    return Self::from_value(wkid);
                }
                if let Some(wkt) = obj.get("wkt").and_then(Value::as_str) {
                    return Ok(Self::from_wkt(wkt));
                }
                // GeoJSON 2008 named CRS: {"type": "name", "properties": {"name": ...}}
                if let Some(name) = obj
                    .get("properties")
                    .and_then(|p| p.get("name"))
                    .and_then(Value::as_str)
                {
                    return Self::parse(name);
                }
                Err(invalid(value))
            }
            _ => Err(invalid(value)),
        }
    }

    /// Parse a CRS string: wkid digits, `EPSG:n`, OGC URNs or WKT.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(wkid) = s.parse::<u32>() {
            return Ok(Self::from_wkid(wkid));
        }

        let upper = s.to_ascii_uppercase();
        if WKT_KEYWORDS.iter().any(|k| upper.starts_with(k)) {
            return Ok(Self::from_wkt(s));
        }
        if upper.ends_with("CRS84") {
            return Ok(Self::wgs84());
        }
        if upper.starts_with("EPSG:") || upper.starts_with("URN:OGC:DEF:CRS:EPSG:") {
            // Code is the last colon-separated segment, e.g.
            // "urn:ogc:def:crs:EPSG::3857" or "urn:ogc:def:crs:EPSG:6.3:4326".
            if let Some(wkid) = s.rsplit(':').next().and_then(|c| c.parse::<u32>().ok()) {
                return Ok(Self::from_wkid(wkid));
            }
        }

        Err(Error::InvalidSpatialReference(s.to_string()))
    }
}

impl Default for SpatialReference {
    fn default() -> Self {
        Self::wgs84()
    }
}

/// Resolve a layer's spatial reference, falling back to WGS84.
pub fn resolve_spatial_reference(
    document: &GeoJsonDocument,
    options: &LayerOptions,
) -> Result<SpatialReference> {
    resolve_spatial_reference_or(document, options, &SpatialReference::wgs84())
}

/// Resolve a layer's spatial reference with an explicit fallback.
///
/// Errors from an unparseable candidate are returned as-is; a bad
/// candidate never silently falls through to the next one.
pub fn resolve_spatial_reference_or(
    document: &GeoJsonDocument,
    options: &LayerOptions,
    fallback: &SpatialReference,
) -> Result<SpatialReference> {
    let candidate = options
        .input_crs
        .as_ref()
        .or(options.source_sr.as_ref())
        .or(document.crs.as_ref());

    match candidate {
        Some(value) => SpatialReference::from_value(value),
        None => Ok(fallback.clone()),
    }
}

fn invalid(value: &Value) -> Error {
    Error::InvalidSpatialReference(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_wkid() {
        assert_eq!(
            SpatialReference::from_wkid(4326),
            SpatialReference::Wkid { wkid: 4326, latest_wkid: Some(4326) }
        );
        assert_eq!(
            SpatialReference::from_wkid(3857),
            SpatialReference::Wkid { wkid: 102100, latest_wkid: Some(3857) }
        );
    }

    #[test]
    fn test_parse_strings() {
        assert_eq!(SpatialReference::parse("2263").unwrap().wkid(), Some(2263));
        assert_eq!(SpatialReference::parse("EPSG:27700").unwrap().wkid(), Some(27700));
        assert_eq!(
            SpatialReference::parse("urn:ogc:def:crs:EPSG::3857").unwrap().wkid(),
            Some(102100)
        );
        assert_eq!(
            SpatialReference::parse("urn:ogc:def:crs:OGC:1.3:CRS84").unwrap(),
            SpatialReference::wgs84()
        );
        let wkt = r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984"]]"#;
        assert_eq!(SpatialReference::parse(wkt).unwrap(), SpatialReference::from_wkt(wkt));
        assert!(SpatialReference::parse("not a crs").is_err());
    }

    #[test]
    fn test_from_value_objects() {
        assert_eq!(
            SpatialReference::from_value(&json!({ "wkid": 102100, "latestWkid": 3857 })).unwrap(),
            SpatialReference::from_wkid(3857)
        );
        assert_eq!(
            SpatialReference::from_value(&json!({ "wkt": "PROJCS[...]" })).unwrap(),
            SpatialReference::from_wkt("PROJCS[...]")
        );
        assert_eq!(
            SpatialReference::from_value(&json!({ "type": "name", "properties": { "name": "EPSG:4269" } }))
                .unwrap()
                .wkid(),
            Some(4269)
        );
        assert!(SpatialReference::from_value(&json!(-1)).is_err());
        assert!(SpatialReference::from_value(&json!({ "foo": 1 })).is_err());
        assert!(SpatialReference::from_value(&json!(true)).is_err());
    }

    #[test]
    fn test_resolve_priority() {
        let mut document = GeoJsonDocument::default();
        let mut options = LayerOptions::default();
        assert_eq!(
            resolve_spatial_reference(&document, &options).unwrap(),
            SpatialReference::wgs84()
        );

        document.crs = Some(json!({ "type": "name", "properties": { "name": "EPSG:2263" } }));
        assert_eq!(resolve_spatial_reference(&document, &options).unwrap().wkid(), Some(2263));

        options.source_sr = Some(json!(27700));
        assert_eq!(resolve_spatial_reference(&document, &options).unwrap().wkid(), Some(27700));

        options.input_crs = Some(json!("EPSG:3857"));
        assert_eq!(resolve_spatial_reference(&document, &options).unwrap().wkid(), Some(102100));
    }

    #[test]
    fn test_resolve_invalid_passes_through() {
        let options = LayerOptions {
            input_crs: Some(json!("bogus")),
            ..LayerOptions::default()
        };
        let err = resolve_spatial_reference(&GeoJsonDocument::default(), &options).unwrap_err();
        assert!(matches!(err, Error::InvalidSpatialReference(_)));
    }

    #[test]
    fn test_serialize_shapes() {
        assert_eq!(
            serde_json::to_value(SpatialReference::wgs84()).unwrap(),
            json!({ "wkid": 4326, "latestWkid": 4326 })
        );
        assert_eq!(
            serde_json::to_value(SpatialReference::from_wkt("GEOGCS[]")).unwrap(),
            json!({ "wkt": "GEOGCS[]" })
        );
    }
}
