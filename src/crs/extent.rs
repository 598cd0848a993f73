//! Layer extents and extent-override normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SpatialReference;
use crate::util::{BBox2d, Error, Result};

/// Axis-aligned layer extent with its spatial reference.
///
/// All four bounds are always present together; an unknown extent is
/// modelled as `Option<Extent>` by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub spatial_reference: SpatialReference,
}

impl Extent {
    pub fn new(
        [xmin, ymin, xmax, ymax]: [f64; 4],
        spatial_reference: SpatialReference,
    ) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            spatial_reference,
        }
    }

    /// Extent from a computed envelope.
    pub fn from_bbox(bbox: &BBox2d, spatial_reference: SpatialReference) -> Self {
        Self::new(bbox.to_array(), spatial_reference)
    }

    /// Bounds in `[xmin, ymin, xmax, ymax]` order.
    pub fn bounds(&self) -> [f64; 4] {
        [self.xmin, self.ymin, self.xmax, self.ymax]
    }
}

/// Normalize a caller-supplied extent override.
///
/// Accepted shapes:
/// - `[xmin, ymin, xmax, ymax]`
/// - `[[xmin, ymin], [xmax, ymax]]`
/// - `{xmin, ymin, xmax, ymax, spatialReference?}`; a spatial reference on
///   the object wins over `spatial_reference`
pub fn normalize_extent(input: &Value, spatial_reference: &SpatialReference) -> Result<Extent> {
    match input {
        Value::Array(items) => {
            let bounds = match items.as_slice() {
                [a, b, c, d] => [number(a), number(b), number(c), number(d)],
                [Value::Array(lower), Value::Array(upper)] => match (lower.as_slice(), upper.as_slice()) {
                    ([x0, y0, ..], [x1, y1, ..]) => [number(x0), number(y0), number(x1), number(y1)],
                    _ => return Err(invalid(input)),
                },
                _ => return Err(invalid(input)),
            };
            collect_bounds(bounds)
                .map(|b| Extent::new(b, spatial_reference.clone()))
                .ok_or_else(|| invalid(input))
        }
        Value::Object(obj) => {
            let bounds = ["xmin", "ymin", "xmax", "ymax"].map(|k| obj.get(k).and_then(Value::as_f64));
            let bounds = collect_bounds(bounds).ok_or_else(|| invalid(input))?;
            let spatial_reference = match obj.get("spatialReference") {
                None | Some(Value::Null) => spatial_reference.clone(),
                Some(sr) => SpatialReference::from_value(sr)?,
            };
            Ok(Extent::new(bounds, spatial_reference))
        }
        _ => Err(invalid(input)),
    }
}

#[inline]
fn number(value: &Value) -> Option<f64> {
    value.as_f64()
}

fn collect_bounds(bounds: [Option<f64>; 4]) -> Option<[f64; 4]> {
    let [a, b, c, d] = bounds;
    Some([a?, b?, c?, d?])
}

fn invalid(input: &Value) -> Error {
    Error::InvalidExtent(input.to_string())
}
