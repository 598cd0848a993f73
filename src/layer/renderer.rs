//! Drawing renderers and default renderer selection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::GeometryType;

/// RGBA color, 0-255 per channel.
pub type Color = [u8; 4];

/// A simple-renderer symbol (marker, line or fill).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    #[serde(rename = "type")]
    pub symbol_type: String,
    pub style: String,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<Box<Symbol>>,
}

impl Symbol {
    fn solid_line(color: Color, width: f64) -> Self {
        Self {
            symbol_type: "esriSLS".to_string(),
            style: "esriSLSSolid".to_string(),
            color,
            size: None,
            width: Some(width),
            outline: None,
        }
    }
}

/// A `"simple"` renderer: one symbol for every feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleRenderer {
    #[serde(rename = "type")]
    pub renderer_type: String,
    pub symbol: Symbol,
}

impl SimpleRenderer {
    fn new(symbol: Symbol) -> Self {
        Self {
            renderer_type: "simple".to_string(),
            symbol,
        }
    }
}

/// The renderer attached to a layer's drawing info.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Renderer {
    Point(SimpleRenderer),
    Line(SimpleRenderer),
    Polygon(SimpleRenderer),
    /// Caller-supplied renderer, serialized verbatim.
    Custom(Value),
}

impl Renderer {
    /// Default point style: translucent green circle.
    pub fn point() -> Self {
        Self::Point(SimpleRenderer::new(Symbol {
            symbol_type: "esriSMS".to_string(),
            style: "esriSMSCircle".to_string(),
            color: [45, 172, 128, 161],
            size: Some(7.5),
            width: None,
            outline: Some(Box::new(Symbol::solid_line([190, 190, 190, 105], 0.5))),
        }))
    }

    /// Default line style: solid orange.
    pub fn line() -> Self {
        Self::Line(SimpleRenderer::new(Symbol::solid_line(
            [247, 150, 70, 204],
            6.999999999999999,
        )))
    }

    /// Default polygon style: translucent blue fill with grey outline.
    pub fn polygon() -> Self {
        Self::Polygon(SimpleRenderer::new(Symbol {
            symbol_type: "esriSFS".to_string(),
            style: "esriSFSSolid".to_string(),
            color: [75, 172, 198, 161],
            size: None,
            width: None,
            outline: Some(Box::new(Symbol::solid_line(
                [150, 150, 150, 155],
                0.999999999999999,
            ))),
        }))
    }

    /// Default renderer for a geometry type. Point style for point,
    /// multipoint and unresolved types.
    pub fn default_for(geometry_type: Option<GeometryType>) -> Self {
        match geometry_type {
            Some(GeometryType::Polygon) => Self::polygon(),
            Some(GeometryType::Polyline) => Self::line(),
            Some(GeometryType::Point) | Some(GeometryType::Multipoint) | None => Self::point(),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::point()
    }
}

/// Pick the layer renderer.
///
/// An explicit renderer is used as given, with no validation or merging;
/// otherwise the default for the geometry type.
pub fn select_renderer(explicit: Option<&Value>, geometry_type: Option<GeometryType>) -> Renderer {
    match explicit {
        Some(renderer) => Renderer::Custom(renderer.clone()),
        None => Renderer::default_for(geometry_type),
    }
}
