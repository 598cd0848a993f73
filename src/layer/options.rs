//! The options bag accepted by the metadata builders.
//!
//! Every member is optional. Absent members trigger defaulting downstream,
//! never an error. Unknown members are ignored so providers can pass their
//! whole configuration object through.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Field;
use crate::util::{Error, Result};

/// Capability flags recognized in the options bag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Server can quantize coordinates on query.
    pub quantization: Option<bool>,
    /// Layer supports the `Extract` capability.
    pub extract: Option<bool>,
}

impl Capabilities {
    /// Fill unset flags from `other`.
    pub fn fill_missing_from(&mut self, other: &Self) {
        self.quantization = self.quantization.or(other.quantization);
        self.extract = self.extract.or(other.extract);
    }
}

/// Loosely-typed layer options.
///
/// `renderer`, `labelingInfo`, `extent`, `inputCrs` and `sourceSR` stay raw
/// JSON: they are either passed through verbatim or interpreted by their
/// own normalizers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayerOptions {
    // Feature layer
    pub renderer: Option<Value>,
    pub labeling_info: Option<Value>,
    pub extent: Option<Value>,
    pub input_crs: Option<Value>,
    #[serde(rename = "sourceSR")]
    pub source_sr: Option<Value>,
    pub capabilities: Option<Capabilities>,
    pub min_scale: Option<f64>,
    pub max_scale: Option<f64>,
    pub geometry_type: Option<String>,

    // Table layer
    pub id: Option<u32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub copyright_text: Option<String>,
    pub max_record_count: Option<u32>,
    pub display_field: Option<String>,
    pub id_field: Option<String>,
    pub has_static_data: Option<bool>,
    pub fields: Option<Vec<Field>>,
}

macro_rules! fill_missing {
    ($target:ident, $source:ident, $($field:ident),+ $(,)?) => {
        $(
            if $target.$field.is_none() {
                $target.$field = $source.$field.clone();
            }
        )+
    };
}

impl LayerOptions {
    /// Parse options from a JSON value. `null` yields the empty bag.
    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| Error::InvalidOptions(e.to_string()))
    }

    /// Parse options from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }

    /// Fill every member left unset from `hints`. Members already present
    /// are never overwritten, so applying the same hints twice is a no-op.
    ///
    /// `geometry_type` is not filled: the geometry type resolver ranks a
    /// document's top-level hint above its metadata hint and reads both
    /// itself.
    pub fn fill_missing_from(&mut self, hints: &Self) {
        let this = self;
        fill_missing!(
            this,
            hints,
            renderer,
            labeling_info,
            extent,
            input_crs,
            source_sr,
            min_scale,
            max_scale,
            id,
            name,
            description,
            copyright_text,
            max_record_count,
            display_field,
            id_field,
            has_static_data,
            fields,
        );
        if let Some(theirs) = &hints.capabilities {
            this.capabilities
                .get_or_insert_with(Capabilities::default)
                .fill_missing_from(theirs);
        }
    }

    /// `capabilities.quantization`, absent treated as `false`.
    pub fn quantization(&self) -> bool {
        self.capabilities
            .and_then(|c| c.quantization)
            .unwrap_or(false)
    }

    /// `capabilities.extract`, absent treated as `false`.
    pub fn extract(&self) -> bool {
        self.capabilities.and_then(|c| c.extract).unwrap_or(false)
    }
}
