//! Attribute field descriptors.
//!
//! Fields either come verbatim from the `fields` option or are inferred from
//! the first feature's properties. Exactly one field carries the OID type:
//! the `idField` if it names a known field, else a synthetic `OBJECTID`
//! prepended to the list.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::geojson::GeoJsonDocument;

/// Esri field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "esriFieldTypeOID")]
    Oid,
    #[serde(rename = "esriFieldTypeInteger")]
    Integer,
    #[serde(rename = "esriFieldTypeSmallInteger")]
    SmallInteger,
    #[serde(rename = "esriFieldTypeDouble")]
    Double,
    #[serde(rename = "esriFieldTypeSingle")]
    Single,
    #[serde(rename = "esriFieldTypeString")]
    String,
    #[serde(rename = "esriFieldTypeDate")]
    Date,
    #[serde(rename = "esriFieldTypeGUID")]
    Guid,
    #[serde(rename = "esriFieldTypeGlobalID")]
    GlobalId,
}

impl FieldType {
    /// Infer a field type from a sample property value.
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Double,
            Value::Bool(_) => Self::Integer,
            Value::String(s) if is_iso_date(s) => Self::Date,
            _ => Self::String,
        }
    }
}

/// A layer attribute field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default = "default_sql_type")]
    pub sql_type: String,
    #[serde(default)]
    pub domain: Option<Value>,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub editable: bool,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_sql_type() -> String {
    "sqlTypeOther".to_string()
}

fn default_nullable() -> bool {
    true
}

impl Field {
    /// Create a field with the name as alias.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            alias: Some(name.clone()),
            name,
            field_type,
            length: None,
            sql_type: default_sql_type(),
            domain: None,
            default_value: None,
            editable: false,
            nullable: true,
        }
    }

    /// The synthetic or promoted object-id field.
    pub fn object_id(name: impl Into<String>) -> Self {
        let mut field = Self::new(name, FieldType::Oid);
        field.sql_type = "sqlTypeInteger".to_string();
        field.nullable = false;
        field
    }

    /// Builder-style length setter.
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
}

/// Resolved field list plus the name of the OID field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    pub fields: Vec<Field>,
    pub object_id_field: String,
}

/// Derive the layer's fields.
///
/// `default_oid` names the synthetic OID field; `string_length` is the
/// length reported for inferred string fields.
pub fn derive_fields(
    document: &GeoJsonDocument,
    explicit: Option<&[Field]>,
    id_field: Option<&str>,
    default_oid: &str,
    string_length: u32,
) -> FieldSet {
    let mut fields = match explicit {
        Some(list) => list
            .iter()
            .cloned()
            .map(|mut f| {
                f.alias.get_or_insert_with(|| f.name.clone());
                f
            })
            .collect(),
        None => infer_fields(first_properties(document), string_length),
    };

    // An explicit OID field wins; otherwise promote idField or prepend one.
    if let Some(oid) = fields.iter().find(|f| f.field_type == FieldType::Oid) {
        let object_id_field = oid.name.clone();
        return FieldSet {
            fields,
            object_id_field,
        };
    }

    if let Some(id) = id_field {
        if let Some(pos) = fields.iter().position(|f| f.name == id) {
            fields[pos] = Field::object_id(id);
            return FieldSet {
                fields,
                object_id_field: id.to_string(),
            };
        }
    }

    fields.insert(0, Field::object_id(default_oid));
    FieldSet {
        fields,
        object_id_field: default_oid.to_string(),
    }
}

fn first_properties(document: &GeoJsonDocument) -> Option<&Map<String, Value>> {
    document.features.first().and_then(|f| f.properties.as_ref())
}

fn infer_fields(properties: Option<&Map<String, Value>>, string_length: u32) -> Vec<Field> {
    let Some(properties) = properties else {
        return Vec::new();
    };
    properties
        .iter()
        .map(|(name, value)| {
            let field = Field::new(name.as_str(), FieldType::infer(value));
            if field.field_type == FieldType::String {
                field.with_length(string_length)
            } else {
                field
            }
        })
        .collect()
}

fn is_iso_date(s: &str) -> bool {
    time::OffsetDateTime::parse(s, &Rfc3339).is_ok()
        || time::Date::parse(s, format_description!("[year]-[month]-[day]")).is_ok()
}
