//! Table-level layer descriptor.
//!
//! The table descriptor owns everything that is not geometry related:
//! identity, attribute fields, query capabilities and record limits. The
//! feature-level builder wraps it (see [`super::feature`]).

use serde::Serialize;
use serde_json::Value;

use super::fields::{derive_fields, Field};
use super::{defaults, LayerOptions, NormalizedInput};
use crate::settings::Settings;
use crate::util::{merge_defined, MergeDefined};

/// The field marked as the layer's unique id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueIdField {
    pub name: String,
    pub is_system_maintained: bool,
}

/// Table-level layer metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLayerDescriptor {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    pub description: String,
    pub copyright_text: String,
    pub parent_layer: Option<Value>,
    pub sub_layers: Option<Value>,
    pub display_field: String,
    pub object_id_field: String,
    pub unique_id_field: UniqueIdField,
    pub global_id_field: String,
    pub capabilities: String,
    pub max_record_count: u32,
    pub has_static_data: bool,
    pub has_attachments: bool,
    pub html_popup_type: String,
    pub supports_statistics: bool,
    pub supports_advanced_queries: bool,
    pub supports_pagination: bool,
    pub supported_query_formats: String,
    pub use_standardized_queries: bool,
    pub fields: Vec<Field>,
    pub relationships: Vec<Value>,
    pub templates: Vec<Value>,
}

/// Scalar members copied from the options when present.
struct DirectOverrides {
    name: Option<String>,
    description: Option<String>,
    copyright_text: Option<String>,
    max_record_count: Option<u32>,
}

impl From<&LayerOptions> for DirectOverrides {
    fn from(options: &LayerOptions) -> Self {
        Self {
            name: options.name.clone(),
            description: options.description.clone(),
            copyright_text: options.copyright_text.clone(),
            max_record_count: options.max_record_count,
        }
    }
}

impl MergeDefined<TableLayerDescriptor> for DirectOverrides {
    fn merge_into(self, target: &mut TableLayerDescriptor) {
        merge_defined(&mut target.name, self.name);
        merge_defined(&mut target.description, self.description);
        merge_defined(&mut target.copyright_text, self.copyright_text);
        merge_defined(&mut target.max_record_count, self.max_record_count);
    }
}

/// Build the table-level descriptor from normalized input.
pub fn build_table_descriptor(input: &NormalizedInput<'_>, settings: &Settings) -> TableLayerDescriptor {
    let options = &input.options;
    let mut table = defaults::table_layer_defaults(settings);

    merge_defined(&mut table.id, options.id);

    let field_set = derive_fields(
        input.geojson,
        options.fields.as_deref(),
        options.id_field.as_deref(),
        &settings.object_id_field,
        settings.string_field_length,
    );
    table.fields = field_set.fields;
    table.object_id_field = field_set.object_id_field.clone();
    table.unique_id_field.name = field_set.object_id_field;

    table.display_field = options
        .display_field
        .clone()
        .or_else(|| options.id_field.clone())
        .unwrap_or_else(|| table.object_id_field.clone());

    if options.extract() {
        table.capabilities.push_str(",Extract");
    }

    merge_defined(&mut table.has_static_data, options.has_static_data);

    DirectOverrides::from(options).merge_into(&mut table);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::GeoJsonDocument;
    use crate::layer::normalize_input;
    use serde_json::json;

    fn build(doc: &GeoJsonDocument, options: LayerOptions) -> TableLayerDescriptor {
        build_table_descriptor(&normalize_input(doc, &options), &Settings::default())
    }

    #[test]
    fn test_defaults() {
        let table = build(&GeoJsonDocument::default(), LayerOptions::default());
        assert_eq!(table.id, 0);
        assert_eq!(table.name, "Not Set");
        assert_eq!(table.layer_type, "Table");
        assert_eq!(table.capabilities, "Query");
        assert_eq!(table.max_record_count, 2000);
        assert_eq!(table.object_id_field, "OBJECTID");
        assert_eq!(table.display_field, "OBJECTID");
        assert_eq!(table.unique_id_field.name, "OBJECTID");
        assert!(!table.has_static_data);
    }

    #[test]
    fn test_overrides() {
        let doc = GeoJsonDocument::from_value(json!({
            "type": "FeatureCollection",
            "features": [{ "type": "Feature", "geometry": null, "properties": { "gid": 1, "label": "x" } }]
        }))
        .unwrap();
        let options = LayerOptions::from_value(json!({
            "id": 4,
            "name": "Parcels",
            "description": "City parcels",
            "copyrightText": "City GIS",
            "maxRecordCount": 250,
            "idField": "gid",
            "hasStaticData": true,
            "capabilities": { "extract": true }
        }))
        .unwrap();

        let table = build(&doc, options);
        assert_eq!(table.id, 4);
        assert_eq!(table.name, "Parcels");
        assert_eq!(table.description, "City parcels");
        assert_eq!(table.copyright_text, "City GIS");
        assert_eq!(table.max_record_count, 250);
        assert_eq!(table.object_id_field, "gid");
        assert_eq!(table.display_field, "gid");
        assert_eq!(table.capabilities, "Query,Extract");
        assert!(table.has_static_data);
        assert_eq!(table.fields.len(), 2);
    }

    #[test]
    fn test_explicit_display_field() {
        let options = LayerOptions {
            display_field: Some("label".into()),
            id_field: Some("gid".into()),
            ..LayerOptions::default()
        };
        let table = build(&GeoJsonDocument::default(), options);
        assert_eq!(table.display_field, "label");
    }

    #[test]
    fn test_serialized_keys() {
        let table = build(&GeoJsonDocument::default(), LayerOptions::default());
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["type"], "Table");
        assert_eq!(value["objectIdField"], "OBJECTID");
        assert_eq!(value["uniqueIdField"], json!({ "name": "OBJECTID", "isSystemMaintained": true }));
        assert!(value["parentLayer"].is_null());
    }
}
