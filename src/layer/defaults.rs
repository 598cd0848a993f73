//! Structural defaults for layer descriptors.
//!
//! Every descriptor starts from these values; builders only overwrite the
//! members they own.

use super::feature::{DrawingInfo, FeatureLayerDescriptor};
use super::renderer::Renderer;
use super::table::{TableLayerDescriptor, UniqueIdField};
use crate::settings::Settings;

/// Layer type reported by table-level descriptors.
pub const TABLE_LAYER_TYPE: &str = "Table";

/// Layer type reported by feature-level descriptors.
pub const FEATURE_LAYER_TYPE: &str = "Feature Layer";

/// Fresh table-level descriptor.
pub fn table_layer_defaults(settings: &Settings) -> TableLayerDescriptor {
    TableLayerDescriptor {
        id: 0,
        name: settings.default_layer_name.clone(),
        layer_type: TABLE_LAYER_TYPE.to_string(),
        description: String::new(),
        copyright_text: String::new(),
        parent_layer: None,
        sub_layers: None,
        display_field: settings.object_id_field.clone(),
        object_id_field: settings.object_id_field.clone(),
        unique_id_field: UniqueIdField {
            name: settings.object_id_field.clone(),
            is_system_maintained: true,
        },
        global_id_field: String::new(),
        capabilities: "Query".to_string(),
        max_record_count: settings.max_record_count,
        has_static_data: false,
        has_attachments: false,
        html_popup_type: "esriServerHTMLPopupTypeNone".to_string(),
        supports_statistics: true,
        supports_advanced_queries: true,
        supports_pagination: true,
        supported_query_formats: "JSON".to_string(),
        use_standardized_queries: true,
        fields: Vec::new(),
        relationships: Vec::new(),
        templates: Vec::new(),
    }
}

/// Wrap a table descriptor with the feature-layer defaults.
///
/// The table's members are kept except `type`, which becomes
/// `"Feature Layer"`.
pub fn feature_layer_defaults(mut table: TableLayerDescriptor) -> FeatureLayerDescriptor {
    table.layer_type = FEATURE_LAYER_TYPE.to_string();
    FeatureLayerDescriptor {
        table,
        geometry_type: None,
        drawing_info: DrawingInfo {
            renderer: Renderer::default(),
            labeling_info: None,
        },
        supports_coordinates_quantization: false,
        extent: None,
        min_scale: 0.0,
        max_scale: 0.0,
        has_z: false,
        has_m: false,
        has_labels: false,
        allow_geometry_updates: false,
    }
}
