//! End-to-end descriptor building from GeoJSON documents.

use std::sync::Arc;
use std::thread;

use layer_metadata::crs::WEB_MERCATOR_WKID;
use layer_metadata::geojson::Position;
use layer_metadata::prelude::*;
use serde_json::{json, Value};
use smallvec::smallvec;

fn point_doc(points: &[[f64; 2]]) -> GeoJsonDocument {
    let features = points
        .iter()
        .map(|&[x, y]| Feature::new(Some(Geometry::Point { coordinates: smallvec![x, y] })))
        .collect();
    GeoJsonDocument::from_features(features)
}

fn options(value: Value) -> LayerOptions {
    LayerOptions::from_value(value).unwrap()
}

fn recording_builder() -> (MetadataBuilder, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let builder = MetadataBuilder::new().with_sink(sink.clone());
    (builder, sink)
}

#[test]
fn test_two_points() {
    let doc = GeoJsonDocument::from_json_str(
        r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [1, 2] }, "properties": {} },
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [3, 4] }, "properties": {} }
            ]
        }"#,
    )
    .unwrap();

    let (builder, sink) = recording_builder();
    let layer = builder.build(&doc, &LayerOptions::default()).unwrap();

    assert_eq!(layer.geometry_type, Some(GeometryType::Point));
    assert_eq!(layer.drawing_info.renderer, Renderer::point());
    assert!(!layer.supports_coordinates_quantization);
    assert_eq!(layer.min_scale, 0.0);
    assert_eq!(layer.max_scale, 0.0);

    let extent = layer.extent.expect("extent from two points");
    assert_eq!(extent.bounds(), [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(extent.spatial_reference, SpatialReference::wgs84());
    assert!(sink.is_empty());
}

#[test]
fn test_empty_collection_has_no_extent() {
    let doc = GeoJsonDocument::from_value(json!({ "type": "FeatureCollection", "features": [] })).unwrap();
    let (builder, sink) = recording_builder();

    let layer = builder.build(&doc, &LayerOptions::default()).unwrap();

    assert!(layer.extent.is_none());
    assert!(layer.geometry_type.is_none());
    assert_eq!(layer.drawing_info.renderer, Renderer::point());
    assert!(sink.is_empty());

    let value = serde_json::to_value(&layer).unwrap();
    assert!(value.get("extent").is_none());
    assert!(value["geometryType"].is_null());
}

#[test]
fn test_non_finite_coordinate_degrades_extent() {
    let doc = point_doc(&[[1.0, 2.0], [f64::NAN, 4.0]]);
    let (builder, sink) = recording_builder();

    let layer = builder.build(&doc, &LayerOptions::default()).unwrap();

    assert!(layer.extent.is_none());
    // the rest of the descriptor is unaffected
    assert_eq!(layer.geometry_type, Some(GeometryType::Point));
    assert_eq!(layer.table.layer_type, "Feature Layer");

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Could not calculate extent from data"));
    assert!(messages[0].contains("Feature does not contain valid geometry"));
}

#[test]
fn test_infinite_coordinate_degrades_extent() {
    let doc = point_doc(&[[f64::INFINITY, 0.0]]);
    let (builder, sink) = recording_builder();

    let layer = builder.build(&doc, &LayerOptions::default()).unwrap();
    assert!(layer.extent.is_none());
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_short_position_degrades_extent() {
    let position: Position = smallvec![5.0];
    let doc = GeoJsonDocument::from_features(vec![Feature::new(Some(Geometry::Point { coordinates: position }))]);
    let (builder, sink) = recording_builder();

    let layer = builder.build(&doc, &LayerOptions::default()).unwrap();
    assert!(layer.extent.is_none());
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_single_feature_document_has_no_extent() {
    let doc = GeoJsonDocument::from_value(json!({
        "type": "Feature",
        "properties": {},
        "geometry": { "type": "Point", "coordinates": [1, 2] }
    }))
    .unwrap();
    let (builder, sink) = recording_builder();

    let layer = builder.build(&doc, &LayerOptions::default()).unwrap();
    assert!(layer.extent.is_none());
    assert_eq!(layer.geometry_type, Some(GeometryType::Point));
    assert!(sink.is_empty());
}

#[test]
fn test_extent_override_skips_feature_scan() {
    // the NaN would trigger a diagnostic if features were scanned
    let doc = point_doc(&[[f64::NAN, 0.0]]);
    let (builder, sink) = recording_builder();

    let layer = builder
        .build(&doc, &options(json!({ "extent": [-10, -20, 10, 20] })))
        .unwrap();

    assert_eq!(layer.extent.unwrap().bounds(), [-10.0, -20.0, 10.0, 20.0]);
    assert!(sink.is_empty());
}

#[test]
fn test_invalid_extent_override_is_an_error() {
    let doc = point_doc(&[[0.0, 0.0]]);
    let err = build(&doc, &options(json!({ "extent": "everywhere" }))).unwrap_err();
    assert!(matches!(err, Error::InvalidExtent(_)));
}

#[test]
fn test_input_crs_sets_extent_spatial_reference() {
    let doc = point_doc(&[[0.0, 0.0], [100.0, 50.0]]);
    let layer = build(&doc, &options(json!({ "inputCrs": 3857 }))).unwrap();

    let extent = layer.extent.unwrap();
    assert_eq!(extent.spatial_reference.wkid(), Some(102100));
    assert_eq!(
        serde_json::to_value(&extent.spatial_reference).unwrap()["latestWkid"],
        WEB_MERCATOR_WKID
    );
}

#[test]
fn test_extent_spans_true_min_max() {
    let doc = GeoJsonDocument::from_value(json!({
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": {}, "geometry": {
                "type": "LineString", "coordinates": [[5, 5], [-3, 8], [2, -7]] } },
            { "type": "Feature", "properties": {}, "geometry": null },
            { "type": "Feature", "properties": {}, "geometry": {
                "type": "Polygon", "coordinates": [[[10, 0], [11, 0], [11, 1], [10, 0]]] } }
        ]
    }))
    .unwrap();

    let layer = build(&doc, &LayerOptions::default()).unwrap();
    assert_eq!(layer.extent.unwrap().bounds(), [-3.0, -7.0, 11.0, 8.0]);
    // first geometry-bearing feature decides the type
    assert_eq!(layer.geometry_type, Some(GeometryType::Polyline));
    assert_eq!(layer.drawing_info.renderer, Renderer::line());
}

#[test]
fn test_geometry_type_is_idempotent() {
    let doc = point_doc(&[[0.0, 0.0]]);
    let first = build(&doc, &options(json!({ "geometryType": "Polygon" }))).unwrap();
    assert_eq!(first.geometry_type, Some(GeometryType::Polygon));

    // feeding the resolved name back yields the same type
    let resolved = first.geometry_type.unwrap().as_str();
    let second = build(&doc, &options(json!({ "geometryType": resolved }))).unwrap();
    assert_eq!(second.geometry_type, first.geometry_type);
    assert_eq!(second.drawing_info.renderer, Renderer::polygon());
}

#[test]
fn test_top_level_geometry_type_beats_metadata() {
    let doc = GeoJsonDocument::from_value(json!({
        "type": "FeatureCollection",
        "geometryType": "MultiPoint",
        "metadata": { "geometryType": "Polygon" },
        "features": []
    }))
    .unwrap();

    let layer = build(&doc, &LayerOptions::default()).unwrap();
    assert_eq!(layer.geometry_type, Some(GeometryType::Multipoint));

    let layer = build(&doc, &options(json!({ "geometryType": "LineString" }))).unwrap();
    assert_eq!(layer.geometry_type, Some(GeometryType::Polyline));
}

#[test]
fn test_explicit_renderer_wins_over_geometry_default() {
    let renderer = json!({
        "type": "uniqueValue",
        "field1": "kind",
        "uniqueValueInfos": []
    });
    let doc = GeoJsonDocument::from_value(json!({
        "type": "Feature",
        "properties": { "kind": "oak" },
        "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] }
    }))
    .unwrap();

    let layer = build(&doc, &options(json!({ "renderer": renderer.clone() }))).unwrap();
    assert_eq!(layer.geometry_type, Some(GeometryType::Polygon));
    assert!(layer.drawing_info.renderer.is_custom());

    let value = serde_json::to_value(&layer).unwrap();
    assert_eq!(value["drawingInfo"]["renderer"], renderer);
}

#[test]
fn test_scale_merge_keeps_defaults_for_absent_values() {
    let doc = point_doc(&[[0.0, 0.0]]);

    let layer = build(&doc, &options(json!({ "minScale": 100000 }))).unwrap();
    assert_eq!(layer.min_scale, 100000.0);
    assert_eq!(layer.max_scale, 0.0);

    let layer = build(&doc, &options(json!({ "maxScale": 500, "minScale": null }))).unwrap();
    assert_eq!(layer.min_scale, 0.0);
    assert_eq!(layer.max_scale, 500.0);
}

#[test]
fn test_quantization_from_capabilities() {
    let doc = point_doc(&[[0.0, 0.0]]);
    let layer = build(&doc, &options(json!({ "capabilities": { "quantization": true } }))).unwrap();
    assert!(layer.supports_coordinates_quantization);
}

#[test]
fn test_metadata_hints_fill_options() {
    let doc = GeoJsonDocument::from_value(json!({
        "type": "FeatureCollection",
        "metadata": { "name": "Trees", "geometryType": "esriGeometryPolyline", "idField": "tree_id" },
        "features": [
            { "type": "Feature", "properties": { "tree_id": 7, "species": "oak" },
              "geometry": { "type": "Point", "coordinates": [0, 0] } }
        ]
    }))
    .unwrap();

    let layer = build(&doc, &LayerOptions::default()).unwrap();
    assert_eq!(layer.table.name, "Trees");
    assert_eq!(layer.geometry_type, Some(GeometryType::Polyline));
    assert_eq!(layer.table.object_id_field, "tree_id");

    // explicit options beat metadata
    let layer = build(&doc, &options(json!({ "name": "Oaks" }))).unwrap();
    assert_eq!(layer.table.name, "Oaks");
}

#[test]
fn test_repeated_builds_are_independent() {
    let doc = point_doc(&[[1.0, 1.0]]);
    let builder = MetadataBuilder::new();

    let mut first = builder.build(&doc, &LayerOptions::default()).unwrap();
    first.min_scale = 42.0;
    first.drawing_info.renderer = Renderer::polygon();

    let second = builder.build(&doc, &LayerOptions::default()).unwrap();
    assert_eq!(second.min_scale, 0.0);
    assert_eq!(second.drawing_info.renderer, Renderer::point());
}

#[test]
fn test_concurrent_builds_share_one_builder() {
    let (builder, sink) = recording_builder();
    let builder = Arc::new(builder);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let builder = Arc::clone(&builder);
            thread::spawn(move || {
                let x = i as f64;
                let doc = if i % 2 == 0 {
                    point_doc(&[[x, x], [x + 1.0, x + 2.0]])
                } else {
                    point_doc(&[[f64::NAN, x]])
                };
                (i, builder.build(&doc, &LayerOptions::default()).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (i, layer) = handle.join().unwrap();
        if i % 2 == 0 {
            let x = i as f64;
            assert_eq!(layer.extent.unwrap().bounds(), [x, x, x + 1.0, x + 2.0]);
        } else {
            assert!(layer.extent.is_none());
        }
    }
    assert_eq!(sink.len(), 4);
}
