mod common;

use common::{init_logging, loc_row, RecordingHost, RecordingMap};
use mapvis::prelude::*;
use serde_json::{json, Value};

fn hover(lat: f64, lng: f64) -> MapEvent {
    MapEvent::MarkerOver {
        position: LatLng::new(lat, lng),
        container_point: Point::new(200.0, 150.0),
    }
}

fn three_cities() -> Vec<Row> {
    vec![loc_row(40.0, -74.0), loc_row(41.0, -73.0), loc_row(34.0, -118.0)]
}

#[test]
fn test_create_wires_map() {
    init_logging();
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);

    vis.create("vis", &json!({})).unwrap();

    let record = record.borrow();
    assert_eq!(record.mounted.as_deref(), Some("vis"));
    assert_eq!(
        record.fitted,
        vec![LatLngBounds::from_coords(24.0, -126.0, 49.0, -65.0)]
    );
    assert_eq!(record.live_of(LayerRole::Tile).len(), 1);
    assert_eq!(
        record.listening,
        vec![MapEventKind::MouseMove, MapEventKind::ZoomEnd, MapEventKind::MoveEnd]
    );
    assert!(record.fly_tos.is_empty());
}

#[test]
fn test_update_before_create_is_an_error() {
    let (map, _) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);

    let err = vis
        .update(&three_cities(), "vis", &json!({}), &QueryResponse::default())
        .unwrap_err();
    assert!(matches!(err, MapError::Plugin(_)));
}

#[test]
fn test_each_update_replaces_points_layer() {
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();

    let query = QueryResponse::default();
    vis.update(&three_cities(), "vis", &json!({}), &query).unwrap();
    vis.update(&three_cities()[..2], "vis", &json!({ "pointColor": "#123456" }), &query)
        .unwrap();

    let record = record.borrow();
    assert_eq!(record.added_count(LayerRole::Points), 2);
    assert_eq!(record.live_of(LayerRole::Points).len(), 1);
    match record.last_added(LayerRole::Points) {
        Some(Layer::Points(group)) => {
            assert_eq!(group.len(), 2);
            assert_eq!(group.markers[0].style.color, "#123456");
        }
        other => panic!("expected a points layer, got {:?}", other),
    }
    assert_eq!(vis.points().len(), 2);
}

#[test]
fn test_hover_orders_lines_closest_first() {
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();
    vis.update(&three_cities(), "vis", &json!({}), &QueryResponse::default())
        .unwrap();

    vis.handle_event(&hover(40.0, -74.0)).unwrap();

    let record = record.borrow();
    match record.last_added(LayerRole::Lines) {
        Some(Layer::Lines(lines)) => {
            let ends: Vec<LatLng> = lines.segments.iter().map(|[_, end]| *end).collect();
            assert_eq!(ends, vec![LatLng::new(41.0, -73.0), LatLng::new(34.0, -118.0)]);
            assert_eq!(lines.style.color, "#FF0000");
        }
        other => panic!("expected a lines layer, got {:?}", other),
    }
}

#[test]
fn test_line_number_limits_lines() {
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();
    vis.update(&three_cities(), "vis", &json!({ "lineNumber": 1 }), &QueryResponse::default())
        .unwrap();

    vis.handle_event(&MapEvent::MarkerClick {
        position: LatLng::new(34.0, -118.0),
        container_point: Point::new(0.0, 0.0),
    })
    .unwrap();

    match record.borrow().last_added(LayerRole::Lines) {
        Some(Layer::Lines(lines)) => {
            assert_eq!(lines.len(), 1);
            assert_eq!(lines.segments[0][1], LatLng::new(40.0, -74.0));
        }
        other => panic!("expected a lines layer, got {:?}", other),
    };
}

#[test]
fn test_voronoi_connects_every_visible_point() {
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::voronoi(map, host);
    assert_eq!(vis.id(), "voronoi");
    vis.create("vis", &json!({})).unwrap();

    let rows: Vec<Row> = (0..8).map(|i| loc_row(i as f64, 0.0)).collect();
    vis.update(&rows, "vis", &json!({ "lineNumber": 2 }), &QueryResponse::default())
        .unwrap();
    vis.handle_event(&hover(0.0, 0.0)).unwrap();

    match record.borrow().last_added(LayerRole::Lines) {
        Some(Layer::Lines(lines)) => assert_eq!(lines.len(), 7),
        other => panic!("expected a lines layer, got {:?}", other),
    };
}

#[test]
fn test_no_visible_candidates_creates_no_lines_layer() {
    let (map, record) = RecordingMap::new(LatLngBounds::from_coords(39.0, -75.0, 40.5, -73.5));
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();
    vis.update(&three_cities(), "vis", &json!({}), &QueryResponse::default())
        .unwrap();

    vis.handle_event(&hover(40.0, -74.0)).unwrap();

    let record = record.borrow();
    assert_eq!(record.added_count(LayerRole::Lines), 0);
    assert!(!vis.layers().is_active(LayerRole::Lines));
}

#[test]
fn test_new_hover_replaces_previous_lines() {
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();
    vis.update(&three_cities(), "vis", &json!({}), &QueryResponse::default())
        .unwrap();

    vis.handle_event(&hover(40.0, -74.0)).unwrap();
    vis.handle_event(&hover(41.0, -73.0)).unwrap();

    let record = record.borrow();
    assert_eq!(record.added_count(LayerRole::Lines), 2);
    assert_eq!(record.live_of(LayerRole::Lines).len(), 1);
}

#[test]
fn test_pointer_leaving_marker_clears_lines() {
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();
    vis.update(&three_cities(), "vis", &json!({ "pointRadius": 5 }), &QueryResponse::default())
        .unwrap();
    vis.handle_event(&hover(40.0, -74.0)).unwrap();

    vis.handle_event(&MapEvent::MouseMove {
        container_point: Point::new(203.0, 154.0),
    })
    .unwrap();
    assert_eq!(record.borrow().live_of(LayerRole::Lines).len(), 1);

    vis.handle_event(&MapEvent::MouseMove {
        container_point: Point::new(206.0, 150.0),
    })
    .unwrap();
    assert!(record.borrow().live_of(LayerRole::Lines).is_empty());

    // further moves must not try to remove the layer again
    vis.handle_event(&MapEvent::MouseMove {
        container_point: Point::new(400.0, 400.0),
    })
    .unwrap();
}

#[test]
fn test_row_color_colors_marker_and_lines() {
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();

    let rows = vec![
        Row::new().with("loc", Cell::new(json!([1.0, 1.0])).with_color("#00AA00")),
        loc_row(2.0, 2.0),
    ];
    vis.update(&rows, "vis", &json!({}), &QueryResponse::default())
        .unwrap();
    vis.handle_event(&hover(1.0, 1.0)).unwrap();

    let record = record.borrow();
    match record.last_added(LayerRole::Lines) {
        Some(Layer::Lines(lines)) => assert_eq!(lines.style.color, "#00AA00"),
        other => panic!("expected a lines layer, got {:?}", other),
    }
}

#[test]
fn test_fly_to_runs_once_when_config_arrives() {
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();
    let query = QueryResponse::default();

    // stored viewport has not arrived yet
    vis.update(&three_cities(), "vis", &json!({}), &query).unwrap();
    assert!(record.borrow().fly_tos.is_empty());
    assert_eq!(vis.viewport_phase(), SyncPhase::Uninitialized);

    let stored = json!({ "zoom": 5, "lat": 10, "lng": 20 });
    vis.update(&three_cities(), "vis", &stored, &query).unwrap();
    vis.update(&three_cities(), "vis", &stored, &query).unwrap();

    let record = record.borrow();
    assert_eq!(
        record.fly_tos,
        vec![FlyTo {
            center: LatLng::new(10.0, 20.0),
            zoom: 5,
            animate: false,
        }]
    );
    assert_eq!(vis.viewport_phase(), SyncPhase::Initialized);
}

#[test]
fn test_rejected_fly_to_is_retried() {
    init_logging();
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();
    let query = QueryResponse::default();
    let stored = json!({ "zoom": 5, "lat": 10, "lng": 20 });

    record.borrow_mut().failing_fly_tos = 1;
    assert!(vis.update(&three_cities(), "vis", &stored, &query).is_err());
    assert_eq!(vis.viewport_phase(), SyncPhase::Uninitialized);

    vis.update(&three_cities(), "vis", &stored, &query).unwrap();
    assert_eq!(record.borrow().fly_tos.len(), 1);
    assert_eq!(record.borrow().fly_tos[0].zoom, 5);
    assert_eq!(vis.viewport_phase(), SyncPhase::Initialized);
}

#[test]
fn test_failed_points_layer_leaves_nothing_to_hover() {
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();
    let query = QueryResponse::default();
    vis.update(&three_cities(), "vis", &json!({ "showPopup": true }), &query)
        .unwrap();

    record.borrow_mut().failing_adds = 1;
    let moved = vec![loc_row(51.5, -0.1), loc_row(48.9, 2.3)];
    assert!(vis
        .update(&moved, "vis", &json!({ "showPopup": true }), &query)
        .is_err());
    assert!(record.borrow().live_of(LayerRole::Points).is_empty());
    assert!(vis.points().is_empty());

    vis.handle_event(&hover(40.0, -74.0)).unwrap();
    assert_eq!(record.borrow().added_count(LayerRole::Lines), 0);
    assert_eq!(
        vis.popup_content(&LatLng::new(40.0, -74.0)).unwrap(),
        "<div style=\"padding: 10px 10px 15px; text-align: center\"></div>"
    );
}

#[test]
fn test_zoom_end_emits_single_patch() {
    let (map, _) = RecordingMap::world();
    let (host, events) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();
    vis.update(
        &three_cities(),
        "vis",
        &json!({ "zoom": 5, "lat": 10, "lng": 20 }),
        &QueryResponse::default(),
    )
    .unwrap();

    vis.handle_event(&MapEvent::ZoomEnd { zoom: 5 }).unwrap();
    vis.handle_event(&MapEvent::ZoomEnd { zoom: 7 }).unwrap();

    let events = events.borrow();
    assert_eq!(
        *events,
        vec![("updateConfig".to_string(), vec![json!({ "zoom": 7 })])]
    );
}

#[test]
fn test_move_end_emits_center_patch() {
    let (map, _) = RecordingMap::world();
    let (host, events) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();
    vis.update(
        &three_cities(),
        "vis",
        &json!({ "zoom": 5, "lat": 10, "lng": 20 }),
        &QueryResponse::default(),
    )
    .unwrap();

    vis.handle_event(&MapEvent::MoveEnd {
        center: LatLng::new(10.0, 20.0),
    })
    .unwrap();
    vis.handle_event(&MapEvent::MoveEnd {
        center: LatLng::new(12.5, 20.0),
    })
    .unwrap();

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].1, vec![json!({ "lat": 12.5, "lng": 20.0 })]);
}

#[test]
fn test_popup_content_follows_show_popup() {
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();
    let query = QueryResponse::default();

    vis.update(&three_cities(), "vis", &json!({}), &query).unwrap();
    assert!(vis.popup_content(&LatLng::new(40.0, -74.0)).is_none());

    vis.update(&three_cities(), "vis", &json!({ "showPopup": true }), &query)
        .unwrap();
    let content = vis.popup_content(&LatLng::new(41.0, -73.0)).unwrap();
    assert!(content.ends_with(">41,-73</div>"));

    match record.borrow().last_added(LayerRole::Points) {
        Some(Layer::Points(group)) => assert!(group.popup.is_some()),
        other => panic!("expected a points layer, got {:?}", other),
    };
}

#[test]
fn test_named_geo_field() {
    let (map, _) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();

    let rows = vec![Row::new()
        .with("store.name", Cell::new(json!("Store 1")))
        .with("store.location", Cell::new(json!([51.5, -0.1])))];
    let query = QueryResponse::default();

    vis.update(&rows, "vis", &json!({}), &query).unwrap();
    assert!(vis.points().is_empty());

    vis.update(&rows, "vis", &json!({ "geoField": "store.location" }), &query)
        .unwrap();
    assert_eq!(vis.points()[0].position, LatLng::new(51.5, -0.1));
}

#[test]
fn test_destroy_removes_all_layers() {
    let (map, record) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    let mut vis = NearestPointMap::leaflet(map, host);
    vis.create("vis", &json!({})).unwrap();
    vis.update(&three_cities(), "vis", &json!({}), &QueryResponse::default())
        .unwrap();
    vis.handle_event(&hover(40.0, -74.0)).unwrap();

    vis.destroy().unwrap();
    assert!(record.borrow().live.is_empty());
    assert!(vis.layers().is_empty());
}

#[test]
fn test_registry_hosts_both_variants() {
    let mut registry = PluginRegistry::new();
    let (map, _) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    registry
        .add(Box::new(NearestPointMap::leaflet(map, host)))
        .unwrap();
    let (map, _) = RecordingMap::world();
    let (host, _) = RecordingHost::new();
    registry
        .add(Box::new(NearestPointMap::voronoi(map, host)))
        .unwrap();

    assert_eq!(registry.ids(), ["leaflet", "voronoi"]);
    let schema = serde_json::to_value(registry.get("leaflet").unwrap().options()).unwrap();
    assert_eq!(schema["lineNumber"]["default"], json!(5));
    assert_eq!(schema["zoom"]["section"], Value::from("Windowing"));
}
