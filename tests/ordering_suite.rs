use std::path::Path;

use wall_order::{
    OrderBy, RoutePosition, SortDirection, Wall, get_order_key, parse_routes, sort_routes_by_wall,
    sort_routes_json,
};

fn fixture_ids(path: &Path) -> (Vec<String>, Vec<String>) {
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    let parsed = parse_routes(&input).expect("parse failed");
    let wall = parsed.wall.expect("fixture must name its wall");
    let sorted = sort_routes_by_wall(&parsed.routes, wall);
    let actual = sorted
        .iter()
        .map(|route| route.id.clone().expect("fixture routes need ids"))
        .collect();

    let raw: serde_json::Value = serde_json::from_str(&input).expect("fixture json");
    let expected = raw["expected"]
        .as_array()
        .expect("fixture needs an expected list")
        .iter()
        .map(|id| id.as_str().expect("expected ids are strings").to_string())
        .collect();
    (actual, expected)
}

#[test]
fn order_all_fixtures() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");

    // Keep this list explicit so every wall table gets a fixture on purpose.
    let candidates = [
        "ab_wall.json",
        "boulder_south.json",
        "rope_south.json",
        "rope_north_west.json",
        "rope_north_east.json",
        "boulder_north.json",
        "boulder_middle.json",
        "default_wall.json",
    ];

    for rel in candidates {
        let path = root.join(rel);
        assert!(path.exists(), "fixture missing: {}", rel);
        let (actual, expected) = fixture_ids(&path);
        assert_eq!(actual, expected, "{rel}");
    }
}

#[test]
fn vertical_wall_scenario() {
    let a = RoutePosition::at(10.0, 40.0).with_id("A");
    let b = RoutePosition::at(90.0, 10.0).with_id("B");
    let sorted = sort_routes_by_wall(&[b, a], Some(Wall::AbWall));
    assert_eq!(sorted[0].id.as_deref(), Some("A"));
    assert_eq!(sorted[1].id.as_deref(), Some("B"));
}

#[test]
fn default_wall_scenario() {
    let a = RoutePosition::at(5.0, 20.0);
    let b = RoutePosition::at(100.0, 20.0);
    assert_eq!(get_order_key(&a, None, 0), -19_995.0);
    assert_eq!(get_order_key(&b, None, 1), -19_980.0);
}

#[test]
fn manual_order_scenario() {
    let routes = vec![
        RoutePosition::ordered(2.0).with_id("two"),
        RoutePosition::ordered(1.0).with_id("one"),
    ];
    for wall in Wall::ALL {
        let sorted = sort_routes_by_wall(&routes, Some(wall));
        assert_eq!(sorted[0].id.as_deref(), Some("one"), "{wall}");
    }
}

#[test]
fn unordered_routes_scenario() {
    let routes: Vec<RoutePosition> = (0..6)
        .map(|idx| RoutePosition::default().with_id(format!("r{idx}")))
        .collect();
    let key_3 = get_order_key(&routes[3], Some(Wall::BoulderNorth), 3);
    let key_5 = get_order_key(&routes[5], Some(Wall::BoulderNorth), 5);
    assert!(key_3 < key_5);
    let sorted = sort_routes_by_wall(&routes, Some(Wall::BoulderNorth));
    let pos_3 = sorted.iter().position(|r| r.id.as_deref() == Some("r3"));
    let pos_5 = sorted.iter().position(|r| r.id.as_deref() == Some("r5"));
    assert!(pos_3 < pos_5);
}

#[test]
fn manual_order_shares_the_key_scale_with_positions() {
    let corner = RoutePosition::at(499.0, 499.0).with_id("corner");
    let routes = vec![RoutePosition::ordered(0.0).with_id("pinned"), corner.clone()];
    let sorted = sort_routes_by_wall(&routes, Some(Wall::RopeNorthWest));
    assert_eq!(sorted[0].id.as_deref(), Some("pinned"));
    let routes = vec![RoutePosition::ordered(1.0).with_id("pinned"), corner];
    let sorted = sort_routes_by_wall(&routes, Some(Wall::RopeNorthWest));
    assert_eq!(sorted[0].id.as_deref(), Some("corner"));
}

#[test]
fn json_round_trip_preserves_unknown_fields() {
    let input = std::fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("ab_wall.json"),
    )
    .expect("fixture read failed");
    let out = sort_routes_json(&input, None).expect("sort failed");
    let value: serde_json::Value = serde_json::from_str(&out).expect("output json");
    assert_eq!(value[1]["id"], "b");
    assert_eq!(value[1]["grade"], "6a");
    assert!(value[0].get("expected").is_none());
}

#[test]
fn order_by_constants_are_usable_from_outside() {
    let order_by = OrderBy::new(wall_order::Axis::Y, SortDirection::Desc);
    let key = wall_order::position_key_within_segment(&RoutePosition::at(1.0, 0.0), order_by);
    assert_eq!(key, wall_order::AXIS_MAX * wall_order::POSITION_SCALE + 1.0);
}
