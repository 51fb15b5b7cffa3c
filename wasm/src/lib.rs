use serde::Deserialize;
use serde_json::Value;
use wall_order::{RouteRecord, get_order_key, parse_wall, sort_routes_json};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SortOptions {
    wall: Option<String>,
}

fn parse_options(options_json: Option<String>) -> Result<SortOptions, String> {
    match options_json {
        Some(raw) => serde_json::from_str::<SortOptions>(&raw).map_err(|error| error.to_string()),
        None => Ok(SortOptions::default()),
    }
}

fn sort_routes(routes_json: &str, options_json: Option<String>) -> Result<String, String> {
    let options = parse_options(options_json)?;
    sort_routes_json(routes_json, options.wall.as_deref()).map_err(|error| error.to_string())
}

fn route_key(route_json: &str, wall: &str, index: usize) -> Result<f64, String> {
    let route = match serde_json::from_str::<Value>(route_json).map_err(|error| error.to_string())? {
        Value::Object(object) => RouteRecord::from_object(object),
        _ => return Err("route must be a JSON object".to_string()),
    };
    let wall = parse_wall(wall).map_err(|error| error.to_string())?;
    Ok(get_order_key(&route, wall, index))
}

/// Orders a JSON route list. `options_json` may name the wall:
/// `{"wall": "boulderSouth"}`.
#[wasm_bindgen]
pub fn sort_routes_by_wall(routes_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    sort_routes(routes_json, options_json).map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn order_key(route_json: &str, wall: &str, index: usize) -> Result<f64, JsValue> {
    route_key(route_json, wall, index).map_err(|error| JsValue::from_str(&error))
}

#[cfg(test)]
mod tests {
    use crate::{route_key, sort_routes};

    #[test]
    fn sorts_with_wall_option() {
        let routes = r#"[{"id":"B","x":90,"y":10},{"id":"A","x":10,"y":40}]"#;
        let sorted = sort_routes(routes, Some(r#"{"wall":"ABWall"}"#.to_string()))
            .expect("vertical wall should sort");
        assert!(sorted.find("\"A\"").unwrap() < sorted.find("\"B\"").unwrap());
    }

    #[test]
    fn rejects_bad_options() {
        assert!(sort_routes("[]", Some("{".to_string())).is_err());
        assert!(sort_routes("[]", Some(r#"{"wall":"lobby"}"#.to_string())).is_err());
    }

    #[test]
    fn computes_single_keys() {
        assert_eq!(route_key(r#"{"x":5,"y":20}"#, "default", 0).unwrap(), -19_995.0);
        assert_eq!(route_key(r#"{"order":2}"#, "ABWall", 3).unwrap(), 2_000_003.0);
        assert!(route_key(r#"{"x":5}"#, "lobby", 0).is_err());
    }

    #[test]
    fn single_keys_read_routes_like_the_sort() {
        let route = r#"{"id":7,"x":"120","y":40}"#;
        assert_eq!(route_key(route, "ABWall", 0).unwrap(), 460_120.0);
        let sorted = sort_routes(&format!("[{route}]"), Some(r#"{"wall":"ABWall"}"#.to_string()))
            .expect("same route should sort");
        assert!(sorted.contains("\"120\""));
        assert!(route_key("[1]", "ABWall", 0).is_err());
        assert!(route_key("{", "ABWall", 0).is_err());
    }
}
