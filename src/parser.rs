use serde_json::{Map, Value};
use thiserror::Error;

use crate::ir::{Positioned, Wall};
use crate::walls::{UnknownWall, parse_wall};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid route JSON: {0}")]
    Syntax(String),
    #[error("expected an array of routes or an object with a `routes` array")]
    Shape,
    #[error("route {index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("invalid document wall: {0}")]
    Wall(#[from] UnknownWall),
}

/// One route from the input document. `raw` is kept as-is so writing the
/// ordered list back out preserves every field.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub raw: Value,
    pub id: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub order: Option<f64>,
    pub wall_name: Option<String>,
    pub wall: Option<Wall>,
}

impl RouteRecord {
    pub fn from_object(object: Map<String, Value>) -> Self {
        let id = object.get("id").and_then(|value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        let wall_name = object
            .get("wall")
            .and_then(Value::as_str)
            .map(str::to_string);
        let wall = wall_name.as_deref().and_then(Wall::from_name);
        Self {
            id,
            x: number_field(&object, "x"),
            y: number_field(&object, "y"),
            order: number_field(&object, "order"),
            wall_name,
            wall,
            raw: Value::Object(object),
        }
    }
}

impl Positioned for RouteRecord {
    fn x(&self) -> Option<f64> {
        self.x
    }

    fn y(&self) -> Option<f64> {
        self.y
    }

    fn order(&self) -> Option<f64> {
        self.order
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct ParsedRoutes {
    pub routes: Vec<RouteRecord>,
    /// Wall named by the document itself: `None` when absent, `Some(None)`
    /// for the default wall.
    pub wall: Option<Option<Wall>>,
}

impl ParsedRoutes {
    /// True when routes carry their own `wall` field.
    pub fn has_route_walls(&self) -> bool {
        self.routes.iter().any(|route| route.wall_name.is_some())
    }
}

fn number_field(object: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match object.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|value| value.is_finite())
}

fn parse_value(input: &str) -> Result<Value, ParseError> {
    match serde_json::from_str::<Value>(input) {
        Ok(value) => Ok(value),
        Err(strict_err) => json5::from_str::<Value>(input).map_err(|lenient_err| {
            ParseError::Syntax(format!("{strict_err} (json5: {lenient_err})"))
        }),
    }
}

pub fn parse_routes(input: &str) -> Result<ParsedRoutes, ParseError> {
    let value = parse_value(input)?;
    let (items, wall) = match value {
        Value::Array(items) => (items, None),
        Value::Object(mut object) => {
            let wall = match object.get("wall") {
                Some(Value::String(name)) => Some(parse_wall(name)?),
                Some(Value::Null) | None => None,
                Some(_) => return Err(ParseError::Shape),
            };
            match object.remove("routes") {
                Some(Value::Array(items)) => (items, wall),
                _ => return Err(ParseError::Shape),
            }
        }
        _ => return Err(ParseError::Shape),
    };

    let mut routes = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(object) => routes.push(RouteRecord::from_object(object)),
            _ => return Err(ParseError::NotAnObject { index }),
        }
    }
    Ok(ParsedRoutes { routes, wall })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_array() {
        let parsed = parse_routes(r#"[{"id":"a","x":10,"y":20.5},{"id":7,"order":3}]"#).unwrap();
        assert_eq!(parsed.routes.len(), 2);
        assert_eq!(parsed.wall, None);
        let first = &parsed.routes[0];
        assert_eq!(first.id.as_deref(), Some("a"));
        assert_eq!(first.x, Some(10.0));
        assert_eq!(first.y, Some(20.5));
        assert_eq!(first.order, None);
        let second = &parsed.routes[1];
        assert_eq!(second.id.as_deref(), Some("7"));
        assert_eq!(second.order, Some(3.0));
        assert!(!parsed.has_route_walls());
    }

    #[test]
    fn parse_wrapped_document_with_wall() {
        let parsed = parse_routes(r#"{"wall":"boulderSouth","routes":[{"x":1,"y":2}]}"#).unwrap();
        assert_eq!(parsed.wall, Some(Some(Wall::BoulderSouth)));
        let parsed = parse_routes(r#"{"wall":"default","routes":[]}"#).unwrap();
        assert_eq!(parsed.wall, Some(None));
    }

    #[test]
    fn unknown_document_wall_is_an_error() {
        let err = parse_routes(r#"{"wall":"lobby","routes":[]}"#).unwrap_err();
        assert!(matches!(err, ParseError::Wall(_)));
        assert_eq!(err.to_string(), "invalid document wall: unknown wall `lobby`");
    }

    #[test]
    fn json5_fallback() {
        let input = "[\n  // warm-up\n  {id: 'w1', x: 1, y: 2,},\n]";
        let parsed = parse_routes(input).unwrap();
        assert_eq!(parsed.routes[0].id.as_deref(), Some("w1"));
        assert_eq!(parsed.routes[0].y, Some(2.0));
    }

    #[test]
    fn loose_numbers() {
        let parsed =
            parse_routes(r#"[{"x":"12.5","y":null,"order":"n/a"},{"x":true,"y":"  4 "}]"#).unwrap();
        assert_eq!(parsed.routes[0].x, Some(12.5));
        assert_eq!(parsed.routes[0].y, None);
        assert_eq!(parsed.routes[0].order, None);
        assert_eq!(parsed.routes[1].x, None);
        assert_eq!(parsed.routes[1].y, Some(4.0));
    }

    #[test]
    fn route_walls_are_lenient() {
        let parsed =
            parse_routes(r#"[{"wall":"rope-south"},{"wall":"lobby"},{"id":"x"}]"#).unwrap();
        assert!(parsed.has_route_walls());
        assert_eq!(parsed.routes[0].wall, Some(Wall::RopeSouth));
        assert_eq!(parsed.routes[1].wall, None);
        assert_eq!(parsed.routes[1].wall_name.as_deref(), Some("lobby"));
        assert_eq!(parsed.routes[2].wall_name, None);
    }

    #[test]
    fn keeps_raw_fields() {
        let parsed = parse_routes(r#"[{"id":"a","grade":"6b+","x":3,"y":4}]"#).unwrap();
        assert_eq!(parsed.routes[0].raw["grade"], "6b+");
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(matches!(parse_routes("42"), Err(ParseError::Shape)));
        assert!(matches!(parse_routes(r#"{"items":[]}"#), Err(ParseError::Shape)));
        assert!(matches!(
            parse_routes(r#"[{"x":1}, 3]"#),
            Err(ParseError::NotAnObject { index: 1 })
        ));
        assert!(matches!(parse_routes("[{"), Err(ParseError::Syntax(_))));
    }
}
