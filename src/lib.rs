#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod order;
pub mod order_dump;
pub mod parser;
pub mod render;
pub mod theme;
pub mod walls;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RenderConfig, load_config};
pub use ir::{Axis, OrderBy, Positioned, RangeOrderSegment, RoutePosition, SortDirection, Wall};
pub use order::{
    AXIS_MAX, POSITION_SCALE, SEGMENT_SCALE, UNMATCHED_KEY, display_order, get_order_key,
    group_routes_by_wall, matched_segment, order_keys, position_key_within_segment,
    resolve_range_order_key, segment_matches, sort_indices_by_wall, sort_routes_by_wall,
};
pub use parser::{ParseError, ParsedRoutes, RouteRecord, parse_routes};
pub use render::render_wall_svg;
pub use theme::Theme;
pub use walls::{UnknownWall, parse_wall, wall_segments};

/// Parses a JSON route list and returns it ordered for `wall`, every field
/// of every route preserved. A wall named by the document is used when
/// `wall` is `None`.
pub fn sort_routes_json(input: &str, wall: Option<&str>) -> Result<String, ParseError> {
    let parsed = parse_routes(input)?;
    let wall = match wall {
        Some(name) => parse_wall(name)?,
        None => parsed.wall.flatten(),
    };
    let sorted: Vec<serde_json::Value> = sort_routes_by_wall(&parsed.routes, wall)
        .into_iter()
        .map(|route| route.raw)
        .collect();
    serde_json::to_string(&sorted).map_err(|err| ParseError::Syntax(err.to_string()))
}
