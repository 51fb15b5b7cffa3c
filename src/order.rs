use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::ir::{Axis, OrderBy, Positioned, RangeOrderSegment, SortDirection, Wall, wall_label};
use crate::walls::{WallRule, wall_rule};

/// Upper bound of the map coordinate space on both axes.
pub const AXIS_MAX: f64 = 500.0;
/// Weight of the ordering axis over the tie-breaking axis.
pub const POSITION_SCALE: f64 = 1_000.0;
/// Weight of the segment index over the position inside a segment.
pub const SEGMENT_SCALE: f64 = 1_000_000.0;
/// Key for routes that match no segment, and base key for unordered routes.
pub const UNMATCHED_KEY: f64 = 1_000_000_000.0;

fn numeric(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn coordinate<R: Positioned + ?Sized>(route: &R, axis: Axis) -> Option<f64> {
    match axis {
        Axis::X => numeric(route.x()),
        Axis::Y => numeric(route.y()),
    }
}

fn point<R: Positioned + ?Sized>(route: &R) -> Option<(f64, f64)> {
    Some((numeric(route.x())?, numeric(route.y())?))
}

pub fn segment_matches<R: Positioned + ?Sized>(route: &R, segment: &RangeOrderSegment) -> bool {
    match segment {
        RangeOrderSegment::Band { range, .. } => coordinate(route, range.axis)
            .map(|value| value >= range.min && value <= range.max)
            .unwrap_or(false),
        RangeOrderSegment::Area { area, .. } => point(route)
            .map(|(x, y)| area.contains(x, y))
            .unwrap_or(false),
    }
}

pub fn position_key_within_segment<R: Positioned + ?Sized>(route: &R, order_by: OrderBy) -> f64 {
    let primary = coordinate(route, order_by.axis).unwrap_or(0.0);
    let tie_breaker = coordinate(route, order_by.axis.other()).unwrap_or(0.0);
    let contribution = match order_by.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => AXIS_MAX - primary,
    };
    contribution * POSITION_SCALE + tie_breaker
}

/// Index of the first segment the route falls in.
pub fn first_matching_segment<R: Positioned + ?Sized>(
    route: &R,
    segments: &[RangeOrderSegment],
) -> Option<usize> {
    segments
        .iter()
        .position(|segment| segment_matches(route, segment))
}

pub fn resolve_range_order_key<R: Positioned + ?Sized>(
    route: &R,
    segments: &[RangeOrderSegment],
) -> f64 {
    match first_matching_segment(route, segments) {
        Some(idx) => {
            idx as f64 * SEGMENT_SCALE + position_key_within_segment(route, segments[idx].order_by())
        }
        None => UNMATCHED_KEY,
    }
}

/// Segment a positioned route is ordered by on a segmented wall.
pub fn matched_segment<R: Positioned + ?Sized>(route: &R, wall: Option<Wall>) -> Option<usize> {
    point(route)?;
    match wall_rule(wall) {
        WallRule::Segments(segments) => first_matching_segment(route, segments),
        WallRule::AxisX | WallRule::Fallback => None,
    }
}

pub fn get_order_key<R: Positioned + ?Sized>(route: &R, wall: Option<Wall>, index: usize) -> f64 {
    let Some((x, y)) = point(route) else {
        return match numeric(route.order()) {
            Some(order) => order * SEGMENT_SCALE + index as f64,
            None => UNMATCHED_KEY + index as f64,
        };
    };
    match wall_rule(wall) {
        WallRule::Segments(segments) => resolve_range_order_key(route, segments),
        WallRule::AxisX => x,
        WallRule::Fallback => -y * POSITION_SCALE + x,
    }
}

/// True when every present coordinate lies in `[0, AXIS_MAX]`. The key
/// packing margins only hold inside that square.
pub fn in_coordinate_space<R: Positioned + ?Sized>(route: &R) -> bool {
    [numeric(route.x()), numeric(route.y())]
        .into_iter()
        .flatten()
        .all(|value| (0.0..=AXIS_MAX).contains(&value))
}

pub fn order_keys<R: Positioned>(routes: &[R], wall: Option<Wall>) -> Vec<f64> {
    routes
        .iter()
        .enumerate()
        .map(|(idx, route)| get_order_key(route, wall, idx))
        .collect()
}

/// Input indices in display order, without logging. For callers that
/// already went through `sort_indices_by_wall` for the same routes.
pub fn display_order<R: Positioned>(routes: &[R], wall: Option<Wall>) -> Vec<usize> {
    let mut decorated: Vec<(usize, f64)> = routes
        .iter()
        .enumerate()
        .map(|(idx, route)| (idx, get_order_key(route, wall, idx)))
        .collect();
    // Vec::sort_by is stable, so equal keys keep input order.
    decorated.sort_by(|a, b| a.1.total_cmp(&b.1));
    decorated.into_iter().map(|(idx, _)| idx).collect()
}

/// Input indices in display order.
pub fn sort_indices_by_wall<R: Positioned>(routes: &[R], wall: Option<Wall>) -> Vec<usize> {
    for (idx, route) in routes.iter().enumerate() {
        if !in_coordinate_space(route) {
            warn!(
                wall = wall_label(wall),
                index = idx,
                id = route.id().unwrap_or(""),
                x = ?route.x(),
                y = ?route.y(),
                "route lies outside the 0..={AXIS_MAX} map coordinate space"
            );
        }
    }
    let order = display_order(routes, wall);
    debug!(wall = wall_label(wall), routes = routes.len(), "ordered routes");
    order
}

pub fn sort_routes_by_wall<R: Positioned + Clone>(routes: &[R], wall: Option<Wall>) -> Vec<R> {
    sort_indices_by_wall(routes, wall)
        .into_iter()
        .map(|idx| routes[idx].clone())
        .collect()
}

/// Splits a mixed list by wall, keeping input order inside each group, and
/// sorts every group for its wall.
pub fn group_routes_by_wall<R, F>(routes: &[R], wall_of: F) -> BTreeMap<Option<Wall>, Vec<R>>
where
    R: Positioned + Clone,
    F: Fn(&R) -> Option<Wall>,
{
    let mut groups: BTreeMap<Option<Wall>, Vec<R>> = BTreeMap::new();
    for route in routes {
        groups.entry(wall_of(route)).or_default().push(route.clone());
    }
    for (wall, group) in groups.iter_mut() {
        *group = sort_routes_by_wall(group, *wall);
    }
    groups
}
