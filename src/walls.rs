use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::ir::{Axis, OrderBy, RangeOrderSegment, SortDirection, Wall};

const X_ASC: OrderBy = OrderBy::new(Axis::X, SortDirection::Asc);
const X_DESC: OrderBy = OrderBy::new(Axis::X, SortDirection::Desc);
const Y_ASC: OrderBy = OrderBy::new(Axis::Y, SortDirection::Asc);
const Y_DESC: OrderBy = OrderBy::new(Axis::Y, SortDirection::Desc);

// Straight wall drawn as a vertical line: read from the bottom of the map up.
static AB_WALL: [RangeOrderSegment; 1] = [RangeOrderSegment::band(Axis::Y, 0.0, 500.0, Y_DESC)];

// U-shaped boulder: short south end, long spine, short north end.
static BOULDER_SOUTH: [RangeOrderSegment; 3] = [
    RangeOrderSegment::band(Axis::Y, 0.0, 96.0, X_DESC),
    RangeOrderSegment::band(Axis::Y, 96.0, 402.0, Y_ASC),
    RangeOrderSegment::band(Axis::Y, 402.0, 500.0, X_DESC),
];

static ROPE_SOUTH: [RangeOrderSegment; 2] = [
    RangeOrderSegment::band(Axis::Y, 0.0, 262.0, X_ASC),
    RangeOrderSegment::band(Axis::Y, 262.0, 500.0, Y_ASC),
];

static ROPE_NORTH_EAST: [RangeOrderSegment; 3] = [
    RangeOrderSegment::band(Axis::Y, 0.0, 148.0, Y_ASC),
    RangeOrderSegment::band(Axis::Y, 148.0, 337.0, X_DESC),
    RangeOrderSegment::band(Axis::Y, 337.0, 500.0, Y_ASC),
];

static BOULDER_NORTH: [RangeOrderSegment; 2] = [
    RangeOrderSegment::band(Axis::Y, 0.0, 205.0, X_DESC),
    RangeOrderSegment::band(Axis::Y, 205.0, 500.0, X_ASC),
];

// Free-standing block walked clockwise from the north-west corner.
static BOULDER_MIDDLE: [RangeOrderSegment; 4] = [
    RangeOrderSegment::area(0.0, 212.0, 0.0, 238.0, X_ASC),
    RangeOrderSegment::area(212.0, 500.0, 0.0, 238.0, Y_ASC),
    RangeOrderSegment::area(212.0, 500.0, 238.0, 500.0, X_DESC),
    RangeOrderSegment::area(0.0, 212.0, 238.0, 500.0, Y_DESC),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WallRule {
    /// First matching segment wins.
    Segments(&'static [RangeOrderSegment]),
    /// Key is the raw `x` coordinate.
    AxisX,
    /// Key is `-y * 1000 + x`.
    Fallback,
}

pub fn wall_rule(wall: Option<Wall>) -> WallRule {
    let Some(wall) = wall else {
        return WallRule::Fallback;
    };
    match wall {
        Wall::AbWall => WallRule::Segments(&AB_WALL),
        Wall::BoulderSouth => WallRule::Segments(&BOULDER_SOUTH),
        Wall::RopeSouth => WallRule::Segments(&ROPE_SOUTH),
        Wall::RopeNorthWest => WallRule::AxisX,
        Wall::RopeNorthEast => WallRule::Segments(&ROPE_NORTH_EAST),
        Wall::BoulderNorth => WallRule::Segments(&BOULDER_NORTH),
        Wall::BoulderMiddle => WallRule::Segments(&BOULDER_MIDDLE),
    }
}

/// Segment table of a wall, empty for walls that are not segmented.
pub fn wall_segments(wall: Option<Wall>) -> &'static [RangeOrderSegment] {
    match wall_rule(wall) {
        WallRule::Segments(segments) => segments,
        WallRule::AxisX | WallRule::Fallback => &[],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown wall `{0}`")]
pub struct UnknownWall(pub String);

static WALL_INDEX: Lazy<HashMap<String, Wall>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for wall in Wall::ALL {
        index.insert(normalize_wall_name(wall.name()), wall);
    }
    index.insert("ab".to_string(), Wall::AbWall);
    index
});

fn normalize_wall_name(name: &str) -> String {
    name.chars()
        .filter(|ch| !matches!(ch, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_default_name(normalized: &str) -> bool {
    matches!(normalized, "" | "default" | "none")
}

impl Wall {
    /// Lenient lookup: accepts the API name in any case, with or without
    /// `-`, `_` or spaces.
    pub fn from_name(name: &str) -> Option<Self> {
        WALL_INDEX.get(&normalize_wall_name(name.trim())).copied()
    }
}

impl FromStr for Wall {
    type Err = UnknownWall;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownWall(s.to_string()))
    }
}

/// Strict lookup that also understands the default wall (`default`, `none`
/// or empty) as `None`.
pub fn parse_wall(name: &str) -> Result<Option<Wall>, UnknownWall> {
    let normalized = normalize_wall_name(name.trim());
    if is_default_name(&normalized) {
        return Ok(None);
    }
    WALL_INDEX
        .get(&normalized)
        .copied()
        .map(Some)
        .ok_or_else(|| UnknownWall(name.to_string()))
}
