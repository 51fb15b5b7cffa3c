use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub axis: Axis,
    pub direction: SortDirection,
}

impl OrderBy {
    pub const fn new(axis: Axis, direction: SortDirection) -> Self {
        Self { axis, direction }
    }
}

/// Closed interval `[min, max]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub axis: Axis,
    pub min: f64,
    pub max: f64,
}

/// Inclusive box on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AreaBounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RangeOrderSegment {
    Band { range: AxisRange, order_by: OrderBy },
    Area { area: AreaBounds, order_by: OrderBy },
}

impl RangeOrderSegment {
    pub const fn band(axis: Axis, min: f64, max: f64, order_by: OrderBy) -> Self {
        Self::Band {
            range: AxisRange { axis, min, max },
            order_by,
        }
    }

    pub const fn area(x_min: f64, x_max: f64, y_min: f64, y_max: f64, order_by: OrderBy) -> Self {
        Self::Area {
            area: AreaBounds {
                x_min,
                x_max,
                y_min,
                y_max,
            },
            order_by,
        }
    }

    pub fn order_by(&self) -> OrderBy {
        match self {
            Self::Band { order_by, .. } | Self::Area { order_by, .. } => *order_by,
        }
    }

    /// Bounds as `(x_min, x_max, y_min, y_max)`; a band spans `[0, axis_max]`
    /// on the axis it does not constrain.
    pub fn bounds(&self, axis_max: f64) -> (f64, f64, f64, f64) {
        match self {
            Self::Band { range, .. } => match range.axis {
                Axis::X => (range.min, range.max, 0.0, axis_max),
                Axis::Y => (0.0, axis_max, range.min, range.max),
            },
            Self::Area { area, .. } => (area.x_min, area.x_max, area.y_min, area.y_max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Wall {
    AbWall,
    BoulderSouth,
    RopeSouth,
    RopeNorthWest,
    RopeNorthEast,
    BoulderNorth,
    BoulderMiddle,
}

impl Wall {
    pub const ALL: [Wall; 7] = [
        Wall::AbWall,
        Wall::BoulderSouth,
        Wall::RopeSouth,
        Wall::RopeNorthWest,
        Wall::RopeNorthEast,
        Wall::BoulderNorth,
        Wall::BoulderMiddle,
    ];

    /// Identifier used by the route API.
    pub fn name(self) -> &'static str {
        match self {
            Self::AbWall => "ABWall",
            Self::BoulderSouth => "boulderSouth",
            Self::RopeSouth => "ropeSouth",
            Self::RopeNorthWest => "ropeNorthWest",
            Self::RopeNorthEast => "ropeNorthEast",
            Self::BoulderNorth => "boulderNorth",
            Self::BoulderMiddle => "boulderMiddle",
        }
    }
}

impl std::fmt::Display for Wall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for an optional wall, `"default"` when unset.
pub fn wall_label(wall: Option<Wall>) -> &'static str {
    wall.map(Wall::name).unwrap_or("default")
}

/// Read-only view of the fields ordering looks at.
pub trait Positioned {
    fn x(&self) -> Option<f64>;
    fn y(&self) -> Option<f64>;
    fn order(&self) -> Option<f64>;

    fn id(&self) -> Option<&str> {
        None
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn x(&self) -> Option<f64> {
        (**self).x()
    }

    fn y(&self) -> Option<f64> {
        (**self).y()
    }

    fn order(&self) -> Option<f64> {
        (**self).order()
    }

    fn id(&self) -> Option<&str> {
        (**self).id()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub order: Option<f64>,
}

impl RoutePosition {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn ordered(order: f64) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl Positioned for RoutePosition {
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
