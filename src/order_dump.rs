use crate::ir::{Positioned, RangeOrderSegment, Wall, wall_label};
use crate::order::{display_order, get_order_key, matched_segment};
use crate::walls::wall_segments;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct OrderDump {
    pub wall: String,
    pub segments: Vec<RangeOrderSegment>,
    pub routes: Vec<RouteDump>,
}

#[derive(Debug, Serialize)]
pub struct RouteDump {
    /// 1-based display position.
    pub position: usize,
    /// Index in the input list.
    pub index: usize,
    pub id: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub order: Option<f64>,
    pub key: f64,
    pub segment: Option<usize>,
}

impl OrderDump {
    pub fn from_routes<R: Positioned>(routes: &[R], wall: Option<Wall>) -> Self {
        let entries = display_order(routes, wall)
            .into_iter()
            .enumerate()
            .map(|(position, index)| {
                let route = &routes[index];
                RouteDump {
                    position: position + 1,
                    index,
                    id: route.id().map(str::to_string),
                    x: route.x(),
                    y: route.y(),
                    order: route.order(),
                    key: get_order_key(route, wall, index),
                    segment: matched_segment(route, wall),
                }
            })
            .collect();

        OrderDump {
            wall: wall_label(wall).to_string(),
            segments: wall_segments(wall).to_vec(),
            routes: entries,
        }
    }
}

pub fn write_order_dump(path: &Path, dump: &OrderDump) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, dump)?;
    Ok(())
}
