use crate::config::RenderConfig;
use crate::ir::{Positioned, RangeOrderSegment, SortDirection, Wall, wall_label};
use crate::order::{AXIS_MAX, display_order, get_order_key, matched_segment};
use crate::theme::Theme;
use crate::walls::{WallRule, wall_rule};
use anyhow::Result;
use std::path::Path;

const FOOTER_LINE_HEIGHT: f32 = 14.0;

/// Calibration map: the wall's segments in priority order with every route
/// numbered by its display position.
pub fn render_wall_svg<R: Positioned>(
    routes: &[R],
    wall: Option<Wall>,
    theme: &Theme,
    config: &RenderConfig,
) -> String {
    let order = display_order(routes, wall);
    let unplaced: Vec<(usize, usize)> = order
        .iter()
        .enumerate()
        .filter(|(_, idx)| !has_point(&routes[**idx]))
        .map(|(position, idx)| (position + 1, *idx))
        .collect();

    let pad = config.padding.max(0.0);
    let map_size = AXIS_MAX as f32;
    let footer = if unplaced.is_empty() {
        0.0
    } else {
        (unplaced.len() as f32 + 1.0) * FOOTER_LINE_HEIGHT + pad
    };
    let view_w = map_size + pad * 2.0;
    let view_h = map_size + pad * 2.0 + footer;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"{:.2} {:.2} {view_w:.2} {view_h:.2}\">",
        config.width, config.height, -pad, -pad,
    ));
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        -pad, -pad, theme.background
    ));
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{map_size}\" height=\"{map_size}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.2\"/>",
        theme.map_border
    ));
    svg.push_str(&text_svg(
        0.0,
        -pad / 2.0 + theme.font_size / 2.0,
        &format!("wall: {}", wall_label(wall)),
        theme.font_size,
        &theme.text_color,
        "start",
        theme,
    ));

    match wall_rule(wall) {
        WallRule::Segments(segments) if config.show_segments => {
            for (idx, segment) in segments.iter().enumerate() {
                svg.push_str(&segment_svg(idx, segment, theme));
            }
        }
        WallRule::Segments(_) => {}
        WallRule::AxisX => svg.push_str(&rule_note_svg("ordered by x", theme)),
        WallRule::Fallback => svg.push_str(&rule_note_svg("ordered by y desc, then x", theme)),
    }

    let segmented = matches!(wall_rule(wall), WallRule::Segments(_));
    for (position, idx) in order.iter().enumerate() {
        let route = &routes[*idx];
        let (Some(x), Some(y)) = (finite(route.x()), finite(route.y())) else {
            continue;
        };
        let (x, y) = (x as f32, y as f32);
        let fill = if segmented && matched_segment(route, wall).is_none() {
            theme.unmatched_fill.as_str()
        } else {
            theme.route_fill.as_str()
        };
        svg.push_str(&format!(
            "<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{:.2}\" fill=\"{fill}\" stroke=\"{}\" stroke-width=\"1\"/>",
            config.route_radius, theme.route_stroke
        ));
        svg.push_str(&text_svg(
            x,
            y + theme.font_size * 0.35,
            &(position + 1).to_string(),
            theme.font_size,
            &theme.route_label_color,
            "middle",
            theme,
        ));
        if config.show_keys {
            let key = get_order_key(route, wall, *idx);
            svg.push_str(&text_svg(
                x,
                y + config.route_radius + theme.font_size,
                &format!("{key}"),
                theme.font_size * 0.7,
                &theme.text_color,
                "middle",
                theme,
            ));
        }
    }

    if !unplaced.is_empty() {
        let mut line_y = map_size + pad + FOOTER_LINE_HEIGHT;
        svg.push_str(&text_svg(
            0.0,
            line_y,
            "without coordinates:",
            theme.font_size,
            &theme.text_color,
            "start",
            theme,
        ));
        for (position, idx) in &unplaced {
            line_y += FOOTER_LINE_HEIGHT;
            let route = &routes[*idx];
            let label = match (route.id(), finite(route.order())) {
                (Some(id), Some(order)) => format!("{position}. {id} (order {order})"),
                (Some(id), None) => format!("{position}. {id}"),
                (None, Some(order)) => format!("{position}. #{idx} (order {order})"),
                (None, None) => format!("{position}. #{idx}"),
            };
            svg.push_str(&text_svg(
                0.0,
                line_y,
                &label,
                theme.font_size,
                &theme.text_color,
                "start",
                theme,
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn has_point<R: Positioned>(route: &R) -> bool {
    finite(route.x()).is_some() && finite(route.y()).is_some()
}

fn segment_svg(idx: usize, segment: &RangeOrderSegment, theme: &Theme) -> String {
    let (x_min, x_max, y_min, y_max) = segment.bounds(AXIS_MAX);
    let order_by = segment.order_by();
    let arrow = match order_by.direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    };
    let mut out = format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" fill-opacity=\"0.7\" stroke=\"{}\" stroke-dasharray=\"6 4\" stroke-width=\"0.8\"/>",
        x_min,
        y_min,
        x_max - x_min,
        y_max - y_min,
        theme.segment_fill(idx),
        theme.segment_stroke
    );
    out.push_str(&text_svg(
        x_min as f32 + 4.0,
        y_min as f32 + theme.font_size + 2.0,
        &format!("{}: {} {}", idx + 1, order_by.axis.as_str(), arrow),
        theme.font_size * 0.85,
        &theme.segment_label_color,
        "start",
        theme,
    ));
    out
}

fn rule_note_svg(note: &str, theme: &Theme) -> String {
    text_svg(
        4.0,
        theme.font_size + 2.0,
        note,
        theme.font_size * 0.85,
        &theme.segment_label_color,
        "start",
        theme,
    )
}

fn text_svg(
    x: f32,
    y: f32,
    text: &str,
    font_size: f32,
    fill: &str,
    anchor: &str,
    theme: &Theme,
) -> String {
    format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{font_size}\" fill=\"{fill}\">{}</text>",
        escape_xml(&theme.font_family),
        escape_xml(text)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    if let Some(size) = usvg::Size::from_wh(render_cfg.width, render_cfg.height) {
        opt.default_size = size;
    }

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
