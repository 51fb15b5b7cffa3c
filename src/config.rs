use crate::ir::Wall;
use crate::theme::Theme;
use crate::walls::parse_wall;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Output size in pixels; the map itself is drawn in viewBox units.
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub route_radius: f32,
    pub show_segments: bool,
    pub show_keys: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            padding: 24.0,
            route_radius: 9.0,
            show_segments: true,
            show_keys: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderConfig {
    /// Wall used when neither the command line nor the document names one.
    pub default_wall: Option<Option<Wall>>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub render: RenderConfig,
    pub order: OrderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    map_border: Option<String>,
    segment_fills: Option<Vec<String>>,
    segment_stroke: Option<String>,
    segment_label_color: Option<String>,
    route_fill: Option<String>,
    route_stroke: Option<String>,
    route_label_color: Option<String>,
    unmatched_fill: Option<String>,
    text_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    route_radius: Option<f32>,
    show_segments: Option<bool>,
    show_keys: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderConfigFile {
    default_wall: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    render: Option<RenderConfigFile>,
    order: Option<OrderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "gym" | "default" => config.theme = Theme::gym(),
            "mono" => config.theme = Theme::mono(),
            other => anyhow::bail!("unknown theme `{other}`"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            theme.font_size = v;
        }
        if let Some(v) = vars.background {
            theme.background = v;
        }
        if let Some(v) = vars.map_border {
            theme.map_border = v;
        }
        if let Some(v) = vars.segment_fills {
            theme.segment_fills = v;
        }
        if let Some(v) = vars.segment_stroke {
            theme.segment_stroke = v;
        }
        if let Some(v) = vars.segment_label_color {
            theme.segment_label_color = v;
        }
        if let Some(v) = vars.route_fill {
            theme.route_fill = v;
        }
        if let Some(v) = vars.route_stroke {
            theme.route_stroke = v;
        }
        if let Some(v) = vars.route_label_color {
            theme.route_label_color = v;
        }
        if let Some(v) = vars.unmatched_fill {
            theme.unmatched_fill = v;
        }
        if let Some(v) = vars.text_color {
            theme.text_color = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
        if let Some(v) = render.route_radius {
            config.render.route_radius = v;
        }
        if let Some(v) = render.show_segments {
            config.render.show_segments = v;
        }
        if let Some(v) = render.show_keys {
            config.render.show_keys = v;
        }
    }

    if let Some(order) = parsed.order {
        if let Some(name) = order.default_wall.as_deref() {
            config.order.default_wall = Some(parse_wall(name)?);
        }
    }

    Ok(config)
}
