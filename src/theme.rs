use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub map_border: String,
    /// Fill colors cycled across segments in priority order.
    pub segment_fills: Vec<String>,
    pub segment_stroke: String,
    pub segment_label_color: String,
    pub route_fill: String,
    pub route_stroke: String,
    pub route_label_color: String,
    pub unmatched_fill: String,
    pub text_color: String,
}

impl Theme {
    pub fn gym() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            background: "#FFFFFF".to_string(),
            map_border: "#C7D2E5".to_string(),
            segment_fills: vec![
                "#E3F2FD".to_string(),
                "#FFF3E0".to_string(),
                "#E8F5E9".to_string(),
                "#F3E5F5".to_string(),
            ],
            segment_stroke: "#7A8AA6".to_string(),
            segment_label_color: "#4A5568".to_string(),
            route_fill: "#1E6FD9".to_string(),
            route_stroke: "#FFFFFF".to_string(),
            route_label_color: "#FFFFFF".to_string(),
            unmatched_fill: "#D64545".to_string(),
            text_color: "#1C2430".to_string(),
        }
    }

    pub fn mono() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 11.0,
            background: "#FFFFFF".to_string(),
            map_border: "#333333".to_string(),
            segment_fills: vec!["#F4F4F4".to_string(), "#E6E6E6".to_string()],
            segment_stroke: "#999999".to_string(),
            segment_label_color: "#555555".to_string(),
            route_fill: "#333333".to_string(),
            route_stroke: "#FFFFFF".to_string(),
            route_label_color: "#FFFFFF".to_string(),
            unmatched_fill: "#888888".to_string(),
            text_color: "#333333".to_string(),
        }
    }

    pub fn segment_fill(&self, idx: usize) -> &str {
        if self.segment_fills.is_empty() {
            return self.background.as_str();
        }
        self.segment_fills[idx % self.segment_fills.len()].as_str()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::gym()
    }
}
