use crate::theme::{Theme, default_palette};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal pixels per timeline unit.
    pub period_width: f32,
    pub item_height: f32,
    /// Vertical gap between rows and around the first/last row.
    pub item_margin: f32,
    /// Inset subtracted from both horizontal edges of an item.
    pub item_inset: f32,
    pub header_height: f32,
    pub title_height: f32,
    /// Width of the swimlane label column.
    pub label_width: f32,
    pub swimlane_min_height: f32,
    pub padding: f32,
    pub min_item_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            period_width: 150.0,
            item_height: 32.0,
            item_margin: 8.0,
            item_inset: 4.0,
            header_height: 40.0,
            title_height: 48.0,
            label_width: 140.0,
            swimlane_min_height: 60.0,
            padding: 20.0,
            min_item_width: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub palette: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::modern(),
            layout: LayoutConfig::default(),
            palette: default_palette(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    title_font_size: Option<f32>,
    text_color: Option<String>,
    title_color: Option<String>,
    header_fill: Option<String>,
    header_text_color: Option<String>,
    grid_color: Option<String>,
    lane_fill: Option<String>,
    lane_alt_fill: Option<String>,
    lane_border: Option<String>,
    lane_label_color: Option<String>,
    item_radius: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    period_width: Option<f32>,
    item_height: Option<f32>,
    item_margin: Option<f32>,
    item_inset: Option<f32>,
    header_height: Option<f32>,
    title_height: Option<f32>,
    label_width: Option<f32>,
    swimlane_min_height: Option<f32>,
    padding: Option<f32>,
    min_item_width: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    palette: Option<Vec<String>>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a config document. Plain JSON first, then JSON5 so hand-written
/// files may carry comments and trailing commas.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|json5_err| {
            anyhow::anyhow!("invalid config: {json_err} (json5: {json5_err})")
        })?,
    };
    Ok(apply_config_file(Config::default(), parsed))
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> Config {
    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::from_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(theme = theme_name, "unknown theme, keeping default"),
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
        if let Some(v) = vars.title_font_size {
            theme.title_font_size = v;
        }
        if let Some(v) = vars.text_color {
            theme.text_color = v;
        }
        if let Some(v) = vars.title_color {
            theme.title_color = v;
        }
        if let Some(v) = vars.header_fill {
            theme.header_fill = v;
        }
        if let Some(v) = vars.header_text_color {
            theme.header_text_color = v;
        }
        if let Some(v) = vars.grid_color {
            theme.grid_color = v;
        }
        if let Some(v) = vars.lane_fill {
            theme.lane_fill = v;
        }
        if let Some(v) = vars.lane_alt_fill {
            theme.lane_alt_fill = v;
        }
        if let Some(v) = vars.lane_border {
            theme.lane_border = v;
        }
        if let Some(v) = vars.lane_label_color {
            theme.lane_label_color = v;
        }
        if let Some(v) = vars.item_radius {
            theme.item_radius = v;
        }
        if let Some(v) = vars.background {
            theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.period_width {
            target.period_width = v;
        }
        if let Some(v) = layout.item_height {
            target.item_height = v;
        }
        if let Some(v) = layout.item_margin {
            target.item_margin = v;
        }
        if let Some(v) = layout.item_inset {
            target.item_inset = v;
        }
        if let Some(v) = layout.header_height {
            target.header_height = v;
        }
        if let Some(v) = layout.title_height {
            target.title_height = v;
        }
        if let Some(v) = layout.label_width {
            target.label_width = v;
        }
        if let Some(v) = layout.swimlane_min_height {
            target.swimlane_min_height = v;
        }
        if let Some(v) = layout.padding {
            target.padding = v;
        }
        if let Some(v) = layout.min_item_width {
            target.min_item_width = v;
        }
    }

    if let Some(palette) = parsed.palette {
        let palette: Vec<String> = palette
            .into_iter()
            .map(|color| color.trim().to_string())
            .filter(|color| !color.is_empty())
            .collect();
        if !palette.is_empty() {
            config.palette = palette;
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::DEFAULT_PALETTE;

    #[test]
    fn missing_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout, LayoutConfig::default());
        assert_eq!(config.palette.len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn json_overrides_are_applied() {
        let config = parse_config(
            r##"{
                "theme": "classic",
                "themeVariables": { "fontSize": 18, "laneAltFill": "#eeeeee" },
                "layout": { "periodWidth": 200, "itemHeight": 24 },
                "palette": ["#111111", " ", "#222222"]
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.font_size, 18.0);
        assert_eq!(config.theme.lane_alt_fill, "#eeeeee");
        assert_eq!(config.theme.lane_border, Theme::classic().lane_border);
        assert_eq!(config.layout.period_width, 200.0);
        assert_eq!(config.layout.item_height, 24.0);
        assert_eq!(config.layout.item_margin, LayoutConfig::default().item_margin);
        assert_eq!(config.palette, vec!["#111111", "#222222"]);
    }

    #[test]
    fn json5_with_comments_is_accepted() {
        let config = parse_config(
            "{\n  // wider columns\n  layout: { periodWidth: 180, },\n}\n",
        )
        .unwrap();
        assert_eq!(config.layout.period_width, 180.0);
    }

    #[test]
    fn empty_palette_keeps_default() {
        let config = parse_config(r#"{ "palette": [] }"#).unwrap();
        assert_eq!(config.palette.len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn garbage_config_is_an_error() {
        assert!(parse_config("not a config").is_err());
    }
}
