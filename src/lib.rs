#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod drawio;
pub mod expr;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod resolve;
pub mod theme;
pub mod writer;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use expr::{PeriodIndex, evaluate};
pub use ir::{ResolvedItem, ResolvedRoadmap, ResolvedSwimlane, RoadmapData, RoadmapItem, Swimlane, TimePeriod};
pub use layout::{RoadmapLayout, assign_rows, compute_layout};
pub use parser::parse_roadmap;
pub use render::render_svg;
pub use resolve::resolve;
pub use theme::Theme;

/// Everything a caller can tune for a one-shot render.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub palette: Vec<String>,
}

impl RenderOptions {
    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            ..Self::from(Config::default())
        }
    }

    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            ..Self::from(Config::default())
        }
    }

    pub fn with_period_width(mut self, width: f32) -> Self {
        self.layout.period_width = width;
        self
    }

    pub fn with_item_height(mut self, height: f32) -> Self {
        self.layout.item_height = height;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::modern()
    }
}

impl From<Config> for RenderOptions {
    fn from(config: Config) -> Self {
        Self {
            theme: config.theme,
            layout: config.layout,
            palette: config.palette,
        }
    }
}

/// Parses, resolves and lays out roadmap text.
pub fn layout_roadmap(text: &str, options: &RenderOptions) -> RoadmapLayout {
    let resolved = resolve(&parse_roadmap(text), Some(options.palette.as_slice()));
    compute_layout(&resolved, &options.theme, &options.layout)
}

pub fn render_roadmap_svg(text: &str, options: &RenderOptions) -> String {
    render_svg(&layout_roadmap(text, options), &options.theme)
}

pub fn render_roadmap_drawio(text: &str, options: &RenderOptions, compressed: bool) -> anyhow::Result<String> {
    drawio::render_drawio_file(&layout_roadmap(text, options), &options.theme, compressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_builders_override_layout() {
        let options = RenderOptions::classic()
            .with_period_width(90.0)
            .with_item_height(20.0);
        assert_eq!(options.layout.period_width, 90.0);
        assert_eq!(options.layout.item_height, 20.0);
        assert_eq!(options.theme.lane_alt_fill, Theme::classic().lane_alt_fill);
    }

    #[test]
    fn one_shot_render_produces_svg() {
        let svg = render_roadmap_svg("## Team\n- Ship", &RenderOptions::default());
        assert!(svg.contains("Ship"));
    }

    #[test]
    fn non_ascii_item_color_still_renders() {
        let text = "## Team\n- A | color: #a\u{e9}bcd";
        let svg = render_roadmap_svg(text, &RenderOptions::default());
        assert!(svg.contains("data-item-id=\"item-0\""));
        assert!(render_roadmap_drawio(text, &RenderOptions::default(), true).is_ok());
    }
}
