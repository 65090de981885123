use roadmap_renderer::{RenderOptions, render_roadmap_drawio, render_roadmap_svg};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoadmapRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    period_width: Option<f32>,
    item_height: Option<f32>,
    palette: Option<Vec<String>>,
    compressed: Option<bool>,
}

fn parse_options(options_json: Option<String>) -> Result<RoadmapRenderOptions, JsValue> {
    match options_json {
        Some(raw_options) => serde_json::from_str::<RoadmapRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(RoadmapRenderOptions::default()),
    }
}

fn build_render_options(options: &RoadmapRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("classic") {
        RenderOptions::classic()
    } else {
        RenderOptions::modern()
    };

    if let Some(font_family) = &options.font_family {
        render_options.theme.font_family = font_family.clone();
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(width) = options.period_width {
        render_options.layout.period_width = width;
    }
    if let Some(height) = options.item_height {
        render_options.layout.item_height = height;
    }
    if let Some(palette) = &options.palette {
        if !palette.is_empty() {
            render_options.palette = palette.clone();
        }
    }

    render_options
}

#[wasm_bindgen(js_name = render_roadmap_svg)]
pub fn render_roadmap_svg_js(code: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = parse_options(options_json)?;
    Ok(render_roadmap_svg(code, &build_render_options(&options)))
}

#[wasm_bindgen(js_name = render_roadmap_drawio)]
pub fn render_roadmap_drawio_js(code: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = parse_options(options_json)?;
    let compressed = options.compressed.unwrap_or(true);
    render_roadmap_drawio(code, &build_render_options(&options), compressed)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
