//! draw.io (mxGraph) export.
//!
//! Every cell reuses the rectangles from [`RoadmapLayout`], so an imported
//! diagram lines up with the SVG preview pixel for pixel.

use crate::layout::{Rect, RoadmapLayout};
use crate::render::escape_xml;
use crate::theme::{Theme, contrast_text_color};
use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::io::{Read, Write};

/// Characters JavaScript's `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const LAYER_ID: &str = "1";

pub fn render_drawio_xml(layout: &RoadmapLayout, theme: &Theme) -> String {
    let mut cells = String::new();

    if let Some(title) = &layout.title {
        cells.push_str(&vertex(
            "title",
            &title.text,
            &format!(
                "text;align=center;verticalAlign=middle;fontSize={};fontStyle=1;fontColor={};",
                theme.title_font_size, theme.title_color
            ),
            &title.rect,
        ));
    }

    for column in &layout.columns {
        cells.push_str(&vertex(
            &format!("period-{}", column.index),
            &column.label,
            &format!(
                "rounded=0;whiteSpace=wrap;fillColor={};strokeColor={};fontColor={};fontSize={};",
                theme.header_fill, theme.grid_color, theme.header_text_color, theme.font_size
            ),
            &column.rect,
        ));
    }

    for (idx, lane) in layout.swimlanes.iter().enumerate() {
        let fill = if idx % 2 == 0 {
            &theme.lane_fill
        } else {
            &theme.lane_alt_fill
        };
        cells.push_str(&vertex(
            &format!("{}-band", lane.id),
            "",
            &format!("rounded=0;fillColor={fill};strokeColor={};", theme.lane_border),
            &lane.rect,
        ));
        cells.push_str(&vertex(
            &format!("{}-label", lane.id),
            &lane.label,
            &format!(
                "text;align=left;verticalAlign=middle;spacingLeft=12;fontStyle=1;fontSize={};fontColor={};",
                theme.font_size, theme.lane_label_color
            ),
            &lane.label_rect,
        ));
    }

    for item in layout.items() {
        cells.push_str(&vertex(
            &item.id,
            &item.title,
            &format!(
                "rounded=1;whiteSpace=wrap;arcSize={};fillColor={};strokeColor=none;fontColor={};fontSize={};",
                theme.item_radius * 2.0,
                item.color,
                contrast_text_color(&item.color),
                theme.font_size
            ),
            &item.rect,
        ));
    }

    format!(
        "<mxGraphModel dx=\"0\" dy=\"0\" grid=\"1\" gridSize=\"10\" guides=\"1\" tooltips=\"1\" connect=\"1\" arrows=\"1\" fold=\"1\" page=\"1\" pageScale=\"1\" pageWidth=\"{}\" pageHeight=\"{}\" math=\"0\" shadow=\"0\"><root><mxCell id=\"0\"/><mxCell id=\"{LAYER_ID}\" parent=\"0\"/>{cells}</root></mxGraphModel>",
        fmt_num(layout.width),
        fmt_num(layout.height),
    )
}

/// Wraps the model in an `<mxfile>` document, optionally compressed.
pub fn render_drawio_file(layout: &RoadmapLayout, theme: &Theme, compressed: bool) -> Result<String> {
    let model = render_drawio_xml(layout, theme);
    let payload = if compressed {
        compress_diagram(&model)?
    } else {
        model
    };
    Ok(format!(
        "<mxfile host=\"roadmap-renderer\"><diagram id=\"roadmap\" name=\"Roadmap\">{payload}</diagram></mxfile>"
    ))
}

/// draw.io's interchange encoding: URI-component escape, raw deflate, base64.
pub fn compress_diagram(xml: &str) -> Result<String> {
    let encoded = utf8_percent_encode(xml, URI_COMPONENT).to_string();
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(encoded.as_bytes())?;
    let deflated = encoder.finish()?;
    Ok(BASE64_STANDARD.encode(deflated))
}

pub fn decompress_diagram(data: &str) -> Result<String> {
    let deflated = BASE64_STANDARD
        .decode(data.trim().as_bytes())
        .context("diagram payload is not valid base64")?;
    let mut encoded = String::new();
    DeflateDecoder::new(deflated.as_slice())
        .read_to_string(&mut encoded)
        .context("diagram payload is not raw deflate data")?;
    let xml = percent_decode_str(&encoded)
        .decode_utf8()
        .context("diagram payload is not valid UTF-8")?;
    Ok(xml.into_owned())
}

fn vertex(id: &str, value: &str, style: &str, rect: &Rect) -> String {
    format!(
        "<mxCell id=\"{}\" value=\"{}\" style=\"{}\" vertex=\"1\" parent=\"{LAYER_ID}\"><mxGeometry x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" as=\"geometry\"/></mxCell>",
        escape_xml(id),
        escape_xml(value),
        escape_xml(style),
        fmt_num(rect.x),
        fmt_num(rect.y),
        fmt_num(rect.width),
        fmt_num(rect.height),
    )
}

fn fmt_num(value: f32) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}
