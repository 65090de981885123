use crate::layout::{ItemLayout, RoadmapLayout};
use crate::theme::{Theme, contrast_text_color};
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &RoadmapLayout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.width.max(1.0);
    let height = layout.height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&theme.background)
    ));

    if let Some(title) = &layout.title {
        let (cx, cy) = title.rect.center();
        svg.push_str(&format!(
            "<text x=\"{cx:.2}\" y=\"{cy:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            escape_xml(&theme.font_family),
            theme.title_font_size,
            escape_xml(&theme.title_color),
            escape_xml(&title.text)
        ));
    }

    // Swimlane bands first so grid lines and items draw on top.
    for (idx, lane) in layout.swimlanes.iter().enumerate() {
        let fill = if idx % 2 == 0 {
            &theme.lane_fill
        } else {
            &theme.lane_alt_fill
        };
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
            lane.rect.x,
            lane.rect.y,
            lane.rect.width,
            lane.rect.height,
            escape_xml(fill),
            escape_xml(&theme.lane_border)
        ));
        let (_, cy) = lane.label_rect.center();
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{cy:.2}\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" font-weight=\"600\" fill=\"{}\">{}</text>",
            lane.label_rect.x + 12.0,
            escape_xml(&theme.font_family),
            theme.font_size,
            escape_xml(&theme.lane_label_color),
            escape_xml(&lane.label)
        ));
    }

    let header = &layout.header_rect;
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
        header.x,
        header.y,
        header.width,
        header.height,
        escape_xml(&theme.header_fill)
    ));
    let grid_bottom = layout
        .swimlanes
        .last()
        .map(|lane| lane.rect.bottom())
        .unwrap_or(layout.chart_y);
    for column in &layout.columns {
        let (cx, cy) = column.rect.center();
        svg.push_str(&format!(
            "<text x=\"{cx:.2}\" y=\"{cy:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            escape_xml(&theme.font_family),
            theme.font_size,
            escape_xml(&theme.header_text_color),
            escape_xml(&column.label)
        ));
        svg.push_str(&format!(
            "<line x1=\"{x:.2}\" y1=\"{:.2}\" x2=\"{x:.2}\" y2=\"{grid_bottom:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
            column.rect.y,
            escape_xml(&theme.grid_color),
            x = column.rect.x,
        ));
    }

    for item in layout.items() {
        svg.push_str(&item_svg(item, theme));
    }

    svg.push_str("</svg>");
    svg
}

fn item_svg(item: &ItemLayout, theme: &Theme) -> String {
    let rect = &item.rect;
    let mut out = format!(
        "<g data-item-id=\"{}\"><title>{}</title>",
        escape_xml(&item.id),
        escape_xml(&item.title)
    );
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\"/>",
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        escape_xml(&item.color),
        r = theme.item_radius,
    ));
    if !item.display_title.is_empty() {
        let (cx, cy) = rect.center();
        out.push_str(&format!(
            "<text x=\"{cx:.2}\" y=\"{cy:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            escape_xml(&theme.font_family),
            theme.font_size,
            contrast_text_color(&item.color),
            escape_xml(&item.display_title)
        ));
    }
    out.push_str("</g>");
    out
}

pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::compute_layout;
    use crate::parser::parse_roadmap;
    use crate::resolve::resolve;

    fn svg_of(input: &str) -> String {
        let theme = Theme::modern();
        let resolved = resolve(&parse_roadmap(input), None);
        let layout = compute_layout(&resolved, &theme, &LayoutConfig::default());
        render_svg(&layout, &theme)
    }

    #[test]
    fn render_svg_basic() {
        let svg = svg_of("# Plan\n## Periods\nQ1, Q2\n## Core\n- Alpha | start: Q1 | end: Q2 | color: #ff0000");
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Plan"));
        assert!(svg.contains("Core"));
        assert!(svg.contains("Alpha"));
        assert!(svg.contains("fill=\"#ff0000\""));
        assert!(svg.contains("data-item-id=\"item-0\""));
    }

    #[test]
    fn render_escapes_text() {
        let svg = svg_of("## R&D <core>\n- Ship \"v2\" & more");
        assert!(svg.contains("R&amp;D &lt;core&gt;"));
        assert!(svg.contains("Ship &quot;v2&quot; &amp; more"));
        assert!(!svg.contains("<core>"));
    }

    #[test]
    fn render_empty_document() {
        let svg = svg_of("");
        assert!(svg.contains("Q1"));
        assert!(svg.contains("Q4"));
    }
}
