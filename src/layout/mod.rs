mod rows;
mod text;
pub(crate) mod types;
pub use rows::{RowAssignment, assign_rows, assign_rows_by};
pub use text::{fit_text, text_width};
pub use types::*;

use crate::config::LayoutConfig;
use crate::ir::{ResolvedRoadmap, ResolvedSwimlane};
use crate::theme::Theme;

// Horizontal room kept free around an item's title.
const ITEM_TEXT_PAD_X: f32 = 8.0;

/// Turns a resolved roadmap into pixel geometry. Every renderer draws from
/// this, so the SVG and the diagram export always agree.
pub fn compute_layout(roadmap: &ResolvedRoadmap, theme: &Theme, config: &LayoutConfig) -> RoadmapLayout {
    let padding = config.padding.max(0.0);
    let period_width = config.period_width.max(1.0);
    let label_width = config.label_width.max(0.0);

    // Items past the last declared period widen the chart instead of being
    // clipped.
    let furthest_end = roadmap
        .items()
        .map(|item| item.end_index)
        .fold(0.0_f64, f64::max);
    let span_units = (roadmap.periods.len() as f64).max(furthest_end.ceil()).max(1.0) as f32;
    let chart_width = span_units * period_width;
    let chart_x = padding + label_width;
    let width = chart_x + chart_width + padding;

    let mut y = padding;
    let title = roadmap.title.as_ref().map(|text| {
        let rect = Rect {
            x: padding,
            y,
            width: width - padding * 2.0,
            height: config.title_height,
        };
        y += config.title_height;
        TitleLayout {
            text: text.clone(),
            rect,
        }
    });

    let header_rect = Rect {
        x: chart_x,
        y,
        width: chart_width,
        height: config.header_height,
    };
    let columns = roadmap
        .periods
        .iter()
        .map(|period| PeriodColumn {
            id: period.id.clone(),
            label: period.label.clone(),
            index: period.index,
            rect: Rect {
                x: chart_x + period.index as f32 * period_width,
                y,
                width: period_width,
                height: config.header_height,
            },
        })
        .collect();
    let chart_y = y + config.header_height;

    let mut lane_y = chart_y;
    let mut swimlanes = Vec::with_capacity(roadmap.swimlanes.len());
    for lane in &roadmap.swimlanes {
        let lane_layout = layout_swimlane(lane, lane_y, chart_x, padding, chart_width, theme, config);
        lane_y += lane_layout.rect.height;
        swimlanes.push(lane_layout);
    }
    let height = lane_y + padding;

    tracing::debug!(
        periods = roadmap.periods.len(),
        swimlanes = swimlanes.len(),
        width,
        height,
        "computed roadmap layout"
    );

    RoadmapLayout {
        title,
        columns,
        swimlanes,
        chart_x,
        chart_y,
        chart_width,
        header_rect,
        period_width,
        width,
        height,
    }
}

/// `max(min, rows * (item_height + margin) + margin)`.
pub fn swimlane_height(row_count: usize, config: &LayoutConfig) -> f32 {
    let packed = row_count as f32 * (config.item_height + config.item_margin) + config.item_margin;
    packed.max(config.swimlane_min_height)
}

fn layout_swimlane(
    lane: &ResolvedSwimlane,
    lane_y: f32,
    chart_x: f32,
    padding: f32,
    chart_width: f32,
    theme: &Theme,
    config: &LayoutConfig,
) -> SwimlaneLayout {
    let period_width = config.period_width.max(1.0);
    let assignment = assign_rows_by(&lane.items, |item| (item.start_index, item.end_index));
    let height = swimlane_height(assignment.row_count, config);

    let items = lane
        .items
        .iter()
        .zip(&assignment.rows)
        .map(|(item, &row)| {
            let span = (item.end_index - item.start_index) as f32;
            let width = (span * period_width - config.item_inset * 2.0).max(config.min_item_width);
            let rect = Rect {
                x: chart_x + item.start_index as f32 * period_width + config.item_inset,
                y: lane_y + config.item_margin + row as f32 * (config.item_height + config.item_margin),
                width,
                height: config.item_height,
            };
            ItemLayout {
                id: item.id.clone(),
                title: item.title.clone(),
                display_title: fit_text(&item.title, width - ITEM_TEXT_PAD_X * 2.0, theme.font_size),
                color: item.color.clone(),
                start_index: item.start_index,
                end_index: item.end_index,
                row,
                rect,
            }
        })
        .collect();

    SwimlaneLayout {
        id: lane.id.clone(),
        label: lane.label.clone(),
        row_count: assignment.row_count,
        rect: Rect {
            x: padding,
            y: lane_y,
            width: chart_x - padding + chart_width,
            height,
        },
        label_rect: Rect {
            x: padding,
            y: lane_y,
            width: chart_x - padding,
            height,
        },
        items,
    }
}
