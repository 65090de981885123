use crate::expr::{PeriodIndex, evaluate};
use crate::ir::{ResolvedItem, ResolvedRoadmap, ResolvedSwimlane, RoadmapData, RoadmapItem};
use crate::theme::DEFAULT_PALETTE;

/// Timeline positions are clamped to `±MAX_INDEX` so `start + 1` is always
/// representable and always greater than `start`.
pub const MAX_INDEX: f64 = 1.0e6;

/// Evaluates every item expression and assigns colors.
///
/// Colors without an explicit value come from `palette` (or the built-in
/// palette when `None` or empty), indexed by a counter that runs across the
/// whole document in order, not per swimlane.
pub fn resolve(doc: &RoadmapData, palette: Option<&[String]>) -> ResolvedRoadmap {
    let periods = PeriodIndex::from_periods(&doc.periods);
    tracing::debug!(
        periods = doc.periods.len(),
        swimlanes = doc.swimlanes.len(),
        items = doc.item_count(),
        "resolving roadmap"
    );
    let palette: Vec<&str> = match palette {
        Some(custom) if !custom.is_empty() => custom.iter().map(String::as_str).collect(),
        _ => DEFAULT_PALETTE.to_vec(),
    };

    let mut color_counter = 0usize;
    let swimlanes = doc
        .swimlanes
        .iter()
        .map(|lane| ResolvedSwimlane {
            id: lane.id.clone(),
            label: lane.label.clone(),
            items: lane
                .items
                .iter()
                .map(|item| {
                    let fallback = palette[color_counter % palette.len()];
                    color_counter += 1;
                    resolve_item(item, &periods, fallback)
                })
                .collect(),
        })
        .collect();

    ResolvedRoadmap {
        title: doc.title.clone(),
        periods: doc.periods.clone(),
        swimlanes,
    }
}

fn resolve_item(item: &RoadmapItem, periods: &PeriodIndex, fallback_color: &str) -> ResolvedItem {
    let start_index = clamp_index(evaluate(&item.start, periods));
    let mut end_index = clamp_index(if let Some(end) = item.end.as_deref() {
        evaluate(end, periods)
    } else if let Some(length) = item.length.as_deref() {
        start_index + evaluate(length, periods)
    } else {
        start_index + 1.0
    });
    // Also catches a NaN end.
    if end_index.partial_cmp(&start_index) != Some(std::cmp::Ordering::Greater) {
        tracing::debug!(id = %item.id, start_index, end_index, "degenerate interval widened to 1");
        end_index = start_index + 1.0;
    }

    let color = item
        .color
        .as_deref()
        .map(str::trim)
        .filter(|color| !color.is_empty())
        .unwrap_or(fallback_color)
        .to_string();

    ResolvedItem {
        id: item.id.clone(),
        title: item.title.clone(),
        start_index,
        end_index,
        swimlane: item.swimlane.clone(),
        color,
    }
}

fn clamp_index(value: f64) -> f64 {
    value.clamp(-MAX_INDEX, MAX_INDEX)
}
