use serde::{Deserialize, Serialize};

pub const DEFAULT_SWIMLANE_ID: &str = "swimlane-default";
pub const DEFAULT_SWIMLANE_LABEL: &str = "Default";

/// One unit of the timeline axis. `index` is the 0-based declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriod {
    pub id: String,
    pub label: String,
    pub index: usize,
}

impl TimePeriod {
    pub fn new(label: &str, index: usize) -> Self {
        Self {
            id: period_id(label),
            label: label.to_string(),
            index,
        }
    }
}

/// Collapses whitespace runs to `_` so the id is usable as a single token.
pub fn period_id(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join("_")
}

/// An item as written in the source text. Expressions are not evaluated yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapItem {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub length: Option<String>,
    pub swimlane: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swimlane {
    pub id: String,
    pub label: String,
    pub items: Vec<RoadmapItem>,
}

impl Swimlane {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapData {
    pub title: Option<String>,
    pub periods: Vec<TimePeriod>,
    pub swimlanes: Vec<Swimlane>,
}

impl RoadmapData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_count(&self) -> usize {
        self.swimlanes.iter().map(|lane| lane.items.len()).sum()
    }

    /// Reassigns an item to another swimlane, appending it there.
    /// Returns `false` when either the item or the target lane is unknown.
    pub fn move_item(&mut self, item_id: &str, lane_id: &str) -> bool {
        let Some(target) = self.swimlanes.iter().position(|lane| lane.id == lane_id) else {
            return false;
        };
        let mut found = None;
        for (lane_idx, lane) in self.swimlanes.iter().enumerate() {
            if let Some(item_idx) = lane.items.iter().position(|item| item.id == item_id) {
                found = Some((lane_idx, item_idx));
                break;
            }
        }
        let Some((lane_idx, item_idx)) = found else {
            return false;
        };
        if lane_idx == target {
            return true;
        }
        let mut item = self.swimlanes[lane_idx].items.remove(item_idx);
        item.swimlane = lane_id.to_string();
        self.swimlanes[target].items.push(item);
        true
    }
}

/// An item with numeric geometry. `end_index > start_index` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedItem {
    pub id: String,
    pub title: String,
    pub start_index: f64,
    pub end_index: f64,
    pub swimlane: String,
    pub color: String,
}

impl ResolvedItem {
    pub fn span(&self) -> f64 {
        self.end_index - self.start_index
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSwimlane {
    pub id: String,
    pub label: String,
    pub items: Vec<ResolvedItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRoadmap {
    pub title: Option<String>,
    pub periods: Vec<TimePeriod>,
    pub swimlanes: Vec<ResolvedSwimlane>,
}

impl ResolvedRoadmap {
    pub fn items(&self) -> impl Iterator<Item = &ResolvedItem> {
        self.swimlanes.iter().flat_map(|lane| lane.items.iter())
    }
}
