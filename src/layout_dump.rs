use crate::layout::{Rect, RoadmapLayout};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub title: Option<String>,
    pub width: f32,
    pub height: f32,
    pub chart_x: f32,
    pub chart_y: f32,
    pub period_width: f32,
    pub periods: Vec<PeriodDump>,
    pub swimlanes: Vec<SwimlaneDump>,
}

#[derive(Debug, Serialize)]
pub struct PeriodDump {
    pub id: String,
    pub label: String,
    pub index: usize,
    pub rect: [f32; 4],
}

#[derive(Debug, Serialize)]
pub struct SwimlaneDump {
    pub id: String,
    pub label: String,
    pub row_count: usize,
    pub rect: [f32; 4],
    pub items: Vec<ItemDump>,
}

#[derive(Debug, Serialize)]
pub struct ItemDump {
    pub id: String,
    pub title: String,
    pub color: String,
    pub start_index: f64,
    pub end_index: f64,
    pub row: usize,
    pub rect: [f32; 4],
}

fn rect_array(rect: &Rect) -> [f32; 4] {
    [rect.x, rect.y, rect.width, rect.height]
}

impl LayoutDump {
    pub fn from_layout(layout: &RoadmapLayout) -> Self {
        let periods = layout
            .columns
            .iter()
            .map(|column| PeriodDump {
                id: column.id.clone(),
                label: column.label.clone(),
                index: column.index,
                rect: rect_array(&column.rect),
            })
            .collect();

        let swimlanes = layout
            .swimlanes
            .iter()
            .map(|lane| SwimlaneDump {
                id: lane.id.clone(),
                label: lane.label.clone(),
                row_count: lane.row_count,
                rect: rect_array(&lane.rect),
                items: lane
                    .items
                    .iter()
                    .map(|item| ItemDump {
                        id: item.id.clone(),
                        title: item.title.clone(),
                        color: item.color.clone(),
                        start_index: item.start_index,
                        end_index: item.end_index,
                        row: item.row,
                        rect: rect_array(&item.rect),
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: layout.title.as_ref().map(|title| title.text.clone()),
            width: layout.width,
            height: layout.height,
            chart_x: layout.chart_x,
            chart_y: layout.chart_y,
            period_width: layout.period_width,
            periods,
            swimlanes,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
