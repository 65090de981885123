#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone)]
pub struct TitleLayout {
    pub text: String,
    pub rect: Rect,
}

/// Header cell of one period column.
#[derive(Debug, Clone)]
pub struct PeriodColumn {
    pub id: String,
    pub label: String,
    pub index: usize,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct ItemLayout {
    pub id: String,
    pub title: String,
    /// Title shortened to fit the rectangle.
    pub display_title: String,
    pub color: String,
    pub start_index: f64,
    pub end_index: f64,
    pub row: usize,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct SwimlaneLayout {
    pub id: String,
    pub label: String,
    pub row_count: usize,
    /// Whole band, label column included.
    pub rect: Rect,
    pub label_rect: Rect,
    pub items: Vec<ItemLayout>,
}

#[derive(Debug, Clone)]
pub struct RoadmapLayout {
    pub title: Option<TitleLayout>,
    pub columns: Vec<PeriodColumn>,
    pub swimlanes: Vec<SwimlaneLayout>,
    /// Left edge of the timeline area (after the label column).
    pub chart_x: f32,
    /// Top of the first swimlane (below the header row).
    pub chart_y: f32,
    pub chart_width: f32,
    pub header_rect: Rect,
    pub period_width: f32,
    pub width: f32,
    pub height: f32,
}

impl RoadmapLayout {
    pub fn items(&self) -> impl Iterator<Item = &ItemLayout> {
        self.swimlanes.iter().flat_map(|lane| lane.items.iter())
    }
}
