use crate::ir::{
    DEFAULT_SWIMLANE_ID, DEFAULT_SWIMLANE_LABEL, RoadmapData, RoadmapItem, Swimlane, TimePeriod,
};
use once_cell::sync::Lazy;
use regex::Regex;

static LANE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:swimlane|team|lane):(?P<label>.*)$").unwrap());

const DEFAULT_PERIODS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Periods,
    Swimlane,
}

struct ParseState {
    doc: RoadmapData,
    section: Section,
    current_lane: Option<usize>,
    next_item: usize,
    next_lane: usize,
}

impl ParseState {
    fn new() -> Self {
        Self {
            doc: RoadmapData::new(),
            section: Section::None,
            current_lane: None,
            next_item: 0,
            next_lane: 0,
        }
    }

    fn open_section(&mut self, header: &str) {
        let lower = header.to_ascii_lowercase();
        if matches!(lower.as_str(), "periods" | "time periods" | "timeline") {
            self.section = Section::Periods;
            self.current_lane = None;
            return;
        }
        let label = LANE_PREFIX_RE
            .captures(header)
            .and_then(|caps| caps.name("label"))
            .map(|m| m.as_str().trim())
            .filter(|label| !label.is_empty())
            .unwrap_or(header);
        let id = format!("swimlane-{}", self.next_lane);
        self.next_lane += 1;
        self.doc.swimlanes.push(Swimlane::new(id, label));
        self.current_lane = Some(self.doc.swimlanes.len() - 1);
        self.section = Section::Swimlane;
    }

    fn push_periods(&mut self, line: &str) {
        for token in line.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let index = self.doc.periods.len();
            self.doc.periods.push(TimePeriod::new(token, index));
        }
    }

    fn lane_for_item(&mut self) -> usize {
        if let Some(idx) = self.current_lane {
            return idx;
        }
        let idx = match self
            .doc
            .swimlanes
            .iter()
            .position(|lane| lane.id == DEFAULT_SWIMLANE_ID)
        {
            Some(idx) => idx,
            None => {
                tracing::debug!("item outside any swimlane, opening default lane");
                self.doc
                    .swimlanes
                    .push(Swimlane::new(DEFAULT_SWIMLANE_ID, DEFAULT_SWIMLANE_LABEL));
                self.doc.swimlanes.len() - 1
            }
        };
        self.current_lane = Some(idx);
        idx
    }

    fn push_item(&mut self, line: &str) {
        let lane_idx = self.lane_for_item();
        let lane_id = self.doc.swimlanes[lane_idx].id.clone();
        let item = parse_item_line(line, format!("item-{}", self.next_item), lane_id);
        self.next_item += 1;
        self.doc.swimlanes[lane_idx].items.push(item);
    }

    fn finish(mut self) -> RoadmapData {
        if self.doc.periods.is_empty() {
            tracing::debug!("no periods declared, using Q1..Q4");
            self.doc.periods = DEFAULT_PERIODS
                .iter()
                .enumerate()
                .map(|(index, label)| TimePeriod {
                    id: label.to_string(),
                    label: label.to_string(),
                    index,
                })
                .collect();
        }
        self.doc
    }
}

/// Parses roadmap text. Never fails: anything unrecognised is skipped and
/// missing sections fall back to defaults.
pub fn parse_roadmap(input: &str) -> RoadmapData {
    let mut state = ParseState::new();

    for raw_line in input.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix("## ") {
            let header = header.trim();
            if !header.is_empty() {
                state.open_section(header);
            }
            continue;
        }
        if let Some(title) = line.strip_prefix("# ") {
            // First title wins.
            if state.doc.title.is_none() {
                let title = title.trim();
                if !title.is_empty() {
                    state.doc.title = Some(title.to_string());
                }
            }
            continue;
        }
        if line.starts_with('-') {
            state.push_item(line);
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        if state.section == Section::Periods {
            state.push_periods(line);
        }
    }

    state.finish()
}

fn parse_item_line(line: &str, id: String, swimlane: String) -> RoadmapItem {
    let body = line.strip_prefix('-').unwrap_or(line);
    let mut segments = body.split('|').map(str::trim);
    let title = segments.next().unwrap_or("").to_string();

    let mut item = RoadmapItem {
        id,
        title,
        start: String::new(),
        end: None,
        length: None,
        swimlane,
        color: None,
    };

    for segment in segments {
        let Some((key, value)) = segment.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim().to_ascii_lowercase().as_str() {
            "start" => item.start = value.to_string(),
            "end" => item.end = Some(value.to_string()),
            "length" => item.length = Some(value.to_string()),
            "color" => item.color = Some(value.to_string()),
            _ => {}
        }
    }

    if item.start.is_empty() {
        item.start = "0".to_string();
    }
    item
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_roadmap() {
        let input = "# Platform 2025\n## Periods\nQ1, Q2, Q3\n## Team: Core\n- Auth | start: Q1 | end: Q2 | color: #ff0000\n- Billing | start: Q2 | length: 2";
        let doc = parse_roadmap(input);
        assert_eq!(doc.title.as_deref(), Some("Platform 2025"));
        assert_eq!(doc.periods.len(), 3);
        assert_eq!(doc.swimlanes.len(), 1);
        let lane = &doc.swimlanes[0];
        assert_eq!(lane.label, "Core");
        assert_eq!(lane.items.len(), 2);
        assert_eq!(lane.items[0].start, "Q1");
        assert_eq!(lane.items[0].end.as_deref(), Some("Q2"));
        assert_eq!(lane.items[0].color.as_deref(), Some("#ff0000"));
        assert_eq!(lane.items[1].length.as_deref(), Some("2"));
        assert_eq!(lane.items[1].end, None);
    }

    #[test]
    fn period_indices_are_contiguous_across_lines() {
        let input = "## Time Periods\nJan, Feb,\nMar\n, ,Apr";
        let doc = parse_roadmap(input);
        let labels: Vec<&str> = doc.periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan", "Feb", "Mar", "Apr"]);
        let indices: Vec<usize> = doc.periods.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn period_ids_replace_whitespace() {
        let doc = parse_roadmap("## timeline\nSprint 1, Sprint   2");
        assert_eq!(doc.periods[0].id, "Sprint_1");
        assert_eq!(doc.periods[0].label, "Sprint 1");
        assert_eq!(doc.periods[1].id, "Sprint_2");
    }

    #[test]
    fn missing_periods_default_to_quarters() {
        let doc = parse_roadmap("## Team\n- A");
        let ids: Vec<&str> = doc.periods.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["Q1", "Q2", "Q3", "Q4"]);
        assert!(doc.periods.iter().all(|p| p.id == p.label));
    }

    #[test]
    fn first_title_wins() {
        let doc = parse_roadmap("# First\n# Second\n## Periods\nQ1");
        assert_eq!(doc.title.as_deref(), Some("First"));
    }

    #[test]
    fn lane_prefixes_are_stripped() {
        let doc = parse_roadmap("## Swimlane: Web\n## TEAM: Mobile\n## lane:Data\n## Infra Ops");
        let labels: Vec<&str> = doc.swimlanes.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Web", "Mobile", "Data", "Infra Ops"]);
    }

    #[test]
    fn repeated_lane_label_creates_new_lane() {
        let doc = parse_roadmap("## Team\n- A\n## Team\n- B");
        assert_eq!(doc.swimlanes.len(), 2);
        assert_ne!(doc.swimlanes[0].id, doc.swimlanes[1].id);
        assert_eq!(doc.swimlanes[1].items[0].swimlane, doc.swimlanes[1].id);
    }

    #[test]
    fn items_without_lane_use_default_lane() {
        let doc = parse_roadmap("- Orphan | start: 1\n- Second");
        assert_eq!(doc.swimlanes.len(), 1);
        assert_eq!(doc.swimlanes[0].id, DEFAULT_SWIMLANE_ID);
        assert_eq!(doc.swimlanes[0].label, DEFAULT_SWIMLANE_LABEL);
        assert_eq!(doc.swimlanes[0].items.len(), 2);
    }

    #[test]
    fn item_ids_are_global_and_sequential() {
        let doc = parse_roadmap("## A\n- one\n- two\n## B\n- three");
        let ids: Vec<&str> = doc
            .swimlanes
            .iter()
            .flat_map(|l| l.items.iter())
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["item-0", "item-1", "item-2"]);
    }

    #[test]
    fn item_keys_are_case_insensitive_and_unknown_keys_ignored() {
        let doc = parse_roadmap("## A\n- Thing | START: Q2 | Owner: bob | LENGTH: 1.5 | start:");
        let item = &doc.swimlanes[0].items[0];
        assert_eq!(item.title, "Thing");
        assert_eq!(item.start, "Q2");
        assert_eq!(item.length.as_deref(), Some("1.5"));
    }

    #[test]
    fn missing_start_defaults_to_zero() {
        let doc = parse_roadmap("## A\n- Thing | end: Q3");
        assert_eq!(doc.swimlanes[0].items[0].start, "0");
    }

    #[test]
    fn expression_values_keep_colons() {
        let doc = parse_roadmap("## A\n- Thing | color: rgb(1, 2, 3) | start: Q1+(Q2-Q1)/2");
        let item = &doc.swimlanes[0].items[0];
        assert_eq!(item.start, "Q1+(Q2-Q1)/2");
        assert_eq!(item.color.as_deref(), Some("rgb(1, 2, 3)"));
    }

    #[test]
    fn garbage_input_still_yields_a_document() {
        let doc = parse_roadmap("###\n##\n#\nrandom words\n| | |\n");
        assert_eq!(doc.periods.len(), 4);
        assert!(doc.swimlanes.is_empty());
        assert!(doc.title.is_none());
    }
}
