//! Regenerates roadmap text from parsed or resolved documents.

use crate::ir::{ResolvedRoadmap, RoadmapData, TimePeriod};
use std::fmt::Write;

/// Writes the unresolved document back out, expressions untouched.
pub fn write_roadmap(doc: &RoadmapData) -> String {
    let mut out = String::new();
    write_header(&mut out, doc.title.as_deref(), &doc.periods);
    for lane in &doc.swimlanes {
        let _ = writeln!(out, "\n## {}", lane.label);
        for item in &lane.items {
            let _ = write!(out, "- {} | start: {}", item.title, item.start);
            if let Some(end) = &item.end {
                let _ = write!(out, " | end: {end}");
            }
            if let Some(length) = &item.length {
                let _ = write!(out, " | length: {length}");
            }
            if let Some(color) = &item.color {
                let _ = write!(out, " | color: {color}");
            }
            out.push('\n');
        }
    }
    out
}

/// Writes a resolved document with literal `start`/`length` numbers and the
/// color every item ended up with.
pub fn write_resolved(roadmap: &ResolvedRoadmap) -> String {
    let mut out = String::new();
    write_header(&mut out, roadmap.title.as_deref(), &roadmap.periods);
    for lane in &roadmap.swimlanes {
        let _ = writeln!(out, "\n## {}", lane.label);
        for item in &lane.items {
            let _ = writeln!(
                out,
                "- {} | start: {} | length: {} | color: {}",
                item.title,
                format_number(item.start_index),
                format_number(item.span()),
                item.color
            );
        }
    }
    out
}

fn write_header(out: &mut String, title: Option<&str>, periods: &[TimePeriod]) {
    if let Some(title) = title {
        let _ = writeln!(out, "# {title}\n");
    }
    out.push_str("## Periods\n");
    let labels: Vec<&str> = periods.iter().map(|p| p.label.as_str()).collect();
    let _ = writeln!(out, "{}", labels.join(", "));
}

/// `2` rather than `2.0`; fractions keep full precision.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
