//! Bounded, deterministic context sampling
//!
//! A sample always leads with the table's worst-AQI entity, then fills the
//! remaining slots with other entities in name order. The result is rendered
//! as a markdown pipe table for the system prompt.

use crate::types::{EntityKind, LatestTable, Observation};
use std::collections::HashSet;

/// Rows selected from a latest table for the prompt
#[derive(Debug, Clone, PartialEq)]
pub struct SampledContext {
    kind: EntityKind,
    rows: Vec<Observation>,
}

impl SampledContext {
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The distinguished first row
    pub fn worst(&self) -> Option<&Observation> {
        self.rows.first()
    }

    pub fn contains(&self, entity_id: &str) -> bool {
        self.rows.iter().any(|row| row.entity_id == entity_id)
    }

    pub fn render(&self) -> String {
        let rows: Vec<Vec<String>> = self.rows.iter().map(Observation::cells).collect();
        render_table(self.kind.columns(), &rows)
    }
}

/// Worst entity first, then up to `cap - 1` others sorted by display name
pub fn sample(table: &LatestTable, cap: usize) -> SampledContext {
    let kind = table.kind();
    let Some(worst) = table.worst() else {
        return SampledContext {
            kind,
            rows: Vec::new(),
        };
    };
    if cap == 0 {
        return SampledContext {
            kind,
            rows: Vec::new(),
        };
    }

    let mut rest: Vec<&Observation> = table
        .iter()
        .filter(|row| row.entity_id != worst.entity_id)
        .collect();
    rest.sort_by(|a, b| {
        a.display_name()
            .cmp(b.display_name())
            .then_with(|| a.entity_id.cmp(&b.entity_id))
    });

    let mut seen = HashSet::new();
    let rows: Vec<Observation> = std::iter::once(worst)
        .chain(rest.into_iter().take(cap - 1))
        .filter(|row| seen.insert(row.entity_id.as_str()))
        .cloned()
        .collect();

    SampledContext { kind, rows }
}

/// Markdown pipe table, columns padded to their widest cell
pub fn render_table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(columns.to_vec()));
    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w + 2)).collect();
    out.push(format!("|{}|", separator.join("|")));
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

/// Column names from the header row of a rendered table
pub fn parse_header(table: &str) -> Vec<String> {
    let Some(header) = table.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return Vec::new();
    };
    header
        .trim_start_matches('|')
        .trim_end_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}
