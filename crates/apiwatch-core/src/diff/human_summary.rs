//! Plain-text summary renderer for change reports.
//!
//! The output goes into a chat message code block, so it stays plain text:
//! one count line per non-empty section followed by a bounded list of names.

use crate::diff::model::{ChangeClassification, ChangeReport};

/// Maximum endpoint paths listed per section
pub const MAX_LISTED_ENDPOINTS: usize = 5;
/// Maximum schema names listed per section
pub const MAX_LISTED_SCHEMAS: usize = 3;

fn push_section(out: &mut Vec<String>, label: &str, marker: char, names: &[String], limit: usize) {
    if names.is_empty() {
        return;
    }
    out.push(format!("{label}: {}", names.len()));
    for name in names.iter().take(limit) {
        out.push(format!("  {marker} {name}"));
    }
    if names.len() > limit {
        out.push(format!("  ... and {} more", names.len() - limit));
    }
}

/// Render a human-readable summary of a [`ChangeReport`].
pub fn render_human_summary(report: &ChangeReport) -> String {
    match report.classification {
        ChangeClassification::BaselineEstablished => {
            return "Initial run - baseline established, monitoring started.".to_string();
        }
        ChangeClassification::Unchanged if !report.is_actionable() => {
            return "No endpoint, schema or version changes detected.".to_string();
        }
        _ => {}
    }

    let mut lines = Vec::new();
    let endpoints = &report.endpoint_changes;
    let schemas = &report.schema_changes;

    push_section(&mut lines, "Endpoints added", '+', &endpoints.added, MAX_LISTED_ENDPOINTS);
    push_section(&mut lines, "Endpoints removed", '-', &endpoints.removed, MAX_LISTED_ENDPOINTS);
    push_section(&mut lines, "Schemas added", '+', &schemas.added, MAX_LISTED_SCHEMAS);
    push_section(&mut lines, "Schemas removed", '-', &schemas.removed, MAX_LISTED_SCHEMAS);

    if let Some(version) = &report.version_change {
        lines.push(format!("Version changed: {} -> {}", version.old, version.new));
    }

    lines.join("\n")
}
