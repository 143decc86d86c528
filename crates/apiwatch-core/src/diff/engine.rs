//! Change detection engine.
//!
//! The entry point is [`detect_changes`], which compares the typed views of
//! the previous and current documents and produces a [`ChangeReport`].

use crate::diff::model::{
    ChangeClassification, ChangeReport, ChangeSeverity, SetChanges, VersionChange,
};
use crate::document::ApiDocument;
use std::collections::BTreeSet;

/// Compute a set-delta between two key sets.
///
/// `added` = in current but not previous, `removed` = in previous but not
/// current. Both come out sorted because the inputs are ordered sets.
fn set_delta(previous: &BTreeSet<&str>, current: &BTreeSet<&str>) -> SetChanges {
    SetChanges {
        added: current
            .difference(previous)
            .map(|s| s.to_string())
            .collect(),
        removed: previous
            .difference(current)
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Version pair, only when both sides declare one and they differ.
fn version_delta(previous: &ApiDocument, current: &ApiDocument) -> Option<VersionChange> {
    match (previous.api_version(), current.api_version()) {
        (Some(old), Some(new)) if old != new => Some(VersionChange { old, new }),
        _ => None,
    }
}

fn severity_of(endpoints: &SetChanges, schemas: &SetChanges, version: bool) -> ChangeSeverity {
    if !endpoints.removed.is_empty() || !schemas.removed.is_empty() {
        ChangeSeverity::Breaking
    } else if !endpoints.added.is_empty() || !schemas.added.is_empty() {
        ChangeSeverity::Additive
    } else if version {
        ChangeSeverity::Informational
    } else {
        ChangeSeverity::None
    }
}

/// Compare two documents.
///
/// With no previous document the report is `BaselineEstablished` and carries
/// no diffs. Missing sections on either side count as empty.
pub fn detect_changes(previous: Option<&ApiDocument>, current: &ApiDocument) -> ChangeReport {
    let Some(previous) = previous else {
        return ChangeReport::baseline().with_document_title(current.title());
    };

    let endpoint_changes = set_delta(&previous.endpoint_paths(), &current.endpoint_paths());
    let schema_changes = set_delta(&previous.schema_names(), &current.schema_names());
    let version_change = version_delta(previous, current);

    let severity = severity_of(
        &endpoint_changes,
        &schema_changes,
        version_change.is_some(),
    );

    let mut report = ChangeReport {
        report_schema_version: 1,
        classification: ChangeClassification::Unchanged,
        severity,
        endpoint_changes,
        schema_changes,
        version_change,
        document_title: current.title(),
    };
    if report.is_actionable() {
        report.classification = ChangeClassification::Changed;
    }
    report
}
