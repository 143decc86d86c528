//! Change report types.
//!
//! Collections are sorted `Vec<String>` so the serialized report is
//! deterministic.

use serde::{Deserialize, Serialize};

/// Structured result of comparing two documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeReport {
    /// Schema version of this report structure (always 1)
    pub report_schema_version: u32,
    /// High-level classification
    pub classification: ChangeClassification,
    /// Severity of the most significant change
    pub severity: ChangeSeverity,
    /// Endpoint paths added / removed
    pub endpoint_changes: SetChanges,
    /// Schema names added / removed
    pub schema_changes: SetChanges,
    /// Present only when both sides declare a version and they differ
    pub version_change: Option<VersionChange>,
    /// `info.title` of the current document, for message headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_title: Option<String>,
}

/// High-level classification of a report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChangeClassification {
    /// No previous snapshot existed; the current document becomes the baseline
    BaselineEstablished,
    /// Nothing the detector tracks has changed
    Unchanged,
    /// At least one tracked difference
    Changed,
}

/// Severity of the most significant change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeSeverity {
    /// No changes at all
    None,
    /// Only the declared version moved
    Informational,
    /// Endpoints or schemas were added
    Additive,
    /// Endpoints or schemas were removed; existing clients may break
    Breaking,
}

/// Set-delta for one keyed section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SetChanges {
    /// Keys present in the current document only
    pub added: Vec<String>,
    /// Keys present in the previous document only
    pub removed: Vec<String>,
}

impl SetChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Old/new pair for the declared API version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionChange {
    pub old: String,
    pub new: String,
}

impl ChangeReport {
    /// Report for a run with no previous snapshot.
    pub fn baseline() -> Self {
        Self {
            report_schema_version: 1,
            classification: ChangeClassification::BaselineEstablished,
            severity: ChangeSeverity::None,
            endpoint_changes: SetChanges::default(),
            schema_changes: SetChanges::default(),
            version_change: None,
            document_title: None,
        }
    }

    /// Report for two documents with nothing tracked in between.
    pub fn unchanged() -> Self {
        Self {
            classification: ChangeClassification::Unchanged,
            ..Self::baseline()
        }
    }

    /// True iff a notification should fire.
    pub fn is_actionable(&self) -> bool {
        !self.endpoint_changes.is_empty()
            || !self.schema_changes.is_empty()
            || self.version_change.is_some()
    }

    /// Attach the title of the document the report describes.
    pub fn with_document_title(mut self, title: Option<String>) -> Self {
        self.document_title = title;
        self
    }

    pub fn is_baseline(&self) -> bool {
        self.classification == ChangeClassification::BaselineEstablished
    }
}

impl std::fmt::Display for ChangeClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ChangeClassification::BaselineEstablished => "baseline_established",
            ChangeClassification::Unchanged => "unchanged",
            ChangeClassification::Changed => "changed",
        })
    }
}

impl std::fmt::Display for ChangeSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ChangeSeverity::None => "none",
            ChangeSeverity::Informational => "informational",
            ChangeSeverity::Additive => "additive",
            ChangeSeverity::Breaking => "breaking",
        })
    }
}
