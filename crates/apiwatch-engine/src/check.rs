//! Check run orchestration.
//!
//! ## Pipeline (in order):
//! 1. Fetch the current document (failure: abort, snapshot untouched)
//! 2. Parse it (failure: abort, snapshot untouched)
//! 3. Load the previous snapshot (unreadable: proceed as first run)
//! 4. Byte-identical fast path, otherwise structural detection
//! 5. dry_run short-circuit (no notification, no writes)
//! 6. Notify when actionable (failure: logged, run continues)
//! 7. Persist the current document as the new baseline

#![allow(clippy::result_large_err)]

use apiwatch_core::diff::{detect_changes, render_human_summary, ChangeReport};
use apiwatch_core::document::{parse_document_bytes, ApiDocument};
use apiwatch_core::errors::{ExErrorKind, Result};
use apiwatch_core::notifier::Notifier;
use apiwatch_core::snapshot::{content_hash, SnapshotRecord, SnapshotStore};
use apiwatch_core::source::DocumentSource;
use apiwatch_core::{log_op_end, log_op_error, log_op_start};
use apiwatch_core_types::RunId;
use chrono::Utc;
use std::time::Instant;

/// Options for a single check run.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Compute and report, but neither notify nor write the snapshot.
    pub dry_run: bool,
    /// Correlation id for every event of this run.
    pub run_id: RunId,
}

/// What happened to the notification for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyStatus {
    /// Report was not actionable
    NotRequired,
    /// Report was actionable but this was a dry run
    Skipped,
    /// Notifier accepted the report
    Delivered,
    /// Notifier failed; the snapshot was still written
    Failed { code: &'static str, message: String },
}

/// Result of a completed check run.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub run_id: RunId,
    pub report: ChangeReport,
    /// Plain-text rendering of `report`
    pub summary: String,
    pub notify_status: NotifyStatus,
    /// Hex SHA-256 of the fetched bytes
    pub content_hash: String,
    /// True if the raw bytes differ from the previous snapshot
    pub content_changed: bool,
    pub snapshot_written: bool,
}

/// Run one check.
///
/// # Errors
///
/// - `Fetch` / `InvalidDocument`: the snapshot is left untouched
/// - `Persistence` (or `Io` / `Serialization`): the new baseline could not
///   be written; the previous snapshot is intact
///
/// Notification failures are not errors; see [`NotifyStatus::Failed`].
pub fn run_check(
    source: &dyn DocumentSource,
    store: &dyn SnapshotStore,
    notifier: &dyn Notifier,
    options: &CheckOptions,
) -> Result<CheckOutcome> {
    let span = tracing::info_span!("check", run_id = %options.run_id);
    let _entered = span.enter();

    log_op_start!(
        "run_check",
        doc_url = source.location(),
        dry_run = options.dry_run
    );
    let start = Instant::now();

    let outcome = run_check_impl(source, store, notifier, options).map_err(|e| {
        let e = e.with_run_id(options.run_id.clone());
        log_op_error!(
            "run_check",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "run_check",
        duration_ms = start.elapsed().as_millis() as u64,
        classification = %outcome.report.classification,
        severity = %outcome.report.severity,
        snapshot_written = outcome.snapshot_written
    );

    Ok(outcome)
}

fn run_check_impl(
    source: &dyn DocumentSource,
    store: &dyn SnapshotStore,
    notifier: &dyn Notifier,
    options: &CheckOptions,
) -> Result<CheckOutcome> {
    let bytes = fetch(source)?;
    let (current, raw) = parse_document_bytes(&bytes)?;
    let hash = content_hash(&bytes);

    let (previous_hash, previous) = match load_previous(store) {
        Some((hash, doc)) => (Some(hash), Some(doc)),
        None => (None, None),
    };

    let bytes_identical = previous_hash.as_deref() == Some(hash.as_str());
    let report = if bytes_identical {
        ChangeReport::unchanged().with_document_title(current.title())
    } else {
        detect_changes(previous.as_ref(), &current)
    };
    let content_changed = previous.is_some() && !bytes_identical;

    tracing::info!(
        classification = %report.classification,
        severity = %report.severity,
        endpoints_added = report.endpoint_changes.added.len(),
        endpoints_removed = report.endpoint_changes.removed.len(),
        schemas_added = report.schema_changes.added.len(),
        schemas_removed = report.schema_changes.removed.len(),
        content_hash = %hash,
        "change detection complete"
    );
    if content_changed && !report.is_actionable() {
        tracing::info!("content changed without structural change");
    }

    let summary = render_human_summary(&report);

    if options.dry_run {
        let notify_status = if report.is_actionable() {
            NotifyStatus::Skipped
        } else {
            NotifyStatus::NotRequired
        };
        return Ok(CheckOutcome {
            run_id: options.run_id.clone(),
            report,
            summary,
            notify_status,
            content_hash: hash,
            content_changed,
            snapshot_written: false,
        });
    }

    let notify_status = if report.is_actionable() {
        deliver(notifier, &report)
    } else {
        NotifyStatus::NotRequired
    };

    // Written even after a failed notification so the same diff is not
    // reported again on the next run.
    store.save(&SnapshotRecord::new(hash.clone(), raw, Utc::now()))?;

    Ok(CheckOutcome {
        run_id: options.run_id.clone(),
        report,
        summary,
        notify_status,
        content_hash: hash,
        content_changed,
        snapshot_written: true,
    })
}

fn fetch(source: &dyn DocumentSource) -> Result<Vec<u8>> {
    log_op_start!("fetch_document", doc_url = source.location());
    let start = Instant::now();

    let bytes = source.fetch().map_err(|e| {
        log_op_error!(
            "fetch_document",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "fetch_document",
        duration_ms = start.elapsed().as_millis() as u64,
        bytes = bytes.len() as u64
    );
    Ok(bytes)
}

/// Previous snapshot hash and typed document. A snapshot whose document is
/// not usable counts as no snapshot at all.
fn load_previous(store: &dyn SnapshotStore) -> Option<(String, ApiDocument)> {
    let record = store.load()?;
    match record.api_document() {
        Ok(doc) => Some((record.content_hash, doc)),
        Err(e) => {
            tracing::warn!(
                err.code = e.code(),
                "stored snapshot document unusable; treating as first run: {}",
                e
            );
            None
        }
    }
}

fn deliver(notifier: &dyn Notifier, report: &ChangeReport) -> NotifyStatus {
    log_op_start!("notify", severity = %report.severity);
    let start = Instant::now();

    match notifier.notify(report) {
        Ok(()) => {
            log_op_end!(
                "notify",
                duration_ms = start.elapsed().as_millis() as u64
            );
            NotifyStatus::Delivered
        }
        Err(e) => {
            log_op_error!(
                "notify",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            // Anything a notifier raises is a delivery failure for this run.
            let code = if e.kind() == ExErrorKind::Notify {
                e.code()
            } else {
                ExErrorKind::Notify.code()
            };
            NotifyStatus::Failed {
                code,
                message: e.to_string(),
            }
        }
    }
}
