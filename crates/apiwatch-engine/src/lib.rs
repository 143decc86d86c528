//! apiwatch engine - one scheduled check, end to end
//!
//! Coordinates the pure core with its I/O collaborators:
//! - `check::run_check` drives fetch → load → detect → notify → save
//! - `http` holds the reqwest-backed document source and Slack notifier

pub mod check;
pub mod http;

pub use check::{run_check, CheckOptions, CheckOutcome, NotifyStatus};
pub use http::{HttpDocumentSource, SlackNotifier};
