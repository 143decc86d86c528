//! Boundary for delivering change notifications.

use crate::diff::ChangeReport;
use crate::errors::Result;

/// Delivers an actionable report to humans.
///
/// Implementations own message formatting details beyond the shared summary
/// and all transport concerns.
#[allow(clippy::result_large_err)]
pub trait Notifier: Send + Sync {
    /// Deliver the report. `Ok` means delivered.
    ///
    /// # Errors
    ///
    /// Returns `Notify` on delivery failure. Callers log it and continue.
    fn notify(&self, report: &ChangeReport) -> Result<()>;
}

/// Notifier that accepts everything and sends nothing.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _: &ChangeReport) -> Result<()> {
        Ok(())
    }
}
