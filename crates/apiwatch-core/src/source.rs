//! Boundary for obtaining the current document.

use crate::errors::Result;

/// Where the current API document comes from.
#[allow(clippy::result_large_err)]
pub trait DocumentSource: Send + Sync {
    /// Human-readable location, used in logs and notifications
    fn location(&self) -> &str;

    /// Fetch the raw document bytes.
    ///
    /// # Errors
    ///
    /// Returns `Fetch` when the source cannot be reached or refuses.
    fn fetch(&self) -> Result<Vec<u8>>;
}
