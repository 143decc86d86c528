//! Redaction wrapper for secrets
//!
//! A Slack incoming-webhook URL is a bearer credential: anyone holding it can
//! post into the channel. `Sensitive<T>` lets the configuration carry it
//! around without it leaking through `Debug`, `Display` or tracing fields.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Wrapper that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use apiwatch_core_types::Sensitive;
///
/// let webhook = Sensitive::new("https://hooks.slack.com/services/T0/B0/xyz");
/// assert_eq!(format!("{webhook:?}"), "***REDACTED***");
/// assert_eq!(webhook.expose(), &"https://hooks.slack.com/services/T0/B0/xyz");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a secret value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the secret. Call only at the point of use (e.g. building a request).
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl Sensitive<String> {
    /// Treat a missing or whitespace-only secret as absent
    pub fn non_blank(value: Option<String>) -> Option<Self> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Self)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_redact() {
        let hook = Sensitive::new("https://hooks.slack.com/services/secret".to_string());
        assert_eq!(format!("{hook:?}"), REDACTED);
        assert_eq!(format!("{hook}"), REDACTED);
    }

    #[test]
    fn test_expose_returns_secret() {
        let hook = Sensitive::new(String::from("https://example.test/hook"));
        assert_eq!(hook.expose(), "https://example.test/hook");
    }

    #[test]
    fn test_non_blank_filters_empty_values() {
        assert!(Sensitive::non_blank(None).is_none());
        assert!(Sensitive::non_blank(Some(String::new())).is_none());
        assert!(Sensitive::non_blank(Some("   ".to_string())).is_none());

        let hook = Sensitive::non_blank(Some(" https://x.test/h ".to_string())).unwrap();
        assert_eq!(hook.expose(), "https://x.test/h");
    }

    #[test]
    fn test_redacted_inside_containing_struct() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Config {
            doc_url: String,
            webhook: Sensitive<String>,
        }

        let cfg = Config {
            doc_url: "https://api.test/docs".to_string(),
            webhook: Sensitive::new("https://hooks.test/T1".to_string()),
        };
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("https://api.test/docs"));
        assert!(!rendered.contains("hooks.test"));
    }
}
