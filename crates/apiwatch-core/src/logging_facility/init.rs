//! Logging initialization

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output on stderr, debug level
    Development,
    /// JSON lines for log shippers, info level
    Production,
}

impl Profile {
    /// Map a `--log-format` value onto a profile. Unknown values fall back to
    /// human-readable output.
    pub fn from_format(format: &str) -> Self {
        match format.trim().to_ascii_lowercase().as_str() {
            "json" => Profile::Production,
            _ => Profile::Development,
        }
    }

    fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "apiwatch=debug",
            Profile::Production => "apiwatch=info",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup; later calls are ignored. `RUST_LOG` overrides the
/// profile's default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter)
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter)
                    .init();
            }
        }
    });
}
