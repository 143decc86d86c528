//! Command-line arguments and resolved settings

#![allow(clippy::result_large_err)]

use apiwatch_core::errors::{ExErrorKind, Result, WatchError};
use apiwatch_core_types::Sensitive;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DOC_URL: &str = "https://infuser.odcloud.kr/oas/docs?namespace=15083277/v1";
pub const WEBHOOK_ENV: &str = "SLACK_WEBHOOK_URL";

#[derive(Debug, Parser)]
#[command(name = "apiwatch")]
#[command(about = "Watch a published OpenAPI document and report changes to Slack", long_about = None)]
pub struct Cli {
    /// URL of the OpenAPI / Swagger JSON document
    #[arg(long, env = "APIWATCH_DOC_URL", default_value = DEFAULT_DOC_URL)]
    pub doc_url: String,

    /// Snapshot file holding the last seen document
    #[arg(long, env = "APIWATCH_STATE_FILE", default_value = "last_state.json")]
    pub state_file: PathBuf,

    /// Report changes without notifying or updating the snapshot
    #[arg(long)]
    pub dry_run: bool,

    /// Log output: human-readable `pretty` or JSON lines
    #[arg(
        long,
        env = "APIWATCH_LOG_FORMAT",
        default_value = "pretty",
        value_parser = ["pretty", "json"]
    )]
    pub log_format: String,
}

/// Settings for one run.
///
/// The webhook comes from the environment only, never from argv.
#[derive(Debug)]
pub struct Settings {
    pub doc_url: String,
    pub state_file: PathBuf,
    pub dry_run: bool,
    pub webhook: Option<Sensitive<String>>,
}

impl Settings {
    /// Resolve settings from parsed arguments and a webhook value.
    ///
    /// # Errors
    ///
    /// `Config` if the webhook is missing or blank and this is not a dry run.
    pub fn resolve(cli: Cli, webhook: Option<String>) -> Result<Self> {
        let webhook = Sensitive::<String>::non_blank(webhook);
        if webhook.is_none() && !cli.dry_run {
            return Err(WatchError::MissingSetting {
                name: WEBHOOK_ENV.to_string(),
            }
            .into());
        }
        Ok(Self {
            doc_url: cli.doc_url,
            state_file: cli.state_file,
            dry_run: cli.dry_run,
            webhook,
        })
    }

    /// Resolve settings, reading the webhook from `SLACK_WEBHOOK_URL`.
    ///
    /// # Errors
    ///
    /// See [`Settings::resolve`].
    pub fn from_env(cli: Cli) -> Result<Self> {
        Self::resolve(cli, std::env::var(WEBHOOK_ENV).ok())
    }
}

/// Process exit code for a failed run.
pub fn exit_code(kind: ExErrorKind) -> i32 {
    match kind {
        ExErrorKind::Config => 2,
        _ => 1,
    }
}
