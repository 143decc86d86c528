//! apiwatch CLI
//!
//! Single check run: fetch, compare with the stored snapshot, notify, save.
//! Meant to be driven by cron or a CI schedule.

#![allow(clippy::result_large_err)]

use apiwatch_core::errors::Result;
use apiwatch_core::logging_facility::{init, Profile};
use apiwatch_core::notifier::{NoopNotifier, Notifier};
use apiwatch_core_types::RunId;
use apiwatch_engine::{run_check, CheckOptions, HttpDocumentSource, NotifyStatus, SlackNotifier};
use apiwatch_store::FsSnapshotStore;
use clap::Parser;

mod config;

use config::{exit_code, Cli, Settings};

fn main() {
    // A missing .env is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init(Profile::from_format(&cli.log_format));

    if let Err(e) = run(cli) {
        tracing::error!(err.code = e.code(), "check failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(e.kind()));
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env(cli)?;

    let source = HttpDocumentSource::new(settings.doc_url.clone())?;
    let store = FsSnapshotStore::new(&settings.state_file);
    let notifier: Box<dyn Notifier> = match settings.webhook {
        Some(webhook) => Box::new(SlackNotifier::new(webhook, settings.doc_url.clone())?),
        None => Box::new(NoopNotifier),
    };
    let options = CheckOptions {
        dry_run: settings.dry_run,
        run_id: RunId::new(),
    };

    let outcome = run_check(&source, &store, notifier.as_ref(), &options)?;

    if outcome.report.is_actionable() || settings.dry_run {
        println!("{}", outcome.summary);
    }
    if let NotifyStatus::Failed { code, message } = &outcome.notify_status {
        eprintln!("Warning: notification not delivered [{}]: {}", code, message);
    }
    Ok(())
}
