//! Provision command implementation
//!
//! The provisioning run:
//! 1. Load settings (built-in defaults, optionally overridden by a YAML file)
//! 2. Snapshot the host environment
//! 3. Pick real or dry-run capabilities for commands and downloads
//! 4. Run the provisioning pipeline
//! 5. Print the summary

use console::Term;

use crate::cli::Cli;
use crate::config::{HostEnvironment, LaunchFlags, ProvisionConfig, Settings};
use crate::download::{DryRunDownloader, HttpDownloader};
use crate::error::Result;
use crate::operations::{ProvisionOperation, ProvisionOptions, RunOutcome};
use crate::runner::{DryRunRunner, SystemRunner};
use crate::ui::{Reporter, display};

/// Run the provision command
pub fn run(cli: &Cli) -> Result<RunOutcome> {
    let settings = Settings::load_or_default(cli.config.as_deref())?;
    let host = HostEnvironment::from_process(LaunchFlags {
        config: cli.config.clone(),
        temp_dir: cli.temp_dir.clone(),
        no_pause: cli.no_pause,
        verbose: cli.verbose,
    });
    log::debug!("Host environment: {host:?}");
    let config = ProvisionConfig::new(host, settings);

    let options = ProvisionOptions {
        dry_run: cli.dry_run,
    };
    let outcome = if cli.dry_run {
        let reporter = Reporter::new(true);
        let runner = DryRunRunner::new(reporter);
        let downloader = DryRunDownloader::new(reporter);
        ProvisionOperation::new(&config, &runner, &downloader, options).execute()?
    } else {
        let runner = SystemRunner;
        let downloader = HttpDownloader::new(Term::stdout().is_term());
        ProvisionOperation::new(&config, &runner, &downloader, options).execute()?
    };

    if let RunOutcome::Completed(report) = &outcome {
        display::display_summary(report);
    }

    Ok(outcome)
}
