//! Status output for the provisioning run
//!
//! Progress and results go to stdout, warnings and errors to stderr.

use console::Style;

use crate::domain::{
    AccountOutcome, DownloadOutcome, InstallOutcome, InstallerExit, LaunchOutcome, ShareOutcome,
};
use crate::operations::provision::ProvisionReport;

macro_rules! display_field {
    ($label:expr, $value:expr) => {
        println!("  {} {}", Style::new().bold().apply_to($label), $value);
    };
}

/// Prints human-readable status lines
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    dry_run: bool,
}

impl Reporter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Announce a stage
    pub fn step(&self, message: &str) {
        println!("{} {}", Style::new().bold().cyan().apply_to("==>"), message);
    }

    /// Detail line under the current stage
    pub fn info(&self, message: &str) {
        println!("    {message}");
    }

    pub fn success(&self, message: &str) {
        println!("    {}", Style::new().green().apply_to(message));
    }

    pub fn warning(&self, message: &str) {
        eprintln!(
            "{} {}",
            Style::new().bold().yellow().apply_to("Warning:"),
            message
        );
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", Style::new().bold().red().apply_to("Error:"), message);
    }

    /// Describe an action that a dry run skips
    pub fn would(&self, action: &str) {
        println!(
            "    {} would {}",
            Style::new().dim().apply_to("[dry-run]"),
            action
        );
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Display the end-of-run summary
pub fn display_summary(report: &ProvisionReport) {
    println!();
    println!("{}", Style::new().bold().green().apply_to("Summary:"));
    display_field!("Architecture:", &report.selection.architecture);
    display_field!("Install directory:", report.install_dir.display());
    display_field!("Download:", download_summary(&report.download));
    display_field!("Install:", install_summary(report.install));
    display_field!("Configuration tool:", launch_summary(&report.config_tool));
    display_field!("Account:", account_summary(&report.account));
    display_field!("Share:", share_summary(&report.share));
    display_field!("Agent:", launch_summary(&report.agent));

    if report.agent.is_launched() {
        println!();
        println!(
            "{}",
            Style::new().bold().green().apply_to(format!(
                "Remote debugger started for {}",
                report.account_name
            ))
        );
    }

    if !report.has_warnings() {
        return;
    }
    println!(
        "  {} {}",
        Style::new().bold().yellow().apply_to("Warnings:"),
        report.warnings.len()
    );
    for warning in &report.warnings {
        println!("    - {warning}");
    }
}

fn download_summary(download: &DownloadOutcome) -> String {
    match download {
        DownloadOutcome::Downloaded(artifact) => format!("downloaded ({} bytes)", artifact.size),
        DownloadOutcome::AlreadyPresent(_) => "reused existing file".to_string(),
        DownloadOutcome::SkippedInstalled { .. } => "skipped (already installed)".to_string(),
    }
}

fn install_summary(install: InstallOutcome) -> String {
    match install {
        InstallOutcome::Installed(InstallerExit::Success) => "installed".to_string(),
        InstallOutcome::Installed(InstallerExit::RebootRequired) => {
            "installed (reboot recommended)".to_string()
        }
        InstallOutcome::Installed(InstallerExit::Failed(Some(code))) => {
            format!("installer exited with code {code}")
        }
        InstallOutcome::Installed(InstallerExit::Failed(None)) => {
            "installer ended without an exit code".to_string()
        }
        InstallOutcome::SkippedInstalled => "skipped (already installed)".to_string(),
    }
}

fn account_summary(account: &AccountOutcome) -> String {
    match account {
        AccountOutcome::Created => "created".to_string(),
        AccountOutcome::AlreadyExists => "already exists".to_string(),
        AccountOutcome::Failed(reason) => format!("failed: {reason}"),
    }
}

fn share_summary(share: &ShareOutcome) -> String {
    match share {
        ShareOutcome::Created => "created".to_string(),
        ShareOutcome::AlreadyExists => "already exists".to_string(),
        ShareOutcome::Failed(reason) => format!("failed: {reason}"),
    }
}

fn launch_summary(launch: &LaunchOutcome) -> String {
    match launch {
        LaunchOutcome::Launched(path) => format!("started {}", path.display()),
        LaunchOutcome::Missing(path) => format!("not found at {}", path.display()),
        LaunchOutcome::Failed { path, reason } => {
            format!("failed to start {}: {reason}", path.display())
        }
    }
}
