//! Download and silent install stages
//!
//! Both stages are skipped when the probe found an existing install. The
//! download is also skipped when the installer is already in the temp
//! directory, whatever its origin.

use std::fs;

use super::context::ProvisionContext;
use crate::cleanup::ArtifactCleanup;
use crate::domain::{
    ArchitectureSelection, DownloadArtifact, DownloadOutcome, InstallOutcome, InstallationProbe,
    InstallerExit, Stage,
};
use crate::error::{ProvisionError, Result};
use crate::runner::Invocation;

/// Make the installer available in the temp directory
///
/// Any file left at the download path is tracked for removal, so it is gone
/// after the run whether or not this run fetched it.
pub fn download_installer(
    ctx: &mut ProvisionContext<'_>,
    selection: &ArchitectureSelection,
    probe: &InstallationProbe,
    cleanup: &mut ArtifactCleanup,
) -> Result<DownloadOutcome> {
    let path = ctx.config.artifact_path(&selection.filename);

    let existing = fs::metadata(&path).ok().filter(fs::Metadata::is_file);
    if existing.is_some() {
        cleanup.track(&path);
    }

    if probe.is_found() {
        ctx.reporter.info("Skipping download: remote debugger already installed");
        return Ok(DownloadOutcome::SkippedInstalled { path });
    }

    if let Some(metadata) = existing {
        ctx.reporter
            .info(&format!("Using existing installer {}", path.display()));
        return Ok(DownloadOutcome::AlreadyPresent(DownloadArtifact {
            path,
            size: metadata.len(),
        }));
    }

    ctx.reporter
        .info(&format!("Downloading {} to {}", selection.url, path.display()));
    let size = ctx.downloader.download(&selection.url, &path)?;
    if path.is_file() {
        cleanup.track(&path);
    }
    log::debug!("Downloaded {size} bytes to {}", path.display());
    ctx.reporter.success(&format!("Downloaded {size} bytes"));

    Ok(DownloadOutcome::Downloaded(DownloadArtifact {
        path,
        size,
    }))
}

/// Run the installer silently and classify its exit code
///
/// Failing to start the installer is fatal; any exit code is not.
pub fn run_installer(
    ctx: &mut ProvisionContext<'_>,
    download: &DownloadOutcome,
    probe: &InstallationProbe,
) -> Result<InstallOutcome> {
    if probe.is_found() {
        ctx.reporter.info("Skipping install: remote debugger already installed");
        return Ok(InstallOutcome::SkippedInstalled);
    }

    let installer = download.path();
    let invocation =
        Invocation::new(installer).args(ctx.config.settings.installer_args.iter().cloned());

    let output = ctx
        .runner
        .run(&invocation)
        .map_err(|e| ProvisionError::InstallerLaunchFailed {
            path: installer.display().to_string(),
            reason: e.to_string(),
        })?;

    let exit = InstallerExit::from_code(output.code);
    match exit {
        InstallerExit::Success => ctx.reporter.success("Remote debugger installed"),
        InstallerExit::RebootRequired => ctx
            .reporter
            .success("Remote debugger installed; a reboot is recommended to complete setup"),
        InstallerExit::Failed(_) => ctx.warn(
            Stage::Installed,
            format!(
                "Installer reported a problem ({}); continuing with configuration",
                output.failure_reason()
            ),
        ),
    }

    if ctx.reporter.is_dry_run() {
        ctx.pending_install = true;
    }

    Ok(InstallOutcome::Installed(exit))
}
