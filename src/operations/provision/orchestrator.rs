//! Main orchestrator for the provision operation
//!
//! Runs the stages strictly in order:
//! elevation, architecture, probe, download, install, configuration tool,
//! account, share, agent. Only the stages up to and including the install
//! can abort the run; everything after it reports warnings.

use std::path::PathBuf;

use super::configure;
use super::context::ProvisionContext;
use super::install;
use crate::cleanup::ArtifactCleanup;
use crate::config::ProvisionConfig;
use crate::domain::{
    AccountOutcome, ArchitectureSelection, DownloadOutcome, InstallOutcome, InstallationProbe,
    LaunchOutcome, ShareOutcome, Stage, Warning,
};
use crate::download::Downloader;
use crate::elevation::{self, Elevation};
use crate::error::Result;
use crate::runner::CommandRunner;
use crate::ui::Reporter;

/// Options for a provisioning run
#[derive(Debug, Clone, Copy, Default)]
pub struct ProvisionOptions {
    /// Report actions instead of performing them
    pub dry_run: bool,
}

/// What happened to this process
#[derive(Debug)]
pub enum RunOutcome {
    /// The pipeline ran to the end
    Completed(Box<ProvisionReport>),
    /// An elevated copy took over; nothing was provisioned here
    Relaunched,
}

/// Everything a completed run detected and did
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub stage: Stage,
    pub selection: ArchitectureSelection,
    pub probe: InstallationProbe,
    pub install_dir: PathBuf,
    pub download: DownloadOutcome,
    pub install: InstallOutcome,
    pub config_tool: LaunchOutcome,
    pub account: AccountOutcome,
    /// Account the agent accepts connections from
    pub account_name: String,
    pub share: ShareOutcome,
    pub agent: LaunchOutcome,
    pub warnings: Vec<Warning>,
}

impl ProvisionReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Main orchestrator for the provision operation
pub struct ProvisionOperation<'a> {
    config: &'a ProvisionConfig,
    runner: &'a dyn CommandRunner,
    downloader: &'a dyn Downloader,
    options: ProvisionOptions,
}

impl<'a> ProvisionOperation<'a> {
    pub fn new(
        config: &'a ProvisionConfig,
        runner: &'a dyn CommandRunner,
        downloader: &'a dyn Downloader,
        options: ProvisionOptions,
    ) -> Self {
        Self {
            config,
            runner,
            downloader,
            options,
        }
    }

    /// Execute the provisioning pipeline
    pub fn execute(&self) -> Result<RunOutcome> {
        let reporter = Reporter::new(self.options.dry_run);
        let mut ctx = ProvisionContext::new(self.config, self.runner, self.downloader, reporter);

        reporter.step("Checking administrative rights");
        if self.options.dry_run {
            reporter.would("relaunch with administrative rights if needed");
        } else if elevation::ensure_elevated(self.runner, &self.config.host)?
            == Elevation::Relaunched
        {
            reporter.info("Continuing in an elevated window");
            return Ok(RunOutcome::Relaunched);
        }
        ctx.advance(Stage::Elevated);

        reporter.step("Detecting processor architecture");
        let selection = ArchitectureSelection::resolve(
            self.config.host.architecture_token(),
            &self.config.settings.downloads,
        )?;
        reporter.info(&format!(
            "{} -> {}",
            selection.architecture, selection.filename
        ));
        ctx.advance(Stage::ArchResolved);

        reporter.step("Looking for an existing remote debugger");
        let probe = InstallationProbe::run(
            self.config.install_candidates(),
            &self.config.settings.agent_subdir,
            &self.config.settings.agent_executable,
        );
        let install_dir = probe.install_dir(&self.config.default_install_dir());
        match &probe.found {
            Some(dir) => reporter.info(&format!("Found {}", dir.display())),
            None => reporter.info("Not installed"),
        }
        ctx.advance(Stage::Probed);

        // Removes the installer on every exit path from here on
        let mut cleanup = ArtifactCleanup::new(!self.options.dry_run);

        reporter.step("Fetching installer");
        let download = install::download_installer(&mut ctx, &selection, &probe, &mut cleanup)?;
        ctx.advance(Stage::Downloaded);

        reporter.step("Installing remote debugger");
        let install = install::run_installer(&mut ctx, &download, &probe)?;
        ctx.advance(Stage::Installed);

        reporter.step("Launching configuration tool");
        let config_tool = configure::launch_config_tool(&mut ctx, &install_dir);
        ctx.advance(Stage::ConfigureLaunched);

        reporter.step("Creating debugging account");
        let account = configure::create_account(&mut ctx);
        ctx.advance(Stage::AccountCreated);

        reporter.step("Creating share");
        let share = configure::create_share(&mut ctx);
        ctx.advance(Stage::ShareCreated);

        reporter.step("Starting remote debugging agent");
        let agent = configure::start_agent(&mut ctx, &install_dir);
        ctx.advance(Stage::AgentStarted);

        for failure in cleanup.remove_all() {
            ctx.warn(
                Stage::Done,
                format!(
                    "Failed to remove {}: {}",
                    failure.path.display(),
                    failure.error
                ),
            );
        }
        ctx.advance(Stage::Done);

        Ok(RunOutcome::Completed(Box::new(ProvisionReport {
            stage: ctx.stage,
            selection,
            probe,
            install_dir,
            download,
            install,
            config_tool,
            account,
            account_name: self.config.settings.account.name.clone(),
            share,
            agent,
            warnings: ctx.warnings,
        })))
    }
}
