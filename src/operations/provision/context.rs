//! Shared context for the provisioning run
//!
//! Bundles the resolved configuration with the injected capabilities
//! (command runner, downloader, status output) and the mutable run state:
//! the stage reached so far and the warnings collected on the way.

use std::path::Path;

use crate::config::ProvisionConfig;
use crate::domain::{Stage, Warning};
use crate::download::Downloader;
use crate::runner::CommandRunner;
use crate::ui::Reporter;

pub struct ProvisionContext<'a> {
    pub config: &'a ProvisionConfig,
    pub runner: &'a dyn CommandRunner,
    pub downloader: &'a dyn Downloader,
    pub reporter: Reporter,

    /// Furthest stage reached
    pub stage: Stage,

    pub warnings: Vec<Warning>,

    /// A dry run "installed" the debugger, so files it would have laid down
    /// count as present
    pub pending_install: bool,
}

impl<'a> ProvisionContext<'a> {
    pub fn new(
        config: &'a ProvisionConfig,
        runner: &'a dyn CommandRunner,
        downloader: &'a dyn Downloader,
        reporter: Reporter,
    ) -> Self {
        Self {
            config,
            runner,
            downloader,
            reporter,
            stage: Stage::Start,
            warnings: Vec::new(),
            pending_install: false,
        }
    }

    /// Record that `stage` has been reached
    pub fn advance(&mut self, stage: Stage) {
        log::debug!("Stage reached: {stage}");
        self.stage = stage;
    }

    /// Report a recoverable problem and keep going
    pub fn warn(&mut self, stage: Stage, message: impl Into<String>) {
        let message = message.into();
        log::debug!("Warning at {stage}: {message}");
        self.reporter.warning(&message);
        self.warnings.push(Warning { stage, message });
    }

    /// Whether an executable from the install is available to launch
    pub fn install_file_present(&self, path: &Path) -> bool {
        path.is_file() || self.pending_install
    }
}
