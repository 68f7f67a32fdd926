//! Configuration handling for rdbg-provision
//!
//! This module contains:
//! - [`HostEnvironment`] - facts about the host read once at startup
//! - [`Settings`] - URLs, paths and account details, optionally loaded from YAML
//! - [`ProvisionConfig`] - both combined into the concrete values a run uses

pub mod host;
pub mod settings;

use std::path::{Path, PathBuf};

pub use host::{HostEnvironment, LaunchFlags};
pub use settings::{AccountSettings, DownloadSource, Downloads, Settings, ShareSettings};

/// Everything a provisioning run needs to know, resolved up front
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    pub host: HostEnvironment,
    pub settings: Settings,
}

impl ProvisionConfig {
    pub fn new(host: HostEnvironment, settings: Settings) -> Self {
        Self { host, settings }
    }

    /// Install directories to probe, in order
    pub fn install_candidates(&self) -> Vec<PathBuf> {
        match &self.settings.install_candidates {
            Some(candidates) => candidates.clone(),
            None => default_install_candidates(&self.host),
        }
    }

    /// Directory a fresh install lands in
    pub fn default_install_dir(&self) -> PathBuf {
        self.settings
            .default_install_dir
            .clone()
            .unwrap_or_else(|| remote_tools_dir(&self.host.program_files))
    }

    /// Local path the installer for `filename` is downloaded to
    pub fn artifact_path(&self, filename: &str) -> PathBuf {
        self.host.temp_dir.join(filename)
    }

    /// Agent executable inside an install directory
    pub fn agent_path(&self, install_dir: &Path) -> PathBuf {
        install_dir
            .join(&self.settings.agent_subdir)
            .join(&self.settings.agent_executable)
    }

    /// Configuration wizard belonging to an install directory (`<installDir>/../<tool>`)
    pub fn config_tool_path(&self, install_dir: &Path) -> PathBuf {
        match install_dir.parent() {
            Some(parent) => parent.join(&self.settings.config_tool),
            None => install_dir.join("..").join(&self.settings.config_tool),
        }
    }

    /// Directory exposed through the share
    pub fn share_path(&self) -> PathBuf {
        self.settings
            .share
            .path
            .clone()
            .unwrap_or_else(|| self.host.system_root())
    }
}

fn remote_tools_dir(root: &Path) -> PathBuf {
    root.join("Microsoft Visual Studio 17.0")
        .join("Common7")
        .join("IDE")
        .join("Remote Debugger")
}

fn visual_studio_dir(root: &Path, year: &str, edition: &str) -> PathBuf {
    root.join("Microsoft Visual Studio")
        .join(year)
        .join(edition)
        .join("Common7")
        .join("IDE")
        .join("Remote Debugger")
}

/// Built-in install locations: standalone remote tools first, then the
/// Visual Studio 2022 (64-bit) and 2019 (32-bit) editions.
pub fn default_install_candidates(host: &HostEnvironment) -> Vec<PathBuf> {
    let mut candidates = vec![remote_tools_dir(&host.program_files)];
    for edition in ["Enterprise", "Professional", "Community"] {
        candidates.push(visual_studio_dir(&host.program_files, "2022", edition));
    }
    for edition in ["Enterprise", "Professional", "Community"] {
        candidates.push(visual_studio_dir(&host.program_files_x86, "2019", edition));
    }
    candidates
}
