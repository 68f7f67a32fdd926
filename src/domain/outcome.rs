//! Outcomes of the individual provisioning stages

use std::fmt;
use std::path::{Path, PathBuf};

/// Installer exit code meaning "installed, reboot recommended"
pub const EXIT_REBOOT_REQUIRED: i32 = 3010;

/// Stages of the provisioning pipeline, in the order they are reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Start,
    Elevated,
    ArchResolved,
    Probed,
    Downloaded,
    Installed,
    ConfigureLaunched,
    AccountCreated,
    ShareCreated,
    AgentStarted,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Elevated => "elevation",
            Stage::ArchResolved => "architecture",
            Stage::Probed => "probe",
            Stage::Downloaded => "download",
            Stage::Installed => "install",
            Stage::ConfigureLaunched => "configuration tool",
            Stage::AccountCreated => "account",
            Stage::ShareCreated => "share",
            Stage::AgentStarted => "agent",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// A recoverable problem; the workflow kept going
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub stage: Stage,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}

/// Installer file in the temp directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded(DownloadArtifact),
    /// A file was already present at the download path
    AlreadyPresent(DownloadArtifact),
    /// An existing install made the installer unnecessary
    SkippedInstalled { path: PathBuf },
}

impl DownloadOutcome {
    /// Local installer path, whether or not anything was downloaded
    pub fn path(&self) -> &Path {
        match self {
            DownloadOutcome::Downloaded(artifact) | DownloadOutcome::AlreadyPresent(artifact) => {
                &artifact.path
            }
            DownloadOutcome::SkippedInstalled { path } => path,
        }
    }

    #[cfg(test)]
    pub fn was_downloaded(&self) -> bool {
        matches!(self, DownloadOutcome::Downloaded(_))
    }
}

/// Classified installer exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerExit {
    Success,
    RebootRequired,
    /// Any other code, or `None` when the process ended without one
    Failed(Option<i32>),
}

impl InstallerExit {
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => InstallerExit::Success,
            Some(EXIT_REBOOT_REQUIRED) => InstallerExit::RebootRequired,
            other => InstallerExit::Failed(other),
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, InstallerExit::Success | InstallerExit::RebootRequired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed(InstallerExit),
    SkippedInstalled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountOutcome {
    Created,
    AlreadyExists,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Created,
    AlreadyExists,
    Failed(String),
}

/// Outcome of starting a program without waiting for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Launched(PathBuf),
    Missing(PathBuf),
    Failed { path: PathBuf, reason: String },
}

impl LaunchOutcome {
    pub fn is_launched(&self) -> bool {
        matches!(self, LaunchOutcome::Launched(_))
    }
}
