//! Provisioning settings (optional YAML file) data structures
//!
//! Every field has a default matching the stock Visual Studio 2022 remote
//! tools layout, so a run without a settings file needs no configuration.
//! A file only has to name the keys it wants to override.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::Architecture;
use crate::error::{ProvisionError, Result};

const ACCOUNT_NAME: &str = "VSDebugger";
// Known to the connecting clients. Weak; override it through the settings file.
const ACCOUNT_PASSWORD: &str = "VSDebugger1!";

/// Download location for one architecture
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DownloadSource {
    /// Installer URL
    pub url: String,

    /// Local file name inside the temp directory
    pub filename: String,
}

impl DownloadSource {
    fn remote_tools(arch_suffix: &str) -> Self {
        let filename = format!("RemoteTools.{arch_suffix}ret.enu.exe");
        Self {
            url: format!("https://aka.ms/vs/17/release/{filename}"),
            filename,
        }
    }
}

/// Installer downloads, one per supported architecture
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Downloads {
    pub amd64: DownloadSource,
    pub x86: DownloadSource,
    pub arm64: DownloadSource,
}

impl Default for Downloads {
    fn default() -> Self {
        Self {
            amd64: DownloadSource::remote_tools("amd64"),
            x86: DownloadSource::remote_tools("x86"),
            arm64: DownloadSource::remote_tools("arm64"),
        }
    }
}

impl Downloads {
    /// Get the download source for an architecture
    pub fn for_architecture(&self, architecture: Architecture) -> &DownloadSource {
        match architecture {
            Architecture::Amd64 => &self.amd64,
            Architecture::X86 => &self.x86,
            Architecture::Arm64 => &self.arm64,
        }
    }
}

/// Dedicated debugger account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountSettings {
    pub name: String,
    pub password: String,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            name: ACCOUNT_NAME.to_string(),
            password: ACCOUNT_PASSWORD.to_string(),
        }
    }
}

/// Filesystem share granted to the debugger account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShareSettings {
    /// Share name
    pub name: String,

    /// Shared directory; defaults to the root of the system drive
    pub path: Option<PathBuf>,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            name: "C".to_string(),
            path: None,
        }
    }
}

/// Provisioning settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Installer downloads per architecture
    pub downloads: Downloads,

    /// Install directories to probe, in order; replaces the built-in list when set
    pub install_candidates: Option<Vec<PathBuf>>,

    /// Directory a fresh install lands in; defaults to the first built-in candidate
    pub default_install_dir: Option<PathBuf>,

    /// Subdirectory of the install directory holding the agent
    pub agent_subdir: String,

    /// Remote debugger executable name
    pub agent_executable: String,

    /// Configuration wizard, looked up next to the install directory
    pub config_tool: String,

    /// Arguments for a silent installer run
    pub installer_args: Vec<String>,

    pub account: AccountSettings,

    pub share: ShareSettings,

    /// Extra agent arguments, appended after the account allow-list
    pub agent_args: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            downloads: Downloads::default(),
            install_candidates: None,
            default_install_dir: None,
            agent_subdir: "x64".to_string(),
            agent_executable: "msvsmon.exe".to_string(),
            config_tool: "rdbgwiz.exe".to_string(),
            installer_args: vec![
                "/install".to_string(),
                "/quiet".to_string(),
                "/norestart".to_string(),
            ],
            account: AccountSettings::default(),
            share: ShareSettings::default(),
            agent_args: vec!["/nosecuritywarn".to_string()],
        }
    }
}

impl Settings {
    /// Parse settings from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yaml::from_str(yaml)?;
        Ok(settings)
    }

    /// Load settings from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ProvisionError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ProvisionError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            ProvisionError::ConfigParseFailed { reason, .. } => ProvisionError::ConfigParseFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Load settings from an optional path, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
