//! Error types and handling for rdbg-provision
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only fatal conditions are errors. Everything the workflow can recover from
//! (odd installer exit codes, an account or share that already exists, a
//! missing configuration tool) is reported as a
//! [`Warning`](crate::domain::Warning) instead.

use miette::Diagnostic;
use thiserror::Error;

/// Fatal errors that stop the provisioning workflow
#[derive(Error, Diagnostic, Debug)]
pub enum ProvisionError {
    // Architecture errors
    #[error("Unsupported processor architecture: '{token}'")]
    #[diagnostic(
        code(provision::arch::unsupported),
        help("Supported architectures: AMD64, x86, ARM64")
    )]
    UnsupportedArchitecture { token: String },

    // Elevation errors
    #[error("Administrative rights were not granted: {reason}")]
    #[diagnostic(
        code(provision::elevation::refused),
        help("Accept the UAC prompt or run the tool from an elevated prompt")
    )]
    ElevationRefused { reason: String },

    // Download errors
    #[error("Failed to download installer from {url}: {reason}")]
    #[diagnostic(
        code(provision::download::failed),
        help("Check the network connection and that the URL is reachable from this host")
    )]
    DownloadFailed { url: String, reason: String },

    // Install errors
    #[error("Failed to start installer '{path}': {reason}")]
    #[diagnostic(code(provision::install::launch_failed))]
    InstallerLaunchFailed { path: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(provision::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(
        code(provision::config::parse_failed),
        help("Accepted keys: downloads, install_candidates, default_install_dir, agent_subdir, \
              agent_executable, config_tool, installer_args, account, share, agent_args")
    )]
    ConfigParseFailed { path: String, reason: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(provision::fs::io_error))]
    IoError { message: String },
}

impl ProvisionError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl From<std::io::Error> for ProvisionError {
    fn from(err: std::io::Error) -> Self {
        ProvisionError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ProvisionError {
    fn from(err: serde_yaml::Error) -> Self {
        ProvisionError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ProvisionError>;
