//! Architecture domain types
//!
//! The set of supported architectures is closed: settings may change where
//! an installer comes from, never which tokens are accepted.

use std::fmt;

use crate::config::Downloads;
use crate::error::{ProvisionError, Result};

/// Processor architecture with a remote tools installer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    Amd64,
    X86,
    Arm64,
}

impl Architecture {
    pub const ALL: [Architecture; 3] = [Architecture::Amd64, Architecture::X86, Architecture::Arm64];

    /// Parse an OS architecture token (`AMD64`, `x86`, `ARM64`), ignoring ASCII case
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|arch| arch.token().eq_ignore_ascii_case(token.trim()))
    }

    /// Token as reported by Windows
    pub fn token(self) -> &'static str {
        match self {
            Architecture::Amd64 => "AMD64",
            Architecture::X86 => "x86",
            Architecture::Arm64 => "ARM64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Architecture detected on this host and the installer matching it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitectureSelection {
    /// Token exactly as the OS reported it
    pub token: String,
    pub architecture: Architecture,
    pub url: String,
    pub filename: String,
}

impl ArchitectureSelection {
    /// Select the installer for an OS-reported token
    ///
    /// A missing token is treated like an unknown one.
    pub fn resolve(token: Option<&str>, downloads: &Downloads) -> Result<Self> {
        let token = token.unwrap_or_default();
        let architecture =
            Architecture::from_token(token).ok_or_else(|| ProvisionError::UnsupportedArchitecture {
                token: token.to_string(),
            })?;
        let source = downloads.for_architecture(architecture);

        Ok(Self {
            token: token.to_string(),
            architecture,
            url: source.url.clone(),
            filename: source.filename.clone(),
        })
    }
}
