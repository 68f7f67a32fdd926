//! Host environment captured once at startup
//!
//! The workflow never reads process environment variables itself; `main`
//! snapshots them into a [`HostEnvironment`] that is passed down explicitly.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable holding the architecture of the current process
pub const PROCESSOR_ARCHITECTURE: &str = "PROCESSOR_ARCHITECTURE";

/// Environment variable holding the real architecture under WOW64
pub const PROCESSOR_ARCHITEW6432: &str = "PROCESSOR_ARCHITEW6432";

const DEFAULT_PROGRAM_FILES: &str = "C:\\Program Files";
const DEFAULT_PROGRAM_FILES_X86: &str = "C:\\Program Files (x86)";
const DEFAULT_SYSTEM_DRIVE: &str = "C:";

/// Host facts the provisioning workflow depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    /// `PROCESSOR_ARCHITECTURE`, the (possibly emulated) process architecture
    pub processor_architecture: Option<String>,

    /// `PROCESSOR_ARCHITEW6432`, only set for 32-bit processes on 64-bit Windows
    pub processor_architew6432: Option<String>,

    pub program_files: PathBuf,

    pub program_files_x86: PathBuf,

    /// System drive without trailing separator, e.g. `C:`
    pub system_drive: String,

    /// Directory the installer is downloaded to
    pub temp_dir: PathBuf,

    /// Current executable, used to relaunch elevated
    pub current_exe: Option<PathBuf>,

    /// Working directory relative paths on the command line refer to
    pub current_dir: Option<PathBuf>,

    /// Effective options, forwarded on relaunch
    pub launch: LaunchFlags,
}

/// Options the run was started with, from flags or their environment variables
///
/// An elevated copy inherits neither the working directory nor the
/// environment, so these are passed on explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchFlags {
    pub config: Option<PathBuf>,
    /// Explicit download directory; `None` means the system temp directory
    pub temp_dir: Option<PathBuf>,
    pub no_pause: bool,
    pub verbose: bool,
}

impl LaunchFlags {
    /// Command line reproducing these options, with relative paths resolved
    /// against `base`
    pub fn to_args(&self, base: Option<&Path>) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(config) = &self.config {
            args.push("--config".to_string());
            args.push(absolute(config, base));
        }
        if let Some(temp_dir) = &self.temp_dir {
            args.push("--temp-dir".to_string());
            args.push(absolute(temp_dir, base));
        }
        if self.no_pause {
            args.push("--no-pause".to_string());
        }
        if self.verbose {
            args.push("--verbose".to_string());
        }
        args
    }
}

fn absolute(path: &Path, base: Option<&Path>) -> String {
    match base {
        Some(base) if path.is_relative() => base.join(path).display().to_string(),
        _ => path.display().to_string(),
    }
}

impl HostEnvironment {
    /// Snapshot the environment of the running process
    pub fn from_process(launch: LaunchFlags) -> Self {
        Self {
            processor_architecture: non_empty_var(PROCESSOR_ARCHITECTURE),
            processor_architew6432: non_empty_var(PROCESSOR_ARCHITEW6432),
            program_files: non_empty_var("ProgramFiles")
                .map_or_else(|| PathBuf::from(DEFAULT_PROGRAM_FILES), PathBuf::from),
            program_files_x86: non_empty_var("ProgramFiles(x86)")
                .map_or_else(|| PathBuf::from(DEFAULT_PROGRAM_FILES_X86), PathBuf::from),
            system_drive: non_empty_var("SystemDrive")
                .unwrap_or_else(|| DEFAULT_SYSTEM_DRIVE.to_string()),
            temp_dir: launch.temp_dir.clone().unwrap_or_else(temp_dir_base),
            current_exe: env::current_exe().ok(),
            current_dir: env::current_dir().ok(),
            launch,
        }
    }

    /// Architecture token reported by the OS
    ///
    /// A 32-bit process on 64-bit Windows sees `x86` in `PROCESSOR_ARCHITECTURE`;
    /// the real architecture is then in `PROCESSOR_ARCHITEW6432`, which wins.
    pub fn architecture_token(&self) -> Option<&str> {
        self.processor_architew6432
            .as_deref()
            .or(self.processor_architecture.as_deref())
    }

    /// Root of the system drive, e.g. `C:\`
    pub fn system_root(&self) -> PathBuf {
        PathBuf::from(format!("{}\\", self.system_drive.trim_end_matches('\\')))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns an absolute directory for downloads.
/// Never returns a relative path, so the installer never lands under the
/// current working directory when TEMP/TMPDIR is relative.
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}
