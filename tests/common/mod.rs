//! Common test utilities for rdbg-provision integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A fake Windows host laid out in a temporary directory
///
/// `ProgramFiles`, `ProgramFiles(x86)` and the download directory all point
/// inside the temporary directory, so runs never touch the real system.
pub struct TestHost {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Stand-in for `ProgramFiles`
    pub program_files: PathBuf,
    /// Stand-in for `ProgramFiles(x86)`
    pub program_files_x86: PathBuf,
    /// Download directory passed through `RDBG_PROVISION_TEMP_DIR`
    pub download_dir: PathBuf,
}

impl TestHost {
    /// Create a new test host
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let program_files = temp.path().join("Program Files");
        let program_files_x86 = temp.path().join("Program Files (x86)");
        let download_dir = temp.path().join("Temp");
        std::fs::create_dir_all(&download_dir).expect("Failed to create download directory");
        Self {
            temp,
            program_files,
            program_files_x86,
            download_dir,
        }
    }

    /// Default install directory of the standalone remote tools
    pub fn remote_tools_dir(&self) -> PathBuf {
        self.program_files
            .join("Microsoft Visual Studio 17.0")
            .join("Common7")
            .join("IDE")
            .join("Remote Debugger")
    }

    /// Install directory of a Visual Studio edition
    #[allow(dead_code)]
    pub fn visual_studio_dir(&self, root: &Path, year: &str, edition: &str) -> PathBuf {
        root.join("Microsoft Visual Studio")
            .join(year)
            .join(edition)
            .join("Common7")
            .join("IDE")
            .join("Remote Debugger")
    }

    /// Lay out a remote debugger install in `dir`
    #[allow(dead_code)]
    pub fn install_at(&self, dir: &Path) {
        std::fs::create_dir_all(dir.join("x64")).expect("Failed to create install directory");
        std::fs::write(dir.join("x64").join("msvsmon.exe"), b"MZ").expect("Failed to write agent");
    }

    /// Write a file in the download directory
    #[allow(dead_code)]
    pub fn write_download(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.download_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write a settings file
    #[allow(dead_code)]
    pub fn write_settings(&self, content: &str) -> PathBuf {
        let path = self.temp.path().join("provision.yaml");
        std::fs::write(&path, content).expect("Failed to write settings");
        path
    }

    /// Dry-run command for this host reporting `architecture`
    pub fn dry_run(&self, architecture: &str) -> Command {
        let mut cmd = rdbg_provision_cmd();
        cmd.env("PROCESSOR_ARCHITECTURE", architecture)
            .env_remove("PROCESSOR_ARCHITEW6432")
            .env_remove("RDBG_PROVISION_CONFIG")
            .env("ProgramFiles", &self.program_files)
            .env("ProgramFiles(x86)", &self.program_files_x86)
            .env("SystemDrive", "C:")
            .env("RDBG_PROVISION_TEMP_DIR", &self.download_dir)
            .env("RDBG_PROVISION_NO_PAUSE", "1")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .arg("--dry-run");
        cmd
    }
}

/// Command for the rdbg-provision binary
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn rdbg_provision_cmd() -> Command {
    Command::cargo_bin("rdbg-provision").expect("binary is built for integration tests")
}
