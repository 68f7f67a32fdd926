//! Test fixtures and utilities for reducing test setup duplication.
//!
//! This module provides:
//! - scratch directories and fake remote debugger installs
//! - [`RecordingRunner`], a scripted [`CommandRunner`] that records every call
//! - [`FakeDownloader`], a [`Downloader`] that writes a fixed body or fails
//! - [`serve_once`], a one-shot local HTTP server for the real downloader
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{RecordingRunner, create_temp_dir};
//!
//! #[test]
//! fn my_test() {
//!     let temp = create_temp_dir();
//!     let runner = RecordingRunner::new()
//!         .respond("net share C", 2)
//!         .respond_prefix("net user VSDebugger", 0);
//!     // ... run code under test with &runner ...
//!     assert!(runner.ran("net share C="));
//! }
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::fs;
use std::io::{self, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::{HostEnvironment, LaunchFlags};
use crate::download::Downloader;
use crate::error::{ProvisionError, Result};
use crate::runner::{CommandOutput, CommandRunner, Invocation};

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::config::host::temp_dir_base()).expect("Failed to create temp directory")
}

/// Host environment with Windows-style paths; nothing on disk
#[must_use]
pub fn host_environment(architecture: &str) -> HostEnvironment {
    HostEnvironment {
        processor_architecture: Some(architecture.to_string()),
        processor_architew6432: None,
        program_files: PathBuf::from("C:\\Program Files"),
        program_files_x86: PathBuf::from("C:\\Program Files (x86)"),
        system_drive: "C:".to_string(),
        temp_dir: PathBuf::from("C:\\Windows\\Temp"),
        current_exe: Some(PathBuf::from("C:\\Tools\\rdbg-provision.exe")),
        current_dir: Some(PathBuf::from("C:\\Users\\dev")),
        launch: LaunchFlags::default(),
    }
}

/// Host environment whose program files and temp directories live under `root`
#[must_use]
pub fn host_in(root: &Path, architecture: &str) -> HostEnvironment {
    let temp_dir = root.join("Temp");
    fs::create_dir_all(&temp_dir).expect("Failed to create temp dir");
    HostEnvironment {
        program_files: root.join("Program Files"),
        program_files_x86: root.join("Program Files (x86)"),
        temp_dir,
        ..host_environment(architecture)
    }
}

/// Lay out a remote debugger install: `<dir>/x64/msvsmon.exe` and
/// `<dir>/../rdbgwiz.exe`
pub fn fake_install(dir: &Path) {
    fs::create_dir_all(dir.join("x64")).expect("Failed to create install dir");
    fs::write(dir.join("x64").join("msvsmon.exe"), b"MZ").expect("Failed to write agent");
    if let Some(parent) = dir.parent() {
        fs::write(parent.join("rdbgwiz.exe"), b"MZ").expect("Failed to write config tool");
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Exact(String),
    Prefix(String),
}

impl Matcher {
    fn matches(&self, command: &str) -> bool {
        match self {
            Matcher::Exact(expected) => command == expected,
            Matcher::Prefix(prefix) => command.starts_with(prefix.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
enum Response {
    Code(Option<i32>),
    Fail(io::ErrorKind),
}

/// A recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Unmasked command line
    pub command: String,
    /// Started without waiting
    pub spawned: bool,
}

/// Scripted command runner
///
/// Unscripted commands exit with code 0. When several rules match, the one
/// registered last wins.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    responses: Vec<(Matcher, Response)>,
    side_effects: Vec<(Matcher, SideEffect)>,
    calls: RefCell<Vec<Call>>,
}

struct SideEffect(Box<dyn Fn()>);

impl std::fmt::Debug for SideEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SideEffect")
    }
}

impl RecordingRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit with `code` for exactly this command line
    #[must_use]
    pub fn respond(mut self, command: &str, code: i32) -> Self {
        self.responses
            .push((Matcher::Exact(command.to_string()), Response::Code(Some(code))));
        self
    }

    /// Exit with `code` for command lines starting with `prefix`
    #[must_use]
    pub fn respond_prefix(mut self, prefix: &str, code: i32) -> Self {
        self.responses
            .push((Matcher::Prefix(prefix.to_string()), Response::Code(Some(code))));
        self
    }

    /// Terminate without an exit code for command lines starting with `prefix`
    #[must_use]
    pub fn terminate_prefix(mut self, prefix: &str) -> Self {
        self.responses
            .push((Matcher::Prefix(prefix.to_string()), Response::Code(None)));
        self
    }

    /// Fail to start command lines starting with `prefix`
    #[must_use]
    pub fn fail_prefix(mut self, prefix: &str) -> Self {
        self.responses.push((
            Matcher::Prefix(prefix.to_string()),
            Response::Fail(io::ErrorKind::PermissionDenied),
        ));
        self
    }

    /// Run `effect` whenever a command line starting with `prefix` runs
    #[must_use]
    pub fn on_run(mut self, prefix: &str, effect: impl Fn() + 'static) -> Self {
        self.side_effects
            .push((Matcher::Prefix(prefix.to_string()), SideEffect(Box::new(effect))));
        self
    }

    /// All recorded command lines, in order
    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.command.clone()).collect()
    }

    /// Command lines that were started without waiting
    pub fn spawned(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.spawned)
            .map(|c| c.command.clone())
            .collect()
    }

    /// Whether any recorded command line starts with `prefix`
    pub fn ran(&self, prefix: &str) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|c| c.command.starts_with(prefix))
    }

    fn record(&self, invocation: &Invocation, spawned: bool) -> Response {
        let command = invocation.raw_command_line();
        self.calls.borrow_mut().push(Call {
            command: command.clone(),
            spawned,
        });
        self.responses
            .iter()
            .rev()
            .find(|(matcher, _)| matcher.matches(&command))
            .map_or(Response::Code(Some(0)), |(_, response)| response.clone())
    }

    fn apply_side_effects(&self, invocation: &Invocation) {
        let command = invocation.raw_command_line();
        for (matcher, effect) in &self.side_effects {
            if matcher.matches(&command) {
                (effect.0)();
            }
        }
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        match self.record(invocation, false) {
            Response::Code(code) => {
                self.apply_side_effects(invocation);
                Ok(CommandOutput {
                    code,
                    ..CommandOutput::default()
                })
            }
            Response::Fail(kind) => Err(io::Error::new(kind, "scripted failure")),
        }
    }

    fn spawn(&self, invocation: &Invocation) -> io::Result<()> {
        match self.record(invocation, true) {
            Response::Code(_) => Ok(()),
            Response::Fail(kind) => Err(io::Error::new(kind, "scripted failure")),
        }
    }
}

/// Downloader writing a fixed body, or failing when built with [`FakeDownloader::failing`]
#[derive(Debug, Default)]
pub struct FakeDownloader {
    body: Option<Vec<u8>>,
    calls: RefCell<Vec<(String, PathBuf)>>,
}

impl FakeDownloader {
    #[must_use]
    pub fn new(body: &[u8]) -> Self {
        Self {
            body: Some(body.to_vec()),
            calls: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self::default()
    }

    /// URLs requested so far
    pub fn urls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(url, _)| url.clone()).collect()
    }
}

impl Downloader for FakeDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), destination.to_path_buf()));
        match &self.body {
            Some(body) => {
                fs::write(destination, body)?;
                Ok(body.len() as u64)
            }
            None => Err(ProvisionError::DownloadFailed {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

/// Serve a single HTTP response on loopback; returns the URL to fetch
pub fn serve_once(status: &str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read test server address");
    let status = status.to_string();

    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buffer) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buffer[..n]),
            }
        }
        let header = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(header.as_bytes());
        let _ = stream.write_all(&body);
        let _ = stream.flush();
    });

    format!("http://{addr}/RemoteTools.exe")
}
