//! External command execution
//!
//! Every program the workflow starts (elevation check and relaunch, the
//! installer, `net user`, `net share`, the configuration tool and the agent)
//! is described as an [`Invocation`] and handed to a [`CommandRunner`]. The
//! decision logic never touches `std::process` directly.

pub mod dry_run;
pub mod system;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

pub use dry_run::DryRunRunner;
pub use system::SystemRunner;

const MASK: &str = "********";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Arg {
    value: String,
    secret: bool,
}

/// A program plus its arguments
///
/// Secret arguments are masked when the invocation is displayed or logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<Arg>,
    query: bool,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            query: false,
        }
    }

    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg {
            value: value.into(),
            secret: false,
        });
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self = self.arg(value);
        }
        self
    }

    /// Add an argument that must never be printed
    #[must_use]
    pub fn secret_arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg {
            value: value.into(),
            secret: true,
        });
        self
    }

    /// Mark as a read-only status query (no side effects on the host)
    #[must_use]
    pub fn query(mut self) -> Self {
        self.query = true;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Raw argument values, secrets included
    pub fn arg_values(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|a| a.value.as_str())
    }

    pub fn is_query(&self) -> bool {
        self.query
    }

    /// Unmasked command line, for matching in tests
    #[cfg(test)]
    pub fn raw_command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().map(|a| a.value.clone()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program.display().to_string()))?;
        for arg in &self.args {
            if arg.secret {
                write!(f, " {MASK}")?;
            } else {
                write!(f, " {}", quote(&arg.value))?;
            }
        }
        Ok(())
    }
}

fn quote(value: &str) -> String {
    if value.contains(' ') {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

/// Exit status and captured output of a finished program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was terminated without one
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Short human-readable reason for a failure
    pub fn failure_reason(&self) -> String {
        let message = self
            .stderr
            .lines()
            .chain(self.stdout.lines())
            .map(str::trim)
            .find(|line| !line.is_empty());
        match (message, self.code) {
            (Some(message), Some(code)) => format!("exit code {code}: {message}"),
            (Some(message), None) => message.to_string(),
            (None, Some(code)) => format!("exit code {code}"),
            (None, None) => "terminated without an exit code".to_string(),
        }
    }
}

/// Capability to start external programs
pub trait CommandRunner {
    /// Run a program to completion
    ///
    /// `Err` means the program could not be started at all.
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;

    /// Start a program without waiting for it
    fn spawn(&self, invocation: &Invocation) -> io::Result<()>;

    /// Run a program and report whether it exited with code 0
    fn succeeds(&self, invocation: &Invocation) -> bool {
        match self.run(invocation) {
            Ok(output) => output.success(),
            Err(e) => {
                log::debug!("{invocation} could not be started: {e}");
                false
            }
        }
    }
}
