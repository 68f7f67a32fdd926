//! Runner backed by `std::process::Command`

use std::io;
use std::process::{Command, Stdio};

#[cfg(windows)]
use std::os::windows::process::CommandExt;

use super::{CommandOutput, CommandRunner, Invocation};

#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Starts real processes on the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(invocation: &Invocation) -> Command {
        let mut command = Command::new(invocation.program());
        command.args(invocation.arg_values());
        command
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        log::debug!("Running: {invocation}");
        let mut command = Self::command(invocation);
        #[cfg(windows)]
        {
            if invocation.is_query() {
                command.creation_flags(CREATE_NO_WINDOW);
            }
        }

        let output = command.stdin(Stdio::null()).output()?;
        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        log::debug!("{} exited with {:?}", invocation.program().display(), result.code);
        if !result.stderr.trim().is_empty() {
            log::debug!("stderr: {}", result.stderr.trim());
        }
        Ok(result)
    }

    fn spawn(&self, invocation: &Invocation) -> io::Result<()> {
        log::debug!("Starting: {invocation}");
        let mut command = Self::command(invocation);
        #[cfg(windows)]
        {
            command.creation_flags(CREATE_NEW_PROCESS_GROUP | DETACHED_PROCESS);
        }

        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        log::debug!("Started process {}", child.id());
        Ok(())
    }
}
