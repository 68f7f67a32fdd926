//! Administrative rights check and elevated relaunch
//!
//! `net session` only succeeds for administrators, which makes it a cheap
//! elevation test without linking against the Win32 token APIs. Relaunching
//! goes through PowerShell's `Start-Process -Verb RunAs`, which shows the UAC
//! prompt and fails when the user declines it.

use std::path::Path;

use crate::config::HostEnvironment;
use crate::error::{ProvisionError, Result};
use crate::runner::{CommandRunner, Invocation};

/// How the privilege guard was passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elevation {
    /// Already running with administrative rights; continue
    AlreadyElevated,
    /// An elevated copy was started; this process must exit
    Relaunched,
}

/// Query whether the current process has administrative rights
pub fn is_elevated(runner: &dyn CommandRunner) -> bool {
    runner.succeeds(&Invocation::new("net").arg("session").query())
}

/// Make sure provisioning runs elevated, relaunching if necessary
pub fn ensure_elevated(runner: &dyn CommandRunner, host: &HostEnvironment) -> Result<Elevation> {
    if is_elevated(runner) {
        return Ok(Elevation::AlreadyElevated);
    }

    let exe = host
        .current_exe
        .as_deref()
        .ok_or_else(|| ProvisionError::ElevationRefused {
            reason: "cannot determine the path of the running executable".to_string(),
        })?;

    let relaunch = Invocation::new("powershell").args([
        "-NoProfile".to_string(),
        "-NonInteractive".to_string(),
        "-Command".to_string(),
        relaunch_command(
            exe,
            host.current_dir.as_deref(),
            &host.launch.to_args(host.current_dir.as_deref()),
        ),
    ]);

    match runner.run(&relaunch) {
        Ok(output) if output.success() => Ok(Elevation::Relaunched),
        Ok(output) => Err(ProvisionError::ElevationRefused {
            reason: output.failure_reason(),
        }),
        Err(e) => Err(ProvisionError::ElevationRefused {
            reason: format!("cannot start PowerShell: {e}"),
        }),
    }
}

/// PowerShell command starting `exe` elevated in `working_dir` with `args`
fn relaunch_command(exe: &Path, working_dir: Option<&Path>, args: &[String]) -> String {
    let mut command = format!(
        "Start-Process -FilePath {} -Verb RunAs",
        ps_quote(&exe.display().to_string())
    );
    if let Some(dir) = working_dir {
        command.push_str(" -WorkingDirectory ");
        command.push_str(&ps_quote(&dir.display().to_string()));
    }
    if !args.is_empty() {
        let list = args
            .iter()
            .map(|a| ps_quote(&windows_arg(a)))
            .collect::<Vec<_>>()
            .join(",");
        command.push_str(" -ArgumentList ");
        command.push_str(&list);
    }
    command
}

/// Single-quoted PowerShell string literal
fn ps_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `Start-Process` joins the argument list with spaces, so arguments
/// containing spaces need their own quotes
fn windows_arg(value: &str) -> String {
    if value.contains(' ') {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}
