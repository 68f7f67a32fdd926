//! Post-install configuration stages
//!
//! These run whether or not anything was installed, against the resolved
//! install directory. None of them can fail the run: every problem becomes a
//! warning.

use std::path::{Path, PathBuf};

use super::context::ProvisionContext;
use crate::domain::{AccountOutcome, LaunchOutcome, ShareOutcome, Stage};
use crate::runner::Invocation;

/// Start the configuration wizard next to the install directory, without waiting
pub fn launch_config_tool(ctx: &mut ProvisionContext<'_>, install_dir: &Path) -> LaunchOutcome {
    let path = ctx.config.config_tool_path(install_dir);
    launch(ctx, Stage::ConfigureLaunched, "Configuration tool", Invocation::new(&path), path)
}

/// Create the dedicated debugging account
///
/// A failed creation is classified as "already exists" when the account can
/// be queried afterwards.
pub fn create_account(ctx: &mut ProvisionContext<'_>) -> AccountOutcome {
    let account = &ctx.config.settings.account;
    let create = Invocation::new("net")
        .args(["user", account.name.as_str()])
        .secret_arg(account.password.as_str())
        .arg("/add");
    let lookup = Invocation::new("net")
        .args(["user", account.name.as_str()])
        .query();
    let name = account.name.clone();

    let reason = match ctx.runner.run(&create) {
        Ok(output) if output.success() => {
            ctx.reporter.success(&format!("Created account {name}"));
            return AccountOutcome::Created;
        }
        Ok(output) => output.failure_reason(),
        Err(e) => format!("cannot run net: {e}"),
    };

    if ctx.runner.succeeds(&lookup) {
        ctx.warn(
            Stage::AccountCreated,
            format!("Account {name} already exists; keeping it"),
        );
        return AccountOutcome::AlreadyExists;
    }

    ctx.warn(
        Stage::AccountCreated,
        format!("Failed to create account {name}: {reason}"),
    );
    AccountOutcome::Failed(reason)
}

/// Share the system drive with the debugging account unless the share exists
pub fn create_share(ctx: &mut ProvisionContext<'_>) -> ShareOutcome {
    let settings = &ctx.config.settings;
    let share_name = settings.share.name.clone();
    let target = ctx.config.share_path();

    let lookup = Invocation::new("net")
        .args(["share", share_name.as_str()])
        .query();
    if ctx.runner.succeeds(&lookup) {
        ctx.reporter
            .info(&format!("Share {share_name} already exists; leaving it unchanged"));
        return ShareOutcome::AlreadyExists;
    }

    let create = Invocation::new("net").args([
        "share".to_string(),
        format!("{share_name}={}", target.display()),
        format!("/GRANT:{},FULL", settings.account.name),
    ]);

    let reason = match ctx.runner.run(&create) {
        Ok(output) if output.success() => {
            ctx.reporter.success(&format!(
                "Shared {} as {share_name}",
                target.display()
            ));
            return ShareOutcome::Created;
        }
        Ok(output) => output.failure_reason(),
        Err(e) => format!("cannot run net: {e}"),
    };

    ctx.warn(
        Stage::ShareCreated,
        format!("Failed to create share {share_name}: {reason}"),
    );
    ShareOutcome::Failed(reason)
}

/// Start the debugging agent, allowing only the debugging account to connect
pub fn start_agent(ctx: &mut ProvisionContext<'_>, install_dir: &Path) -> LaunchOutcome {
    let settings = &ctx.config.settings;
    let path = ctx.config.agent_path(install_dir);
    let invocation = Invocation::new(&path)
        .arg("/allow")
        .arg(settings.account.name.as_str())
        .args(settings.agent_args.iter().cloned());
    launch(ctx, Stage::AgentStarted, "Remote debugging agent", invocation, path)
}

fn launch(
    ctx: &mut ProvisionContext<'_>,
    stage: Stage,
    what: &str,
    invocation: Invocation,
    path: PathBuf,
) -> LaunchOutcome {
    if !ctx.install_file_present(&path) {
        ctx.warn(stage, format!("{what} not found at {}", path.display()));
        return LaunchOutcome::Missing(path);
    }

    match ctx.runner.spawn(&invocation) {
        Ok(()) => {
            ctx.reporter.success(&format!("Started {}", path.display()));
            LaunchOutcome::Launched(path)
        }
        Err(e) => {
            let reason = e.to_string();
            ctx.warn(
                stage,
                format!("Failed to start {}: {reason}", path.display()),
            );
            LaunchOutcome::Failed { path, reason }
        }
    }
}
