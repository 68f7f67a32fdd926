//! rdbg-provision - remote debugger provisioning
//!
//! Installs and starts the Visual Studio Remote Debugger on a Windows host:
//! detects the processor architecture, downloads and silently installs the
//! matching Remote Tools package, creates a dedicated debugging account and a
//! share for it, and starts the debugging agent restricted to that account.

use clap::Parser;

mod cleanup;
mod cli;
mod commands;
mod config;
mod domain;
mod download;
mod elevation;
mod error;
mod logging;
mod operations;
mod runner;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::Cli;
use operations::RunOutcome;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = commands::provision::run(&cli);

    let code = match result {
        // The elevated copy owns the console from here on
        Ok(RunOutcome::Relaunched) => return,
        Ok(RunOutcome::Completed(_)) => 0,
        Err(e) => {
            ui::Reporter::default().error(&e.to_string());
            if let Some(help) = miette::Diagnostic::help(&e) {
                eprintln!("  {help}");
            }
            e.exit_code()
        }
    };

    ui::pause_for_key(!cli.no_pause);
    std::process::exit(code);
}
