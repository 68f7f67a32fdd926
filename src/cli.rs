//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{FalseyValueParser, Styles, styling::AnsiColor};
use std::path::PathBuf;

/// rdbg-provision - remote debugger provisioning
///
/// Installs the Visual Studio Remote Debugger on this Windows host and starts
/// it for a dedicated debugging account.
#[derive(Parser, Debug)]
#[command(
    name = "rdbg-provision",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Provision the Visual Studio Remote Debugger on this host",
    long_about = "Detects the processor architecture, downloads and silently installs the \
                  matching Remote Tools package unless already installed, creates the VSDebugger \
                  account and the C share, and starts msvsmon.exe for that account. \
                  Requires administrative rights; relaunches itself elevated when needed.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  rdbg-provision                        \x1b[90m# Provision with built-in defaults\x1b[0m\n   \
                  rdbg-provision --dry-run              \x1b[90m# Show what would be done\x1b[0m\n   \
                  rdbg-provision -c provision.yaml      \x1b[90m# Override URLs, paths or account\x1b[0m\n   \
                  rdbg-provision --no-pause -v          \x1b[90m# Unattended, with debug logging\x1b[0m\n"
)]
pub struct Cli {
    /// YAML settings file overriding the built-in defaults
    #[arg(long, short = 'c', value_name = "FILE", env = "RDBG_PROVISION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory the installer is downloaded to (defaults to the system temp directory)
    #[arg(long, value_name = "DIR", env = "RDBG_PROVISION_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Print every action instead of performing it
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Exit without waiting for a key press
    #[arg(
        long,
        env = "RDBG_PROVISION_NO_PAUSE",
        value_parser = FalseyValueParser::new()
    )]
    pub no_pause: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
