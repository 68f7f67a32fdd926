//! Diagnostic logging
//!
//! Status output for the user goes through [`crate::ui::Reporter`]; the `log`
//! macros carry debugging detail such as every external command line (secrets
//! masked). `RUST_LOG` takes precedence over the level chosen here.

use log::LevelFilter;

/// Install the global logger; later calls are no-ops
pub fn init(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(default_level(verbose))
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env();
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}
