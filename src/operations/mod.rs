//! Operations module for provisioning the remote debugger
//!
//! ProvisionOperation runs the complete workflow. It coordinates with:
//! - Elevation: administrative rights check and relaunch
//! - Domain: architecture selection and installation probe
//! - Download: fetching the installer (from download module)
//! - Runner: installer, account, share and agent commands (from runner module)
//! - Cleanup: removal of the downloaded installer (from cleanup module)
//! - UI: status output (from ui module)

pub mod provision;

pub use provision::{ProvisionOperation, ProvisionOptions, RunOutcome};
