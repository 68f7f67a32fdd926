//! Provision operation submodules
//!
//! - context: shared run state and injected capabilities
//! - install: download and silent install stages
//! - configure: configuration tool, account, share and agent stages
//! - orchestrator: the pipeline tying the stages together

pub mod configure;
pub mod context;
pub mod install;
pub mod orchestrator;

pub use orchestrator::{ProvisionOperation, ProvisionOptions, ProvisionReport, RunOutcome};
