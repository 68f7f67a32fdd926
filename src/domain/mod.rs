//! Domain models for rdbg-provision
//!
//! Plain values describing what a provisioning run detected and did. They
//! carry no I/O beyond the filesystem checks of the installation probe.

pub mod architecture;
pub mod outcome;
pub mod probe;

pub use architecture::{Architecture, ArchitectureSelection};
pub use outcome::{
    AccountOutcome, DownloadArtifact, DownloadOutcome, InstallOutcome, InstallerExit,
    LaunchOutcome, ShareOutcome, Stage, Warning,
};
pub use probe::InstallationProbe;
