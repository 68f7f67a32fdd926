//! Command implementations for rdbg-provision

pub mod provision;
