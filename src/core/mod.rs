//! Core building blocks shared by every command
//!
//! - **config**: layered configuration (flags, environment, ratchet.toml) with
//!   batch input validation
//! - **error**: error types with contextual help messages and exit codes
//! - **naming**: pure helpers for job-name derivation and the release-date stamp

pub mod config;
pub mod error;
pub mod naming;
