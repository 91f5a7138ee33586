//! CLI commands for jira-ratchet
//!
//! - **release**: reconcile the release version and mapping, flag it released
//! - **doctor**: read-only connectivity and catalog diagnostics

pub mod doctor;
pub mod release;

pub use doctor::{DoctorOptions, run_doctor};
pub use release::{ReleaseOptions, run_release};
