//! The reconciliation engine
//!
//! For each resource a run needs — the release version, its mapping, and
//! optionally a next version with its mapping — decide whether a remote
//! equivalent already exists and create it only if not, then apply the
//! released-flag and release-date transitions exactly once.
//!
//! Ordering is fixed: version before mapping, mapping before flag/date
//! updates, release branch before the next-version branch. The remote
//! catalog is the sole source of truth; nothing is persisted locally.

pub mod orchestrate;
pub mod resolve;
pub mod snapshot;

pub use orchestrate::{ReleaseOutcome, ReleasePreview, execute, preview};
pub use resolve::{MappingKey, Resolution, resolve_mapping, resolve_version};
pub use snapshot::Snapshot;
