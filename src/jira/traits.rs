//! Capability traits the reconciliation engine consumes
//!
//! The remote catalog is split into disjoint read and write capabilities so
//! the resolvers can be tested against minimal fakes implementing only the
//! methods they call. `RestClient` implements both.

use crate::core::error::RemoteResult;
use crate::jira::types::{Component, Mapping, Project, Version};

/// Read-side catalog operations. One fetch per collection per run; the
/// engine never refreshes a snapshot mid-run.
pub trait CatalogReads {
  /// Fetch a project by its key, e.g. `PLAT`
  fn project(&self, key: &str) -> RemoteResult<Project>;

  /// Fetch all versions of a project
  fn versions(&self, project_id: &str) -> RemoteResult<Vec<Version>>;

  /// Fetch all components of a project
  fn components(&self, project_id: &str) -> RemoteResult<Vec<Component>>;

  /// Fetch all mappings, across all projects
  fn mappings(&self) -> RemoteResult<Vec<Mapping>>;
}

/// Write-side catalog operations
pub trait CatalogWrites {
  /// Create a version with the given name; returns it as reported by JIRA
  fn create_version(&self, project_id: &str, name: &str) -> RemoteResult<Version>;

  /// Create a mapping for the triple; the returned mapping has at minimum
  /// its identifier populated and `released` false
  fn create_mapping(&self, project_id: u64, component_id: u64, version_id: u64) -> RemoteResult<Mapping>;

  /// Set a mapping's released flag
  fn update_released_flag(&self, mapping_id: u64, released: bool) -> RemoteResult<()>;

  /// Set a mapping's release date, formatted as `16/Feb/14`
  fn update_release_date(&self, mapping_id: u64, date: &str) -> RemoteResult<()>;
}
