//! One-shot in-memory snapshot of the remote catalog
//!
//! A snapshot is read once at the start of a run and never refreshed; every
//! resolution decision is made against it. It is not a cache — there is no
//! eviction or invalidation, only read-then-decide.

use crate::core::error::RemoteResult;
use crate::jira::traits::CatalogReads;
use crate::jira::types::{Component, Mapping, Version};
use std::collections::{BTreeMap, HashMap};

/// Indexed catalog state for one reconciliation run
#[derive(Debug, Default)]
pub struct Snapshot {
  /// Versions of the project, keyed by name
  pub versions: HashMap<String, Version>,
  /// Components of the project, keyed by name (case-sensitive)
  pub components: HashMap<String, Component>,
  /// All mappings across all projects, ordered by id so triple matching is
  /// deterministic (lowest id wins)
  pub mappings: BTreeMap<u64, Mapping>,
  /// Names that collided while indexing. Duplicates collapse
  /// last-write-wins; the run surfaces them as warnings since they violate
  /// the per-project uniqueness the remote is supposed to uphold.
  pub collisions: Vec<String>,
}

impl Snapshot {
  /// Fetch and index versions, components, and mappings — one fetch each.
  pub fn load(catalog: &dyn CatalogReads, project_id: &str) -> RemoteResult<Self> {
    let versions = catalog.versions(project_id)?;
    let components = catalog.components(project_id)?;
    let mappings = catalog.mappings()?;
    Ok(Self::index(versions, components, mappings))
  }

  /// Build the lookup indexes from already-fetched lists.
  pub fn index(versions: Vec<Version>, components: Vec<Component>, mappings: Vec<Mapping>) -> Self {
    let mut snapshot = Snapshot::default();

    for version in versions {
      let name = version.name.clone();
      if snapshot.versions.insert(name.clone(), version).is_some() {
        snapshot.collisions.push(format!("version '{}'", name));
      }
    }

    for component in components {
      let name = component.name.clone();
      if snapshot.components.insert(name.clone(), component).is_some() {
        snapshot.collisions.push(format!("component '{}'", name));
      }
    }

    for mapping in mappings {
      snapshot.mappings.insert(mapping.id, mapping);
    }

    snapshot
  }
}
