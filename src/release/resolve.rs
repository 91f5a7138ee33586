//! Get-or-create resolution for versions and mappings
//!
//! Both resolvers trust the snapshot as of the moment it was read: a hit
//! makes zero remote calls, a miss makes exactly one creation call and
//! returns its result verbatim. A concurrent actor creating the same
//! resource between read and create is an accepted race, not retried.

use crate::core::error::{RemoteError, RemoteResult};
use crate::jira::traits::CatalogWrites;
use crate::jira::types::{Mapping, Version};
use std::collections::{BTreeMap, HashMap};

/// Whether a resolution found the resource or had to create it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
  Reused,
  Created,
}

impl Resolution {
  pub fn is_created(self) -> bool {
    self == Resolution::Created
  }
}

/// The identifying triple of a mapping, normalized to integers so matching
/// cannot be confused by leading zeros or formatting differences in the
/// decimal-string ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingKey {
  pub project_id: u64,
  pub component_id: u64,
  pub version_id: u64,
}

impl MappingKey {
  pub fn matches(&self, mapping: &Mapping) -> bool {
    mapping.project_id == self.project_id
      && mapping.component_id == self.component_id
      && mapping.version_id == self.version_id
  }
}

/// Parse a decimal-string identifier from the core API, naming the resource
/// on failure.
pub fn numeric_id(raw: &str, what: &str) -> RemoteResult<u64> {
  raw
    .trim()
    .parse()
    .map_err(|_| RemoteError::decode(format!("reading {} id", what), format!("'{}' is not numeric", raw)))
}

/// Return the existing version of that name, or create it.
pub fn resolve_version(
  writes: &dyn CatalogWrites,
  project_id: &str,
  desired_name: &str,
  existing: &HashMap<String, Version>,
) -> RemoteResult<(Version, Resolution)> {
  if let Some(version) = existing.get(desired_name) {
    return Ok((version.clone(), Resolution::Reused));
  }

  let version = writes.create_version(project_id, desired_name)?;
  Ok((version, Resolution::Created))
}

/// Scan the id-ordered snapshot for the triple. Returns the first match
/// (lowest mapping id — the documented tie-break, not an error) and how many
/// further mappings also matched.
pub fn find_mapping(mappings: &BTreeMap<u64, Mapping>, key: MappingKey) -> (Option<&Mapping>, usize) {
  let mut matches = mappings.values().filter(|m| key.matches(m));
  let first = matches.next();
  (first, matches.count())
}

/// Return the existing mapping for the triple, or create one. The creation
/// call populates at minimum the new identifier; `released` defaults to
/// false. The final count reports remote-side duplicates for the caller to
/// warn about.
pub fn resolve_mapping(
  writes: &dyn CatalogWrites,
  key: MappingKey,
  existing: &BTreeMap<u64, Mapping>,
) -> RemoteResult<(Mapping, Resolution, usize)> {
  let (found, duplicates) = find_mapping(existing, key);
  if let Some(mapping) = found {
    return Ok((mapping.clone(), Resolution::Reused, duplicates));
  }

  let mapping = writes.create_mapping(key.project_id, key.component_id, key.version_id)?;
  Ok((mapping, Resolution::Created, 0))
}
