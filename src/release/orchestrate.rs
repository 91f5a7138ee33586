//! End-to-end release sequencing with an idempotence gate
//!
//! The orchestrator drives one run: fetch the project, load the snapshot,
//! resolve the release version and its mapping, then flag the mapping as
//! released with today's date — unless the remote state already reflects
//! that, in which case no mutation call is made at all. Any failure aborts
//! the remainder of the sequence; there is no retry and no rollback, which
//! is safe to re-run precisely because of the gate and the
//! existence-check-before-create pattern in the resolvers.

use crate::core::config::ReleaseRequest;
use crate::core::error::{RatchetError, RatchetResult};
use crate::jira::traits::{CatalogReads, CatalogWrites};
use crate::release::resolve::{self, MappingKey};
use crate::release::snapshot::Snapshot;
use serde::Serialize;

/// How one version and its mapping were resolved
#[derive(Debug, Clone, Serialize)]
pub struct VersionOutcome {
  pub name: String,
  pub version_id: u64,
  pub version_created: bool,
  pub mapping_id: u64,
  pub mapping_created: bool,
}

/// Everything a completed run did (or verified was already done)
#[derive(Debug, Serialize)]
pub struct ReleaseOutcome {
  pub project_key: String,
  pub project_id: u64,
  pub component: String,
  pub component_id: u64,
  pub release: VersionOutcome,
  /// True when the idempotence gate skipped the flag/date updates
  pub already_released: bool,
  /// The date written to the mapping, absent when the gate skipped
  pub release_date: Option<String>,
  pub next: Option<VersionOutcome>,
  pub warnings: Vec<String>,
}

/// What a run would do, from the read side only
#[derive(Debug, Serialize)]
pub struct ReleasePreview {
  pub project_key: String,
  pub component: String,
  pub component_id: u64,
  pub release: PlannedStep,
  pub next: Option<PlannedStep>,
  pub warnings: Vec<String>,
}

/// One version/mapping pair as the snapshot sees it. `None` identifiers mean
/// the run would create the resource.
#[derive(Debug, Serialize)]
pub struct PlannedStep {
  pub version: String,
  pub version_id: Option<u64>,
  pub mapping_id: Option<u64>,
  pub already_released: bool,
}

/// Run the full release sequence. `today` is the preformatted release-date
/// stamp; the engine itself never reads a clock.
pub fn execute<C>(client: &C, request: &ReleaseRequest, today: &str) -> RatchetResult<ReleaseOutcome>
where
  C: CatalogReads + CatalogWrites,
{
  let project = client.project(&request.project_key)?;
  let project_id = resolve::numeric_id(&project.id, "project")?;

  let snapshot = Snapshot::load(client, &project.id)?;
  let mut warnings = collision_warnings(&snapshot);

  // Component names are operator input and never auto-created: absence is
  // fatal before any creation call is issued.
  let component = snapshot
    .components
    .get(&request.component_name)
    .ok_or_else(|| RatchetError::MissingComponent {
      name: request.component_name.clone(),
      known: snapshot.components.len(),
    })?;
  let component_id = resolve::numeric_id(&component.id, "component")?;

  let (release_version, version_resolution) =
    resolve::resolve_version(client, &project.id, &request.release_version, &snapshot.versions)?;
  let version_id = resolve::numeric_id(&release_version.id, "version")?;

  let key = MappingKey {
    project_id,
    component_id,
    version_id,
  };
  let (mapping, mapping_resolution, duplicates) = resolve::resolve_mapping(client, key, &snapshot.mappings)?;
  if duplicates > 0 {
    warnings.push(duplicate_mapping_warning(key, mapping.id, duplicates));
  }

  // Idempotence gate: a released mapping gets no further writes.
  let already_released = mapping.released;
  let release_date = if already_released {
    None
  } else {
    client.update_released_flag(mapping.id, true)?;
    client.update_release_date(mapping.id, today)?;
    Some(today.to_string())
  };

  let release = VersionOutcome {
    name: release_version.name,
    version_id,
    version_created: version_resolution.is_created(),
    mapping_id: mapping.id,
    mapping_created: mapping_resolution.is_created(),
  };

  // The next version is only prepared, never released. Both resolutions run
  // against the original snapshot; nothing is re-fetched.
  let mut next = None;
  if let Some(next_name) = next_version_to_prepare(request) {
    let (next_version, next_resolution) = resolve::resolve_version(client, &project.id, next_name, &snapshot.versions)?;
    let next_version_id = resolve::numeric_id(&next_version.id, "version")?;

    let next_key = MappingKey {
      version_id: next_version_id,
      ..key
    };
    let (next_mapping, next_mapping_resolution, next_duplicates) =
      resolve::resolve_mapping(client, next_key, &snapshot.mappings)?;
    if next_duplicates > 0 {
      warnings.push(duplicate_mapping_warning(next_key, next_mapping.id, next_duplicates));
    }

    next = Some(VersionOutcome {
      name: next_version.name,
      version_id: next_version_id,
      version_created: next_resolution.is_created(),
      mapping_id: next_mapping.id,
      mapping_created: next_mapping_resolution.is_created(),
    });
  }

  Ok(ReleaseOutcome {
    project_key: request.project_key.clone(),
    project_id,
    component: request.component_name.clone(),
    component_id,
    release,
    already_released,
    release_date,
    next,
    warnings,
  })
}

/// Report what `execute` would do without issuing a single mutation call.
pub fn preview<C>(client: &C, request: &ReleaseRequest) -> RatchetResult<ReleasePreview>
where
  C: CatalogReads,
{
  let project = client.project(&request.project_key)?;
  let project_id = resolve::numeric_id(&project.id, "project")?;

  let snapshot = Snapshot::load(client, &project.id)?;
  let warnings = collision_warnings(&snapshot);

  let component = snapshot
    .components
    .get(&request.component_name)
    .ok_or_else(|| RatchetError::MissingComponent {
      name: request.component_name.clone(),
      known: snapshot.components.len(),
    })?;
  let component_id = resolve::numeric_id(&component.id, "component")?;

  let release = plan_step(&snapshot, project_id, component_id, &request.release_version)?;
  let next = match next_version_to_prepare(request) {
    Some(next_name) => Some(plan_step(&snapshot, project_id, component_id, next_name)?),
    None => None,
  };

  Ok(ReleasePreview {
    project_key: request.project_key.clone(),
    component: request.component_name.clone(),
    component_id,
    release,
    next,
    warnings,
  })
}

fn plan_step(snapshot: &Snapshot, project_id: u64, component_id: u64, version_name: &str) -> RatchetResult<PlannedStep> {
  let version = snapshot.versions.get(version_name);
  let version_id = match version {
    Some(v) => Some(resolve::numeric_id(&v.id, "version")?),
    None => None,
  };

  // Without an existing version id there is nothing to match a mapping on.
  let mapping = version_id.and_then(|version_id| {
    let key = MappingKey {
      project_id,
      component_id,
      version_id,
    };
    resolve::find_mapping(&snapshot.mappings, key).0
  });

  Ok(PlannedStep {
    version: version_name.to_string(),
    version_id,
    mapping_id: mapping.map(|m| m.id),
    already_released: mapping.is_some_and(|m| m.released),
  })
}

/// The next branch runs only when a next version was supplied and still
/// differs from the release version after `-SNAPSHOT` stripping.
fn next_version_to_prepare(request: &ReleaseRequest) -> Option<&str> {
  request
    .next_version
    .as_deref()
    .filter(|next| *next != request.release_version)
}

fn collision_warnings(snapshot: &Snapshot) -> Vec<String> {
  snapshot
    .collisions
    .iter()
    .map(|name| format!("duplicate {} in project catalog, last one wins", name))
    .collect()
}

fn duplicate_mapping_warning(key: MappingKey, chosen: u64, extra: usize) -> String {
  format!(
    "{} extra mapping(s) match triple {}/{}/{}, using mapping {}",
    extra, key.project_id, key.component_id, key.version_id, chosen
  )
}
