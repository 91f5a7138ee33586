//! Wire types for the JIRA core REST API and the component/version mapping
//! add-on
//!
//! Only the four resource kinds release bookkeeping touches are modeled.
//! Identifiers from the core API arrive as decimal strings; the mapping
//! add-on reports them as integers. Normalization to `u64` happens in the
//! reconciliation engine, not here.

use serde::{Deserialize, Serialize};

/// A JIRA project, fetched once per run by key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
  pub id: String,
  #[serde(default)]
  pub key: String,
  #[serde(default)]
  pub name: String,
}

/// A project component. Name is the case-sensitive lookup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub description: String,
}

/// A project version. Name is the natural key within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub project: String,
  #[serde(default)]
  pub project_id: i64,
  #[serde(default)]
  pub archived: bool,
  #[serde(default)]
  pub released: bool,
}

/// A mapping record tying one project, one component, and one version
/// together. The triple never changes after creation; only `released` and
/// `release_date_str` mutate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
  pub id: u64,
  pub project_id: u64,
  #[serde(default)]
  pub project_key: String,
  #[serde(default)]
  pub project_name: String,
  pub component_id: u64,
  pub version_id: u64,
  #[serde(default)]
  pub component_name: String,
  #[serde(default)]
  pub version_name: String,
  #[serde(default)]
  pub released: bool,
  #[serde(default)]
  pub release_date_str: String,
}

impl Mapping {
  /// A freshly created mapping as the add-on leaves it: identifier assigned,
  /// triple set, not yet released.
  pub fn created(id: u64, project_id: u64, component_id: u64, version_id: u64) -> Self {
    Mapping {
      id,
      project_id,
      project_key: String::new(),
      project_name: String::new(),
      component_id,
      version_id,
      component_name: String::new(),
      version_name: String::new(),
      released: false,
      release_date_str: String::new(),
    }
  }
}
