//! Configuration for jira-ratchet
//!
//! Settings come from three layers, highest precedence first: command-line
//! flags, `JIRA_USERNAME`/`JIRA_PASSWORD` environment variables (credentials
//! only), and an optional config file searched in order: ratchet.toml,
//! .ratchet.toml, .config/ratchet.toml. Validation collects every violation
//! before reporting, so operators fix their invocation in one pass.

use crate::core::error::{ConfigError, RatchetError, RatchetResult};
use crate::core::naming;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default per-call timeout for remote operations, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Optional file-provided defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
  pub base_url: Option<String>,
  pub username: Option<String>,
  pub password: Option<String>,
  pub project_key: Option<String>,
  pub timeout_secs: Option<u64>,
}

impl FileConfig {
  /// Find config file in search order: ratchet.toml, .ratchet.toml, .config/ratchet.toml
  pub fn find_config_path(dir: &Path) -> Option<PathBuf> {
    let candidates = vec![
      dir.join("ratchet.toml"),
      dir.join(".ratchet.toml"),
      dir.join(".config").join("ratchet.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load file defaults from the given directory; a missing file is not an
  /// error, it simply contributes nothing.
  pub fn load(dir: &Path) -> RatchetResult<Self> {
    let Some(config_path) = Self::find_config_path(dir) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)?;
    let config: FileConfig = toml_edit::de::from_str(&content).map_err(|e| {
      RatchetError::Config(ConfigError::Parse {
        path: config_path.clone(),
        message: e.to_string(),
      })
    })?;

    Ok(config)
  }
}

/// Connection flags as supplied on the command line (all optional; missing
/// values fall back to environment and file layers)
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConnectionArgs {
  /// JIRA base REST URL, e.g. https://jira.example.com
  #[arg(long)]
  pub base_url: Option<String>,

  /// JIRA admin user
  #[arg(long)]
  pub username: Option<String>,

  /// JIRA admin password
  #[arg(long)]
  pub password: Option<String>,

  /// Per-call timeout in seconds
  #[arg(long)]
  pub timeout_secs: Option<u64>,
}

/// Resolved connection settings, built once at startup
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
  pub base_url: Url,
  pub username: String,
  pub password: String,
  pub timeout: Duration,
}

/// One validated release run: which mapping to reconcile and release
#[derive(Debug, Clone)]
pub struct ReleaseRequest {
  pub project_key: String,
  pub component_name: String,
  pub release_version: String,
  /// Next development version, `-SNAPSHOT` already stripped. May still equal
  /// the release version after stripping; the orchestrator skips it then.
  pub next_version: Option<String>,
}

/// Release inputs as supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ReleaseArgs {
  pub project_key: Option<String>,
  pub release_version: Option<String>,
  pub component: Option<String>,
  pub job_name: Option<String>,
  pub next_version: Option<String>,
}

/// Merge connection layers and collect violations for anything missing or
/// malformed. Returns `None` when any violation was recorded.
fn resolve_connection(cli: &ConnectionArgs, file: &FileConfig, violations: &mut Vec<String>) -> Option<ConnectionSettings> {
  let base_url = cli.base_url.clone().or_else(|| file.base_url.clone());
  let username = cli
    .username
    .clone()
    .or_else(|| std::env::var("JIRA_USERNAME").ok())
    .or_else(|| file.username.clone());
  let password = cli
    .password
    .clone()
    .or_else(|| std::env::var("JIRA_PASSWORD").ok())
    .or_else(|| file.password.clone());
  let timeout_secs = cli.timeout_secs.or(file.timeout_secs).unwrap_or(DEFAULT_TIMEOUT_SECS);

  let base_url = match base_url {
    Some(raw) => match Url::parse(&raw) {
      Ok(url) => Some(url),
      Err(e) => {
        violations.push(format!("base-url '{}' is not a valid URL: {}", raw, e));
        None
      }
    },
    None => {
      violations.push("base-url must be provided".to_string());
      None
    }
  };
  if username.is_none() {
    violations.push("username must be provided".to_string());
  }
  if password.is_none() {
    violations.push("password must be provided".to_string());
  }

  match (base_url, username, password) {
    (Some(base_url), Some(username), Some(password)) => Some(ConnectionSettings {
      base_url,
      username,
      password,
      timeout: Duration::from_secs(timeout_secs),
    }),
    _ => None,
  }
}

/// Validate and merge everything a release run needs. Every violation is
/// collected before reporting; no remote call happens past this point unless
/// the batch is empty.
pub fn resolve_release(
  conn: &ConnectionArgs,
  args: &ReleaseArgs,
  file: &FileConfig,
) -> RatchetResult<(ConnectionSettings, ReleaseRequest)> {
  let mut violations = Vec::new();

  let settings = resolve_connection(conn, file, &mut violations);

  let project_key = args.project_key.clone().or_else(|| file.project_key.clone());
  if project_key.is_none() {
    violations.push("project-key must be provided".to_string());
  }

  let release_version = match args.release_version.as_deref() {
    Some(name) if !name.is_empty() => Some(name.to_string()),
    _ => {
      violations.push("release-version must be provided".to_string());
      None
    }
  };

  let component_name = match (args.component.as_deref(), args.job_name.as_deref()) {
    (Some(_), Some(_)) => {
      violations.push("only one of component or job-name may be provided".to_string());
      None
    }
    (None, None) => {
      violations.push("one of component or job-name must be provided".to_string());
      None
    }
    (Some(name), None) => Some(name.to_string()),
    (None, Some(job_name)) => match naming::component_from_job_name(job_name) {
      Some(name) => Some(name),
      None => {
        violations.push(format!(
          "cannot derive a component from job-name '{}' (expected prefix-component-suffix)",
          job_name
        ));
        None
      }
    },
  };

  let next_version = match args.next_version.as_deref() {
    None => None,
    Some(next) => {
      if Some(next) == args.release_version.as_deref() {
        violations.push("release-version and next-version must be different".to_string());
      }
      let stripped = naming::strip_snapshot_suffix(next);
      if stripped.is_empty() {
        violations.push(format!("next-version '{}' is empty after stripping -SNAPSHOT", next));
        None
      } else {
        Some(stripped.to_string())
      }
    }
  };

  // Every None above recorded a violation, so the happy arm is exhaustive.
  match (settings, project_key, component_name, release_version) {
    (Some(settings), Some(project_key), Some(component_name), Some(release_version)) if violations.is_empty() => Ok((
      settings,
      ReleaseRequest {
        project_key,
        component_name,
        release_version,
        next_version,
      },
    )),
    _ => Err(RatchetError::Config(ConfigError::Invalid { violations })),
  }
}

/// Validate and merge what the doctor command needs: a connection and a
/// project key. The component to probe for stays optional.
pub fn resolve_doctor(
  conn: &ConnectionArgs,
  project_key: Option<String>,
  file: &FileConfig,
) -> RatchetResult<(ConnectionSettings, String)> {
  let mut violations = Vec::new();

  let settings = resolve_connection(conn, file, &mut violations);

  let project_key = project_key.or_else(|| file.project_key.clone());
  if project_key.is_none() {
    violations.push("project-key must be provided".to_string());
  }

  match (settings, project_key) {
    (Some(settings), Some(project_key)) if violations.is_empty() => Ok((settings, project_key)),
    _ => Err(RatchetError::Config(ConfigError::Invalid { violations })),
  }
}
