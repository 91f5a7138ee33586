//! Input validation: batched violations, exit codes, config-file defaults

use crate::helpers::{FakeJira, run_ratchet, run_ratchet_raw};
use anyhow::Result;
use tempfile::tempdir;

#[test]
fn test_empty_invocation_reports_every_violation() -> Result<()> {
  let dir = tempdir()?;

  let output = run_ratchet_raw(dir.path(), &["release"])?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  // The whole batch at once, not just the first violation.
  assert!(stderr.contains("base-url must be provided"), "stderr: {}", stderr);
  assert!(stderr.contains("username must be provided"), "stderr: {}", stderr);
  assert!(stderr.contains("password must be provided"), "stderr: {}", stderr);
  assert!(stderr.contains("project-key must be provided"), "stderr: {}", stderr);
  assert!(stderr.contains("release-version must be provided"), "stderr: {}", stderr);

  Ok(())
}

#[test]
fn test_next_version_equal_to_release_is_rejected_before_any_call() -> Result<()> {
  let dir = tempdir()?;

  // No server is running on this port; validation must fail first.
  let output = run_ratchet_raw(
    dir.path(),
    &[
      "release",
      "--base-url",
      "http://127.0.0.1:1",
      "--username",
      "admin",
      "--password",
      "secret",
      "--project-key",
      "PLAT",
      "--component",
      "rest-server",
      "--release-version",
      "1.1",
      "--next-version",
      "1.1",
    ],
  )?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("must be different"), "stderr: {}", stderr);

  Ok(())
}

#[test]
fn test_component_and_job_name_are_mutually_exclusive() -> Result<()> {
  let dir = tempdir()?;

  let output = run_ratchet_raw(
    dir.path(),
    &[
      "release",
      "--base-url",
      "http://127.0.0.1:1",
      "--username",
      "admin",
      "--password",
      "secret",
      "--project-key",
      "PLAT",
      "--component",
      "rest-server",
      "--job-name",
      "eng-rest-server-release",
      "--release-version",
      "1.1",
    ],
  )?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("only one of component or job-name"), "stderr: {}", stderr);

  Ok(())
}

#[test]
fn test_malformed_base_url_is_rejected() -> Result<()> {
  let dir = tempdir()?;

  let output = run_ratchet_raw(
    dir.path(),
    &[
      "release",
      "--base-url",
      "not a url",
      "--username",
      "admin",
      "--password",
      "secret",
      "--project-key",
      "PLAT",
      "--component",
      "rest-server",
      "--release-version",
      "1.1",
    ],
  )?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("not a url"), "stderr: {}", stderr);

  Ok(())
}

#[test]
fn test_config_file_provides_connection_defaults() -> Result<()> {
  let server = FakeJira::start("PLAT", 1)?;
  {
    let mut state = server.state();
    state.add_version(12230, "1.0", false);
    state.add_component(4, "rest-server");
  }

  let dir = tempdir()?;
  std::fs::write(
    dir.path().join("ratchet.toml"),
    format!(
      "base_url = \"{}\"\nusername = \"admin\"\npassword = \"secret\"\nproject_key = \"PLAT\"\n",
      server.base_url
    ),
  )?;

  run_ratchet(
    dir.path(),
    &["release", "--component", "rest-server", "--release-version", "1.0"],
  )?;

  assert_eq!(server.state().created_mappings, vec![(1, 4, 12230)]);

  Ok(())
}
