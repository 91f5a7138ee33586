//! Integration tests for `jira-ratchet doctor`

use crate::helpers::{FakeJira, argv, base_args, run_ratchet, run_ratchet_raw};
use anyhow::Result;
use tempfile::tempdir;

fn seeded_server() -> Result<FakeJira> {
  let server = FakeJira::start("PLAT", 1)?;
  {
    let mut state = server.state();
    state.add_version(12230, "1.0", true);
    state.add_version(12231, "1.1", false);
    state.add_component(4, "rest-server");
    state.add_mapping(137, 4, 12230, true);
  }
  Ok(server)
}

#[test]
fn test_doctor_reports_catalog_counts() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;
  let base = base_args(&server);

  let output = run_ratchet(dir.path(), &argv("doctor", &base, &[]))?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Project PLAT found (id 1)"), "stdout: {}", stdout);
  assert!(stdout.contains("2 version(s)"), "stdout: {}", stdout);
  assert!(stdout.contains("1 component(s)"), "stdout: {}", stdout);
  assert!(stdout.contains("1 mapping(s)"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_doctor_probes_for_a_component() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;
  let base = base_args(&server);

  let output = run_ratchet(dir.path(), &argv("doctor", &base, &["--component", "rest-server"]))?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Component 'rest-server' exists (id 4)"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_doctor_missing_component_exits_with_validation_code() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;
  let base = base_args(&server);

  let output = run_ratchet_raw(dir.path(), &argv("doctor", &base, &["--component", "gone"]))?;

  assert_eq!(output.status.code(), Some(3));
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("does not exist"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_doctor_json_report() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;
  let base = base_args(&server);

  let output = run_ratchet(dir.path(), &argv("doctor", &base, &["--component", "rest-server", "--json"]))?;

  let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(report["project_id"], "1");
  assert_eq!(report["versions"], 2);
  assert_eq!(report["component_probe"]["found"], true);
  assert_eq!(report["component_probe"]["component_id"], "4");

  Ok(())
}

#[test]
fn test_doctor_unknown_project_is_a_remote_failure() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;

  let output = run_ratchet_raw(
    dir.path(),
    &[
      "doctor",
      "--base-url",
      &server.base_url,
      "--username",
      "admin",
      "--password",
      "secret",
      "--project-key",
      "NOPE",
    ],
  )?;

  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("fetching project NOPE"), "stderr: {}", stderr);

  Ok(())
}
