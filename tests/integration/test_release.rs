//! Integration tests for `jira-ratchet release`

use crate::helpers::{FakeJira, argv, base_args, run_ratchet, run_ratchet_raw};
use anyhow::Result;
use tempfile::tempdir;

fn seeded_server() -> Result<FakeJira> {
  let server = FakeJira::start("PLAT", 1)?;
  {
    let mut state = server.state();
    state.add_version(12230, "1.0", false);
    state.add_component(4, "rest-server");
  }
  Ok(server)
}

#[test]
fn test_release_creates_mapping_and_flags_it() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;
  let base = base_args(&server);

  let output = run_ratchet(
    dir.path(),
    &argv("release", &base, &["--component", "rest-server", "--release-version", "1.0"]),
  )?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Released on"), "stdout: {}", stdout);

  let state = server.state();
  assert!(state.created_versions.is_empty(), "version 1.0 already existed");
  assert_eq!(state.created_mappings, vec![(1, 4, 12230)]);
  assert_eq!(state.flag_updates, vec![(7000, "true".to_string())]);
  assert_eq!(state.date_updates.len(), 1);
  // The date stamp is day/Mon/yy, e.g. 16/Feb/14.
  let (id, date) = &state.date_updates[0];
  assert_eq!(*id, 7000);
  assert_eq!(date.matches('/').count(), 2, "date: {}", date);

  Ok(())
}

#[test]
fn test_release_creates_absent_version_first() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;
  let base = base_args(&server);

  run_ratchet(
    dir.path(),
    &argv("release", &base, &["--component", "rest-server", "--release-version", "2.0"]),
  )?;

  let state = server.state();
  assert_eq!(state.created_versions, vec!["2.0".to_string()]);
  // The mapping references the version the server just assigned.
  assert_eq!(state.created_mappings, vec![(1, 4, 90000)]);
  assert_eq!(state.flag_updates.len(), 1);

  Ok(())
}

#[test]
fn test_rerun_issues_no_further_updates() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;
  let base = base_args(&server);
  let args = argv("release", &base, &["--component", "rest-server", "--release-version", "1.0"]);

  run_ratchet(dir.path(), &args)?;
  let output = run_ratchet(dir.path(), &args)?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Already released"), "stdout: {}", stdout);

  let state = server.state();
  assert_eq!(state.created_mappings.len(), 1);
  assert_eq!(state.flag_updates.len(), 1);
  assert_eq!(state.date_updates.len(), 1);

  Ok(())
}

#[test]
fn test_already_released_mapping_is_left_untouched() -> Result<()> {
  let server = seeded_server()?;
  server.state().add_mapping(137, 4, 12230, true);
  let dir = tempdir()?;
  let base = base_args(&server);

  let output = run_ratchet(
    dir.path(),
    &argv("release", &base, &["--component", "rest-server", "--release-version", "1.0"]),
  )?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Mapping 137"), "stdout: {}", stdout);
  assert!(stdout.contains("Already released"), "stdout: {}", stdout);

  let state = server.state();
  assert!(state.created_mappings.is_empty());
  assert!(state.flag_updates.is_empty());
  assert!(state.date_updates.is_empty());

  Ok(())
}

#[test]
fn test_next_version_is_prepared_but_not_released() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;
  let base = base_args(&server);

  run_ratchet(
    dir.path(),
    &argv(
      "release",
      &base,
      &[
        "--component",
        "rest-server",
        "--release-version",
        "1.0",
        "--next-version",
        "1.2-SNAPSHOT",
      ],
    ),
  )?;

  let state = server.state();
  // -SNAPSHOT was stripped before the version was created.
  assert_eq!(state.created_versions, vec!["1.2".to_string()]);
  assert_eq!(state.created_mappings.len(), 2);
  // Only the release mapping got flag/date updates.
  assert_eq!(state.flag_updates, vec![(7000, "true".to_string())]);
  assert_eq!(state.date_updates.len(), 1);

  Ok(())
}

#[test]
fn test_dry_run_makes_no_mutations() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;
  let base = base_args(&server);

  let output = run_ratchet(
    dir.path(),
    &argv(
      "release",
      &base,
      &[
        "--component",
        "rest-server",
        "--release-version",
        "2.0",
        "--next-version",
        "2.1",
        "--dry-run",
      ],
    ),
  )?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Dry-run"), "stdout: {}", stdout);
  assert!(stdout.contains("would be created"), "stdout: {}", stdout);

  let state = server.state();
  assert!(state.created_versions.is_empty());
  assert!(state.created_mappings.is_empty());
  assert!(state.flag_updates.is_empty());
  assert!(state.date_updates.is_empty());

  Ok(())
}

#[test]
fn test_json_outcome_is_machine_readable() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;
  let base = base_args(&server);

  let output = run_ratchet(
    dir.path(),
    &argv(
      "release",
      &base,
      &["--component", "rest-server", "--release-version", "1.0", "--json"],
    ),
  )?;

  let outcome: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(outcome["project_key"], "PLAT");
  assert_eq!(outcome["release"]["version_id"], 12230);
  assert_eq!(outcome["release"]["mapping_created"], true);
  assert_eq!(outcome["already_released"], false);

  Ok(())
}

#[test]
fn test_component_derived_from_job_name() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;
  let base = base_args(&server);

  run_ratchet(
    dir.path(),
    &argv(
      "release",
      &base,
      &["--job-name", "eng-rest-server-release", "--release-version", "1.0"],
    ),
  )?;

  assert_eq!(server.state().created_mappings, vec![(1, 4, 12230)]);

  Ok(())
}

#[test]
fn test_missing_component_aborts_with_no_creations() -> Result<()> {
  let server = seeded_server()?;
  let dir = tempdir()?;
  let base = base_args(&server);

  let output = run_ratchet_raw(
    dir.path(),
    &argv("release", &base, &["--component", "no-such-thing", "--release-version", "2.0"]),
  )?;

  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("no-such-thing"), "stderr: {}", stderr);

  let state = server.state();
  assert!(state.created_versions.is_empty());
  assert!(state.created_mappings.is_empty());

  Ok(())
}
