//! Release command: validate input, reconcile, report
//!
//! Validation happens entirely before the first remote call and reports the
//! full batch of violations. `--dry-run` runs the read side only and prints
//! what a real run would create or update.

use crate::core::config::{self, ConnectionArgs, FileConfig, ReleaseArgs};
use crate::core::error::RatchetResult;
use crate::core::naming;
use crate::jira::RestClient;
use crate::release::orchestrate::{PlannedStep, ReleaseOutcome, ReleasePreview};
use crate::release::{execute, preview};
use std::env;

pub struct ReleaseOptions {
  pub connection: ConnectionArgs,
  pub inputs: ReleaseArgs,
  pub dry_run: bool,
  pub json: bool,
}

/// Run the release command
pub fn run_release(options: ReleaseOptions) -> RatchetResult<()> {
  let cwd = env::current_dir()?;
  let file = FileConfig::load(&cwd)?;
  let (settings, request) = config::resolve_release(&options.connection, &options.inputs, &file)?;

  let client = RestClient::new(&settings)?;

  if options.dry_run {
    let planned = preview(&client, &request)?;
    if options.json {
      println!("{}", serde_json::to_string_pretty(&planned)?);
    } else {
      print_preview(&planned);
    }
    return Ok(());
  }

  let today = naming::release_date_stamp(chrono::Local::now().date_naive());
  let outcome = execute(&client, &request, &today)?;

  if options.json {
    println!("{}", serde_json::to_string_pretty(&outcome)?);
  } else {
    print_outcome(&outcome);
  }

  Ok(())
}

fn print_outcome(outcome: &ReleaseOutcome) {
  println!(
    "📦 Releasing {} {} in {}",
    outcome.component, outcome.release.name, outcome.project_key
  );
  println!();

  for warning in &outcome.warnings {
    println!("⚠️  {}", warning);
  }
  if !outcome.warnings.is_empty() {
    println!();
  }

  println!(
    "   Version {} (id {}): {}",
    outcome.release.name,
    outcome.release.version_id,
    created_or_reused(outcome.release.version_created)
  );
  println!(
    "   Mapping {}: {}",
    outcome.release.mapping_id,
    created_or_reused(outcome.release.mapping_created)
  );

  if outcome.already_released {
    println!("   ✅ Already released, no updates issued");
  } else if let Some(date) = &outcome.release_date {
    println!("   🏁 Released on {}", date);
  }

  if let Some(next) = &outcome.next {
    println!();
    println!(
      "   Next version {} (id {}): {}, mapping {}: {}",
      next.name,
      next.version_id,
      created_or_reused(next.version_created),
      next.mapping_id,
      created_or_reused(next.mapping_created)
    );
  }
}

fn print_preview(planned: &ReleasePreview) {
  println!(
    "🔍 Dry-run for {} {} in {} (no changes applied)",
    planned.component, planned.release.version, planned.project_key
  );
  println!();

  for warning in &planned.warnings {
    println!("⚠️  {}", warning);
  }
  if !planned.warnings.is_empty() {
    println!();
  }

  print_planned_step("Release", &planned.release);
  if planned.release.already_released {
    println!("   ✅ Already released, a real run would issue no updates");
  } else {
    println!("   Would set the released flag and today's release date");
  }

  if let Some(next) = &planned.next {
    println!();
    print_planned_step("Next", next);
    println!("   Would leave the next mapping unreleased");
  }
}

fn print_planned_step(label: &str, step: &PlannedStep) {
  match step.version_id {
    Some(id) => println!("   {} version {} exists (id {})", label, step.version, id),
    None => println!("   {} version {} would be created", label, step.version),
  }
  match step.mapping_id {
    Some(id) => println!("   Mapping {} exists", id),
    None => println!("   Mapping would be created"),
  }
}

fn created_or_reused(created: bool) -> &'static str {
  if created { "created" } else { "reused" }
}
