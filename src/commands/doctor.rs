//! Doctor command: read-only connectivity and catalog diagnostics
//!
//! Fetches the project and the full snapshot, reports counts, and optionally
//! probes for a component by name. Exercises only the read capabilities —
//! doctor never mutates anything.

use crate::core::config::{self, ConnectionArgs, FileConfig};
use crate::core::error::{ExitCode, RatchetResult};
use crate::jira::{CatalogReads, RestClient};
use crate::release::Snapshot;
use serde::Serialize;
use std::env;

pub struct DoctorOptions {
  pub connection: ConnectionArgs,
  pub project_key: Option<String>,
  pub component: Option<String>,
  pub json: bool,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
  project_key: String,
  project_id: String,
  versions: usize,
  components: usize,
  mappings: usize,
  component_probe: Option<ComponentProbe>,
  warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ComponentProbe {
  name: String,
  found: bool,
  component_id: Option<String>,
}

/// Run the doctor command
pub fn run_doctor(options: DoctorOptions) -> RatchetResult<()> {
  let cwd = env::current_dir()?;
  let file = FileConfig::load(&cwd)?;
  let (settings, project_key) = config::resolve_doctor(&options.connection, options.project_key, &file)?;

  let client = RestClient::new(&settings)?;

  let project = client.project(&project_key)?;
  let snapshot = Snapshot::load(&client, &project.id)?;

  let component_probe = options.component.map(|name| {
    let component = snapshot.components.get(&name);
    ComponentProbe {
      found: component.is_some(),
      component_id: component.map(|c| c.id.clone()),
      name,
    }
  });

  let report = DoctorReport {
    project_key,
    project_id: project.id,
    versions: snapshot.versions.len(),
    components: snapshot.components.len(),
    mappings: snapshot.mappings.len(),
    component_probe,
    warnings: snapshot
      .collisions
      .iter()
      .map(|name| format!("duplicate {} in project catalog, last one wins", name))
      .collect(),
  };

  let probe_failed = report.component_probe.as_ref().is_some_and(|probe| !probe.found);

  if options.json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_report(&report);
  }

  if probe_failed {
    std::process::exit(ExitCode::Validation.as_i32());
  }

  Ok(())
}

fn print_report(report: &DoctorReport) {
  println!("🏥 Checking JIRA catalog for project {}...\n", report.project_key);

  println!("✅ Project {} found (id {})", report.project_key, report.project_id);
  println!("✅ {} version(s) fetched", report.versions);
  println!("✅ {} component(s) fetched", report.components);
  println!("✅ {} mapping(s) fetched", report.mappings);

  for warning in &report.warnings {
    println!("⚠️  {}", warning);
  }

  if let Some(probe) = &report.component_probe {
    match &probe.component_id {
      Some(id) => println!("✅ Component '{}' exists (id {})", probe.name, id),
      None => {
        println!("❌ Component '{}' does not exist in this project", probe.name);
        println!("   💡 Component names match case-sensitively");
      }
    }
  }

  println!();
  let healthy = report.component_probe.as_ref().is_none_or(|probe| probe.found);
  if healthy && report.warnings.is_empty() {
    println!("✨ Catalog looks healthy.");
  } else if healthy {
    println!("⚠️  Catalog reachable, but with warnings.");
  }
}
