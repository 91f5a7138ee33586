mod commands;
mod core;
mod jira;
mod release;

use clap::{Parser, Subcommand};
use crate::commands::{DoctorOptions, ReleaseOptions};
use crate::core::config::{ConnectionArgs, ReleaseArgs};
use crate::core::error::{RatchetError, print_error};

/// Idempotent release bookkeeping for JIRA component/version mappings
#[derive(Parser)]
#[command(name = "jira-ratchet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Ensure the release version and its mapping exist, then flag the mapping
  /// released with today's date (idempotent; safe to re-run)
  Release {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// JIRA project key, e.g. PLAT
    #[arg(long)]
    project_key: Option<String>,

    /// Release version name, e.g. 1.1
    #[arg(long)]
    release_version: Option<String>,

    /// Component name, e.g. rest-server (mutually exclusive with --job-name)
    #[arg(long)]
    component: Option<String>,

    /// CI job name to derive the component from, e.g. eng-rest-server-release
    #[arg(long)]
    job_name: Option<String>,

    /// Next development version to prepare, e.g. 1.2 or 1.2-SNAPSHOT
    #[arg(long)]
    next_version: Option<String>,

    /// Show what would happen without making changes
    #[arg(long)]
    dry_run: bool,

    /// Output the outcome in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Check connectivity, credentials, and the project catalog (read-only)
  Doctor {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// JIRA project key, e.g. PLAT
    #[arg(long)]
    project_key: Option<String>,

    /// Component name to probe for
    #[arg(long)]
    component: Option<String>,

    /// Output the report in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Release {
      connection,
      project_key,
      release_version,
      component,
      job_name,
      next_version,
      dry_run,
      json,
    } => commands::run_release(ReleaseOptions {
      connection,
      inputs: ReleaseArgs {
        project_key,
        release_version,
        component,
        job_name,
        next_version,
      },
      dry_run,
      json,
    }),
    Commands::Doctor {
      connection,
      project_key,
      component,
      json,
    } => commands::run_doctor(DoctorOptions {
      connection,
      project_key,
      component,
      json,
    }),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: RatchetError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
