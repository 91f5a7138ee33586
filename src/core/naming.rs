//! Small pure helpers for deriving names and stamps from operator input

use chrono::NaiveDate;

/// Derive a component name from a CI job name.
///
/// Jobs are assumed to be of the form `prefix-component-suffix`; the
/// substring between the first and last dash is the component name.
/// Component names may themselves contain dashes, e.g.
/// `eng-rest-server-release` yields `rest-server`.
///
/// Returns `None` when the job name has fewer than two dashes or the
/// middle segment is empty.
pub fn component_from_job_name(job_name: &str) -> Option<String> {
  let first = job_name.find('-')?;
  let last = job_name.rfind('-')?;
  if last <= first + 1 {
    return None;
  }
  Some(job_name[first + 1..last].to_string())
}

/// Strip a trailing `-SNAPSHOT` from a Maven-style development version.
/// Inputs without the suffix pass through unchanged.
pub fn strip_snapshot_suffix(version: &str) -> &str {
  version.strip_suffix("-SNAPSHOT").unwrap_or(version)
}

/// Render a calendar date the way the mapping add-on expects it in its
/// query parameters: day without leading zero, three-letter month, two-digit
/// year, e.g. `16/Feb/14`. JIRA parses this positionally, so the format is
/// frozen.
pub fn release_date_stamp(date: NaiveDate) -> String {
  date.format("%-d/%b/%y").to_string()
}
