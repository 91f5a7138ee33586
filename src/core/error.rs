//! Error types for jira-ratchet with contextual messages and exit codes
//!
//! Every error carries enough context to identify which operation and
//! resource were involved, plus a help suggestion where one exists.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for jira-ratchet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args)
  User = 1,
  /// System error (network, remote rejection, I/O)
  System = 2,
  /// Remote-state validation failure (e.g. missing component)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for jira-ratchet
#[derive(Debug)]
pub enum RatchetError {
  /// Configuration and input validation errors
  Config(ConfigError),

  /// Remote catalog operation failures
  Remote(RemoteError),

  /// The requested component does not exist in the project
  MissingComponent { name: String, known: usize },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional help
  Message { message: String, help: Option<String> },
}

impl RatchetError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RatchetError::Message {
      message: msg.into(),
      help: None,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      RatchetError::Config(_) => ExitCode::User,
      RatchetError::Remote(_) => ExitCode::System,
      RatchetError::MissingComponent { .. } => ExitCode::Validation,
      RatchetError::Io(_) => ExitCode::System,
      RatchetError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RatchetError::Config(e) => e.help_message(),
      RatchetError::Remote(e) => e.help_message(),
      RatchetError::MissingComponent { name, .. } => Some(format!(
        "Component names match case-sensitively. Run `jira-ratchet doctor --component {}` to inspect the project catalog.",
        name
      )),
      RatchetError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for RatchetError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RatchetError::Config(e) => write!(f, "{}", e),
      RatchetError::Remote(e) => write!(f, "{}", e),
      RatchetError::MissingComponent { name, known } => {
        write!(
          f,
          "Component '{}' does not exist in the project ({} components known)",
          name, known
        )
      }
      RatchetError::Io(e) => write!(f, "I/O error: {}", e),
      RatchetError::Message { message, .. } => write!(f, "{}", message),
    }
  }
}

impl std::error::Error for RatchetError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RatchetError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for RatchetError {
  fn from(err: io::Error) -> Self {
    RatchetError::Io(err)
  }
}

impl From<ConfigError> for RatchetError {
  fn from(err: ConfigError) -> Self {
    RatchetError::Config(err)
  }
}

impl From<RemoteError> for RatchetError {
  fn from(err: RemoteError) -> Self {
    RatchetError::Remote(err)
  }
}

impl From<serde_json::Error> for RatchetError {
  fn from(err: serde_json::Error) -> Self {
    RatchetError::message(format!("JSON error: {}", err))
  }
}

/// Configuration and input validation errors
#[derive(Debug)]
pub enum ConfigError {
  /// One or more input requirements violated; always the full batch
  Invalid { violations: Vec<String> },

  /// Config file exists but could not be parsed
  Parse { path: PathBuf, message: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { .. } => Some(
        "Provide the missing flags, set them in ratchet.toml, or export JIRA_USERNAME/JIRA_PASSWORD for credentials."
          .to_string(),
      ),
      ConfigError::Parse { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { violations } => {
        writeln!(f, "Invalid input:")?;
        for violation in violations {
          writeln!(f, "  • {}", violation)?;
        }
        Ok(())
      }
      ConfigError::Parse { path, message } => {
        write!(f, "Failed to parse config {}: {}", path.display(), message)
      }
    }
  }
}

/// A failed remote catalog operation, with the operation named
#[derive(Debug)]
pub struct RemoteError {
  /// What was being attempted, e.g. "fetching project PLAT"
  pub operation: String,
  pub kind: RemoteErrorKind,
}

#[derive(Debug)]
pub enum RemoteErrorKind {
  /// Connectivity or timeout failure before a response arrived
  Transport(String),

  /// JIRA answered with a non-success status
  Rejected { status: u16, body: String },

  /// The response arrived but could not be interpreted
  Decode(String),
}

impl RemoteError {
  pub fn transport(operation: impl Into<String>, cause: impl fmt::Display) -> Self {
    RemoteError {
      operation: operation.into(),
      kind: RemoteErrorKind::Transport(cause.to_string()),
    }
  }

  pub fn rejected(operation: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
    RemoteError {
      operation: operation.into(),
      kind: RemoteErrorKind::Rejected {
        status,
        body: body.into(),
      },
    }
  }

  pub fn decode(operation: impl Into<String>, detail: impl Into<String>) -> Self {
    RemoteError {
      operation: operation.into(),
      kind: RemoteErrorKind::Decode(detail.into()),
    }
  }

  fn help_message(&self) -> Option<String> {
    match &self.kind {
      RemoteErrorKind::Rejected { status: 401 | 403, .. } => Some(
        "Check --username and --password (or JIRA_USERNAME/JIRA_PASSWORD). The account needs permission to manage versions and mappings."
          .to_string(),
      ),
      RemoteErrorKind::Rejected { status: 404, .. } => Some(
        "Check --base-url and the project key. Mapping operations also require the component/version mapping add-on to be installed."
          .to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for RemoteError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      RemoteErrorKind::Transport(cause) => write!(f, "{}: {}", self.operation, cause),
      RemoteErrorKind::Rejected { status, body } => {
        write!(f, "{}: JIRA rejected the request (HTTP {})", self.operation, status)?;
        let body = body.trim();
        if !body.is_empty() {
          write!(f, "\n{}", body)?;
        }
        Ok(())
      }
      RemoteErrorKind::Decode(detail) => write!(f, "{}: unexpected response: {}", self.operation, detail),
    }
  }
}

impl std::error::Error for RemoteError {}

/// Result type alias for jira-ratchet
pub type RatchetResult<T> = Result<T, RatchetError>;

/// Result type alias for remote catalog operations
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &RatchetError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
