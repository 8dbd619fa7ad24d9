//! Error types for repo-herd with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Provider-API failures are classified once,
//! at the client boundary, into the closed `ApiError` set; everything downstream
//! branches on these kinds instead of probing response objects.

use std::fmt;
use std::io;

/// Exit codes for repo-herd
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (bad request fields, invalid args, missing token)
  User = 1,
  /// System error (provider API, git, network, I/O)
  System = 2,
  /// Validation failure (org access, repository or branch checks)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for repo-herd
#[derive(Debug)]
pub enum HerdError {
  /// Request/configuration errors (no network call has been made)
  Config(ConfigError),

  /// Provider API errors
  Api(ApiError),

  /// Git operation errors
  Git(GitError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl HerdError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    HerdError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    HerdError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      HerdError::Message { message, context, help } => HerdError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      HerdError::Config(_) => ExitCode::User,
      HerdError::Api(e) => e.exit_code(),
      HerdError::Git(_) => ExitCode::System,
      HerdError::Io(_) => ExitCode::System,
      HerdError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      HerdError::Config(e) => e.help_message(),
      HerdError::Api(e) => e.help_message(),
      HerdError::Git(e) => e.help_message(),
      HerdError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for HerdError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      HerdError::Config(e) => write!(f, "{}", e),
      HerdError::Api(e) => write!(f, "{}", e),
      HerdError::Git(e) => write!(f, "{}", e),
      HerdError::Io(e) => write!(f, "I/O error: {}", e),
      HerdError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for HerdError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      HerdError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for HerdError {
  fn from(err: io::Error) -> Self {
    HerdError::Io(err)
  }
}

impl From<String> for HerdError {
  fn from(msg: String) -> Self {
    HerdError::message(msg)
  }
}

impl From<&str> for HerdError {
  fn from(msg: &str) -> Self {
    HerdError::message(msg)
  }
}

impl From<serde_json::Error> for HerdError {
  fn from(err: serde_json::Error) -> Self {
    HerdError::message(format!("JSON error: {}", err))
  }
}

impl From<toml_edit::TomlError> for HerdError {
  fn from(err: toml_edit::TomlError) -> Self {
    HerdError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for HerdError {
  fn from(err: toml_edit::de::Error) -> Self {
    HerdError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<reqwest::Error> for HerdError {
  fn from(err: reqwest::Error) -> Self {
    HerdError::Api(ApiError::Network {
      message: err.to_string(),
    })
  }
}

/// Request/configuration errors
#[derive(Debug)]
pub enum ConfigError {
  /// A required request field is missing or empty
  MissingField { field: String },

  /// The repository list is empty or contains an empty entry
  InvalidRepositories { reason: String },

  /// An unparseable filter value was supplied
  InvalidFilter { field: String, value: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::MissingField { field } if field == "token" => {
        Some("Pass --token or set the GITHUB_TOKEN environment variable.".to_string())
      }
      ConfigError::InvalidFilter { field, .. } if field == "older-than" => {
        Some("Use an RFC 3339 timestamp or a plain date, e.g. 2026-01-31.".to_string())
      }
      ConfigError::InvalidFilter { field, .. } if field == "kind" => {
        Some("Valid kinds are: all, prerelease, release.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field: {}", field)
      }
      ConfigError::InvalidRepositories { reason } => {
        write!(f, "Invalid repository list: {}", reason)
      }
      ConfigError::InvalidFilter { field, value } => {
        write!(f, "Invalid value for {}: '{}'", field, value)
      }
    }
  }
}

/// Provider API errors, classified once at the client boundary
#[derive(Debug)]
pub enum ApiError {
  /// Organization lookup returned 404
  OrgNotFound { org: String },

  /// Repository lookup returned 404
  RepoNotFound { org: String, repo: String },

  /// Branch or branch-ref lookup returned 404
  BranchNotFound { repo: String, branch: String },

  /// Tag-ref lookup returned 404
  TagNotFound { repo: String, tag: String },

  /// A tag of the same name already exists (idempotency guard)
  TagExists { repo: String, tag: String },

  /// Token rejected (401)
  Unauthorized,

  /// Rate limit exceeded (403)
  RateLimited,

  /// Provider unreachable or transport failure
  Network { message: String },

  /// Any other provider response
  Unexpected { status: u16, message: String },
}

impl ApiError {
  fn exit_code(&self) -> ExitCode {
    match self {
      ApiError::OrgNotFound { .. }
      | ApiError::RepoNotFound { .. }
      | ApiError::BranchNotFound { .. }
      | ApiError::Unauthorized => ExitCode::Validation,
      _ => ExitCode::System,
    }
  }

  fn help_message(&self) -> Option<String> {
    match self {
      ApiError::Unauthorized => Some("Check that the token is valid and has access to the organization.".to_string()),
      ApiError::RateLimited => Some("Rate limit exceeded. Wait before trying again.".to_string()),
      ApiError::TagExists { tag, .. } => Some(format!(
        "Delete the existing tag first with `repo-herd tag delete --tag {}`.",
        tag
      )),
      ApiError::Network { .. } => Some("Check your network connection and the API URL.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::OrgNotFound { org } => {
        write!(f, "Organization '{}' not found", org)
      }
      ApiError::RepoNotFound { org, repo } => {
        write!(f, "Repository {} not found in organization {}", repo, org)
      }
      ApiError::BranchNotFound { repo, branch } => {
        write!(f, "Branch {} not found in {}", branch, repo)
      }
      ApiError::TagNotFound { repo, tag } => {
        write!(f, "Tag {} not found in {}", tag, repo)
      }
      ApiError::TagExists { repo, tag } => {
        write!(f, "Tag {} already exists in {}", tag, repo)
      }
      ApiError::Unauthorized => {
        write!(f, "Invalid token or insufficient permissions")
      }
      ApiError::RateLimited => {
        write!(f, "Provider rate limit exceeded")
      }
      ApiError::Network { message } => {
        write!(f, "Network error: {}", message)
      }
      ApiError::Unexpected { status, message } => {
        write!(f, "Unexpected provider response (HTTP {}): {}", status, message)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Clone failed
  CloneFailed { reason: String },

  /// Merge reported unresolved conflicts
  MergeConflict { reference: String, reason: String },

  /// Push failed
  PushFailed {
    remote: String,
    branch: String,
    reason: String,
  },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::MergeConflict { .. } => {
        Some("Conflicts are not auto-resolved. Merge the branches manually and re-run.".to_string())
      }
      GitError::PushFailed { reason, .. } => {
        if reason.contains("non-fast-forward") {
          Some("The remote has commits you don't have. Re-run the sync to pick them up.".to_string())
        } else if reason.contains("permission denied") || reason.contains("403") {
          Some("Check that the token has push access to the repository.".to_string())
        } else {
          None
        }
      }
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::CloneFailed { reason } => {
        write!(f, "Clone failed: {}", reason)
      }
      GitError::MergeConflict { reference, reason } => {
        write!(f, "Merge of {} reported conflicts: {}", reference, reason)
      }
      GitError::PushFailed { remote, branch, reason } => {
        write!(f, "Push to {}/{} failed: {}", remote, branch, reason)
      }
    }
  }
}

/// Result type alias for repo-herd
pub type HerdResult<T> = Result<T, HerdError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> HerdResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> HerdResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<HerdError>,
{
  fn context(self, ctx: impl Into<String>) -> HerdResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> HerdResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &HerdError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
