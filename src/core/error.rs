//! Error types for changescope with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. A resolution either fully succeeds or fully
//! fails; none of these errors are retried.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for changescope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (manifest, invalid args, bad patterns)
  User = 1,
  /// System error (git, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for changescope
#[derive(Debug)]
pub enum ScopeError {
  /// Workspace manifest errors
  Config(ConfigError),

  /// Target graph construction errors
  Graph(GraphError),

  /// Change detection (git) errors
  Git(GitError),

  /// An exclusion pattern failed to compile as a regular expression
  InvalidPattern { pattern: String, message: String },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ScopeError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ScopeError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ScopeError::Message { message, context, help } => ScopeError::Message {
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
      ScopeError::Config(_) => ExitCode::User,
      ScopeError::Graph(_) => ExitCode::User,
      ScopeError::Git(_) => ExitCode::System,
      ScopeError::InvalidPattern { .. } => ExitCode::User,
      ScopeError::Io(_) => ExitCode::System,
      ScopeError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ScopeError::Config(e) => e.help_message(),
      ScopeError::Graph(e) => e.help_message(),
      ScopeError::Git(e) => e.help_message(),
      ScopeError::InvalidPattern { .. } => {
        Some("Exclusion patterns use Rust regex syntax, e.g. --exclude-target-regexp '_[0-9]'".to_string())
      }
      ScopeError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ScopeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ScopeError::Config(e) => write!(f, "{}", e),
      ScopeError::Graph(e) => write!(f, "{}", e),
      ScopeError::Git(e) => write!(f, "{}", e),
      ScopeError::InvalidPattern { pattern, message } => {
        write!(f, "Invalid exclusion pattern '{}': {}", pattern, message)
      }
      ScopeError::Io(e) => write!(f, "I/O error: {}", e),
      ScopeError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ScopeError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ScopeError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ScopeError {
  fn from(err: io::Error) -> Self {
    ScopeError::Io(err)
  }
}

impl From<String> for ScopeError {
  fn from(msg: String) -> Self {
    ScopeError::message(msg)
  }
}

impl From<toml_edit::de::Error> for ScopeError {
  fn from(err: toml_edit::de::Error) -> Self {
    ScopeError::Config(ConfigError::Invalid {
      reason: err.to_string(),
    })
  }
}

impl From<serde_json::Error> for ScopeError {
  fn from(err: serde_json::Error) -> Self {
    ScopeError::message(format!("JSON error: {}", err))
  }
}

/// Workspace manifest errors
#[derive(Debug)]
pub enum ConfigError {
  /// targets.toml not found
  NotFound { workspace_root: PathBuf },

  /// targets.toml failed to parse or validate
  Invalid { reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Create a targets.toml at the workspace root declaring your build targets.".to_string())
      }
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { workspace_root } => {
        write!(
          f,
          "No target manifest found.\nExpected file: {}/targets.toml",
          workspace_root.display()
        )
      }
      ConfigError::Invalid { reason } => {
        write!(f, "Invalid target manifest: {}", reason)
      }
    }
  }
}

/// Target graph construction errors
///
/// All of these describe a malformed workspace declaration. They are fatal and
/// abort the resolution before any traversal work starts.
#[derive(Debug)]
pub enum GraphError {
  /// The same target address was declared twice
  DuplicateAddress { address: String },

  /// A target declares a dependency on a nonexistent address
  UnknownDependency { address: String, dependency: String },

  /// The declared dependency relation contains a cycle
  DependencyCycle { members: Vec<String> },

  /// An address was requested that no target declares
  UnknownAddress { address: String },
}

impl GraphError {
  fn help_message(&self) -> Option<String> {
    match self {
      GraphError::DuplicateAddress { address } => Some(format!(
        "Remove or rename one of the [[target]] entries declaring '{}'.",
        address
      )),
      GraphError::UnknownDependency { dependency, .. } => Some(format!(
        "Declare a [[target]] with address '{}' or fix the dependency entry.",
        dependency
      )),
      GraphError::DependencyCycle { .. } => {
        Some("Run `changescope check` to list all cycles in the manifest.".to_string())
      }
      GraphError::UnknownAddress { .. } => {
        Some("Run `changescope list` to see all declared target addresses.".to_string())
      }
    }
  }
}

impl fmt::Display for GraphError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GraphError::DuplicateAddress { address } => {
        write!(f, "Target address declared more than once: {}", address)
      }
      GraphError::UnknownDependency { address, dependency } => {
        write!(f, "Target '{}' depends on unknown address '{}'", address, dependency)
      }
      GraphError::DependencyCycle { members } => {
        write!(f, "Dependency cycle involving: {}", members.join(" -> "))
      }
      GraphError::UnknownAddress { address } => {
        write!(f, "No target declared at address '{}'", address)
      }
    }
  }
}

/// Change detection (git) errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// A commit reference or diffspec could not be resolved
  BadRevision { revision: String, stderr: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "changescope needs a git working copy to detect changes. Checked: {}",
        path.display()
      )),
      GitError::BadRevision { revision, .. } => {
        Some(format!("Verify '{}' with `git rev-parse {}`.", revision, revision))
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
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::BadRevision { revision, stderr } => {
        write!(f, "Cannot resolve revision '{}': {}", revision, stderr)
      }
    }
  }
}

/// Result type alias for changescope
pub type ScopeResult<T> = Result<T, ScopeError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ScopeResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ScopeResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ScopeError>,
{
  fn context(self, ctx: impl Into<String>) -> ScopeResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ScopeResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ScopeError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
