//! System git backend - zero dependencies, maximum performance
//!
//! Uses git plumbing commands for change detection. Optimized for:
//! - Single metadata call on open (rev-parse --show-toplevel)
//! - Safe subprocess execution (isolated environment)
//! - Work-tree-relative output (core.quotePath=false, no cwd sensitivity)
//!
//! Change detection is the only I/O the resolver depends on; everything
//! downstream of the changed-file set is pure in-memory computation.

use crate::core::error::{GitError, ResultExt, ScopeError, ScopeResult};
use crate::core::vcs::ChangeSpec;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,

  /// Working tree root
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> ScopeResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ScopeError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ScopeError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Working tree root (absolute)
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Compute the changed-file set for a change spec.
  ///
  /// Paths are work-tree-relative with forward slashes, exactly as git prints
  /// them, which matches the representation the ownership index expects.
  pub fn changed_files(&self, spec: &ChangeSpec) -> ScopeResult<Vec<PathBuf>> {
    match spec {
      ChangeSpec::WorkingCopy => {
        // Tracked edits against HEAD, plus files git doesn't know about yet.
        let mut files = self.diff_name_only(&["diff", "--name-only", "HEAD"], "HEAD")?;
        files.extend(self.untracked_files()?);
        Ok(files)
      }
      ChangeSpec::Since(reference) => {
        self.diff_name_only(&["diff", "--name-only", reference], reference)
      }
      ChangeSpec::Diffspec(revision) => self.diff_name_only(
        &["diff-tree", "--no-commit-id", "--name-only", "-r", revision],
        revision,
      ),
    }
  }

  /// Run a name-only diff variant and parse its output.
  fn diff_name_only(&self, args: &[&str], revision: &str) -> ScopeResult<Vec<PathBuf>> {
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to run git {}", args[0]))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("unknown revision") || stderr.contains("bad revision") || stderr.contains("ambiguous argument")
      {
        return Err(ScopeError::Git(GitError::BadRevision {
          revision: revision.to_string(),
          stderr: stderr.trim().to_string(),
        }));
      }
      return Err(ScopeError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: stderr.to_string(),
      }));
    }

    Ok(parse_path_lines(&output.stdout))
  }

  /// Files present in the working tree but unknown to git.
  fn untracked_files(&self) -> ScopeResult<Vec<PathBuf>> {
    let output = self
      .git_cmd()
      .args(["ls-files", "--others", "--exclude-standard"])
      .output()
      .context("Failed to run git ls-files")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ScopeError::Git(GitError::CommandFailed {
        command: "git ls-files --others --exclude-standard".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(parse_path_lines(&output.stdout))
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    // Set working directory
    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
    cmd.arg("-c").arg("diff.noprefix=false");

    cmd
  }
}

/// Parse newline-separated paths from git output
fn parse_path_lines(data: &[u8]) -> Vec<PathBuf> {
  String::from_utf8_lossy(data)
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(PathBuf::from)
    .collect()
}
