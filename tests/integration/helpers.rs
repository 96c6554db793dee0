//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test workspace with a target manifest and git history
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a new empty workspace with an initialized git repo
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    // Resolve symlinks so paths match `git rev-parse --show-toplevel` output
    let path = root.path().canonicalize()?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    Ok(Self { _root: root, path })
  }

  /// Write targets.toml at the workspace root
  pub fn write_manifest(&self, contents: &str) -> Result<()> {
    std::fs::write(self.path.join("targets.toml"), contents)?;
    Ok(())
  }

  /// Write a file (creating parent directories)
  pub fn write_file(&self, rel_path: &str, contents: &str) -> Result<()> {
    let file_path = self.path.join(rel_path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, contents)?;
    Ok(())
  }

  /// Append to an existing file to trigger a diff
  pub fn touch_file(&self, rel_path: &str) -> Result<()> {
    use std::io::Write;
    let mut file = std::fs::OpenOptions::new()
      .append(true)
      .open(self.path.join(rel_path))?;
    writeln!(file)?;
    Ok(())
  }

  /// Commit current changes, returning the commit SHA
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the changescope CLI, failing the test on a non-zero exit
pub fn run_changescope(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_changescope_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "changescope command failed: changescope {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the changescope CLI without asserting on the exit status
pub fn run_changescope_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_changescope");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run changescope")
}

/// Parse stdout into a set of non-empty lines, ignoring order
pub fn stdout_lines(output: &Output) -> std::collections::BTreeSet<String> {
  String::from_utf8_lossy(&output.stdout)
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(String::from)
    .collect()
}

/// Build the standard dependee-chain fixture used across tests:
///
/// app:binary -> lib:library <- lib:direct_dependee <- lib:dependee_2 <- lib:dependee_3
/// plus res:resource owned by README.md with app:binary depending on it,
/// plus one unclaimed source file.
pub fn chain_workspace() -> Result<TestWorkspace> {
  let ws = TestWorkspace::new()?;

  ws.write_file("lib/library.py", "def lib(): pass\n")?;
  ws.write_file("lib/direct.py", "import library\n")?;
  ws.write_file("lib/second.py", "import direct\n")?;
  ws.write_file("lib/third.py", "import second\n")?;
  ws.write_file("app/binary.py", "import library\n")?;
  ws.write_file("res/README.md", "Just resource.\n")?;
  ws.write_file("lib/unclaimed.py", "# nobody claims this\n")?;

  ws.write_manifest(
    r#"
[[target]]
address = "lib:library"
sources = ["lib/library.py"]

[[target]]
address = "lib:direct_dependee"
sources = ["lib/direct.py"]
dependencies = ["lib:library"]

[[target]]
address = "lib:dependee_2"
sources = ["lib/second.py"]
dependencies = ["lib:direct_dependee"]

[[target]]
address = "lib:dependee_3"
sources = ["lib/third.py"]
dependencies = ["lib:dependee_2"]

[[target]]
address = "res:resource"
sources = ["res/README.md"]

[[target]]
address = "app:binary"
sources = ["app/binary.py"]
dependencies = ["lib:library", "res:resource"]
"#,
  )?;

  ws.commit("Initial workspace")?;
  Ok(ws)
}
