//! Workspace target manifest (targets.toml)
//!
//! The manifest is the authoritative declaration of build targets for one
//! workspace: each `[[target]]` entry names an address, the source files it
//! claims, and the addresses it depends on.
//!
//! ```toml
//! [[target]]
//! address = "src/app:app"
//! sources = ["src/app/main.py"]
//! dependencies = ["src/lib:lib"]
//! ```
//!
//! Parsing uses toml_edit's serde support. Structural validation (duplicate
//! addresses, dangling dependencies) happens at graph construction, not here.

use crate::core::error::{ConfigError, ScopeError, ScopeResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "targets.toml";

/// One declared build target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDecl {
  /// Unique address of the target, e.g. "src/python/python_targets:test_library".
  /// Opaque to the resolver beyond equality and regex matching.
  pub address: String,

  /// Workspace-relative paths of the source and resource files this target claims.
  #[serde(default)]
  pub sources: Vec<PathBuf>,

  /// Addresses of targets this one directly depends on.
  #[serde(default)]
  pub dependencies: Vec<String>,
}

/// The full workspace manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceManifest {
  #[serde(default, rename = "target")]
  pub targets: Vec<TargetDecl>,
}

impl WorkspaceManifest {
  /// Load targets.toml from the workspace root.
  pub fn load(workspace_root: &Path) -> ScopeResult<Self> {
    let path = workspace_root.join(MANIFEST_FILE);
    if !path.exists() {
      return Err(ScopeError::Config(ConfigError::NotFound {
        workspace_root: workspace_root.to_path_buf(),
      }));
    }

    let raw = fs::read_to_string(&path)?;
    Self::parse(&raw)
  }

  /// Parse manifest contents.
  pub fn parse(raw: &str) -> ScopeResult<Self> {
    let manifest: WorkspaceManifest = toml_edit::de::from_str(raw)?;
    Ok(manifest)
  }
}
