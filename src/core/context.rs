//! Unified workspace context - build once, pass everywhere
//!
//! WorkspaceContext loads the target manifest and builds the target graph a
//! single time in main.rs, then hands an immutable snapshot to every command
//! by reference. Commands never reach for ambient process-wide state: the
//! graph and workspace root travel through this struct explicitly.
//!
//! Because the graph is never mutated after construction, any number of
//! resolutions may share one context concurrently without locking.

use crate::core::config::WorkspaceManifest;
use crate::core::error::ScopeResult;
use crate::graph::target_graph::TargetGraph;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared workspace-level data for one invocation.
///
/// Built once at startup. The graph is wrapped in Arc so commands and tests
/// can share it without cloning the underlying petgraph storage.
#[derive(Clone)]
pub struct WorkspaceContext {
  /// Workspace root directory (absolute path, the git work tree)
  pub root: PathBuf,

  /// Target dependency graph (built from the manifest)
  pub graph: Arc<TargetGraph>,
}

impl WorkspaceContext {
  /// Build workspace context from a root directory.
  ///
  /// Loads targets.toml and constructs the graph; duplicate addresses and
  /// dangling dependencies surface here, before any command logic runs.
  pub fn build(workspace_root: &Path) -> ScopeResult<Self> {
    let root = workspace_root.to_path_buf();
    let manifest = WorkspaceManifest::load(&root)?;
    let graph = Arc::new(TargetGraph::build(&manifest.targets)?);

    Ok(Self { root, graph })
  }

  /// Get workspace root as Path reference (convenience)
  pub fn workspace_root(&self) -> &Path {
    &self.root
  }
}
