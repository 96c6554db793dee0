//! File → owning-target index
//!
//! Derived entirely from the targets' declared sources; built in one pass and
//! answering lookups in O(1) expected time. A file claimed by several targets
//! accumulates several owners (shared resources are legal). A file nobody
//! claims is "unclaimed" and contributes nothing to a resolution.
//!
//! Keys are normalized paths (see `utils::normalize_rel_path`); callers must
//! normalize changed-file paths the same way or lookups silently miss.

use crate::graph::target_graph::TargetGraph;
use crate::utils::normalize_rel_path;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Index from normalized file path to the set of owning target addresses.
pub struct OwnershipIndex {
  owners: HashMap<String, HashSet<String>>,
}

impl OwnershipIndex {
  /// Build the index from every target's declared sources.
  pub fn build(graph: &TargetGraph) -> Self {
    let mut owners: HashMap<String, HashSet<String>> = HashMap::new();

    for target in graph.targets() {
      for source in &target.sources {
        owners.entry(source.clone()).or_default().insert(target.address.clone());
      }
    }

    Self { owners }
  }

  /// Owning addresses for a file, empty if unclaimed.
  pub fn owners(&self, path: &Path) -> HashSet<String> {
    let key = normalize_rel_path(path);
    self.owners.get(&key).cloned().unwrap_or_default()
  }

  /// Number of claimed files.
  pub fn claimed_files(&self) -> usize {
    self.owners.len()
  }
}
