//! Dependee closure over the target graph's reverse edges
//!
//! Expands a seed set of addresses into the result set for one of three
//! inclusion modes. The output is a set: no step depends on traversal order,
//! so BFS vs DFS and edge iteration order cannot change the result. For a
//! fixed seed set the modes nest: none ⊆ direct ⊆ transitive.

use crate::core::error::ScopeResult;
use crate::graph::target_graph::TargetGraph;
use std::collections::HashSet;

/// Traversal depth selector for dependee inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependeeMode {
  /// Seeds only
  #[default]
  None,

  /// Seeds plus one-hop dependees
  Direct,

  /// Seeds plus full reverse-reachability closure
  Transitive,
}

impl DependeeMode {
  pub fn from_str(s: &str) -> ScopeResult<Self> {
    match s.to_lowercase().as_str() {
      "none" => Ok(Self::None),
      "direct" => Ok(Self::Direct),
      "transitive" => Ok(Self::Transitive),
      _ => Err(
        format!("Unknown dependee mode '{}'. Valid modes: none, direct, transitive", s).into(),
      ),
    }
  }
}

/// Expand `seeds` per `mode`.
///
/// Every seed must be a declared address; the file-seeded path guarantees this
/// (owners come from the graph), the spec-seeded path surfaces
/// `UnknownAddress` here.
///
/// Transitive mode is a single traversal from the whole seed frontier,
/// O(V + E) total rather than per seed. The visited set guarantees
/// termination even on accidentally cyclic input.
pub fn close(graph: &TargetGraph, seeds: &HashSet<String>, mode: DependeeMode) -> ScopeResult<HashSet<String>> {
  let mut result: HashSet<String> = seeds.clone();

  match mode {
    DependeeMode::None => {
      // Still validate spec-provided seeds against the graph.
      for seed in seeds {
        graph.find_node(seed)?;
      }
    }
    DependeeMode::Direct => {
      for seed in seeds {
        result.extend(graph.direct_dependees(seed)?);
      }
    }
    DependeeMode::Transitive => {
      let mut stack = Vec::with_capacity(seeds.len());
      for seed in seeds {
        stack.push(graph.find_node(seed)?);
      }

      let mut visited = HashSet::new();
      while let Some(node_idx) = stack.pop() {
        if !visited.insert(node_idx) {
          continue;
        }

        for neighbor_idx in graph.incoming(node_idx) {
          result.insert(graph.node_address(neighbor_idx).to_string());
          stack.push(neighbor_idx);
        }
      }
    }
  }

  Ok(result)
}
