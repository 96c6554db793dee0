//! Target dependency graph built from the workspace manifest + petgraph
//!
//! ## Graph Structure
//!
//! - **Directed Graph**: `A → B` means "A depends on B"
//! - **Nodes**: declared targets (address + claimed sources)
//! - **Edges**: declared dependencies
//! - **Index**: fast lookup by target address
//!
//! Construction is two-pass: every declaration becomes a node before any edge
//! is added, so manifest ordering never matters. A repeated address is
//! `DuplicateAddress`; an edge naming a missing node is `UnknownDependency`.
//! Both are manifest defects, reported before any resolution work.
//!
//! The dependency relation is assumed acyclic. Construction does not reject
//! cycles (the closure terminates on cyclic data anyway via its visited set);
//! `find_cycles` exists so `changescope check` can report them.
//!
//! The graph is write-once-then-read: built fresh per invocation, never
//! mutated afterward, so concurrent resolutions can share one instance.

use crate::core::config::TargetDecl;
use crate::core::error::{GraphError, ScopeError, ScopeResult};
use crate::utils::normalize_rel_path;
use petgraph::Direction;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// A target node in the dependency graph.
#[derive(Debug, Clone)]
pub struct TargetNode {
  pub address: String,

  /// Claimed source files, normalized to workspace-relative forward-slash form
  pub sources: Vec<String>,
}

/// Target dependency graph for one workspace.
#[derive(Debug)]
pub struct TargetGraph {
  /// The dependency graph (petgraph DiGraph)
  graph: DiGraph<TargetNode, ()>,

  /// Index: target address → node index
  address_to_node: HashMap<String, NodeIndex>,
}

impl TargetGraph {
  /// Build the graph from manifest declarations.
  ///
  /// Two passes: declare all nodes, then all edges. Declaration order is
  /// irrelevant to the result.
  pub fn build(decls: &[TargetDecl]) -> ScopeResult<Self> {
    let mut graph = DiGraph::new();
    let mut address_to_node = HashMap::new();

    for decl in decls {
      if address_to_node.contains_key(&decl.address) {
        return Err(ScopeError::Graph(GraphError::DuplicateAddress {
          address: decl.address.clone(),
        }));
      }

      let node = TargetNode {
        address: decl.address.clone(),
        sources: decl.sources.iter().map(|p| normalize_rel_path(p)).collect(),
      };

      let node_idx = graph.add_node(node);
      address_to_node.insert(decl.address.clone(), node_idx);
    }

    for decl in decls {
      let from_idx = address_to_node[&decl.address];

      for dep in &decl.dependencies {
        let Some(to_idx) = address_to_node.get(dep) else {
          return Err(ScopeError::Graph(GraphError::UnknownDependency {
            address: decl.address.clone(),
            dependency: dep.clone(),
          }));
        };
        graph.add_edge(from_idx, *to_idx, ());
      }
    }

    Ok(Self { graph, address_to_node })
  }

  /// All target addresses, sorted.
  pub fn addresses(&self) -> Vec<String> {
    let mut addresses: Vec<_> = self.address_to_node.keys().cloned().collect();
    addresses.sort();
    addresses
  }

  /// Number of declared targets.
  pub fn len(&self) -> usize {
    self.graph.node_count()
  }

  pub fn is_empty(&self) -> bool {
    self.graph.node_count() == 0
  }

  /// Iterate all target nodes.
  pub fn targets(&self) -> impl Iterator<Item = &TargetNode> {
    self.graph.node_weights()
  }

  /// Direct dependees of a target: every target with a one-hop dependency
  /// edge into it.
  pub fn direct_dependees(&self, address: &str) -> ScopeResult<HashSet<String>> {
    let node_idx = self.find_node(address)?;

    Ok(
      self
        .graph
        .neighbors_directed(node_idx, Direction::Incoming)
        .map(|idx| self.graph[idx].address.clone())
        .collect(),
    )
  }

  /// Transitive dependees of a target: full reverse-edge reachability.
  ///
  /// DFS over incoming edges with a visited set, so it is O(V + E) and
  /// terminates even if the underlying data briefly contains a cycle.
  pub fn transitive_dependees(&self, address: &str) -> ScopeResult<HashSet<String>> {
    let start_node = self.find_node(address)?;

    let mut visited = HashSet::new();
    let mut stack = vec![start_node];
    let mut dependees = HashSet::new();

    while let Some(node_idx) = stack.pop() {
      if !visited.insert(node_idx) {
        continue;
      }

      for neighbor_idx in self.graph.neighbors_directed(node_idx, Direction::Incoming) {
        if neighbor_idx != start_node {
          dependees.insert(self.graph[neighbor_idx].address.clone());
        }
        stack.push(neighbor_idx);
      }
    }

    Ok(dependees)
  }

  /// Detect dependency cycles using Tarjan's SCC algorithm.
  ///
  /// Returns strongly connected components with size > 1. Cycles violate the
  /// manifest's acyclicity precondition; this is a diagnostic for `check`,
  /// not something the closure consults.
  pub fn find_cycles(&self) -> Vec<Vec<String>> {
    let sccs = algo::tarjan_scc(&self.graph);

    sccs
      .into_iter()
      .filter(|component| component.len() > 1)
      .map(|component| {
        let mut members: Vec<String> = component
          .into_iter()
          .map(|idx| self.graph[idx].address.clone())
          .collect();
        members.sort();
        members
      })
      .collect()
  }

  /// Find node index by target address.
  pub(crate) fn find_node(&self, address: &str) -> ScopeResult<NodeIndex> {
    self.address_to_node.get(address).copied().ok_or_else(|| {
      ScopeError::Graph(GraphError::UnknownAddress {
        address: address.to_string(),
      })
    })
  }

  pub(crate) fn node_address(&self, idx: NodeIndex) -> &str {
    &self.graph[idx].address
  }

  pub(crate) fn incoming(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
    self.graph.neighbors_directed(idx, Direction::Incoming)
  }
}
