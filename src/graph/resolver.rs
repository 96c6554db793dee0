//! Change-impact resolution
//!
//! Top-level orchestration: translate a changed-file set (or explicit target
//! specs) into the impacted target set. The pipeline is fixed:
//!
//! 1. seeds — owning targets of each changed file, or the given specs
//! 2. closure — dependee expansion per the requested mode
//! 3. exclusion — regex post-filter on the closed set
//!
//! Each resolution is a pure function of (graph, ownership, request): no
//! mutation, no ambient state, identical inputs give identical sets. The
//! exclusion filter is compiled before any traversal so an invalid pattern
//! fails the request up front.

use crate::core::error::ScopeResult;
use crate::graph::closure::{self, DependeeMode};
use crate::graph::exclude::ExcludeFilter;
use crate::graph::ownership::OwnershipIndex;
use crate::graph::target_graph::TargetGraph;
use crate::utils::normalize_rel_path;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// A deduplicated, normalized set of changed file paths.
///
/// Value semantics: input order and duplicates are irrelevant.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
  files: BTreeSet<String>,
}

impl ChangeSet {
  pub fn from_paths<I>(paths: I) -> Self
  where
    I: IntoIterator,
    I::Item: AsRef<Path>,
  {
    let files = paths
      .into_iter()
      .map(|p| normalize_rel_path(p.as_ref()))
      .filter(|p| !p.is_empty())
      .collect();
    Self { files }
  }

  pub fn files(&self) -> impl Iterator<Item = &str> {
    self.files.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }
}

/// Where the seed targets come from.
#[derive(Debug, Clone)]
pub enum SeedInput {
  /// File-based: changed files mapped through the ownership index
  Files(ChangeSet),

  /// Spec-based: explicit addresses, bypassing ownership entirely
  Specs(Vec<String>),
}

/// One resolution request.
#[derive(Debug, Clone)]
pub struct ImpactRequest {
  pub mode: DependeeMode,
  pub exclude_patterns: Vec<String>,
  pub seeds: SeedInput,
}

/// Resolve a request to the final impacted-target set.
pub fn resolve(graph: &TargetGraph, ownership: &OwnershipIndex, request: &ImpactRequest) -> ScopeResult<HashSet<String>> {
  match &request.seeds {
    SeedInput::Files(change_set) => {
      resolve_from_files(graph, ownership, change_set, request.mode, &request.exclude_patterns)
    }
    SeedInput::Specs(addresses) => resolve_from_specs(graph, addresses, request.mode, &request.exclude_patterns),
  }
}

/// File-seeded resolution: ownership lookup, closure, exclusion.
///
/// Unclaimed files contribute no seeds; a change set of only unclaimed files
/// resolves to the empty set under every mode.
pub fn resolve_from_files(
  graph: &TargetGraph,
  ownership: &OwnershipIndex,
  change_set: &ChangeSet,
  mode: DependeeMode,
  exclude_patterns: &[String],
) -> ScopeResult<HashSet<String>> {
  let filter = ExcludeFilter::compile(exclude_patterns)?;

  let mut seeds = HashSet::new();
  for file in change_set.files() {
    seeds.extend(ownership.owners(Path::new(file)));
  }

  let closed = closure::close(graph, &seeds, mode)?;
  Ok(filter.apply(closed))
}

/// Spec-seeded resolution: the given addresses seed the closure directly.
pub fn resolve_from_specs(
  graph: &TargetGraph,
  addresses: &[String],
  mode: DependeeMode,
  exclude_patterns: &[String],
) -> ScopeResult<HashSet<String>> {
  let filter = ExcludeFilter::compile(exclude_patterns)?;

  let seeds: HashSet<String> = addresses.iter().cloned().collect();

  let closed = closure::close(graph, &seeds, mode)?;
  Ok(filter.apply(closed))
}

/// Degenerate file-output shape: the raw changed-file set, untouched by
/// graph, ownership, closure, or exclusion.
pub fn resolve_files(change_set: &ChangeSet) -> BTreeSet<String> {
  change_set.files().map(str::to_string).collect()
}
