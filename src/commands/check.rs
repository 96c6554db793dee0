//! `changescope check` - Manifest health checks
//!
//! Duplicate addresses and dangling dependencies are rejected when the
//! context is built, before this command runs; what remains to verify here is
//! the acyclicity precondition the closure relies on.

use crate::core::context::WorkspaceContext;
use crate::core::error::{GraphError, ScopeError, ScopeResult};
use crate::graph::ownership::OwnershipIndex;

pub fn run_check(ctx: &WorkspaceContext) -> ScopeResult<()> {
  let ownership = OwnershipIndex::build(&ctx.graph);

  if ctx.graph.is_empty() {
    println!("⚠️  Manifest declares no targets");
    return Ok(());
  }

  println!("Targets declared: {}", ctx.graph.len());
  println!("Files claimed: {}", ownership.claimed_files());

  let cycles = ctx.graph.find_cycles();
  if cycles.is_empty() {
    println!("✅ Dependency graph is acyclic");
    return Ok(());
  }

  for cycle in &cycles {
    eprintln!("  ♻️  {}", cycle.join(" -> "));
  }

  Err(ScopeError::Graph(GraphError::DependencyCycle {
    members: cycles[0].clone(),
  }))
}
