//! `changescope owners` - Show which targets claim the given files

use crate::core::context::WorkspaceContext;
use crate::core::error::ScopeResult;
use crate::graph::ownership::OwnershipIndex;
use crate::utils::normalize_against_root;
use std::collections::BTreeSet;
use std::path::Path;

/// Print the union of owning addresses for the given paths, sorted.
///
/// Unclaimed files simply contribute nothing; asking about one is not an
/// error.
pub fn run_owners(ctx: &WorkspaceContext, paths: Vec<String>) -> ScopeResult<()> {
  let ownership = OwnershipIndex::build(&ctx.graph);

  let mut owners = BTreeSet::new();
  for path in &paths {
    let normalized = normalize_against_root(Path::new(path), ctx.workspace_root());
    owners.extend(ownership.owners(Path::new(&normalized)));
  }

  for address in owners {
    println!("{}", address);
  }

  Ok(())
}
