//! `changescope list` - Print every declared target address

use crate::core::context::WorkspaceContext;
use crate::core::error::ScopeResult;

pub fn run_list(ctx: &WorkspaceContext) -> ScopeResult<()> {
  for address in ctx.graph.addresses() {
    println!("{}", address);
  }
  Ok(())
}
