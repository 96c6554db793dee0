//! CLI commands for changescope
//!
//! - **changed**: resolve changed files (or explicit specs) to impacted targets
//! - **list**: print every declared target address
//! - **owners**: show which targets claim the given files
//! - **check**: manifest health checks (cycle detection)
//!
//! All commands accept `&WorkspaceContext` to avoid redundant workspace loads.

pub mod changed;
pub mod check;
pub mod list;
pub mod owners;

pub use changed::run_changed;
pub use check::run_check;
pub use list::run_list;
pub use owners::run_owners;
