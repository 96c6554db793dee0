//! Target graph, ownership index, and change-impact resolution

pub mod closure;
pub mod exclude;
pub mod ownership;
pub mod resolver;
pub mod target_graph;

pub use closure::DependeeMode;
pub use ownership::OwnershipIndex;
pub use resolver::{ChangeSet, ImpactRequest, SeedInput};
pub use target_graph::TargetGraph;
