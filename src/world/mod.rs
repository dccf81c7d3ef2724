//! World module - the arena, spatial queries, and target snapshots.

mod arena;
mod probe;
mod target;

pub use arena::ArenaBounds;
pub use probe::{OpenArena, SpatialProbe};
pub use target::TargetSnapshot;
