//! Enemies module - shared stats, definitions, and the skeleton minion.

mod data;
mod error;
mod skeleton;
mod stats;

pub use data::{
    BossDefinition, BossTuning, DecisionWeights, DefinitionRegistry, EnemyDefinition,
};
pub use error::DataLoadError;
pub use skeleton::{Skeleton, SkeletonCrew, SkeletonId, SkeletonStateKind};
pub use stats::EnemyStats;
