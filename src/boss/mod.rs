//! Boss module - the Necromancer fight.

mod battle;
mod necromancer;
mod orchestrator;
mod signals;
mod states;

pub use battle::{adjusted_weights, choose_action, Decision, DecisionGates};
pub use necromancer::Necromancer;
pub use orchestrator::Orchestrator;
pub use signals::BossSignal;
pub use states::{BossCtx, BossStateKind, NecromancerStates};
