//! Signals the boss core emits for its host.
//!
//! Signals let the behavior core hand work to engine-side systems without
//! knowing them: the animation driver latches state flags, spawn
//! factories consume spell and summon positions, and the progress layer
//! records the defeat. The host drains the buffer once per frame.

use glam::Vec2;

use crate::enemies::SkeletonId;

use super::states::BossStateKind;

/// One outbound notification from the boss core, in emission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossSignal {
    /// A state became active. The animation driver raises the matching
    /// flag.
    StateEntered(BossStateKind),
    /// A state stopped being active. The animation driver lowers the
    /// matching flag.
    StateExited(BossStateKind),
    /// Spawn one spell projectile at `spawn`.
    SpellCast { spawn: Vec2 },
    /// One skeleton was raised at `position` and joined the roster.
    SkeletonSummoned { id: SkeletonId, position: Vec2 },
    /// The boss vanished at `from` and reappeared at `to`.
    Teleported { from: Vec2, to: Vec2 },
    /// A teleport was requested but no safe destination exists; the boss
    /// held position.
    TeleportSearchFailed,
    /// The boss died. Record the defeat durably.
    Defeated,
    /// Open the arena's exit portal.
    ExitPortalRequested,
}
