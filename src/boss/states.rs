//! The Necromancer's behavior states and their dispatch.
//!
//! Each state is one persistent struct inside [`NecromancerStates`];
//! the machine addresses them by [`BossStateKind`]. The act states
//! (SpellCast, Summon, Teleport) hold still until the host's animation
//! layer raises their trigger, then perform their action and hand
//! control back to Battle.

use glam::Vec2;
use rand::Rng;

use crate::core::{StateCore, StateSet};
use crate::enemies::{BossTuning, SkeletonCrew};
use crate::world::{SpatialProbe, TargetSnapshot};

use super::battle::BattleState;
use super::orchestrator::Orchestrator;
use super::signals::BossSignal;

/// Identity of each Necromancer behavior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossStateKind {
    Idle,
    Battle,
    SpellCast,
    Summon,
    Teleport,
    Dead,
}

/// Per-tick context threaded through the boss states.
pub struct BossCtx<'a> {
    pub dt: f32,
    pub target: TargetSnapshot,
    pub probe: &'a dyn SpatialProbe,
    pub crew: &'a mut SkeletonCrew,
    pub orchestrator: &'a mut Orchestrator,
}

/// One persistent value per boss state, constructed with the boss and
/// reused for the whole encounter.
#[derive(Debug)]
pub struct NecromancerStates {
    pub(crate) idle: IdleState,
    pub(crate) battle: BattleState,
    pub(crate) spell_cast: SpellCastState,
    pub(crate) summon: SummonState,
    pub(crate) teleport: TeleportState,
    pub(crate) dead: DeadState,
}

impl NecromancerStates {
    pub fn new(tuning: &BossTuning) -> Self {
        Self {
            idle: IdleState::default(),
            battle: BattleState::new(tuning),
            spell_cast: SpellCastState::default(),
            summon: SummonState::default(),
            teleport: TeleportState::default(),
            dead: DeadState::default(),
        }
    }

    /// The base data of the given state.
    pub(crate) fn core_mut(&mut self, kind: BossStateKind) -> &mut StateCore {
        match kind {
            BossStateKind::Idle => &mut self.idle.core,
            BossStateKind::Battle => &mut self.battle.core,
            BossStateKind::SpellCast => &mut self.spell_cast.core,
            BossStateKind::Summon => &mut self.summon.core,
            BossStateKind::Teleport => &mut self.teleport.core,
            BossStateKind::Dead => &mut self.dead.core,
        }
    }
}

impl<'a> StateSet<BossCtx<'a>> for NecromancerStates {
    type Kind = BossStateKind;

    fn enter(&mut self, kind: BossStateKind, ctx: &mut BossCtx<'a>) {
        ctx.orchestrator.push_signal(BossSignal::StateEntered(kind));
        match kind {
            BossStateKind::Idle => self.idle.enter(ctx),
            BossStateKind::Battle => self.battle.enter(ctx),
            BossStateKind::SpellCast => self.spell_cast.enter(ctx),
            BossStateKind::Summon => self.summon.enter(ctx),
            BossStateKind::Teleport => self.teleport.enter(ctx),
            BossStateKind::Dead => self.dead.enter(ctx),
        }
    }

    fn update(&mut self, kind: BossStateKind, ctx: &mut BossCtx<'a>) -> Option<BossStateKind> {
        match kind {
            BossStateKind::Idle => self.idle.update(ctx),
            BossStateKind::Battle => self.battle.update(ctx),
            BossStateKind::SpellCast => self.spell_cast.update(ctx),
            BossStateKind::Summon => self.summon.update(ctx),
            BossStateKind::Teleport => self.teleport.update(ctx),
            BossStateKind::Dead => self.dead.update(ctx),
        }
    }

    fn exit(&mut self, kind: BossStateKind, ctx: &mut BossCtx<'a>) {
        match kind {
            BossStateKind::Battle => self.battle.exit(ctx),
            BossStateKind::Teleport => self.teleport.exit(ctx),
            _ => {}
        }
        ctx.orchestrator.push_signal(BossSignal::StateExited(kind));
    }
}

/// Waiting for the target to come into detection range.
#[derive(Debug, Default)]
pub(crate) struct IdleState {
    pub(crate) core: StateCore,
}

impl IdleState {
    fn enter(&mut self, ctx: &mut BossCtx<'_>) {
        self.core.begin();
        // The idle timer is armed for parity with the other states;
        // detection alone drives the hand-off to Battle.
        self.core.arm_timer(ctx.orchestrator.tuning.idle_time);
        ctx.orchestrator.velocity = Vec2::ZERO;
    }

    fn update(&mut self, ctx: &mut BossCtx<'_>) -> Option<BossStateKind> {
        self.core.tick(ctx.dt);
        ctx.orchestrator.velocity = Vec2::ZERO;

        let distance = ctx.target.position.distance(ctx.orchestrator.position);
        if ctx.orchestrator.stats.detects(distance) {
            return Some(BossStateKind::Battle);
        }
        None
    }
}

/// Holding the cast pose until the animation completes, then conjuring
/// the spell.
#[derive(Debug, Default)]
pub(crate) struct SpellCastState {
    pub(crate) core: StateCore,
}

impl SpellCastState {
    fn enter(&mut self, ctx: &mut BossCtx<'_>) {
        self.core.begin();
        ctx.orchestrator.velocity = Vec2::ZERO;
    }

    fn update(&mut self, ctx: &mut BossCtx<'_>) -> Option<BossStateKind> {
        self.core.tick(ctx.dt);
        ctx.orchestrator.velocity = Vec2::ZERO;

        if self.core.trigger.take() {
            ctx.orchestrator.cast_spell(&ctx.target);
            return Some(BossStateKind::Battle);
        }
        None
    }
}

/// Holding the ritual pose until the animation completes, then raising a
/// skeleton near the target.
#[derive(Debug, Default)]
pub(crate) struct SummonState {
    pub(crate) core: StateCore,
}

impl SummonState {
    fn enter(&mut self, ctx: &mut BossCtx<'_>) {
        self.core.begin();
        ctx.orchestrator.velocity = Vec2::ZERO;
    }

    fn update(&mut self, ctx: &mut BossCtx<'_>) -> Option<BossStateKind> {
        self.core.tick(ctx.dt);
        ctx.orchestrator.velocity = Vec2::ZERO;

        if self.core.trigger.take() {
            let jitter = ctx.orchestrator.tuning.summon_jitter_x;
            let offset = ctx.orchestrator.rng.gen_range(-jitter..=jitter);
            let anchor_x = ctx.target.position.x + offset;
            ctx.orchestrator.summon_skeleton_at(ctx.crew, anchor_x);
            return Some(BossStateKind::Battle);
        }
        None
    }
}

/// Wind-up for the blink: the relocation itself happens when the vanish
/// animation completes.
#[derive(Debug, Default)]
pub(crate) struct TeleportState {
    pub(crate) core: StateCore,
}

impl TeleportState {
    fn enter(&mut self, ctx: &mut BossCtx<'_>) {
        self.core.begin();
        ctx.orchestrator.velocity = Vec2::ZERO;
        ctx.orchestrator.face_target(&ctx.target);
    }

    fn update(&mut self, ctx: &mut BossCtx<'_>) -> Option<BossStateKind> {
        self.core.tick(ctx.dt);
        ctx.orchestrator.velocity = Vec2::ZERO;

        if self.core.trigger.take() {
            ctx.orchestrator.relocate(ctx.probe);
            return Some(BossStateKind::Battle);
        }
        None
    }

    fn exit(&mut self, ctx: &mut BossCtx<'_>) {
        // Reappearing can put the target on the other side; face it again
        // on the way out.
        ctx.orchestrator.face_target(&ctx.target);
    }
}

/// Terminal state. Nothing leaves Dead.
#[derive(Debug, Default)]
pub(crate) struct DeadState {
    pub(crate) core: StateCore,
}

impl DeadState {
    fn enter(&mut self, ctx: &mut BossCtx<'_>) {
        self.core.begin();
        ctx.orchestrator.velocity = Vec2::ZERO;
        ctx.orchestrator.collider_enabled = false;
        ctx.orchestrator.physics_frozen = true;

        if !ctx.orchestrator.defeat_announced {
            ctx.orchestrator.defeat_announced = true;
            ctx.orchestrator.push_signal(BossSignal::Defeated);
            ctx.orchestrator.push_signal(BossSignal::ExitPortalRequested);
        }
    }

    fn update(&mut self, ctx: &mut BossCtx<'_>) -> Option<BossStateKind> {
        self.core.tick(ctx.dt);
        ctx.orchestrator.velocity = Vec2::ZERO;
        None
    }
}
