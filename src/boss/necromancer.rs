//! The Necromancer boss: the entry point hosts drive.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::combat::{Facing, Health};
use crate::core::StateMachine;
use crate::enemies::{BossDefinition, BossTuning, EnemyStats, SkeletonCrew};
use crate::world::{ArenaBounds, SpatialProbe, TargetSnapshot};

use super::orchestrator::Orchestrator;
use super::signals::BossSignal;
use super::states::{BossCtx, BossStateKind, NecromancerStates};

/// The Necromancer: a six-state machine over an [`Orchestrator`].
///
/// The host calls [`update`](Necromancer::update) once per frame, routes
/// animation completions through
/// [`notify_animation_finished`](Necromancer::notify_animation_finished),
/// applies damage through [`take_damage`](Necromancer::take_damage), and
/// drains outbound work from
/// [`drain_signals`](Necromancer::drain_signals). Walking is resolved
/// internally: each update applies the active state's velocity to the
/// body, so hosts mirror [`position`](Necromancer::position) rather than
/// integrating [`velocity`](Necromancer::velocity) themselves.
#[derive(Debug)]
pub struct Necromancer {
    machine: StateMachine<BossStateKind>,
    states: NecromancerStates,
    orchestrator: Orchestrator,
    awakened: bool,
}

impl Necromancer {
    /// A boss with operating-system entropy behind its decisions.
    pub fn new(definition: &BossDefinition, position: Vec2, arena: ArenaBounds) -> Self {
        Self::with_rng(definition, position, arena, StdRng::from_entropy())
    }

    /// A boss with caller-controlled randomness, for replays and tests.
    pub fn with_rng(
        definition: &BossDefinition,
        position: Vec2,
        arena: ArenaBounds,
        rng: StdRng,
    ) -> Self {
        Self {
            machine: StateMachine::new(BossStateKind::Idle),
            states: NecromancerStates::new(&definition.tuning),
            orchestrator: Orchestrator::new(definition, position, arena, rng),
            awakened: false,
        }
    }

    /// Advances the boss by one frame against the current world snapshot.
    pub fn update(
        &mut self,
        dt: f32,
        target: TargetSnapshot,
        probe: &dyn SpatialProbe,
        crew: &mut SkeletonCrew,
    ) {
        self.orchestrator.begin_tick(dt, crew);

        let mut ctx = BossCtx {
            dt,
            target,
            probe,
            crew,
            orchestrator: &mut self.orchestrator,
        };

        // States are entered on the first tick, once the first world
        // snapshot exists.
        if !self.awakened {
            self.awakened = true;
            self.machine.initialize(&mut self.states, &mut ctx);
        }

        if ctx.orchestrator.health.is_dead() && self.machine.current() != BossStateKind::Dead {
            // The summoner falls and takes the whole crew with it.
            let summoned = std::mem::take(&mut ctx.orchestrator.summoned);
            for id in summoned {
                ctx.crew.kill(id);
            }
            self.machine
                .change_state(&mut self.states, BossStateKind::Dead, &mut ctx);
            return;
        }

        self.machine.update(&mut self.states, &mut ctx);

        // States steer by writing velocity; the step itself lands here.
        if !self.orchestrator.physics_frozen {
            self.orchestrator.position += self.orchestrator.velocity * dt;
        }
    }

    /// Entry point for the host damage pipeline. States never mutate
    /// health; the death transition lands on the next update.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        self.orchestrator.health.take_damage(amount)
    }

    /// The host's animation layer reports that the active state's act
    /// finished. Raises the active state's trigger mailbox.
    pub fn notify_animation_finished(&mut self) {
        self.states
            .core_mut(self.machine.current())
            .trigger
            .raise();
    }

    /// Outbound work accumulated since the last drain, in emission order.
    pub fn drain_signals(&mut self) -> Vec<BossSignal> {
        std::mem::take(&mut self.orchestrator.signals)
    }

    pub fn state(&self) -> BossStateKind {
        self.machine.current()
    }

    pub fn position(&self) -> Vec2 {
        self.orchestrator.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.orchestrator.velocity
    }

    pub fn facing(&self) -> Facing {
        self.orchestrator.facing
    }

    pub fn health(&self) -> Health {
        self.orchestrator.health
    }

    pub fn stats(&self) -> &EnemyStats {
        &self.orchestrator.stats
    }

    pub fn tuning(&self) -> &BossTuning {
        &self.orchestrator.tuning
    }

    /// Skeletons currently tracked as this boss's summons.
    pub fn summoned_count(&self) -> usize {
        self.orchestrator.summoned_count()
    }

    /// Host flag: whether the boss's hurtbox should accept contacts.
    pub fn collider_enabled(&self) -> bool {
        self.orchestrator.collider_enabled
    }

    /// Host flag: whether the body should be frozen in the physics
    /// world.
    pub fn physics_frozen(&self) -> bool {
        self.orchestrator.physics_frozen
    }

    pub fn can_cast_spell(&self) -> bool {
        self.orchestrator.can_cast_spell()
    }

    pub fn can_summon(&self) -> bool {
        self.orchestrator.can_summon()
    }

    pub fn can_teleport_safely(&self) -> bool {
        self.orchestrator.can_teleport_safely()
    }
}
