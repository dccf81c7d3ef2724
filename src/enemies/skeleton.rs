//! Summoned skeleton minion behavior and the crew container that owns
//! every live skeleton.

use glam::Vec2;

use crate::combat::{Facing, Health};
use crate::core::{Cooldown, StateCore, StateMachine, StateSet};
use crate::world::TargetSnapshot;

use super::stats::EnemyStats;

/// Multiplier on detection range before an engaged skeleton gives up, so
/// it doesn't flicker at the detection edge.
const ESCAPE_RANGE_FACTOR: f32 = 1.5;

/// Skeleton state identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkeletonStateKind {
    Idle,
    Battle,
    Dead,
}

/// Physical and combat data the skeleton states act on.
#[derive(Debug)]
pub struct SkeletonBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub health: Health,
    pub stats: EnemyStats,
    attack_cooldown: Cooldown,
    attack_ready: bool,
}

/// One persistent [`StateCore`] per skeleton state.
#[derive(Debug, Default)]
struct SkeletonStates {
    idle: StateCore,
    battle: StateCore,
    dead: StateCore,
}

/// Per-tick context threaded through the skeleton states.
struct SkeletonCtx<'a> {
    dt: f32,
    target: TargetSnapshot,
    body: &'a mut SkeletonBody,
}

impl<'a> StateSet<SkeletonCtx<'a>> for SkeletonStates {
    type Kind = SkeletonStateKind;

    fn enter(&mut self, kind: SkeletonStateKind, ctx: &mut SkeletonCtx<'a>) {
        match kind {
            SkeletonStateKind::Idle => {
                self.idle.begin();
                ctx.body.velocity = Vec2::ZERO;
            }
            SkeletonStateKind::Battle => {
                self.battle.begin();
                ctx.body.facing = Facing::toward(ctx.body.position.x, ctx.target.position.x);
            }
            SkeletonStateKind::Dead => {
                self.dead.begin();
                ctx.body.velocity = Vec2::ZERO;
            }
        }
    }

    fn update(
        &mut self,
        kind: SkeletonStateKind,
        ctx: &mut SkeletonCtx<'a>,
    ) -> Option<SkeletonStateKind> {
        let distance = ctx.target.position.distance(ctx.body.position);

        match kind {
            SkeletonStateKind::Idle => {
                self.idle.tick(ctx.dt);
                ctx.body.velocity = Vec2::ZERO;

                if ctx.body.stats.detects(distance) {
                    return Some(SkeletonStateKind::Battle);
                }
                None
            }
            SkeletonStateKind::Battle => {
                self.battle.tick(ctx.dt);

                if distance > ctx.body.stats.detection_range * ESCAPE_RANGE_FACTOR {
                    return Some(SkeletonStateKind::Idle);
                }

                ctx.body.facing = Facing::toward(ctx.body.position.x, ctx.target.position.x);

                if ctx.body.stats.in_attack_range(distance) {
                    ctx.body.velocity = Vec2::ZERO;
                    if ctx.body.attack_cooldown.ready() {
                        ctx.body.attack_ready = true;
                        ctx.body.attack_cooldown.arm(ctx.body.stats.attack_cooldown);
                    }
                } else {
                    ctx.body.velocity =
                        Vec2::new(ctx.body.facing.sign() * ctx.body.stats.move_speed, 0.0);
                }
                None
            }
            SkeletonStateKind::Dead => {
                self.dead.tick(ctx.dt);
                ctx.body.velocity = Vec2::ZERO;
                None
            }
        }
    }

    fn exit(&mut self, _kind: SkeletonStateKind, _ctx: &mut SkeletonCtx<'a>) {}
}

/// One summoned skeleton: a three-state machine over a [`SkeletonBody`].
#[derive(Debug)]
pub struct Skeleton {
    machine: StateMachine<SkeletonStateKind>,
    states: SkeletonStates,
    body: SkeletonBody,
    awakened: bool,
}

impl Skeleton {
    pub fn new(position: Vec2, stats: EnemyStats) -> Self {
        Self {
            machine: StateMachine::new(SkeletonStateKind::Idle),
            states: SkeletonStates::default(),
            body: SkeletonBody {
                position,
                velocity: Vec2::ZERO,
                facing: Facing::default(),
                health: Health::new(stats.max_health),
                stats,
                attack_cooldown: Cooldown::ready_now(),
                attack_ready: false,
            },
            awakened: false,
        }
    }

    /// Advances the skeleton by one frame against the current target
    /// snapshot.
    pub fn update(&mut self, dt: f32, target: TargetSnapshot) {
        self.body.attack_cooldown.tick(dt);

        let mut ctx = SkeletonCtx {
            dt,
            target,
            body: &mut self.body,
        };

        if !self.awakened {
            self.awakened = true;
            self.machine.initialize(&mut self.states, &mut ctx);
        }

        if ctx.body.health.is_dead() && self.machine.current() != SkeletonStateKind::Dead {
            self.machine
                .change_state(&mut self.states, SkeletonStateKind::Dead, &mut ctx);
            return;
        }

        self.machine.update(&mut self.states, &mut ctx);

        // The chase steers by writing velocity; the step itself lands here.
        self.body.position += self.body.velocity * dt;
    }

    /// Entry point for the host damage pipeline. The death transition is
    /// applied on the skeleton's next update.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        self.body.health.take_damage(amount)
    }

    /// Forces the death transition immediately, regardless of remaining
    /// health. Used when the summoner falls.
    pub fn kill(&mut self) {
        self.body.health.take_damage(self.body.health.current);

        if self.machine.current() != SkeletonStateKind::Dead {
            let mut ctx = SkeletonCtx {
                dt: 0.0,
                target: TargetSnapshot::still_at(self.body.position),
                body: &mut self.body,
            };
            if !self.awakened {
                self.awakened = true;
                self.machine.initialize(&mut self.states, &mut ctx);
            }
            self.machine
                .change_state(&mut self.states, SkeletonStateKind::Dead, &mut ctx);
        }
    }

    /// Alive and still fighting. Goes false the moment health runs out,
    /// even before the death transition is applied.
    pub fn is_active(&self) -> bool {
        !self.body.health.is_dead() && self.machine.current() != SkeletonStateKind::Dead
    }

    /// Consumes the pending attack wind-up, if the battle state raised
    /// one. The host plays the swing and applies contact damage.
    pub fn take_attack_ready(&mut self) -> bool {
        std::mem::take(&mut self.body.attack_ready)
    }

    pub fn state(&self) -> SkeletonStateKind {
        self.machine.current()
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn facing(&self) -> Facing {
        self.body.facing
    }

    pub fn health(&self) -> Health {
        self.body.health
    }
}

/// Identifier for a skeleton tracked by a [`SkeletonCrew`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkeletonId(u32);

/// Owns every skeleton in the scene and answers liveness queries by id.
///
/// Ids are never reused; a despawned or dead member simply reads as
/// inactive.
#[derive(Debug)]
pub struct SkeletonCrew {
    template: EnemyStats,
    members: Vec<(SkeletonId, Skeleton)>,
    next_id: u32,
}

impl SkeletonCrew {
    /// A crew that raises skeletons with the given stat block.
    pub fn new(template: EnemyStats) -> Self {
        Self {
            template,
            members: Vec::new(),
            next_id: 0,
        }
    }

    /// Raises a new skeleton at `position` and returns its id.
    pub fn spawn(&mut self, position: Vec2) -> SkeletonId {
        let id = SkeletonId(self.next_id);
        self.next_id += 1;
        self.members
            .push((id, Skeleton::new(position, self.template.clone())));
        id
    }

    pub fn get(&self, id: SkeletonId) -> Option<&Skeleton> {
        self.members
            .iter()
            .find(|(member_id, _)| *member_id == id)
            .map(|(_, skeleton)| skeleton)
    }

    pub fn get_mut(&mut self, id: SkeletonId) -> Option<&mut Skeleton> {
        self.members
            .iter_mut()
            .find(|(member_id, _)| *member_id == id)
            .map(|(_, skeleton)| skeleton)
    }

    /// Present and still fighting.
    pub fn is_active(&self, id: SkeletonId) -> bool {
        self.get(id).is_some_and(|skeleton| skeleton.is_active())
    }

    /// Forces the member's death transition, if it is still present.
    pub fn kill(&mut self, id: SkeletonId) {
        if let Some(skeleton) = self.get_mut(id) {
            skeleton.kill();
        }
    }

    /// Removes a corpse once the host has finished with it.
    pub fn despawn(&mut self, id: SkeletonId) -> Option<Skeleton> {
        let index = self
            .members
            .iter()
            .position(|(member_id, _)| *member_id == id)?;
        Some(self.members.remove(index).1)
    }

    /// Advances every member by one frame.
    pub fn update_all(&mut self, dt: f32, target: TargetSnapshot) {
        for (_, skeleton) in &mut self.members {
            skeleton.update(dt, target);
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.members
            .iter()
            .filter(|(_, skeleton)| skeleton.is_active())
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkeletonId, &Skeleton)> {
        self.members.iter().map(|(id, skeleton)| (*id, skeleton))
    }
}
