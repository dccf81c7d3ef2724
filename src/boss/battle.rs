//! Battle-state decision logic: the timed draw with its probability
//! tiers, positioning, and the emergency teleport budget.

use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::combat::Facing;
use crate::core::{Cooldown, StateCore};
use crate::enemies::{BossTuning, DecisionWeights};

use super::states::{BossCtx, BossStateKind};

/// What one battle decision resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Teleport,
    CastSpell,
    Summon,
    /// Nothing usable came of the draw; stand still for this tick.
    HoldPosition,
}

/// Capability gates sampled at the moment of a draw.
#[derive(Debug, Clone, Copy)]
pub struct DecisionGates {
    pub critical_health: bool,
    pub teleport_safe: bool,
    pub spell_ready: bool,
    pub summon_ready: bool,
}

/// Applies the health and summon-recency tiers to the base buckets.
///
/// Order matters: the summon redistribution applies first, then critical
/// health zeroes the teleport bucket on top of whatever holds, while the
/// wounded tier replaces the whole table.
pub fn adjusted_weights(
    tuning: &BossTuning,
    health_fraction: f32,
    summon_choice_recent: bool,
) -> DecisionWeights {
    let mut weights = if summon_choice_recent {
        tuning.cooling_weights
    } else {
        tuning.base_weights
    };

    if health_fraction <= tuning.critical_fraction {
        weights.teleport = 0.0;
    } else if health_fraction <= tuning.wounded_fraction {
        weights = tuning.wounded_weights;
    }

    weights
}

/// Resolves one draw in `0.0..1.0` against the weighted buckets,
/// mirroring the in-fight branch order: cumulative bucket checks with
/// capability gates, then the fallback arm.
pub fn choose_action(draw: f32, weights: DecisionWeights, gates: &DecisionGates) -> Decision {
    if draw < weights.teleport && gates.teleport_safe {
        return Decision::Teleport;
    }
    if draw < weights.teleport + weights.spell && gates.spell_ready {
        return Decision::CastSpell;
    }
    if gates.summon_ready {
        return Decision::Summon;
    }

    // Fallback arm: nothing the draw picked was available.
    if gates.critical_health || !gates.teleport_safe {
        if gates.spell_ready {
            Decision::CastSpell
        } else {
            Decision::HoldPosition
        }
    } else {
        // Not gated by the draw: a healthy boss with everything else on
        // cooldown always blinks away.
        Decision::Teleport
    }
}

/// The Battle state: positioning plus the timed decision draw.
///
/// All bookkeeping here persists across exits and re-entries; leaving
/// Battle for a cast or a teleport doesn't reset the decision clock, the
/// proximity counter, or the teleport budget.
#[derive(Debug)]
pub struct BattleState {
    pub(crate) core: StateCore,
    /// Clock between timed decision draws.
    decision: Cooldown,
    /// Runs from the moment a draw picks Summon; while it runs, the
    /// cooling weight tier applies.
    summon_choice: Cooldown,
    /// Consecutive ticks with the target inside the emergency distance.
    close_ticks: u32,
    /// Emergency teleports consumed from the current budget.
    teleports_used: u32,
    /// Rest clock running once the budget is spent; `None` while the
    /// budget is open.
    budget_rest: Option<f32>,
}

impl BattleState {
    pub(crate) fn new(tuning: &BossTuning) -> Self {
        Self {
            core: StateCore::default(),
            decision: Cooldown::armed(tuning.decision_time),
            summon_choice: Cooldown::ready_now(),
            close_ticks: 0,
            teleports_used: 0,
            budget_rest: None,
        }
    }

    pub(crate) fn enter(&mut self, ctx: &mut BossCtx<'_>) {
        self.core.begin();
        ctx.orchestrator.velocity = Vec2::ZERO;
        ctx.orchestrator.face_target(&ctx.target);
    }

    pub(crate) fn update(&mut self, ctx: &mut BossCtx<'_>) -> Option<BossStateKind> {
        let dt = ctx.dt;
        self.core.tick(dt);
        self.decision.tick(dt);
        self.summon_choice.tick(dt);

        let tuning = ctx.orchestrator.tuning;
        let position = ctx.orchestrator.position;
        let health_fraction = ctx.orchestrator.health.fraction();
        let distance = ctx.target.position.distance(position);

        let budget = if health_fraction <= tuning.wounded_fraction {
            tuning.wounded_teleport_budget
        } else {
            tuning.teleport_budget
        };
        self.tick_budget_rest(dt, budget, &tuning);

        // Cornered against a wall: blink out as soon as it is safe to.
        if ctx.probe.wall_ahead(position, ctx.orchestrator.facing)
            && ctx.orchestrator.can_teleport_safely()
        {
            return Some(BossStateKind::Teleport);
        }

        // Proximity pressure: sustained contact range forces a budgeted
        // teleport.
        if distance < tuning.emergency_distance {
            self.close_ticks += 1;
        } else {
            self.close_ticks = 0;
        }
        if self.close_ticks >= tuning.emergency_ticks
            && self.budget_rest.is_none()
            && self.teleports_used < budget
            && ctx.orchestrator.can_teleport_safely()
        {
            self.close_ticks = 0;
            self.teleports_used += 1;
            if self.teleports_used >= budget {
                self.budget_rest = Some(tuning.teleport_budget_rest);
            }
            return Some(BossStateKind::Teleport);
        }

        // Timed decision draw.
        if self.decision.ready() {
            self.decision.arm(tuning.decision_time);

            let draw = ctx.orchestrator.rng.gen::<f32>();
            let weights = adjusted_weights(&tuning, health_fraction, !self.summon_choice.ready());
            let gates = DecisionGates {
                critical_health: health_fraction <= tuning.critical_fraction,
                teleport_safe: ctx.orchestrator.can_teleport_safely(),
                spell_ready: ctx.orchestrator.can_cast_spell(),
                summon_ready: ctx.orchestrator.can_summon(),
            };
            let decision = choose_action(draw, weights, &gates);
            debug!("battle decision: draw {draw:.2} -> {decision:?}");

            match decision {
                Decision::Teleport => return Some(BossStateKind::Teleport),
                Decision::CastSpell => return Some(BossStateKind::SpellCast),
                Decision::Summon => {
                    self.summon_choice.arm(tuning.summon_cooldown);
                    return Some(BossStateKind::Summon);
                }
                Decision::HoldPosition => {
                    ctx.orchestrator.velocity = Vec2::ZERO;
                    return None;
                }
            }
        }

        // Positioning: retreat inside the preferred band, advance outside
        // it, and treat sitting in the band as a cast trigger of its own.
        if distance < tuning.preferred_min_distance {
            let away = Facing::toward(position.x, ctx.target.position.x).flip();
            ctx.orchestrator.facing = away;
            ctx.orchestrator.velocity = Vec2::new(away.sign() * tuning.retreat_speed, 0.0);
            None
        } else if distance > tuning.preferred_max_distance {
            ctx.orchestrator.face_target(&ctx.target);
            let speed = ctx.orchestrator.stats.move_speed;
            ctx.orchestrator.velocity =
                Vec2::new(ctx.orchestrator.facing.sign() * speed, 0.0);
            None
        } else {
            Some(BossStateKind::SpellCast)
        }
    }

    pub(crate) fn exit(&mut self, _ctx: &mut BossCtx<'_>) {}

    /// Runs the budget rest clock down and reopens the budget once it
    /// elapses. Also closes the budget when a health-tier change shrinks
    /// it below what is already spent.
    fn tick_budget_rest(&mut self, dt: f32, budget: u32, tuning: &BossTuning) {
        match &mut self.budget_rest {
            Some(rest) => {
                *rest -= dt;
                if *rest <= 0.0 {
                    self.budget_rest = None;
                    self.teleports_used = 0;
                }
            }
            None => {
                if self.teleports_used >= budget {
                    self.budget_rest = Some(tuning.teleport_budget_rest);
                }
            }
        }
    }
}
