//! Throwable weapon behavior: held, in flight, or returning to its
//! owner.

use glam::Vec2;

use crate::core::{StateCore, StateMachine, StateSet};
use crate::world::SpatialProbe;

/// Thrown weapon state identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrownStateKind {
    Held,
    Flight,
    Returning,
}

/// Flight and catch tuning for a throwable weapon.
#[derive(Debug, Clone, Copy)]
pub struct WeaponTuning {
    pub flight_speed: f32,
    pub return_speed: f32,
    /// Distance flown before the blade stops and pins in place.
    pub max_range: f32,
    /// Distance to the owner at which a returning blade is caught.
    pub catch_radius: f32,
    /// Blade extents used when checking for geometry hits.
    pub half_extents: Vec2,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            flight_speed: 16.0,
            return_speed: 20.0,
            max_range: 18.0,
            catch_radius: 1.0,
            half_extents: Vec2::new(0.25, 0.1),
        }
    }
}

/// Host commands buffered until the next update.
#[derive(Debug, Clone, Copy, PartialEq)]
enum WeaponCommand {
    Throw(Vec2),
    Recall,
}

#[derive(Debug)]
struct WeaponBody {
    position: Vec2,
    velocity: Vec2,
    tuning: WeaponTuning,
}

#[derive(Debug, Default)]
struct HeldState {
    core: StateCore,
}

#[derive(Debug, Default)]
struct FlightState {
    core: StateCore,
    launch_dir: Vec2,
    traveled: f32,
    pinned: bool,
}

#[derive(Debug, Default)]
struct ReturningState {
    core: StateCore,
}

#[derive(Debug, Default)]
struct ThrownStates {
    held: HeldState,
    flight: FlightState,
    returning: ReturningState,
}

struct WeaponCtx<'a> {
    dt: f32,
    owner_position: Vec2,
    probe: &'a dyn SpatialProbe,
    body: &'a mut WeaponBody,
}

impl<'a> StateSet<WeaponCtx<'a>> for ThrownStates {
    type Kind = ThrownStateKind;

    fn enter(&mut self, kind: ThrownStateKind, ctx: &mut WeaponCtx<'a>) {
        match kind {
            ThrownStateKind::Held => {
                self.held.core.begin();
                ctx.body.velocity = Vec2::ZERO;
                ctx.body.position = ctx.owner_position;
            }
            ThrownStateKind::Flight => {
                self.flight.core.begin();
                self.flight.traveled = 0.0;
                self.flight.pinned = false;
                ctx.body.velocity = self.flight.launch_dir * ctx.body.tuning.flight_speed;
            }
            ThrownStateKind::Returning => {
                self.returning.core.begin();
            }
        }
    }

    fn update(&mut self, kind: ThrownStateKind, ctx: &mut WeaponCtx<'a>) -> Option<ThrownStateKind> {
        match kind {
            ThrownStateKind::Held => {
                self.held.core.tick(ctx.dt);
                ctx.body.position = ctx.owner_position;
                None
            }
            ThrownStateKind::Flight => {
                self.flight.core.tick(ctx.dt);

                if self.flight.pinned {
                    ctx.body.velocity = Vec2::ZERO;
                    return None;
                }

                let step = ctx.body.velocity * ctx.dt;
                ctx.body.position += step;
                self.flight.traveled += step.length();

                let hit_geometry = ctx
                    .probe
                    .region_blocked(ctx.body.position, ctx.body.tuning.half_extents);
                if hit_geometry || self.flight.traveled >= ctx.body.tuning.max_range {
                    self.flight.pinned = true;
                    ctx.body.velocity = Vec2::ZERO;
                }
                None
            }
            ThrownStateKind::Returning => {
                self.returning.core.tick(ctx.dt);

                let to_owner = ctx.owner_position - ctx.body.position;
                if to_owner.length() <= ctx.body.tuning.catch_radius {
                    return Some(ThrownStateKind::Held);
                }

                ctx.body.velocity =
                    to_owner.normalize_or_zero() * ctx.body.tuning.return_speed;
                ctx.body.position += ctx.body.velocity * ctx.dt;
                None
            }
        }
    }

    fn exit(&mut self, _kind: ThrownStateKind, _ctx: &mut WeaponCtx<'a>) {}
}

/// A blade the owner can hurl and recall.
///
/// Commands are buffered and applied at the top of the next update, so
/// input handling and the tick stay decoupled.
#[derive(Debug)]
pub struct ThrownWeapon {
    machine: StateMachine<ThrownStateKind>,
    states: ThrownStates,
    body: WeaponBody,
    command: Option<WeaponCommand>,
    awakened: bool,
}

impl ThrownWeapon {
    pub fn new(owner_position: Vec2, tuning: WeaponTuning) -> Self {
        Self {
            machine: StateMachine::new(ThrownStateKind::Held),
            states: ThrownStates::default(),
            body: WeaponBody {
                position: owner_position,
                velocity: Vec2::ZERO,
                tuning,
            },
            command: None,
            awakened: false,
        }
    }

    /// Requests a throw along `direction`. Ignored unless the blade is
    /// held.
    pub fn throw(&mut self, direction: Vec2) {
        self.command = Some(WeaponCommand::Throw(direction));
    }

    /// Requests the blade back. Ignored unless the blade is out.
    pub fn recall(&mut self) {
        self.command = Some(WeaponCommand::Recall);
    }

    /// Advances the blade by one frame, applying at most one buffered
    /// command first.
    pub fn update(&mut self, dt: f32, owner_position: Vec2, probe: &dyn SpatialProbe) {
        let mut ctx = WeaponCtx {
            dt,
            owner_position,
            probe,
            body: &mut self.body,
        };

        if !self.awakened {
            self.awakened = true;
            self.machine.initialize(&mut self.states, &mut ctx);
        }

        match self.command.take() {
            Some(WeaponCommand::Throw(direction))
                if self.machine.current() == ThrownStateKind::Held =>
            {
                let launch = direction.normalize_or_zero();
                if launch != Vec2::ZERO {
                    self.states.flight.launch_dir = launch;
                    self.machine
                        .change_state(&mut self.states, ThrownStateKind::Flight, &mut ctx);
                }
            }
            Some(WeaponCommand::Recall)
                if self.machine.current() == ThrownStateKind::Flight =>
            {
                self.machine
                    .change_state(&mut self.states, ThrownStateKind::Returning, &mut ctx);
            }
            _ => {}
        }

        self.machine.update(&mut self.states, &mut ctx);
    }

    pub fn state(&self) -> ThrownStateKind {
        self.machine.current()
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Stuck in place, waiting for a recall.
    pub fn is_pinned(&self) -> bool {
        self.machine.current() == ThrownStateKind::Flight && self.states.flight.pinned
    }
}
