//! Per-tick snapshot of the opposing actor.

use glam::Vec2;

/// What the behavior core knows about its target this tick.
///
/// The host samples this once per frame from the live transform; all
/// distance and facing math runs against the snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSnapshot {
    pub position: Vec2,
    /// Magnitude of the target's horizontal velocity, used to scatter
    /// spell placement against a moving target.
    pub horizontal_speed: f32,
}

impl TargetSnapshot {
    /// A target standing still at `position`.
    pub fn still_at(position: Vec2) -> Self {
        Self {
            position,
            horizontal_speed: 0.0,
        }
    }

    /// A target at `position` moving horizontally at `speed`.
    pub fn moving_at(position: Vec2, speed: f32) -> Self {
        Self {
            position,
            horizontal_speed: speed,
        }
    }
}
