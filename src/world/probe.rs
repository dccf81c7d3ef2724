//! Spatial queries answered by the host's physics layer.

use glam::Vec2;

use crate::combat::Facing;

/// Collision and geometry questions the behavior core asks the host.
///
/// The engine implements this against its physics world; tests implement
/// it with scripted answers.
pub trait SpatialProbe {
    /// Is there a wall directly ahead of `from` in the `facing`
    /// direction?
    fn wall_ahead(&self, from: Vec2, facing: Facing) -> bool;

    /// Is there ground below `point`?
    fn ground_below(&self, point: Vec2) -> bool;

    /// Would a body of `half_extents` centered at `center` overlap level
    /// geometry or another occupant?
    fn region_blocked(&self, center: Vec2, half_extents: Vec2) -> bool;
}

/// Probe for an open arena: no walls, ground everywhere, nothing blocked.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenArena;

impl SpatialProbe for OpenArena {
    fn wall_ahead(&self, _from: Vec2, _facing: Facing) -> bool {
        false
    }

    fn ground_below(&self, _point: Vec2) -> bool {
        true
    }

    fn region_blocked(&self, _center: Vec2, _half_extents: Vec2) -> bool {
        false
    }
}
