//! Horizontal facing for 2D sprites.

/// Which way an entity's sprite points along the X axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Unit sign on the X axis: `-1.0` for left, `1.0` for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// The facing that looks from `from_x` toward `target_x`. A dead-on
    /// overlap resolves to `Right`.
    pub fn toward(from_x: f32, target_x: f32) -> Self {
        if target_x < from_x {
            Facing::Left
        } else {
            Facing::Right
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}
