//! Combat module - health and facing shared by every fighter.

mod facing;
mod health;

pub use facing::Facing;
pub use health::Health;
