//! Weapons module - throwable weapon behavior.

mod thrown;

pub use thrown::{ThrownStateKind, ThrownWeapon, WeaponTuning};
