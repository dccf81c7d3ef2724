//! Core behavior module - the state machine, timers, and trigger plumbing.
//!
//! This module provides the foundation every other behavior system builds
//! upon.

mod machine;
mod state;
mod timer;

pub use machine::{StateMachine, StateSet};
pub use state::{StateCore, TriggerMailbox};
pub use timer::Cooldown;
