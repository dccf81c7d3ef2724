//! Gravemire AI - the enemy and boss behavior core of a 2D action RPG.
//!
//! This crate is the engine-agnostic half of Gravemire's encounters: it
//! owns the state machines and decision logic, while the host engine
//! keeps physics, animation, rendering, and input. Each frame the host
//! feeds in a world snapshot, ticks the behaviors, and drains the
//! signals they emitted.
//!
//! # Architecture
//!
//! The crate is organized into modules, each handling a specific aspect:
//!
//! - **Core**: the state machine, cooldown timers, trigger mailboxes
//! - **Combat**: health and facing shared by every fighter
//! - **World**: arena bounds, spatial queries, target snapshots
//! - **Enemies**: shared stats, RON definitions, the skeleton minion
//! - **Boss**: the Necromancer orchestrator, its states, the battle
//!   policy
//! - **Weapons**: throwable weapon behavior
//!
//! Everything is single-threaded and frame-driven: one update per
//! rendered frame, timers counted down by elapsed seconds, transitions
//! applied synchronously.

pub mod boss;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod weapons;
pub mod world;
