#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Simulation core for a grid snake game, with no rendering concerns.
//! The engine owns the board geometry, the snake's body (an index-linked
//! chain with a cached occupancy set for O(1) collision checks), food
//! placement, and the tick state machine that advances the game one step
//! at a time.
//!
//! A UI collaborator drives [`engine::GameState`] from a fixed-interval
//! timer and a keyboard handler, and reads it back through the capability
//! traits in [`types`] or a serialized [`snapshot::Snapshot`]. All random
//! draws go through a caller-supplied [`rand::Rng`], so a seeded
//! `SmallRng` makes every transition reproducible.

use snapshot::Snapshot;

pub mod board;
pub mod engine;
pub mod food;
pub mod snake;
pub mod snapshot;
pub mod types;

/// Loads a snapshot fixture from a given string
pub fn snapshot_fixture(fixture: &str) -> Snapshot {
    let s: Result<Snapshot, _> = serde_json::from_str(fixture);
    s.expect("the json literal is valid")
}
