//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`'s `dt`
//! - Randomness only from the caller's RNG
//! - Stable entity order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod round;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, circles_overlap, resolve_collisions};
pub use input::{InputState, Key};
pub use round::{advance_clock, start_round};
pub use spawn::{next_spawn_interval, spawn_bird};
pub use state::{
    Bird, BirdKind, BirdType, Bullet, BulletColor, GameEvent, GameState, Playfield, Player,
    RoundOutcome, RoundPhase,
};
pub use tick::tick;
