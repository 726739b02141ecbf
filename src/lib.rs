//! Bird Barrage - A timed arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, round state)
//! - `game`: Controller that owns the simulation and talks to drivers
//! - `snapshot`: Read-only view consumed by renderers and the HUD
//! - `settings`: Data-driven game tuning
//! - `highscores`: In-memory best score tracking

pub mod game;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::{ConfigError, Tuning};
pub use snapshot::{Hud, Snapshot};

/// Game configuration constants
///
/// These are the defaults for [`Tuning`]; the simulation itself always reads
/// the tuning held in its state.
pub mod consts {
    /// Length of a round in seconds
    pub const GAME_DURATION: f32 = 120.0;
    /// Minimum time between shots while fire is held
    pub const FIRE_RATE: f32 = 0.25;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 320.0;
    /// Gap kept between the player and the playfield edges
    pub const PLAYER_MARGIN: f32 = 10.0;
    /// Distance of the baseline from the bottom of the playfield
    pub const BASELINE_OFFSET: f32 = 60.0;

    /// Bullet defaults (negative = upward)
    pub const BULLET_RADIUS: f32 = 8.0;
    pub const BULLET_VELOCITY: f32 = -572.0;

    /// Birds enter this far outside the playfield
    pub const BIRD_SPAWN_MARGIN: f32 = 50.0;
    /// Top of the band birds fly in
    pub const BIRD_BAND_TOP: f32 = 40.0;
    /// Height of the band as a fraction of the playfield height
    pub const BIRD_BAND_FRACTION: f32 = 0.35;
    /// Upper bound of the random speed added to a bird's base speed
    pub const BIRD_SPEED_JITTER: f32 = 25.0;
    /// Birds are pruned once fully this far outside the playfield
    pub const BIRD_PRUNE_MARGIN: f32 = 100.0;

    /// Spawn interval is drawn from [MIN, MIN + SPAN)
    pub const SPAWN_INTERVAL_MIN: f32 = 0.5;
    pub const SPAWN_INTERVAL_SPAN: f32 = 0.9;
    /// First spawn delay after Start/Reset
    pub const FIRST_SPAWN_DELAY: f32 = 0.7;
    /// Spawn delay before the very first round
    pub const IDLE_SPAWN_DELAY: f32 = 1.0;

    /// The browser driver never grows the playfield beyond this
    pub const MAX_PLAYFIELD_WIDTH: f32 = 1200.0;
    pub const MAX_PLAYFIELD_HEIGHT: f32 = 720.0;
}

/// Format seconds as `MM:SS`, flooring and clamping negatives to zero
pub fn format_clock(seconds: f32) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0).floor() as u32
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}
