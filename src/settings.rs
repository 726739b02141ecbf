//! Game tuning
//!
//! Every gameplay constant lives here so drivers and tests can override it.
//! Documents are JSON; missing fields fall back to the defaults in
//! [`crate::consts`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Failure to load or validate a tuning document
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read tuning: {err}"),
            Self::Parse(err) => write!(f, "failed to parse tuning: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Round ===
    /// Round length (seconds)
    pub game_duration: f32,
    /// Seconds between shots while fire is held
    pub fire_rate: f32,

    // === Player ===
    pub player_radius: f32,
    /// Pixels per second
    pub player_speed: f32,
    pub player_margin: f32,
    /// Baseline sits this far above the bottom edge
    pub baseline_offset: f32,

    // === Bullets ===
    pub bullet_radius: f32,
    /// Vertical velocity, negative is up
    pub bullet_velocity: f32,

    // === Birds ===
    pub bird_spawn_margin: f32,
    pub bird_band_top: f32,
    pub bird_band_fraction: f32,
    pub bird_speed_jitter: f32,
    pub bird_prune_margin: f32,

    // === Spawning ===
    pub spawn_interval_min: f32,
    pub spawn_interval_span: f32,
    pub first_spawn_delay: f32,
    pub idle_spawn_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_duration: GAME_DURATION,
            fire_rate: FIRE_RATE,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_margin: PLAYER_MARGIN,
            baseline_offset: BASELINE_OFFSET,

            bullet_radius: BULLET_RADIUS,
            bullet_velocity: BULLET_VELOCITY,

            bird_spawn_margin: BIRD_SPAWN_MARGIN,
            bird_band_top: BIRD_BAND_TOP,
            bird_band_fraction: BIRD_BAND_FRACTION,
            bird_speed_jitter: BIRD_SPEED_JITTER,
            bird_prune_margin: BIRD_PRUNE_MARGIN,

            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_span: SPAWN_INTERVAL_SPAN,
            first_spawn_delay: FIRST_SPAWN_DELAY,
            idle_spawn_delay: IDLE_SPAWN_DELAY,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a tuning document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Check that every value keeps the simulation well-formed
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("game_duration", self.game_duration),
            ("fire_rate", self.fire_rate),
            ("player_radius", self.player_radius),
            ("bullet_radius", self.bullet_radius),
            ("spawn_interval_min", self.spawn_interval_min),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }

        let non_negative = [
            ("player_speed", self.player_speed),
            ("player_margin", self.player_margin),
            ("baseline_offset", self.baseline_offset),
            ("bird_spawn_margin", self.bird_spawn_margin),
            ("bird_band_top", self.bird_band_top),
            ("bird_band_fraction", self.bird_band_fraction),
            ("bird_speed_jitter", self.bird_speed_jitter),
            ("bird_prune_margin", self.bird_prune_margin),
            ("spawn_interval_span", self.spawn_interval_span),
            ("first_spawn_delay", self.first_spawn_delay),
            ("idle_spawn_delay", self.idle_spawn_delay),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be zero or a positive number",
                });
            }
        }

        if !(self.bullet_velocity.is_finite() && self.bullet_velocity < 0.0) {
            return Err(ConfigError::Invalid {
                field: "bullet_velocity",
                reason: "must be negative (bullets travel upward)",
            });
        }

        Ok(())
    }
}
