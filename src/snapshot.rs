//! Read-only view of the simulation for renderers and the HUD
//!
//! Capturing a snapshot never mutates the game; drivers take one per frame
//! after the tick and draw from it.

use serde::Serialize;

use crate::format_clock;
use crate::sim::{GameState, Playfield, RoundOutcome, RoundPhase};

/// Player body color
pub const PLAYER_COLOR: &str = "#74C365";

/// Status line shown before and during a round
pub const READY_MESSAGE: &str = "Defend against the invasion!";

/// A circle to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: &'static str,
}

/// Heads-up display fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u32,
    pub high_score: u32,
    /// Remaining time as `MM:SS`
    pub clock: String,
    pub phase: RoundPhase,
    pub message: String,
    /// Start/restart overlay
    pub overlay_visible: bool,
    /// Reward affordance, only after a new high score
    pub reward_visible: bool,
    pub button_label: &'static str,
}

impl Hud {
    pub fn capture(state: &GameState) -> Self {
        let (message, reward_visible, button_label) = match (state.phase, state.last_outcome) {
            (RoundPhase::Ended, Some(outcome)) => (
                outcome_message(&outcome),
                matches!(outcome, RoundOutcome::NewHighScore { .. }),
                outcome_button_label(&outcome),
            ),
            (RoundPhase::Idle, _) => (READY_MESSAGE.to_string(), false, "Start"),
            _ => (READY_MESSAGE.to_string(), false, "Restart"),
        };

        Self {
            score: state.score,
            high_score: state.high_score.best(),
            clock: format_clock(state.time_remaining),
            phase: state.phase,
            message,
            overlay_visible: !state.is_running(),
            reward_visible,
            button_label,
        }
    }
}

/// User-facing text for a finished round
pub fn outcome_message(outcome: &RoundOutcome) -> String {
    match outcome {
        RoundOutcome::NewHighScore { score } => format!("INCREDIBLE! New High Score: {score}"),
        RoundOutcome::TimeUp { score, high_score } => {
            format!("Time's up! Score: {score}. Best: {high_score}")
        }
    }
}

fn outcome_button_label(outcome: &RoundOutcome) -> &'static str {
    match outcome {
        RoundOutcome::NewHighScore { .. } => "Play Again With New Color",
        RoundOutcome::TimeUp { .. } => "Try Again",
    }
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub playfield: Playfield,
    pub player: Circle,
    /// Spawn order
    pub bullets: Vec<Circle>,
    /// Spawn order
    pub birds: Vec<Circle>,
    pub hud: Hud,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            playfield: state.playfield,
            player: Circle {
                x: state.player.pos.x,
                y: state.player.pos.y,
                radius: state.player.radius,
                color: PLAYER_COLOR,
            },
            bullets: state
                .bullets
                .iter()
                .map(|b| Circle {
                    x: b.pos.x,
                    y: b.pos.y,
                    radius: b.radius,
                    color: b.color.as_token(),
                })
                .collect(),
            birds: state
                .birds
                .iter()
                .map(|b| Circle {
                    x: b.pos.x,
                    y: b.pos.y,
                    radius: b.radius,
                    color: b.color(),
                })
                .collect(),
            hud: Hud::capture(state),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
