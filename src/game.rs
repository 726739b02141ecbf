//! Game controller
//!
//! Owns the simulation state, the held-key record and the random source, and
//! is the single entry point drivers talk to: frames from the display clock,
//! key and button events, color picks and resizes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Tuning;
use crate::sim::{
    BulletColor, GameEvent, GameState, InputState, Key, RoundOutcome, start_round, tick,
};
use crate::snapshot::Snapshot;

/// A game session
#[derive(Debug, Clone)]
pub struct Game<R: Rng = Pcg32> {
    state: GameState,
    input: InputState,
    rng: R,
    /// Timestamp of the previous frame (milliseconds)
    last_frame_ms: Option<f64>,
}

impl Game<Pcg32> {
    /// New idle session with a seeded RNG
    pub fn new(tuning: Tuning, width: f32, height: f32, seed: u64) -> Self {
        log::info!("Game created with seed: {}", seed);
        Self::with_rng(tuning, width, height, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// New idle session drawing randomness from `rng`
    pub fn with_rng(tuning: Tuning, width: f32, height: f32, rng: R) -> Self {
        Self {
            state: GameState::new(tuning, width, height),
            input: InputState::default(),
            rng,
            last_frame_ms: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Display-clock entry point: derive the delta from the previous frame
    /// and advance. The first frame has a zero delta.
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if !now_ms.is_finite() {
            log::warn!("Ignoring non-finite frame timestamp");
            return Vec::new();
        }
        let dt = match self.last_frame_ms {
            Some(prev) => ((now_ms - prev) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        self.advance(dt)
    }

    /// Advance by an explicit delta (seconds)
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        let events = tick(&mut self.state, &self.input, &mut self.rng, dt);
        for event in &events {
            match event {
                GameEvent::RoundEnded(outcome) => log_outcome(outcome),
                GameEvent::BirdSpawned { kind } => log::trace!("{:?} bird incoming", kind),
                _ => {}
            }
        }
        events
    }

    /// Start/Reset: always available, from any phase
    pub fn start(&mut self) {
        start_round(&mut self.state);
    }

    /// Key press by browser key name. Returns true if the key is bound.
    pub fn key_down(&mut self, name: &str) -> bool {
        let Some(key) = Key::from_name(name) else {
            return false;
        };
        if self.input.key_down(key) {
            self.start();
        }
        true
    }

    /// Key release by browser key name. Returns true if the key is bound.
    pub fn key_up(&mut self, name: &str) -> bool {
        match Key::from_name(name) {
            Some(key) => {
                self.input.key_up(key);
                true
            }
            None => false,
        }
    }

    /// Release every held key (focus loss)
    pub fn release_all(&mut self) {
        self.input.clear();
    }

    /// Pick the color for future bullets. Unknown tokens keep the current one.
    pub fn select_color(&mut self, token: &str) -> bool {
        match BulletColor::from_token(token) {
            Some(color) => {
                self.state.bullet_color = color;
                log::info!("Bullet color: {}", color.as_token());
                true
            }
            None => {
                log::warn!("Unknown bullet color {:?}, keeping {}", token, self.state.bullet_color.as_token());
                false
            }
        }
    }

    /// New playfield size, accepted between any two frames
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.state.resize(width, height)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }
}

fn log_outcome(outcome: &RoundOutcome) {
    match outcome {
        RoundOutcome::NewHighScore { score } => log::info!("Time! New high score: {}", score),
        RoundOutcome::TimeUp { score, high_score } => {
            log::info!("Time! Score {} (best {})", score, high_score)
        }
    }
}
