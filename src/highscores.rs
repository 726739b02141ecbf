//! Best-score tracking
//!
//! Lives in memory only; it resets when the process (or page) goes away.

use serde::{Deserialize, Serialize};

/// Best score seen across rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current best (0 before any scoring round)
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a round score would raise the best
    pub fn qualifies(&self, score: u32) -> bool {
        score > 0 && score > self.best
    }

    /// Offer a finished round's score. Returns true if it became the new best.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        log::info!("New high score: {} (was {})", score, self.best);
        self.best = score;
        true
    }
}
