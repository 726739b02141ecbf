//! Round state machine
//!
//! Idle -> Running -> Ended -> Running -> ...
//!
//! Start/Reset is always available and is the only way into Running. The
//! round clock running out is the only way into Ended, and the only place the
//! high score can move.

use super::state::{GameState, RoundOutcome, RoundPhase};

/// Start (or restart) a round from any phase
pub fn start_round(state: &mut GameState) {
    let previous = state.phase;

    state.bullets.clear();
    state.birds.clear();
    state.score = 0;
    state.time_remaining = state.tuning.game_duration;
    state.phase = RoundPhase::Running;
    state.fire_cooldown = 0.0;
    state.spawn_timer = 0.0;
    state.next_spawn = state.tuning.first_spawn_delay;
    state.last_outcome = None;
    state.recenter_player();

    log::info!(
        "Round started ({:?} -> Running, {:.0}s on the clock)",
        previous,
        state.time_remaining
    );
}

/// Run the round clock down by `dt`.
///
/// Returns the outcome if this call ended the round. Does nothing unless the
/// round is running, so a round can only end once.
pub fn advance_clock(state: &mut GameState, dt: f32) -> Option<RoundOutcome> {
    if !state.is_running() {
        return None;
    }

    state.time_remaining -= dt.max(0.0);
    if state.time_remaining <= 0.0 {
        state.time_remaining = 0.0;
        return Some(end_round(state));
    }
    None
}

/// Running -> Ended, settling the high score
fn end_round(state: &mut GameState) -> RoundOutcome {
    state.phase = RoundPhase::Ended;

    let score = state.score;
    let outcome = if state.high_score.record(score) {
        RoundOutcome::NewHighScore { score }
    } else {
        RoundOutcome::TimeUp {
            score,
            high_score: state.high_score.best(),
        }
    };
    state.last_outcome = Some(outcome);

    log::info!("Round over: {:?}", outcome);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::state::{BirdKind, Bird, BulletColor, Bullet};
    use glam::Vec2;

    fn running_state() -> GameState {
        let mut state = GameState::new(Tuning::default(), 800.0, 600.0);
        start_round(&mut state);
        state
    }

    #[test]
    fn test_start_resets_everything() {
        let mut state = GameState::new(Tuning::default(), 800.0, 600.0);
        state.score = 42;
        state.time_remaining = 3.0;
        state.fire_cooldown = 0.2;
        state.spawn_timer = 0.4;
        state.player.pos.x = 50.0;
        state.bullets.push(Bullet {
            pos: Vec2::ZERO,
            vy: -572.0,
            radius: 8.0,
            color: BulletColor::Red,
        });
        state.birds.push(Bird {
            kind: BirdKind::Small,
            pos: Vec2::ZERO,
            radius: 17.0,
            vx: 154.0,
            points: 2,
        });

        start_round(&mut state);

        assert_eq!(state.phase, RoundPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_remaining, 120.0);
        assert_eq!(state.fire_cooldown, 0.0);
        assert_eq!(state.spawn_timer, 0.0);
        assert_eq!(state.next_spawn, 0.7);
        assert_eq!(state.player.pos.x, 400.0);
        assert!(state.bullets.is_empty() && state.birds.is_empty());
    }

    #[test]
    fn test_clock_ignored_unless_running() {
        let mut state = GameState::new(Tuning::default(), 800.0, 600.0);
        assert_eq!(advance_clock(&mut state, 500.0), None);
        assert_eq!(state.time_remaining, 120.0);
        assert_eq!(state.phase, RoundPhase::Idle);
    }

    #[test]
    fn test_exact_timeout_ends_once() {
        let mut state = running_state();
        let mut endings = 0;
        for _ in 0..480 {
            if advance_clock(&mut state, 0.25).is_some() {
                endings += 1;
            }
        }
        assert_eq!(endings, 1);
        assert_eq!(state.time_remaining, 0.0);
        assert_eq!(state.phase, RoundPhase::Ended);

        // Further time changes nothing
        assert_eq!(advance_clock(&mut state, 1.0), None);
        assert_eq!(state.time_remaining, 0.0);
    }

    #[test]
    fn test_overshoot_clamps_to_zero() {
        let mut state = running_state();
        state.time_remaining = 0.1;
        assert!(advance_clock(&mut state, 5.0).is_some());
        assert_eq!(state.time_remaining, 0.0);
    }

    #[test]
    fn test_negative_delta_does_not_add_time() {
        let mut state = running_state();
        advance_clock(&mut state, -10.0);
        assert_eq!(state.time_remaining, 120.0);
    }

    #[test]
    fn test_new_high_score_outcome() {
        let mut state = running_state();
        state.high_score.record(30);
        state.score = 50;
        state.time_remaining = 0.01;
        let outcome = advance_clock(&mut state, 0.02);
        assert_eq!(outcome, Some(RoundOutcome::NewHighScore { score: 50 }));
        assert_eq!(state.high_score.best(), 50);
        assert_eq!(state.last_outcome, outcome);
    }

    #[test]
    fn test_time_up_outcome() {
        let mut state = running_state();
        state.high_score.record(30);
        state.score = 10;
        state.time_remaining = 0.01;
        let outcome = advance_clock(&mut state, 0.02);
        assert_eq!(
            outcome,
            Some(RoundOutcome::TimeUp {
                score: 10,
                high_score: 30
            })
        );
        assert_eq!(state.high_score.best(), 30);
    }

    #[test]
    fn test_scoreless_round_is_time_up() {
        let mut state = running_state();
        state.time_remaining = 0.01;
        let outcome = advance_clock(&mut state, 0.02);
        assert_eq!(
            outcome,
            Some(RoundOutcome::TimeUp {
                score: 0,
                high_score: 0
            })
        );
    }

    #[test]
    fn test_restart_from_running_and_ended() {
        let mut state = running_state();
        state.score = 7;
        start_round(&mut state);
        assert_eq!(state.score, 0);
        assert!(state.is_running());

        state.time_remaining = 0.01;
        advance_clock(&mut state, 1.0);
        assert_eq!(state.phase, RoundPhase::Ended);
        start_round(&mut state);
        assert!(state.is_running());
        assert_eq!(state.last_outcome, None);
    }

    #[test]
    fn test_high_score_survives_restart() {
        let mut state = running_state();
        state.score = 12;
        state.time_remaining = 0.01;
        advance_clock(&mut state, 1.0);
        start_round(&mut state);
        assert_eq!(state.high_score.best(), 12);
    }
}
