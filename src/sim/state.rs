//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. Drivers own one
//! instance and hand it to the pure functions in `tick`, `round`, `spawn` and
//! `collision`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::highscores::HighScore;
use crate::settings::Tuning;

/// Visible simulation area, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player character, moving along the baseline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per second
    pub speed: f32,
}

impl Player {
    /// Leftmost allowed x
    pub fn min_x(&self, margin: f32) -> f32 {
        self.radius + margin
    }

    /// Rightmost allowed x (never below `min_x`, even on a tiny playfield)
    pub fn max_x(&self, playfield: &Playfield, margin: f32) -> f32 {
        (playfield.width - self.radius - margin).max(self.min_x(margin))
    }

    /// Pull x back inside the playfield
    pub fn clamp_to(&mut self, playfield: &Playfield, margin: f32) {
        let (lo, hi) = (self.min_x(margin), self.max_x(playfield, margin));
        self.pos.x = if self.pos.x.is_finite() {
            self.pos.x.clamp(lo, hi)
        } else {
            lo
        };
    }
}

/// Fixed bullet palette, addressed by CSS color token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BulletColor {
    #[default]
    Cream,
    Red,
    Blue,
    Green,
    Purple,
    Orange,
}

impl BulletColor {
    pub const ALL: [BulletColor; 6] = [
        BulletColor::Cream,
        BulletColor::Red,
        BulletColor::Blue,
        BulletColor::Green,
        BulletColor::Purple,
        BulletColor::Orange,
    ];

    pub fn as_token(&self) -> &'static str {
        match self {
            BulletColor::Cream => "#FFFBEB",
            BulletColor::Red => "#EF4444",
            BulletColor::Blue => "#3B82F6",
            BulletColor::Green => "#22C55E",
            BulletColor::Purple => "#A855F7",
            BulletColor::Orange => "#F97316",
        }
    }

    /// Case-insensitive lookup of a palette token
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_token().eq_ignore_ascii_case(token))
    }
}

/// A bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Vertical velocity (negative, upward)
    pub vy: f32,
    pub radius: f32,
    pub color: BulletColor,
}

/// Bird archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BirdKind {
    Small,
    Medium,
    Large,
}

/// Fixed properties of a bird archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdType {
    /// Diameter in pixels
    pub size: f32,
    pub base_speed: f32,
    pub color: &'static str,
    pub points: u32,
}

impl BirdKind {
    /// Spawn table: every kind is equally likely
    pub const ALL: [BirdKind; 3] = [BirdKind::Small, BirdKind::Medium, BirdKind::Large];

    /// Larger birds are slower and worth more
    pub fn spec(&self) -> BirdType {
        match self {
            BirdKind::Small => BirdType {
                size: 34.0,
                base_speed: 154.0,
                color: "#D90429",
                points: 2,
            },
            BirdKind::Medium => BirdType {
                size: 52.0,
                base_speed: 121.0,
                color: "#F4D03F",
                points: 5,
            },
            BirdKind::Large => BirdType {
                size: 74.0,
                base_speed: 88.0,
                color: "#2E2E2E",
                points: 10,
            },
        }
    }
}

/// A bird crossing the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub kind: BirdKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Horizontal velocity, sign set by the spawn side
    pub vx: f32,
    pub points: u32,
}

impl Bird {
    pub fn color(&self) -> &'static str {
        self.kind.spec().color
    }
}

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Before the first start
    Idle,
    Running,
    Ended,
}

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    NewHighScore { score: u32 },
    TimeUp { score: u32, high_score: u32 },
}

/// Things that happened during a tick, for HUD/audio/logging consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BulletFired,
    BirdSpawned { kind: BirdKind },
    BirdDowned { kind: BirdKind, points: u32 },
    RoundEnded(RoundOutcome),
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub playfield: Playfield,
    pub player: Player,
    /// Live bullets, in spawn order
    pub bullets: Vec<Bullet>,
    /// Live birds, in spawn order
    pub birds: Vec<Bird>,
    /// Score for the current round
    pub score: u32,
    pub high_score: HighScore,
    /// Seconds left in the round, never negative
    pub time_remaining: f32,
    pub phase: RoundPhase,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
    /// Seconds since the last bird spawn
    pub spawn_timer: f32,
    /// Current randomized spawn interval
    pub next_spawn: f32,
    /// Color given to newly fired bullets
    pub bullet_color: BulletColor,
    /// Result of the most recently ended round
    pub last_outcome: Option<RoundOutcome>,
}

impl GameState {
    /// Idle state on a `width` x `height` playfield, player centred
    pub fn new(tuning: Tuning, width: f32, height: f32) -> Self {
        let playfield = Playfield::new(sanitize_extent(width), sanitize_extent(height));
        let player = Player {
            pos: Vec2::new(playfield.width / 2.0, playfield.height - tuning.baseline_offset),
            radius: tuning.player_radius,
            speed: tuning.player_speed,
        };

        let mut state = Self {
            time_remaining: tuning.game_duration,
            next_spawn: tuning.idle_spawn_delay,
            tuning,
            playfield,
            player,
            bullets: Vec::new(),
            birds: Vec::new(),
            score: 0,
            high_score: HighScore::new(),
            phase: RoundPhase::Idle,
            fire_cooldown: 0.0,
            spawn_timer: 0.0,
            bullet_color: BulletColor::default(),
            last_outcome: None,
        };
        state.player.clamp_to(&state.playfield, state.tuning.player_margin);
        state
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Accept new playfield dimensions and re-clamp the player.
    ///
    /// Non-finite or negative dimensions are ignored; returns whether the
    /// playfield changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            log::warn!("Ignoring invalid playfield size {width}x{height}");
            return false;
        }
        self.playfield = Playfield::new(width, height);
        self.player.pos.y = height - self.tuning.baseline_offset;
        self.player.clamp_to(&self.playfield, self.tuning.player_margin);
        true
    }

    /// Put the player back in the middle of the baseline
    pub fn recenter_player(&mut self) {
        self.player.pos = Vec2::new(
            self.playfield.width / 2.0,
            self.playfield.height - self.tuning.baseline_offset,
        );
        self.player.clamp_to(&self.playfield, self.tuning.player_margin);
    }
}

fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_centred() {
        let state = GameState::new(Tuning::default(), 800.0, 600.0);
        assert_eq!(state.phase, RoundPhase::Idle);
        assert_eq!(state.player.pos, Vec2::new(400.0, 540.0));
        assert_eq!(state.time_remaining, 120.0);
        assert_eq!(state.next_spawn, 1.0);
        assert!(state.bullets.is_empty() && state.birds.is_empty());
    }

    #[test]
    fn test_resize_reclamps_player() {
        let mut state = GameState::new(Tuning::default(), 800.0, 600.0);
        state.player.pos.x = 760.0;
        assert!(state.resize(300.0, 400.0));
        assert_eq!(state.player.pos.x, 300.0 - 30.0 - 10.0);
        assert_eq!(state.player.pos.y, 340.0);
    }

    #[test]
    fn test_resize_to_tiny_playfield_does_not_panic() {
        let mut state = GameState::new(Tuning::default(), 800.0, 600.0);
        assert!(state.resize(20.0, 20.0));
        assert_eq!(state.player.pos.x, 40.0);
    }

    #[test]
    fn test_resize_ignores_garbage() {
        let mut state = GameState::new(Tuning::default(), 800.0, 600.0);
        assert!(!state.resize(f32::NAN, 600.0));
        assert!(!state.resize(-1.0, 600.0));
        assert_eq!(state.playfield, Playfield::new(800.0, 600.0));
    }

    #[test]
    fn test_bird_types_trade_speed_for_points() {
        let [small, medium, large] = BirdKind::ALL.map(|k| k.spec());
        assert!(small.size < medium.size && medium.size < large.size);
        assert!(small.base_speed > medium.base_speed && medium.base_speed > large.base_speed);
        assert!(small.points < medium.points && medium.points < large.points);
    }

    #[test]
    fn test_bullet_color_tokens() {
        assert_eq!(BulletColor::from_token("#fffbeb"), Some(BulletColor::Cream));
        assert_eq!(BulletColor::from_token(" #3B82F6 "), Some(BulletColor::Blue));
        assert_eq!(BulletColor::from_token("#123456"), None);
        for color in BulletColor::ALL {
            assert_eq!(BulletColor::from_token(color.as_token()), Some(color));
        }
    }
}
