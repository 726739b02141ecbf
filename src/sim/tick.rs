//! Variable timestep simulation tick
//!
//! Core game loop step: clock, player, firing, spawning, movement, pruning,
//! collisions, in that order.

use glam::Vec2;
use rand::Rng;

use super::collision::resolve_collisions;
use super::input::InputState;
use super::round::advance_clock;
use super::spawn::{next_spawn_interval, spawn_bird};
use super::state::{BirdKind, Bullet, GameEvent, GameState};

/// Advance the game by `dt` seconds.
///
/// `dt` is trusted apart from clock irregularities: negative or non-finite
/// deltas are treated as zero. Outside a running round this is a no-op.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &InputState,
    rng: &mut R,
    dt: f32,
) -> Vec<GameEvent> {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let mut events = Vec::new();

    if !state.is_running() {
        return events;
    }

    // Round clock; the tick that ends the round does nothing else
    if let Some(outcome) = advance_clock(state, dt) {
        events.push(GameEvent::RoundEnded(outcome));
        return events;
    }

    // Player movement
    let margin = state.tuning.player_margin;
    state.player.pos.x += input.direction() * state.player.speed * dt;
    state.player.clamp_to(&state.playfield, margin);

    // Firing
    state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);
    if input.firing && state.fire_cooldown <= 0.0 {
        state.bullets.push(Bullet {
            pos: Vec2::new(state.player.pos.x, state.player.pos.y - state.player.radius),
            vy: state.tuning.bullet_velocity,
            radius: state.tuning.bullet_radius,
            color: state.bullet_color,
        });
        state.fire_cooldown = state.tuning.fire_rate;
        events.push(GameEvent::BulletFired);
    }

    // Spawning
    state.spawn_timer += dt;
    if state.spawn_timer >= state.next_spawn {
        if let Some(bird) = spawn_bird(rng, &BirdKind::ALL, &state.playfield, &state.tuning) {
            events.push(GameEvent::BirdSpawned { kind: bird.kind });
            state.birds.push(bird);
        }
        state.spawn_timer = 0.0;
        state.next_spawn = next_spawn_interval(rng, &state.tuning);
    }

    // Movement: bullets only vertical, birds only horizontal
    for bullet in &mut state.bullets {
        bullet.pos.y += bullet.vy * dt;
    }
    for bird in &mut state.birds {
        bird.pos.x += bird.vx * dt;
    }

    // Prune anything that has left the playfield
    let width = state.playfield.width;
    let prune_margin = state.tuning.bird_prune_margin;
    state.bullets.retain(|b| b.pos.y + b.radius > 0.0);
    state
        .birds
        .retain(|b| b.pos.x + b.radius > -prune_margin && b.pos.x - b.radius < width + prune_margin);

    // Collisions
    let result = resolve_collisions(&state.bullets, &state.birds);
    if result.hit_count() > 0 {
        state.score += result.score_delta;
        for &(kind, points) in &result.downed {
            log::debug!("Downed {:?} bird (+{}), score {}", kind, points, state.score);
            events.push(GameEvent::BirdDowned { kind, points });
        }
        state.bullets = result.bullets;
        state.birds = result.birds;
    }

    events
}
