//! Bird spawning
//!
//! All randomness comes from the caller's RNG so a seeded generator replays
//! the same flock.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Bird, BirdKind, Playfield};
use crate::settings::Tuning;

/// Spawn one bird of a uniformly chosen kind from a uniformly chosen side.
///
/// Returns `None` for an empty spawn table.
pub fn spawn_bird<R: Rng + ?Sized>(
    rng: &mut R,
    table: &[BirdKind],
    playfield: &Playfield,
    tuning: &Tuning,
) -> Option<Bird> {
    let kind = *table.choose(rng)?;
    let spec = kind.spec();
    let from_left = rng.random_bool(0.5);

    // Fully off-screen on entry
    let x = if from_left {
        -spec.size - tuning.bird_spawn_margin
    } else {
        playfield.width + tuning.bird_spawn_margin
    };
    let y = tuning.bird_band_top
        + rng.random::<f32>() * playfield.height * tuning.bird_band_fraction;
    let speed = spec.base_speed + rng.random::<f32>() * tuning.bird_speed_jitter;
    let vx = if from_left { speed } else { -speed };

    log::trace!("Spawned {:?} bird at ({:.0}, {:.0}) vx={:.1}", kind, x, y, vx);

    Some(Bird {
        kind,
        pos: Vec2::new(x, y),
        radius: spec.size / 2.0,
        vx,
        points: spec.points,
    })
}

/// Draw the next spawn interval in `[min, min + span)`
pub fn next_spawn_interval<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> f32 {
    tuning.spawn_interval_min + rng.random::<f32>() * tuning.spawn_interval_span
}
