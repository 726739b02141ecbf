//! Bullet vs bird collision resolution
//!
//! Circle/circle overlap, resolved as a pure pass that builds fresh entity
//! lists instead of removing elements mid-iteration.

use glam::Vec2;

use super::state::{Bird, BirdKind, Bullet};

/// Result of a collision pass
#[derive(Debug, Clone, Default)]
pub struct CollisionResult {
    /// Surviving bullets, original order
    pub bullets: Vec<Bullet>,
    /// Surviving birds, original order
    pub birds: Vec<Bird>,
    /// Points awarded this pass
    pub score_delta: u32,
    /// Birds destroyed, in the order they were hit
    pub downed: Vec<(BirdKind, u32)>,
}

impl CollisionResult {
    pub fn hit_count(&self) -> usize {
        self.downed.len()
    }
}

/// Strict overlap: touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Resolve every bullet against every bird.
///
/// Bullets are visited newest first and each one tests the live birds newest
/// first, taking the first overlap it finds. A hit removes exactly that bullet
/// and that bird; a removed bird is never tested again in the same pass.
pub fn resolve_collisions(bullets: &[Bullet], birds: &[Bird]) -> CollisionResult {
    let mut bullet_alive = vec![true; bullets.len()];
    let mut bird_alive = vec![true; birds.len()];
    let mut result = CollisionResult::default();

    if bullets.is_empty() || birds.is_empty() {
        result.bullets = bullets.to_vec();
        result.birds = birds.to_vec();
        return result;
    }

    for (i, bullet) in bullets.iter().enumerate().rev() {
        let hit = birds.iter().enumerate().rev().find(|(j, bird)| {
            bird_alive[*j] && circles_overlap(bullet.pos, bullet.radius, bird.pos, bird.radius)
        });

        if let Some((j, bird)) = hit {
            bullet_alive[i] = false;
            bird_alive[j] = false;
            result.score_delta += bird.points;
            result.downed.push((bird.kind, bird.points));
        }
    }

    result.bullets = bullets
        .iter()
        .zip(&bullet_alive)
        .filter_map(|(b, &alive)| alive.then(|| b.clone()))
        .collect();
    result.birds = birds
        .iter()
        .zip(&bird_alive)
        .filter_map(|(b, &alive)| alive.then(|| b.clone()))
        .collect();

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BulletColor;
    use proptest::prelude::*;

    fn bullet(x: f32, y: f32) -> Bullet {
        Bullet {
            pos: Vec2::new(x, y),
            vy: -572.0,
            radius: 8.0,
            color: BulletColor::Cream,
        }
    }

    fn bird(kind: BirdKind, x: f32, y: f32) -> Bird {
        let spec = kind.spec();
        Bird {
            kind,
            pos: Vec2::new(x, y),
            radius: spec.size / 2.0,
            vx: -spec.base_speed,
            points: spec.points,
        }
    }

    #[test]
    fn test_direct_hit_removes_both() {
        // distance 4 < 8 + 10
        let bullets = [bullet(100.0, 50.0)];
        let mut target = bird(BirdKind::Small, 104.0, 50.0);
        target.radius = 10.0;
        let result = resolve_collisions(&bullets, &[target]);
        assert!(result.bullets.is_empty());
        assert!(result.birds.is_empty());
        assert_eq!(result.score_delta, 2);
        assert_eq!(result.downed, vec![(BirdKind::Small, 2)]);
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        // Small bird radius 17, bullet radius 8: exactly 25 apart
        let result = resolve_collisions(&[bullet(0.0, 0.0)], &[bird(BirdKind::Small, 25.0, 0.0)]);
        assert_eq!(result.hit_count(), 0);
        assert_eq!(result.bullets.len(), 1);
        assert_eq!(result.birds.len(), 1);
    }

    #[test]
    fn test_empty_stores_are_noops() {
        let result = resolve_collisions(&[], &[bird(BirdKind::Large, 0.0, 0.0)]);
        assert_eq!(result.birds.len(), 1);
        assert_eq!(result.score_delta, 0);

        let result = resolve_collisions(&[bullet(0.0, 0.0)], &[]);
        assert_eq!(result.bullets.len(), 1);
        assert_eq!(result.score_delta, 0);
    }

    #[test]
    fn test_one_bird_per_bullet() {
        // One bullet overlapping two birds: only the newest bird goes
        let birds = [bird(BirdKind::Small, 100.0, 50.0), bird(BirdKind::Large, 105.0, 50.0)];
        let result = resolve_collisions(&[bullet(102.0, 50.0)], &birds);
        assert_eq!(result.downed, vec![(BirdKind::Large, 10)]);
        assert_eq!(result.birds.len(), 1);
        assert_eq!(result.birds[0].kind, BirdKind::Small);
    }

    #[test]
    fn test_one_bullet_per_bird() {
        // Two bullets overlapping one bird: the newest bullet takes it, the other survives
        let bullets = [bullet(100.0, 50.0), bullet(101.0, 50.0)];
        let result = resolve_collisions(&bullets, &[bird(BirdKind::Medium, 100.0, 50.0)]);
        assert_eq!(result.hit_count(), 1);
        assert_eq!(result.score_delta, 5);
        assert_eq!(result.bullets.len(), 1);
        assert_eq!(result.bullets[0].pos.x, 100.0);
    }

    #[test]
    fn test_survivors_keep_order() {
        let bullets = [bullet(0.0, 500.0), bullet(300.0, 50.0), bullet(0.0, 600.0)];
        let birds = [
            bird(BirdKind::Small, 900.0, 50.0),
            bird(BirdKind::Medium, 300.0, 50.0),
            bird(BirdKind::Large, 1200.0, 50.0),
        ];
        let result = resolve_collisions(&bullets, &birds);
        assert_eq!(result.score_delta, 5);
        let ys: Vec<f32> = result.bullets.iter().map(|b| b.pos.y).collect();
        assert_eq!(ys, vec![500.0, 600.0]);
        let kinds: Vec<BirdKind> = result.birds.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BirdKind::Small, BirdKind::Large]);
    }

    fn arb_kind() -> impl Strategy<Value = BirdKind> {
        prop_oneof![Just(BirdKind::Small), Just(BirdKind::Medium), Just(BirdKind::Large)]
    }

    proptest! {
        #[test]
        fn prop_collisions_only_remove_overlapping_pairs(
            bullet_pos in prop::collection::vec((0.0f32..300.0, 0.0f32..300.0), 0..12),
            bird_specs in prop::collection::vec((arb_kind(), 0.0f32..300.0, 0.0f32..300.0), 0..12),
        ) {
            let bullets: Vec<Bullet> = bullet_pos.iter().map(|&(x, y)| bullet(x, y)).collect();
            let birds: Vec<Bird> = bird_specs.iter().map(|&(k, x, y)| bird(k, x, y)).collect();
            let result = resolve_collisions(&bullets, &birds);

            // Conservation: one bullet and one bird per hit, nothing created
            let hits = result.hit_count();
            prop_assert_eq!(result.bullets.len() + hits, bullets.len());
            prop_assert_eq!(result.birds.len() + hits, birds.len());
            prop_assert_eq!(
                result.score_delta,
                result.downed.iter().map(|&(_, p)| p).sum::<u32>()
            );

            // Every survivor pair is disjoint
            for b in &result.bullets {
                for bird in &result.birds {
                    prop_assert!(!circles_overlap(b.pos, b.radius, bird.pos, bird.radius));
                }
            }
        }
    }
}
