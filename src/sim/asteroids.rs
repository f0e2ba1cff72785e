//! Asteroid field: belt creation, motion and the split-on-destroy policy

use glam::Vec2;
use rand::Rng;

use super::geometry::{dist_between_points, wrap_with_margin};
use super::state::{Asteroid, AsteroidTier, GameEvent, GameState, Ship};
use crate::tuning::Tuning;

/// What a destroy did to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destroyed {
    pub tier: AsteroidTier,
    pub points: u64,
    /// Fragments appended to the end of the field
    pub children: usize,
}

/// All live asteroids, in insertion order
#[derive(Debug, Clone, Default)]
pub struct AsteroidField {
    pub asteroids: Vec<Asteroid>,
}

impl Asteroid {
    /// A rock of the given tier with random drift, rotation and outline.
    /// Speed scales with `1 + 0.1 * level`.
    pub fn random(
        pos: Vec2,
        tier: AsteroidTier,
        level: u32,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Self {
        let max_speed = tuning.roids_speed_per_tick() * tuning.level_speed_multiplier(level);
        let vel = Vec2::new(signed_speed(max_speed, rng), signed_speed(max_speed, rng));

        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        // floor(rand * (V + 1) + V / 2): vertex counts centred on V
        let vert_base = tuning.roids_vert as f32;
        let vert = (rng.random::<f32>() * (vert_base + 1.0) + vert_base / 2.0).floor() as u32;
        let vert = vert.max(3);
        let jag = tuning.roids_jag;
        let offsets = (0..vert)
            .map(|_| rng.random::<f32>() * jag * 2.0 + 1.0 - jag)
            .collect();

        Self {
            pos,
            vel,
            tier,
            radius: tier.radius(tuning),
            angle,
            vert,
            offsets,
        }
    }
}

/// Uniform speed in `[0, max)` with a random direction
fn signed_speed(max: f32, rng: &mut impl Rng) -> f32 {
    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    rng.random::<f32>() * max * sign
}

impl AsteroidField {
    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Asteroid> {
        self.asteroids.iter()
    }

    /// Replace the field with `count` large asteroids, none of them inside
    /// the ship's safe zone.
    pub fn create_belt(
        &mut self,
        count: u32,
        ship: &Ship,
        level: u32,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) {
        self.asteroids.clear();
        let exclusion = tuning.spawn_exclusion_radius();
        let width = tuning.field_width.max(1.0) as u32;
        let height = tuning.field_height.max(1.0) as u32;

        for _ in 0..count {
            // Retries until clear; Tuning::validate guarantees room exists
            let pos = loop {
                let candidate = Vec2::new(
                    rng.random_range(0..width) as f32,
                    rng.random_range(0..height) as f32,
                );
                if dist_between_points(ship.pos, candidate) >= exclusion {
                    break candidate;
                }
            };
            self.asteroids
                .push(Asteroid::random(pos, AsteroidTier::Large, level, tuning, rng));
        }
    }

    /// Remove the asteroid at `index`, appending its fragments (if any).
    /// Returns `None` for an out-of-range index.
    pub fn destroy(
        &mut self,
        index: usize,
        level: u32,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Option<Destroyed> {
        if index >= self.asteroids.len() {
            return None;
        }
        let roid = self.asteroids.remove(index);

        let children = match roid.tier.child() {
            Some(child) => {
                for _ in 0..2 {
                    self.asteroids
                        .push(Asteroid::random(roid.pos, child, level, tuning, rng));
                }
                log::debug!("{:?} asteroid split at ({:.0}, {:.0})", roid.tier, roid.pos.x, roid.pos.y);
                2
            }
            None => 0,
        };

        Some(Destroyed {
            tier: roid.tier,
            points: roid.tier.points(tuning),
            children,
        })
    }

    /// Drift every asteroid one tick and wrap it around the field
    pub fn advance(&mut self, tuning: &Tuning) {
        for roid in &mut self.asteroids {
            roid.pos = wrap_with_margin(
                roid.pos + roid.vel,
                tuning.field_width,
                tuning.field_height,
                roid.radius,
            );
        }
    }
}

impl GameState {
    /// Destroy an asteroid: split it, score it, and start the next level if
    /// that was the last one. Returns true if the level was cleared.
    pub fn destroy_asteroid(&mut self, index: usize) -> bool {
        let Some(destroyed) = self
            .field
            .destroy(index, self.level, &self.tuning, &mut self.rng)
        else {
            return false;
        };

        self.add_score(destroyed.points);
        self.emit(GameEvent::AsteroidHit {
            tier: destroyed.tier,
        });

        if self.field.is_empty() {
            self.level += 1;
            self.new_level();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rock(tier: AsteroidTier, tuning: &Tuning, rng: &mut Pcg32) -> Asteroid {
        Asteroid::random(Vec2::new(100.0, 100.0), tier, 1, tuning, rng)
    }

    fn state_with(tiers: &[AsteroidTier]) -> GameState {
        let mut state = GameState::new(42, Tuning::default(), 0);
        let tuning = state.tuning.clone();
        state.field.asteroids = tiers
            .iter()
            .map(|&tier| rock(tier, &tuning, &mut state.rng))
            .collect();
        state.drain_events();
        state
    }

    #[test]
    fn test_random_asteroid_shape() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let roid = rock(AsteroidTier::Large, &tuning, &mut rng);
            assert!((5..=15).contains(&roid.vert));
            assert_eq!(roid.offsets.len(), roid.vert as usize);
            assert!(roid.offsets.iter().all(|o| (0.6..1.4).contains(o)));
            let max = tuning.roids_speed_per_tick() * 1.1;
            assert!(roid.vel.x.abs() <= max && roid.vel.y.abs() <= max);
            assert_eq!(roid.outline().len(), roid.vert as usize);
        }
    }

    #[test]
    fn test_speed_scales_with_level() {
        let tuning = Tuning::default();
        let pos = Vec2::new(100.0, 100.0);
        let slow = Asteroid::random(pos, AsteroidTier::Large, 1, &tuning, &mut Pcg32::seed_from_u64(9));
        let fast = Asteroid::random(pos, AsteroidTier::Large, 5, &tuning, &mut Pcg32::seed_from_u64(9));

        // Same draws, so only the level factor differs
        assert_eq!(slow.offsets, fast.offsets);
        assert!(slow.vel.length() > 0.0);
        let ratio = fast.vel.length() / slow.vel.length();
        assert!((ratio - 1.5 / 1.1).abs() < 1e-4, "ratio {ratio}");

        let unscaled = Asteroid::random(pos, AsteroidTier::Large, 0, &tuning, &mut Pcg32::seed_from_u64(9));
        assert!((slow.vel - unscaled.vel * 1.1).length() < 1e-5);
    }

    #[test]
    fn test_destroy_reports_fragments() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut field = AsteroidField {
            asteroids: vec![
                rock(AsteroidTier::Large, &tuning, &mut rng),
                rock(AsteroidTier::Small, &tuning, &mut rng),
            ],
        };

        let large = field.destroy(0, 1, &tuning, &mut rng).unwrap();
        assert_eq!(large.tier, AsteroidTier::Large);
        assert_eq!(large.points, 20);
        assert_eq!(large.children, 2);
        assert_eq!(field.len(), 3);

        let small = field.destroy(0, 1, &tuning, &mut rng).unwrap();
        assert_eq!(small.children, 0);
        assert_eq!(small.points, 100);
        assert_eq!(field.len(), 2);
        assert!(field.destroy(7, 1, &tuning, &mut rng).is_none());
    }

    #[test]
    fn test_belt_respects_safe_zone() {
        let tuning = Tuning::default();
        let ship = Ship::spawn(&tuning);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = AsteroidField::default();
        field.create_belt(12, &ship, 3, &tuning, &mut rng);
        assert_eq!(field.len(), 12);
        for roid in field.iter() {
            assert_eq!(roid.tier, AsteroidTier::Large);
            assert!(dist_between_points(roid.pos, ship.pos) >= tuning.spawn_exclusion_radius());
            assert_eq!(roid.pos, roid.pos.floor());
        }
    }

    #[test]
    fn test_destroy_large_spawns_two_medium() {
        let mut state = state_with(&[AsteroidTier::Large, AsteroidTier::Small]);
        let cleared = state.destroy_asteroid(0);
        assert!(!cleared);
        assert_eq!(state.score, 20);
        assert_eq!(state.field.len(), 3);
        assert_eq!(state.field.asteroids[0].tier, AsteroidTier::Small);
        assert_eq!(state.field.asteroids[1].tier, AsteroidTier::Medium);
        assert_eq!(state.field.asteroids[2].tier, AsteroidTier::Medium);
        assert_eq!(state.field.asteroids[1].pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.field.asteroids[1].radius, 25.0);
    }

    #[test]
    fn test_destroy_medium_spawns_two_small() {
        let mut state = state_with(&[AsteroidTier::Medium, AsteroidTier::Small]);
        state.destroy_asteroid(0);
        assert_eq!(state.score, 50);
        let tiers: Vec<_> = state.field.iter().map(|a| a.tier).collect();
        assert_eq!(
            tiers,
            vec![AsteroidTier::Small, AsteroidTier::Small, AsteroidTier::Small]
        );
        assert!(state.field.iter().all(|a| a.radius == 13.0));
    }

    #[test]
    fn test_destroy_small_spawns_nothing() {
        let mut state = state_with(&[AsteroidTier::Small, AsteroidTier::Small]);
        state.destroy_asteroid(1);
        assert_eq!(state.score, 100);
        assert_eq!(state.field.len(), 1);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_destroy_out_of_range_is_ignored() {
        let mut state = state_with(&[AsteroidTier::Small]);
        assert!(!state.destroy_asteroid(5));
        assert_eq!(state.score, 0);
        assert_eq!(state.field.len(), 1);
    }

    #[test]
    fn test_clearing_field_advances_level() {
        let mut state = state_with(&[AsteroidTier::Small]);
        let cleared = state.destroy_asteroid(0);
        assert!(cleared);
        assert_eq!(state.level, 2);
        assert_eq!(state.field.len(), 3); // NUM_ROIDS + level
        assert_eq!(state.banner.text, "Level 2");
        let max = state.tuning.roids_speed_per_tick() * 1.2;
        for roid in state.field.iter() {
            assert_eq!(roid.tier, AsteroidTier::Large);
            assert!(roid.vel.x.abs() <= max && roid.vel.y.abs() <= max);
        }
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::AsteroidHit {
            tier: AsteroidTier::Small
        }));
        assert!(events.contains(&GameEvent::LevelStarted { level: 2 }));
    }

    #[test]
    fn test_advance_wraps_with_radius_margin() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut roid = rock(AsteroidTier::Large, &tuning, &mut rng);
        roid.pos = Vec2::new(tuning.field_width + 50.0, 200.0);
        roid.vel = Vec2::new(1.0, 0.0);
        let mut field = AsteroidField {
            asteroids: vec![roid],
        };
        field.advance(&tuning);
        assert_eq!(field.asteroids[0].pos, Vec2::new(-50.0, 200.0));
    }

    proptest! {
        #[test]
        fn radii_stay_on_tiers(seed in any::<u64>(), picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..40)) {
            let mut state = GameState::new(seed, Tuning::default(), 0);
            let tiers = [
                AsteroidTier::Large.radius(&state.tuning),
                AsteroidTier::Medium.radius(&state.tuning),
                AsteroidTier::Small.radius(&state.tuning),
            ];
            for pick in picks {
                let index = pick.index(state.field.len());
                state.destroy_asteroid(index);
                for roid in state.field.iter() {
                    prop_assert!(tiers.contains(&roid.radius));
                    prop_assert_eq!(roid.radius, roid.tier.radius(&state.tuning));
                }
            }
        }
    }
}
