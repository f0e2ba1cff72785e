//! Laser manager: flight, range limit and hit decay

use super::geometry::wrap_hard;
use super::state::Laser;
use crate::tuning::Tuning;

impl Laser {
    /// Advance one tick. Returns false once the laser should be dropped.
    ///
    /// Range is checked first, so a laser past its range is removed even
    /// mid-explosion. Exploding lasers hold still while they decay.
    pub fn step(&mut self, tuning: &Tuning) -> bool {
        if self.dist > tuning.laser_max_travel() {
            return false;
        }
        if self.explode_time > 0 {
            self.explode_time -= 1;
            return self.explode_time > 0;
        }
        self.pos += self.vel;
        self.dist += self.vel.length();
        self.pos = wrap_hard(self.pos, tuning.field_width, tuning.field_height);
        true
    }

    /// Mark as having hit something
    pub fn detonate(&mut self, tuning: &Tuning) {
        self.explode_time = tuning.laser_explode_ticks();
    }
}

/// Step every laser once, dropping spent ones. Survivors keep their order.
pub fn update_lasers(lasers: &mut Vec<Laser>, tuning: &Tuning) {
    lasers.retain_mut(|laser| laser.step(tuning));
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn laser(x: f32, y: f32, vx: f32, vy: f32) -> Laser {
        Laser::new(Vec2::new(x, y), Vec2::new(vx, vy))
    }

    #[test]
    fn test_laser_moves_and_accumulates_distance() {
        let tuning = Tuning::default();
        let mut l = laser(100.0, 100.0, 3.0, 4.0);
        assert!(l.step(&tuning));
        assert_eq!(l.pos, Vec2::new(103.0, 104.0));
        assert!((l.dist - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_laser_wraps_at_hard_edges() {
        let tuning = Tuning::default();
        let mut l = laser(759.0, 1.0, 5.0, -5.0);
        l.step(&tuning);
        assert_eq!(l.pos, Vec2::new(0.0, 570.0));
    }

    #[test]
    fn test_laser_removed_after_max_range() {
        let tuning = Tuning::default();
        let max = tuning.laser_max_travel(); // 304
        let speed = tuning.laser_speed_per_tick();
        let mut lasers = vec![laser(10.0, 300.0, speed, 0.0)];
        let mut ticks = 0;
        while !lasers.is_empty() {
            update_lasers(&mut lasers, &tuning);
            ticks += 1;
            assert!(ticks < 100);
        }
        // Removed on the first tick that starts past the range
        let expected = (max / speed).floor() as u32 + 2;
        assert_eq!(ticks, expected);
    }

    #[test]
    fn test_range_beats_explosion() {
        let tuning = Tuning::default();
        let mut l = laser(10.0, 10.0, 1.0, 0.0);
        l.dist = tuning.laser_max_travel() + 0.5;
        l.detonate(&tuning);
        assert!(!l.step(&tuning));
    }

    #[test]
    fn test_exploding_laser_decays_in_place() {
        let tuning = Tuning::default();
        let mut lasers = vec![laser(50.0, 50.0, 10.0, 0.0)];
        lasers[0].detonate(&tuning);
        assert_eq!(lasers[0].explode_time, 3);

        update_lasers(&mut lasers, &tuning);
        assert_eq!(lasers[0].explode_time, 2);
        assert_eq!(lasers[0].pos, Vec2::new(50.0, 50.0));
        update_lasers(&mut lasers, &tuning);
        assert_eq!(lasers.len(), 1);
        update_lasers(&mut lasers, &tuning);
        assert!(lasers.is_empty());
    }

    #[test]
    fn test_update_keeps_order_of_survivors() {
        let tuning = Tuning::default();
        let mut spent = laser(1.0, 1.0, 1.0, 0.0);
        spent.dist = 1000.0;
        let mut lasers = vec![
            laser(10.0, 10.0, 1.0, 0.0),
            spent,
            laser(20.0, 20.0, 1.0, 0.0),
        ];
        update_lasers(&mut lasers, &tuning);
        assert_eq!(lasers.len(), 2);
        assert_eq!(lasers[0].pos.x, 11.0);
        assert_eq!(lasers[1].pos.x, 21.0);
    }
}
