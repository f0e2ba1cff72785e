//! Collision and scoring
//!
//! Runs once per tick after everything has moved. Two independent passes:
//! ship against asteroids, then lasers against asteroids. Asteroid
//! destruction goes through `GameState::destroy_asteroid`, which handles
//! splitting, points and level changes.

use super::geometry::{circles_overlap, dist_between_points};
use super::state::{GameState, ShipState};

/// Index of the first asteroid overlapping the ship, if the ship can collide
pub fn ship_asteroid_hit(state: &GameState) -> Option<usize> {
    if state.ship.state != ShipState::Flying {
        return None;
    }
    let ship = &state.ship;
    state
        .field
        .iter()
        .position(|roid| circles_overlap(ship.pos, ship.radius, roid.pos, roid.radius))
}

impl GameState {
    /// Ship vs asteroids. At most one collision per tick.
    /// Returns true if the ship was hit.
    pub fn detect_ship_collision(&mut self) -> bool {
        let Some(index) = ship_asteroid_hit(self) else {
            return false;
        };
        self.explode_ship();
        self.destroy_asteroid(index);
        true
    }

    /// Lasers vs asteroids, both walked from the back. A laser that hits
    /// starts its explosion and is ignored for the rest of the pass; each
    /// asteroid takes at most one hit. Returns the number of hits.
    pub fn detect_laser_hits(&mut self) -> usize {
        let mut hits = 0;
        for i in (0..self.field.len()).rev() {
            // Fragments land past `i`, so lower indices are still unvisited.
            let (pos, radius) = {
                let roid = &self.field.asteroids[i];
                (roid.pos, roid.radius)
            };

            let hit = self
                .ship
                .lasers
                .iter()
                .rposition(|laser| !laser.is_exploding() && dist_between_points(pos, laser.pos) < radius);

            if let Some(j) = hit {
                hits += 1;
                self.ship.lasers[j].detonate(&self.tuning);
                if self.destroy_asteroid(i) {
                    // Fresh belt; don't test it against this tick's lasers
                    break;
                }
            }
        }
        hits
    }
}
