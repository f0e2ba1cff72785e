//! Fixed-timestep simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Fixed timestep only
//! - Seeded RNG only
//! - All state in `GameState`, mutated only inside `tick`

pub mod asteroids;
pub mod collision;
pub mod geometry;
pub mod lasers;
pub mod ship;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use asteroids::{AsteroidField, Destroyed};
pub use collision::ship_asteroid_hit;
pub use geometry::{dist_between_points, heading_vector, wrap_hard, wrap_with_margin};
pub use lasers::update_lasers;
pub use ship::ShipTransition;
pub use snapshot::{DebugOverlay, FrameSnapshot};
pub use state::{
    Asteroid, AsteroidTier, Banner, Beat, GameEvent, GameState, Laser, Ship, ShipState,
};
pub use tick::{TickInput, tick};
