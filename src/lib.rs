//! Rock Belt - A toroidal asteroid-belt shooter
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (ship, lasers, asteroids, collisions)
//! - `session`: Frame driver tying the simulation to high score persistence
//! - `highscores`: Best-score storage (LocalStorage on web, JSON file on native)
//! - `platform`: Browser/native input mapping and the wasm entry point
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod error;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, PersistError};
pub use highscores::{HighScoreStore, MemoryStore};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Default game balance. `Tuning::default()` is built from these.
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const FPS: u32 = 30;
    /// Maximum ticks run per driver call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions in pixels
    pub const FIELD_WIDTH: f32 = 760.0;
    pub const FIELD_HEIGHT: f32 = 570.0;

    /// Friction coefficient of space (0 = none, 1 = lots)
    pub const FRICTION: f32 = 0.6;
    /// Banner fade time in seconds
    pub const TEXT_FADE_TIME: f32 = 2.5;

    pub const GAME_LIVES: u32 = 3;
    pub const POINTS_LRG: u64 = 20;
    pub const POINTS_MED: u64 = 50;
    pub const POINTS_SML: u64 = 100;

    /// Ship height in pixels (collision radius is half)
    pub const SHIP_SIZE: f32 = 30.0;
    /// Degrees per second
    pub const TURN_SPEED: f32 = 360.0;
    /// Pixels per second per second
    pub const SHIP_THRUST: f32 = 5.0;
    pub const SHIP_EXPLODE_DUR: f32 = 0.3;
    pub const SHIP_INVULNERABILITY_DUR: f32 = 3.0;
    pub const SHIP_BLINK_DUR: f32 = 0.1;

    pub const LASER_MAX: usize = 10;
    /// Pixels per second
    pub const LASER_SPD: f32 = 500.0;
    /// Max travel as a fraction of field width
    pub const LASER_DIST: f32 = 0.4;
    pub const LASER_EXPLODE_DUR: f32 = 0.1;

    /// Asteroids in the first belt are `NUM_ROIDS + level`
    pub const NUM_ROIDS: u32 = 1;
    /// Size of the largest asteroid (radius of the large tier is half this)
    pub const ROIDS_SIZE: f32 = 100.0;
    /// Max starting speed in pixels per second
    pub const ROIDS_SPD: f32 = 50.0;
    /// Average vertex count
    pub const ROIDS_VERT: u32 = 10;
    /// Jaggedness (0 = none, 1 = lots)
    pub const ROIDS_JAG: f32 = 0.4;

    /// Seconds per music beat
    pub const MUSIC_TEMPO: f32 = 1.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
