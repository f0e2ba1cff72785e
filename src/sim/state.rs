//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there are no
//! globals. Entities are plain data, mutated only by their owning component
//! (`ship`, `lasers`, `asteroids`).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroids::AsteroidField;
use crate::tuning::Tuning;

/// Ship lifecycle. Counters live on the variant that uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipState {
    /// Freshly spawned: blinking, ignored by collisions
    Invulnerable {
        /// Blink intervals left
        blink_num: u32,
        /// Ticks left in the current blink interval
        blink_time: u32,
    },
    /// Normal control, collides with asteroids
    Flying,
    /// Explosion animation playing; controls have no effect
    Exploding { ticks_left: u32 },
    /// Out of lives. Terminal until the next game.
    Dead,
}

/// A projectile fired by the ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cumulative distance travelled
    pub dist: f32,
    /// 0 while flying, ticks of hit animation left otherwise
    pub explode_time: u32,
}

impl Laser {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            dist: 0.0,
            explode_time: 0,
        }
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.explode_time > 0
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading (radians, counter-clockwise on screen, π/2 = up)
    pub angle: f32,
    /// Heading change applied each tick
    pub rot: f32,
    /// Accumulated velocity
    pub thrust: Vec2,
    pub radius: f32,
    /// Thrust control held
    pub thrusting: bool,
    /// Cleared on fire, set again when the fire control is released
    pub can_shoot: bool,
    pub state: ShipState,
    pub lasers: Vec<Laser>,
    /// Engine was firing last tick (drives thrust sound start/stop)
    #[serde(default)]
    pub engine_on: bool,
}

impl Ship {
    /// A new ship at the field centre, pointing up, invulnerable
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.field_width / 2.0, tuning.field_height / 2.0),
            angle: std::f32::consts::FRAC_PI_2,
            rot: 0.0,
            thrust: Vec2::ZERO,
            radius: tuning.ship_radius(),
            thrusting: false,
            can_shoot: true,
            state: ShipState::Invulnerable {
                blink_num: tuning.blink_count(),
                blink_time: tuning.blink_ticks(),
            },
            lasers: Vec::with_capacity(tuning.laser_max),
            engine_on: false,
        }
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        matches!(self.state, ShipState::Exploding { .. })
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state == ShipState::Dead
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        matches!(self.state, ShipState::Invulnerable { .. })
    }

    /// Accepting control input and integrating motion
    #[inline]
    pub fn is_controllable(&self) -> bool {
        matches!(self.state, ShipState::Flying | ShipState::Invulnerable { .. })
    }

    /// Drawn this frame? Blinks off on odd blink counts. Rendering only.
    pub fn is_visible(&self) -> bool {
        match self.state {
            ShipState::Flying => true,
            ShipState::Invulnerable { blink_num, .. } => blink_num % 2 == 0,
            ShipState::Exploding { .. } | ShipState::Dead => false,
        }
    }

    /// Nose, rear-left, rear-right in screen space
    pub fn outline(&self) -> [Vec2; 3] {
        let (sin, cos) = self.angle.sin_cos();
        let r = self.radius;
        let Vec2 { x, y } = self.pos;
        [
            Vec2::new(x + 4.0 / 3.0 * r * cos, y - 4.0 / 3.0 * r * sin),
            Vec2::new(
                x - r * (2.0 / 3.0 * cos + sin),
                y + r * (2.0 / 3.0 * sin - cos),
            ),
            Vec2::new(
                x - r * (2.0 / 3.0 * cos - sin),
                y + r * (2.0 / 3.0 * sin + cos),
            ),
        ]
    }

    /// Where lasers leave the ship
    pub fn nose(&self) -> Vec2 {
        self.outline()[0]
    }
}

/// Asteroid size tier. Each tier has half the radius of the one above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidTier {
    Large,
    Medium,
    Small,
}

impl AsteroidTier {
    /// Radius for this tier: `ceil(size / 2)`, `ceil(size / 4)`, `ceil(size / 8)`
    pub fn radius(self, tuning: &Tuning) -> f32 {
        let divisor = match self {
            AsteroidTier::Large => 2.0,
            AsteroidTier::Medium => 4.0,
            AsteroidTier::Small => 8.0,
        };
        (tuning.roids_size / divisor).ceil()
    }

    /// Points for destroying an asteroid of this tier
    pub fn points(self, tuning: &Tuning) -> u64 {
        match self {
            AsteroidTier::Large => tuning.points_large,
            AsteroidTier::Medium => tuning.points_medium,
            AsteroidTier::Small => tuning.points_small,
        }
    }

    /// Tier of the fragments this one splits into (None for the smallest)
    pub fn child(self) -> Option<AsteroidTier> {
        match self {
            AsteroidTier::Large => Some(AsteroidTier::Medium),
            AsteroidTier::Medium => Some(AsteroidTier::Small),
            AsteroidTier::Small => None,
        }
    }
}

/// A jagged rock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tier: AsteroidTier,
    /// Fixed at creation from the tier
    pub radius: f32,
    /// Outline rotation (radians)
    pub angle: f32,
    /// Polygon vertex count
    pub vert: u32,
    /// Per-vertex radius multipliers, one per vertex
    pub offsets: Vec<f32>,
}

impl Asteroid {
    /// Polygon vertices in screen space
    pub fn outline(&self) -> Vec<Vec2> {
        let step = std::f32::consts::TAU / self.vert as f32;
        self.offsets
            .iter()
            .enumerate()
            .map(|(i, off)| {
                let a = self.angle + i as f32 * step;
                self.pos + Vec2::new(a.cos(), a.sin()) * self.radius * off
            })
            .collect()
    }
}

/// Fading status text ("Level 3", "Game Over")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    /// 1.0 when shown, fades below zero
    pub alpha: f32,
}

impl Banner {
    pub fn show(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alpha: 1.0,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.alpha >= 0.0
    }
}

/// Alternating two-note background beat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beat {
    /// Next beat plays the low note
    pub low: bool,
    /// Ticks until the next beat
    pub ticks_left: u32,
}

impl Default for Beat {
    fn default() -> Self {
        Self {
            low: true,
            ticks_left: 0,
        }
    }
}

/// Discrete things that happened during a tick, for audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    LaserFired,
    AsteroidHit { tier: AsteroidTier },
    ShipExploded,
    /// Engine started; thrust sound should loop until `ThrustStopped`
    ThrustStarted,
    ThrustStopped,
    MusicBeat { high: bool },
    LevelStarted { level: u32 },
    ShipRespawned,
    GameOver { score: u64 },
    NewGame,
    /// Running score passed the best score; the new best should be persisted
    HighScore { score: u64 },
}

impl GameEvent {
    /// Sound effect cue (as opposed to music or bookkeeping)
    pub fn is_sound(&self) -> bool {
        matches!(
            self,
            GameEvent::LaserFired
                | GameEvent::AsteroidHit { .. }
                | GameEvent::ShipExploded
                | GameEvent::ThrustStarted
                | GameEvent::ThrustStopped
        )
    }

    pub fn is_music(&self) -> bool {
        matches!(self, GameEvent::MusicBeat { .. })
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    /// Best score seen, including earlier sessions
    pub high_score: u64,
    pub banner: Banner,
    pub ship: Ship,
    pub field: AsteroidField,
    pub beat: Beat,
    /// Simulation tick counter (not reset between games)
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session and start the first game
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let ship = Ship::spawn(&tuning);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: tuning.game_lives,
            tuning,
            level: 1,
            score: 0,
            high_score,
            banner: Banner::show(""),
            ship,
            field: AsteroidField::default(),
            beat: Beat::default(),
            time_ticks: 0,
            events: Vec::new(),
        };
        state.new_game();
        state
    }

    /// Reset level, lives, score and ship, then start level 1.
    /// The high score survives.
    pub fn new_game(&mut self) {
        self.level = 1;
        self.lives = self.tuning.game_lives;
        self.score = 0;
        self.ship = Ship::spawn(&self.tuning);
        log::info!("New game (best {})", self.high_score);
        self.emit(GameEvent::NewGame);
        self.new_level();
    }

    /// Show the level banner and lay down a fresh belt
    pub fn new_level(&mut self) {
        self.banner = Banner::show(format!("Level {}", self.level));
        let count = self.tuning.belt_size(self.level);
        self.field
            .create_belt(count, &self.ship, self.level, &self.tuning, &mut self.rng);
        log::info!("Level {} started with {} asteroids", self.level, count);
        self.emit(GameEvent::LevelStarted { level: self.level });
    }

    /// Ship is gone for good
    pub fn game_over(&mut self) {
        self.ship.state = ShipState::Dead;
        self.ship.thrusting = false;
        self.ship.rot = 0.0;
        self.banner = Banner::show("Game Over");
        log::info!("Game over at level {} with score {}", self.level, self.score);
        self.emit(GameEvent::GameOver { score: self.score });
    }

    /// Add points and track the best score
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.emit(GameEvent::HighScore {
                score: self.high_score,
            });
        }
    }

    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_level_one() {
        let state = GameState::new(7, Tuning::default(), 500);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 500);
        assert_eq!(state.field.len(), 2);
        assert_eq!(state.banner.text, "Level 1");
        assert!(state.events.contains(&GameEvent::LevelStarted { level: 1 }));
    }

    #[test]
    fn test_spawned_ship_is_invulnerable_at_centre() {
        let tuning = Tuning::default();
        let ship = Ship::spawn(&tuning);
        assert_eq!(ship.pos, Vec2::new(380.0, 285.0));
        assert_eq!(ship.radius, 15.0);
        assert_eq!(
            ship.state,
            ShipState::Invulnerable {
                blink_num: 30,
                blink_time: 3
            }
        );
        assert!(ship.can_shoot);
        assert!(ship.is_visible());
    }

    #[test]
    fn test_nose_points_up_at_spawn() {
        let ship = Ship::spawn(&Tuning::default());
        let nose = ship.nose();
        assert!((nose.x - 380.0).abs() < 1e-4);
        assert!((nose.y - (285.0 - 20.0)).abs() < 1e-4);
    }

    #[test]
    fn test_tier_radii_and_children() {
        let tuning = Tuning::default();
        assert_eq!(AsteroidTier::Large.radius(&tuning), 50.0);
        assert_eq!(AsteroidTier::Medium.radius(&tuning), 25.0);
        assert_eq!(AsteroidTier::Small.radius(&tuning), 13.0);
        assert_eq!(AsteroidTier::Large.child(), Some(AsteroidTier::Medium));
        assert_eq!(AsteroidTier::Small.child(), None);
    }

    #[test]
    fn test_add_score_tracks_best() {
        let mut state = GameState::new(1, Tuning::default(), 30);
        state.drain_events();
        state.add_score(20);
        assert_eq!(state.high_score, 30);
        assert!(state.events.is_empty());
        state.add_score(20);
        assert_eq!(state.high_score, 40);
        assert_eq!(state.drain_events(), vec![GameEvent::HighScore { score: 40 }]);
    }

    #[test]
    fn test_events_serialize_tagged() {
        let json = serde_json::to_string(&GameEvent::MusicBeat { high: true }).unwrap();
        assert_eq!(json, r#"{"type":"music_beat","high":true}"#);
    }
}
