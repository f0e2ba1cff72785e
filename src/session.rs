//! Frame driver
//!
//! Owns the game state and a high score store. Turns variable frame times
//! into whole simulation ticks and writes the best score back whenever it
//! improves.

use crate::consts::MAX_SUBSTEPS;
use crate::highscores::HighScoreStore;
use crate::sim::{FrameSnapshot, GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session<S: HighScoreStore> {
    state: GameState,
    store: S,
    /// Unsimulated time carried between frames, in seconds
    accumulator: f32,
    /// Best value known to be in the store. `None` while the store could
    /// not be read, so a write can't clobber a higher stored score.
    persisted: Option<u64>,
}

impl<S: HighScoreStore> Session<S> {
    /// Start a game, seeding the best score from the store
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        let persisted = match store.load() {
            Ok(score) => Some(score.unwrap_or(0)),
            Err(e) => {
                log::warn!("Could not load high score, starting from 0: {e}");
                None
            }
        };
        let high_score = persisted.unwrap_or(0);
        log::info!("Session started with seed {seed}, best {high_score}");

        Self {
            state: GameState::new(seed, tuning, high_score),
            store,
            accumulator: 0.0,
            persisted,
        }
    }

    /// Run exactly one tick and return what happened
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, input);
        let events = self.state.drain_events();

        // Several hits in one tick still mean a single write
        let best = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::HighScore { score } => Some(*score),
                _ => None,
            })
            .max();
        if let Some(score) = best {
            self.persist(score);
        }

        events
    }

    /// Run as many ticks as `elapsed_secs` covers, capped at
    /// `MAX_SUBSTEPS`. Leftover time carries into the next call.
    pub fn advance(&mut self, elapsed_secs: f32, input: &TickInput) -> Vec<GameEvent> {
        let dt = self.state.tuning.dt();
        let elapsed = if elapsed_secs.is_finite() {
            elapsed_secs.clamp(0.0, dt * MAX_SUBSTEPS as f32)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= dt && substeps < MAX_SUBSTEPS {
            events.extend(self.step(input));
            self.accumulator -= dt;
            substeps += 1;
        }
        events
    }

    fn persist(&mut self, score: u64) {
        let stored = match self.persisted {
            Some(stored) => stored,
            None => match self.store.load() {
                Ok(stored) => {
                    let stored = stored.unwrap_or(0);
                    self.persisted = Some(stored);
                    stored
                }
                Err(e) => {
                    log::warn!("High score {score} not saved, store unreadable: {e}");
                    return;
                }
            },
        };
        if score <= stored {
            return;
        }
        match self.store.save(score) {
            Ok(()) => {
                log::info!("New high score {score}");
                self.persisted = Some(score);
            }
            Err(e) => log::warn!("Could not save high score {score}: {e}"),
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for drivers and tests that stage a scene
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hand the store back, e.g. to start a fresh session on it
    pub fn into_store(self) -> S {
        self.store
    }
}
