//! Rock Belt entry point
//!
//! The browser build is driven from JS through `platform::web::WebGame`.
//! Natively this is a headless driver: it runs a session for a number of
//! ticks, optionally under a simple autopilot, and logs what happened.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use clap::Parser;

    use rock_belt::highscores::FileStore;
    use rock_belt::normalize_angle;
    use rock_belt::sim::{GameEvent, GameState, TickInput};
    use rock_belt::{Session, Settings, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "rock-belt")]
    #[command(about = "Headless driver for the Rock Belt simulation")]
    struct Cli {
        /// Ticks to simulate
        #[arg(long, default_value_t = 3_000)]
        ticks: u64,
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// JSON file overriding gameplay tuning
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Stop at the first game over instead of letting the game restart
        #[arg(long, default_value_t = false)]
        until_game_over: bool,
        /// Pace ticks to wall-clock time
        #[arg(long, default_value_t = false)]
        realtime: bool,
        /// Aim at the nearest asteroid and keep firing
        #[arg(long, default_value_t = false)]
        autopilot: bool,
        /// Where the best score is kept
        #[arg(long, default_value = "rock-belt-highscore.json")]
        high_score_file: PathBuf,
        /// Player settings file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Don't log sound or music cues
        #[arg(long, default_value_t = false)]
        mute: bool,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let tuning = match &cli.tuning {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading tuning file {}", path.display()))?;
                Tuning::from_json(&json)
                    .with_context(|| format!("invalid tuning in {}", path.display()))?
            }
            None => Tuning::default(),
        };

        let mut settings = match &cli.settings {
            Some(path) => Settings::load_from(path).unwrap_or_else(|e| {
                log::warn!("Ignoring settings file {}: {e}", path.display());
                Settings::default()
            }),
            None => Settings::default(),
        };
        if cli.mute {
            settings = Settings {
                sound_on: false,
                music_on: false,
                ..settings
            };
        }

        let seed = cli.seed.unwrap_or_else(seed_from_clock);
        let tick_dur = Duration::from_secs_f32(tuning.dt());
        let mut session = Session::new(seed, tuning, FileStore::new(&cli.high_score_file));

        let mut last = Instant::now();
        let mut games_over = 0u32;
        while session.state().time_ticks < cli.ticks {
            let input = if cli.autopilot {
                autopilot(session.state())
            } else {
                TickInput::default()
            };

            let events = if cli.realtime {
                std::thread::sleep(tick_dur.saturating_sub(last.elapsed()));
                let now = Instant::now();
                let elapsed = now.duration_since(last).as_secs_f32();
                last = now;
                session.advance(elapsed, &input)
            } else {
                session.step(&input)
            };

            for event in settings.audible(&events) {
                log::debug!("tick {}: {:?}", session.state().time_ticks, event);
            }
            let over = events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }));
            if over {
                games_over += 1;
                if cli.until_game_over {
                    break;
                }
            }
        }

        let state = session.state();
        println!(
            "seed {} ran {} ticks: level {}, score {}, best {}, lives {}, games over {}",
            seed,
            state.time_ticks,
            state.level,
            state.score,
            state.high_score,
            state.lives,
            games_over
        );
        Ok(())
    }

    /// Turn toward the nearest asteroid and tap fire every other tick
    fn autopilot(state: &GameState) -> TickInput {
        let ship = &state.ship;
        let nearest = state.field.iter().min_by(|a, b| {
            let da = a.pos.distance_squared(ship.pos);
            let db = b.pos.distance_squared(ship.pos);
            da.total_cmp(&db)
        });
        let Some(target) = nearest else {
            return TickInput::default();
        };

        // Screen y grows downward
        let to = target.pos - ship.pos;
        let wanted = (-to.y).atan2(to.x);
        let diff = normalize_angle(wanted - ship.angle);
        let aim = state.tuning.turn_per_tick();

        TickInput {
            turn_left: diff > aim * 0.5,
            turn_right: diff < -aim * 0.5,
            thrust: false,
            fire: state.time_ticks % 2 == 0,
        }
    }

    fn seed_from_clock() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
