//! High score persistence through the frame driver

use rock_belt::sim::{GameEvent, TickInput};
use rock_belt::{MemoryStore, Session, Tuning};

fn idle() -> TickInput {
    TickInput::default()
}

/// Destroy the first asteroid outside the tick, then run one tick so the
/// driver sees the resulting events
fn score_once(session: &mut Session<MemoryStore>) -> Vec<GameEvent> {
    session.state_mut().destroy_asteroid(0);
    session.step(&idle())
}

#[test]
fn first_improvement_writes_exactly_once() {
    // Belt starts as two large asteroids, worth 20 each
    let mut session = Session::new(11, Tuning::default(), MemoryStore::with_score(30));

    score_once(&mut session);
    assert_eq!(session.state().score, 20);
    assert!(session.store().writes.is_empty());

    let events = score_once(&mut session);
    assert_eq!(session.state().score, 40);
    assert!(events.contains(&GameEvent::HighScore { score: 40 }));
    assert_eq!(session.store().writes, vec![40]);

    // Quiet ticks write nothing
    for _ in 0..10 {
        session.step(&idle());
    }
    assert_eq!(session.store().writes, vec![40]);
}

#[test]
fn several_hits_in_one_tick_coalesce() {
    let mut session = Session::new(11, Tuning::default(), MemoryStore::new());
    session.state_mut().destroy_asteroid(0);
    session.state_mut().destroy_asteroid(0);
    session.step(&idle());

    assert_eq!(session.state().score, 40);
    assert_eq!(session.store().writes, vec![40]);
}

#[test]
fn best_survives_game_reset_and_never_goes_down() {
    let mut session = Session::new(11, Tuning::default(), MemoryStore::new());
    score_once(&mut session);
    score_once(&mut session);
    assert_eq!(session.store().writes, vec![20, 40]);

    session.state_mut().game_over();
    let mut restarted = false;
    for _ in 0..120 {
        if session.step(&idle()).contains(&GameEvent::NewGame) {
            restarted = true;
            break;
        }
    }
    assert!(restarted, "game never restarted");
    assert_eq!(session.state().score, 0);
    assert_eq!(session.high_score(), 40);

    // Back below the best: no write
    score_once(&mut session);
    assert_eq!(session.state().score, 20);
    assert_eq!(session.store().writes, vec![20, 40]);

    // A fresh session on the same store starts from the saved best
    let store = session.into_store();
    let session = Session::new(12, Tuning::default(), store);
    assert_eq!(session.high_score(), 40);
    assert_eq!(session.snapshot().high_score, 40);
}

#[test]
fn advance_runs_fixed_ticks() {
    let mut session = Session::new(11, Tuning::default(), MemoryStore::new());
    let dt = session.state().tuning.dt();
    for _ in 0..30 {
        session.advance(dt, &idle());
    }
    assert_eq!(session.state().time_ticks, 30);
}
