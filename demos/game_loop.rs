//! Game Loop
//!
//! Drives a holder the way a game UI would: a click starts the game, timer
//! ticks arrive every frame, escape pauses, and a missed target ends it.
//!
//! Run with: RUST_LOG=machine_store=debug cargo run --example game_loop

use machine_store::game::{GameEvent, GameState};
use machine_store::machine::TransitionFailure;
use machine_store::{MachineBuilder, State};
use tracing_subscriber::EnvFilter;

fn game(state: &GameState, event: &GameEvent) -> Result<GameState, TransitionFailure> {
    Ok(match (state, event) {
        (GameState::Waiting, GameEvent::Start) => GameState::Playing,
        (GameState::Playing, GameEvent::Escape) => GameState::Paused,
        (GameState::Paused, GameEvent::Start) => GameState::Playing,
        (GameState::Playing, GameEvent::Click(x)) if *x < 0.0 => GameState::Gameover,
        (GameState::Gameover, GameEvent::Escape) => {
            return Err(TransitionFailure::rejected(state, event))
        }
        _ => *state,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Game Loop ===\n");

    let machine = MachineBuilder::new()
        .initial(GameState::Waiting)
        .fallible(game)
        .history_limit(32)
        .build()
        .expect("holder configuration is complete");

    let _screen = machine.subscribe(|state| println!("  screen shows: {}", state.name()));

    let events = [
        GameEvent::Start,
        GameEvent::Tick(16.0),
        GameEvent::Tick(16.0),
        GameEvent::Escape,
        GameEvent::Tick(16.0),
        GameEvent::Start,
        GameEvent::Click(4.0),
        GameEvent::Click(-1.0),
        GameEvent::Escape,
    ];

    for event in events {
        println!("send {event:?}");
        if let Err(error) = machine.send(event) {
            println!("  rejected: {error}");
        }
    }

    println!("\nFinal state: {} (final: {})", machine.current().name(), machine.is_final());

    let history = machine.history();
    let path: Vec<&str> = history
        .get_path()
        .into_iter()
        .map(|state| state.name())
        .collect();
    println!("Path: {}", path.join(" -> "));

    let snapshot = machine.snapshot();
    println!(
        "Snapshot {} is {} bytes as JSON",
        snapshot.id,
        snapshot.to_json().map(|json| json.len()).unwrap_or_default()
    );

    println!("\n=== Example Complete ===");
}
