//! Integration tests for state holders.

use machine_store::core::State;
use machine_store::game::{GameEvent, GameState};
use machine_store::{
    state_enum, use_fallible_machine, use_machine, BuildError, MachineBuilder, Snapshot,
    StateHolder, Subscription, TransitionFailure,
};
use std::cell::RefCell;
use std::rc::Rc;

fn game(state: &GameState, event: &GameEvent) -> GameState {
    match (state, event) {
        (GameState::Waiting, GameEvent::Start) => GameState::Playing,
        (GameState::Playing, GameEvent::Escape) => GameState::Paused,
        (GameState::Paused, GameEvent::Start) => GameState::Playing,
        _ => *state,
    }
}

fn record(
    machine: &StateHolder<GameState, GameEvent>,
) -> (Rc<RefCell<Vec<GameState>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = machine.subscribe(move |state| sink.borrow_mut().push(*state));
    (seen, subscription)
}

#[test]
fn start_escape_tick_scenario() {
    let machine = use_machine(game, GameState::Waiting);

    machine.send(GameEvent::Start).unwrap();
    assert_eq!(machine.state().get(), GameState::Playing);

    machine.send(GameEvent::Escape).unwrap();
    assert_eq!(machine.state().get(), GameState::Paused);

    machine.send(GameEvent::Tick(16.0)).unwrap();
    assert_eq!(machine.state().get(), GameState::Paused);
}

#[test]
fn never_sent_holder_stays_waiting() {
    let machine = use_machine(game, GameState::Waiting);
    let (seen, _sub) = record(&machine);

    assert_eq!(machine.current(), GameState::Waiting);
    assert_eq!(*seen.borrow(), vec![GameState::Waiting]);
    assert!(machine.history().is_empty());
}

#[test]
fn two_subscribers_see_the_same_sequence() {
    let machine = use_machine(game, GameState::Waiting);
    let (first, _a) = record(&machine);
    let (second, _b) = record(&machine);

    for event in [
        GameEvent::Start,
        GameEvent::Escape,
        GameEvent::Start,
        GameEvent::Click(1.0),
    ] {
        machine.send(event).unwrap();
    }

    let expected = vec![
        GameState::Waiting,
        GameState::Playing,
        GameState::Paused,
        GameState::Playing,
    ];
    assert_eq!(*first.borrow(), expected);
    assert_eq!(*second.borrow(), expected);
}

#[test]
fn dropped_subscriber_stops_receiving() {
    let machine = use_machine(game, GameState::Waiting);
    let (kept, _kept_sub) = record(&machine);
    let (dropped, dropped_sub) = record(&machine);

    machine.send(GameEvent::Start).unwrap();
    drop(dropped_sub);
    machine.send(GameEvent::Escape).unwrap();

    assert_eq!(*dropped.borrow(), vec![GameState::Waiting, GameState::Playing]);
    assert_eq!(
        *kept.borrow(),
        vec![GameState::Waiting, GameState::Playing, GameState::Paused]
    );
    assert_eq!(machine.state().subscriber_count(), 1);
}

#[test]
fn failing_transition_propagates_and_keeps_state() {
    let machine = use_fallible_machine(
        |state: &GameState, event: &GameEvent| match (state, event) {
            (GameState::Paused, GameEvent::Click(_)) => Err(TransitionFailure::failed(
                state,
                event,
                "clicks are ignored while paused",
            )),
            _ => Ok(game(state, event)),
        },
        GameState::Waiting,
    );
    let (seen, _sub) = record(&machine);

    machine.send(GameEvent::Start).unwrap();
    machine.send(GameEvent::Escape).unwrap();
    let error = machine.send(GameEvent::Click(4.0)).unwrap_err();

    assert_eq!(
        error.to_string(),
        "Transition from 'paused' on 'CLICK' failed: clicks are ignored while paused"
    );
    assert_eq!(machine.current(), GameState::Paused);
    assert_eq!(
        *seen.borrow(),
        vec![GameState::Waiting, GameState::Playing, GameState::Paused]
    );
}

#[test]
fn transition_panic_leaves_cell_untouched() {
    let machine = use_machine(
        |state: &GameState, event: &GameEvent| match event {
            GameEvent::Tick(t) if *t < 0.0 => panic!("negative tick"),
            _ => game(state, event),
        },
        GameState::Waiting,
    );
    machine.send(GameEvent::Start).unwrap();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        machine.send(GameEvent::Tick(-1.0))
    }));

    assert!(outcome.is_err());
    assert_eq!(machine.current(), GameState::Playing);
    machine.send(GameEvent::Escape).unwrap();
    assert_eq!(machine.current(), GameState::Paused);
}

#[test]
fn builder_and_snapshot_roundtrip_through_json() {
    let machine = MachineBuilder::new()
        .initial(GameState::Waiting)
        .pure(game)
        .history_limit(8)
        .build()
        .unwrap();
    machine.send(GameEvent::Start).unwrap();
    machine.send(GameEvent::Escape).unwrap();

    let json = machine.snapshot().to_json().unwrap();
    let resumed = MachineBuilder::new()
        .pure(game)
        .resume(Snapshot::from_json(&json).unwrap())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(resumed.current(), GameState::Paused);
    assert_eq!(resumed.history().limit(), Some(8));
    resumed.send(GameEvent::Start).unwrap();
    assert_eq!(resumed.current(), GameState::Playing);
    assert_eq!(resumed.history().len(), 3);
}

#[test]
fn builder_reports_missing_pieces() {
    let missing = MachineBuilder::<GameState, GameEvent>::new().build();
    assert_eq!(missing.unwrap_err(), BuildError::MissingInitialState);
}

#[test]
fn shared_view_follows_sends_and_snapshot_stays_restorable() {
    let machine = MachineBuilder::new()
        .initial(GameState::Waiting)
        .pure(game)
        .build()
        .unwrap();
    let view = machine.state();
    let other_view = view.clone();

    machine.send(GameEvent::Start).unwrap();
    machine.send(GameEvent::Escape).unwrap();

    assert_eq!(view.get(), GameState::Paused);
    assert_eq!(other_view.get(), GameState::Paused);

    let restored = StateHolder::restore(machine_store::machine::pure(game), machine.snapshot())
        .unwrap();
    assert_eq!(restored.current(), GameState::Paused);
}

#[test]
fn resume_trims_history_to_builder_limit() {
    let machine = use_machine(game, GameState::Waiting);
    for event in [GameEvent::Start, GameEvent::Escape, GameEvent::Start] {
        machine.send(event).unwrap();
    }

    let resumed = MachineBuilder::new()
        .pure(game)
        .history_limit(2)
        .resume(machine.snapshot())
        .unwrap()
        .build()
        .unwrap();
    resumed.send(GameEvent::Escape).unwrap();

    assert_eq!(resumed.config().history_limit, Some(2));
    assert_eq!(resumed.history().limit(), Some(2));
    assert_eq!(resumed.history().len(), 2);
}

state_enum! {
    #[derive(Copy)]
    enum Traffic {
        Red,
        Green,
        Yellow,
    }
}

#[derive(Debug)]
struct Timer;

impl machine_store::Event for Timer {
    fn name(&self) -> &str {
        "timer"
    }
}

#[test]
fn generic_holder_with_macro_states() {
    let light = use_machine(
        |state: &Traffic, _: &Timer| match state {
            Traffic::Red => Traffic::Green,
            Traffic::Green => Traffic::Yellow,
            Traffic::Yellow => Traffic::Red,
        },
        Traffic::Red,
    );

    for _ in 0..4 {
        light.send(Timer).unwrap();
    }

    assert_eq!(light.current(), Traffic::Green);
    assert_eq!(light.current().name(), "Green");
    assert_eq!(light.history().len(), 4);
}
