//! State holder that binds a transition to a published cell.

use crate::builder::HolderConfig;
use crate::checkpoint::{CheckpointError, Snapshot};
use crate::core::{Event, State, StateHistory, StateTransition};
use crate::machine::transition::{Fallible, Pure, Transition, TransitionFailure};
use crate::store::{Readable, Subscription, Writable};
use chrono::Utc;
use std::cell::RefCell;
use std::fmt;
use tracing::{debug, warn};

/// Owns the published state and the transition that is allowed to change it.
///
/// The only write path to the published cell is [`send`](Self::send);
/// everyone else gets a [`Readable`] through [`state`](Self::state).
pub struct StateHolder<S: State + 'static, E: Event> {
    state: Writable<S>,
    transition: Box<dyn Transition<S, E>>,
    initial: S,
    history: RefCell<StateHistory<S>>,
    config: HolderConfig,
}

impl<S: State + 'static, E: Event> StateHolder<S, E> {
    /// Create a holder publishing `initial` with default configuration.
    pub fn new<T>(transition: T, initial: S) -> Self
    where
        T: Transition<S, E> + 'static,
    {
        let config = HolderConfig::default();
        let history = config.new_history();
        Self::from_parts(
            Box::new(transition),
            Writable::new(initial.clone()),
            initial,
            history,
            config,
        )
    }

    /// Rebuild a holder from a snapshot.
    ///
    /// The snapshot is validated first; the restored holder publishes its
    /// `current_state` and runs with the snapshot's history options, keeping
    /// as much of its history as those options allow.
    pub fn restore<T>(transition: T, snapshot: Snapshot<S>) -> Result<Self, CheckpointError>
    where
        T: Transition<S, E> + 'static,
    {
        snapshot.validate()?;
        debug!(
            snapshot = %snapshot.id,
            state = snapshot.current_state.name(),
            "restoring holder from snapshot"
        );
        let Snapshot {
            initial_state,
            current_state,
            history,
            config,
            ..
        } = snapshot;
        let history = config.adopt_history(history);
        Ok(Self::from_parts(
            Box::new(transition),
            Writable::new(current_state),
            initial_state,
            history,
            config,
        ))
    }

    pub(crate) fn from_parts(
        transition: Box<dyn Transition<S, E>>,
        state: Writable<S>,
        initial: S,
        history: StateHistory<S>,
        config: HolderConfig,
    ) -> Self {
        Self {
            state,
            transition,
            initial,
            history: RefCell::new(history),
            config,
        }
    }

    /// Apply `event` to the current state and publish the result.
    ///
    /// Reads the value that is published right now, so two sends in a row
    /// compose. When the next state equals the current one nothing is
    /// published or recorded. A failing transition is returned unchanged;
    /// the published state, the history and the subscribers are left
    /// untouched.
    pub fn send(&self, event: E) -> Result<(), TransitionFailure> {
        self.state.try_update(|current| {
            let next = self
                .transition
                .apply(current, &event)
                .inspect_err(|error| {
                    warn!(
                        state = current.name(),
                        event = event.name(),
                        %error,
                        "transition failed"
                    );
                })?;
            if next != *current {
                debug!(
                    from = current.name(),
                    to = next.name(),
                    event = event.name(),
                    "transition applied"
                );
                self.record(current, &next, &event);
            }
            Ok(next)
        })
    }

    fn record(&self, from: &S, to: &S, event: &E) {
        if !self.config.record_history {
            return;
        }
        let mut history = self.history.borrow_mut();
        let recorded = std::mem::take(&mut *history).record(StateTransition {
            from: from.clone(),
            to: to.clone(),
            event: event.name().to_string(),
            timestamp: Utc::now(),
        });
        *history = recorded;
    }

    /// Read-only handle to the published state.
    pub fn state(&self) -> Readable<S> {
        self.state.readonly()
    }

    /// Clone of the published state.
    pub fn current(&self) -> S {
        self.state.get()
    }

    /// Subscribe to the published state. See [`Writable::subscribe`].
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&S) + 'static,
    {
        self.state.subscribe(callback)
    }

    /// The state the holder was created with.
    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// Check if the published state is final.
    pub fn is_final(&self) -> bool {
        self.state.with(|state| state.is_final())
    }

    /// State changes committed so far (empty when history is disabled).
    pub fn history(&self) -> StateHistory<S> {
        self.history.borrow().clone()
    }

    pub fn config(&self) -> &HolderConfig {
        &self.config
    }

    /// Capture the holder's states and history.
    pub fn snapshot(&self) -> Snapshot<S> {
        Snapshot::capture(
            self.initial.clone(),
            self.current(),
            self.history(),
            self.config.clone(),
        )
    }
}

impl<S: State + 'static, E: Event> fmt::Debug for StateHolder<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHolder")
            .field("state", &self.current())
            .field("initial", &self.initial)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Bind a pure transition function and an initial state into a holder.
///
/// # Example
///
/// ```rust
/// use machine_store::game::{GameEvent, GameState};
/// use machine_store::use_machine;
///
/// let machine = use_machine(
///     |state: &GameState, event: &GameEvent| match (state, event) {
///         (GameState::Waiting, GameEvent::Start) => GameState::Playing,
///         _ => *state,
///     },
///     GameState::Waiting,
/// );
///
/// machine.send(GameEvent::Start).unwrap();
/// assert_eq!(machine.state().get(), GameState::Playing);
/// ```
pub fn use_machine<S, E, F>(transition: F, initial: S) -> StateHolder<S, E>
where
    S: State + 'static,
    E: Event + 'static,
    F: Fn(&S, &E) -> S + 'static,
{
    StateHolder::new(Pure::new(transition), initial)
}

/// Like [`use_machine`], for transitions that can fail.
pub fn use_fallible_machine<S, E, F>(transition: F, initial: S) -> StateHolder<S, E>
where
    S: State + 'static,
    E: Event + 'static,
    F: Fn(&S, &E) -> Result<S, TransitionFailure> + 'static,
{
    StateHolder::new(Fallible::new(transition), initial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineBuilder;
    use crate::game::{GameEvent, GameState};
    use std::rc::Rc;

    fn game(state: &GameState, event: &GameEvent) -> GameState {
        match (state, event) {
            (GameState::Waiting, GameEvent::Start) => GameState::Playing,
            (GameState::Playing, GameEvent::Escape) => GameState::Paused,
            (GameState::Paused, GameEvent::Start) => GameState::Playing,
            _ => *state,
        }
    }

    #[test]
    fn send_publishes_transition_result() {
        let machine = use_machine(game, GameState::Waiting);

        machine.send(GameEvent::Start).unwrap();
        assert_eq!(machine.current(), GameState::Playing);

        machine.send(GameEvent::Escape).unwrap();
        assert_eq!(machine.current(), GameState::Paused);

        machine.send(GameEvent::Tick(16.0)).unwrap();
        assert_eq!(machine.current(), GameState::Paused);
    }

    #[test]
    fn untouched_holder_keeps_initial_state() {
        let machine: StateHolder<GameState, GameEvent> = use_machine(game, GameState::Waiting);

        assert_eq!(machine.current(), GameState::Waiting);
        assert_eq!(machine.initial(), &GameState::Waiting);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn failure_leaves_state_history_and_subscribers_alone() {
        let machine = use_fallible_machine(
            |state: &GameState, event: &GameEvent| match (state, event) {
                (GameState::Waiting, GameEvent::Start) => Ok(GameState::Playing),
                _ => Err(TransitionFailure::rejected(state, event)),
            },
            GameState::Waiting,
        );
        let notified = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notified);
        let _sub = machine.subscribe(move |_| *counter.borrow_mut() += 1);

        machine.send(GameEvent::Start).unwrap();
        let error = machine.send(GameEvent::Click(3.0)).unwrap_err();

        assert_eq!(
            error,
            TransitionFailure::Rejected {
                state: "playing".to_string(),
                event: "CLICK".to_string(),
            }
        );
        assert_eq!(machine.current(), GameState::Playing);
        assert_eq!(machine.history().len(), 1);
        assert_eq!(*notified.borrow(), 2);
    }

    #[test]
    fn history_records_event_names() {
        let machine = use_machine(game, GameState::Waiting);
        machine.send(GameEvent::Start).unwrap();
        machine.send(GameEvent::Escape).unwrap();

        let history = machine.history();
        let events: Vec<&str> = history
            .transitions()
            .iter()
            .map(|t| t.event.as_str())
            .collect();
        assert_eq!(events, vec!["START", "ESCAPE"]);
        assert_eq!(
            history.get_path(),
            vec![&GameState::Waiting, &GameState::Playing, &GameState::Paused]
        );
    }

    #[test]
    fn subscriber_can_send_reentrantly() {
        let machine = Rc::new(use_machine(game, GameState::Waiting));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let resume = Rc::downgrade(&machine);
        let _auto = machine.subscribe(move |state| {
            if *state == GameState::Paused {
                if let Some(machine) = resume.upgrade() {
                    machine.send(GameEvent::Start).unwrap();
                }
            }
        });
        let sink = Rc::clone(&seen);
        let _log = machine.subscribe(move |state| sink.borrow_mut().push(*state));

        machine.send(GameEvent::Start).unwrap();
        machine.send(GameEvent::Escape).unwrap();

        assert_eq!(machine.current(), GameState::Playing);
        assert_eq!(
            *seen.borrow(),
            vec![
                GameState::Waiting,
                GameState::Playing,
                GameState::Paused,
                GameState::Playing
            ]
        );
    }

    #[test]
    fn snapshot_then_restore_continues() {
        let machine = use_machine(game, GameState::Waiting);
        machine.send(GameEvent::Start).unwrap();

        let restored: StateHolder<GameState, GameEvent> =
            StateHolder::restore(Pure::new(game), machine.snapshot()).unwrap();

        assert_eq!(restored.current(), GameState::Playing);
        assert_eq!(restored.initial(), &GameState::Waiting);
        restored.send(GameEvent::Escape).unwrap();
        assert_eq!(restored.current(), GameState::Paused);
        assert_eq!(restored.history().len(), 2);
    }

    #[test]
    fn restore_keeps_history_options() {
        let machine = MachineBuilder::new()
            .initial(GameState::Waiting)
            .pure(game)
            .record_history(false)
            .build()
            .unwrap();
        machine.send(GameEvent::Start).unwrap();

        let restored: StateHolder<GameState, GameEvent> =
            StateHolder::restore(Pure::new(game), machine.snapshot()).unwrap();
        restored.send(GameEvent::Escape).unwrap();

        assert!(!restored.config().record_history);
        assert!(restored.history().is_empty());
        assert!(restored.snapshot().validate().is_ok());
    }
}
