//! Builder for constructing state holders.

use crate::builder::config::HolderConfig;
use crate::builder::error::BuildError;
use crate::checkpoint::{CheckpointError, Snapshot};
use crate::core::{Event, State, StateHistory};
use crate::machine::{Fallible, Pure, StateHolder, Transition, TransitionFailure};
use crate::store::Writable;

/// Builder for constructing state holders with a fluent API.
///
/// # Example
///
/// ```rust
/// use machine_store::builder::MachineBuilder;
/// use machine_store::game::{GameEvent, GameState};
///
/// let machine = MachineBuilder::new()
///     .initial(GameState::Waiting)
///     .pure(|state: &GameState, event: &GameEvent| match (state, event) {
///         (GameState::Waiting, GameEvent::Start) => GameState::Playing,
///         _ => *state,
///     })
///     .history_limit(16)
///     .build()
///     .unwrap();
///
/// machine.send(GameEvent::Start).unwrap();
/// assert_eq!(machine.current(), GameState::Playing);
/// ```
pub struct MachineBuilder<S: State + 'static, E: Event + 'static> {
    initial: Option<S>,
    transition: Option<Box<dyn Transition<S, E>>>,
    resumed: Option<(S, StateHistory<S>, HolderConfig)>,
    config: Option<HolderConfig>,
}

impl<S: State + 'static, E: Event + 'static> MachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transition: None,
            resumed: None,
            config: None,
        }
    }

    /// Set the initial state (required unless resuming).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the transition strategy (required).
    pub fn transition<T>(mut self, transition: T) -> Self
    where
        T: Transition<S, E> + 'static,
    {
        self.transition = Some(Box::new(transition));
        self
    }

    /// Set an infallible transition closure.
    pub fn pure<F>(self, f: F) -> Self
    where
        F: Fn(&S, &E) -> S + 'static,
    {
        self.transition(Pure::new(f))
    }

    /// Set a transition closure that may fail.
    pub fn fallible<F>(self, f: F) -> Self
    where
        F: Fn(&S, &E) -> Result<S, TransitionFailure> + 'static,
    {
        self.transition(Fallible::new(f))
    }

    /// Enable or disable transition history.
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.config
            .get_or_insert_with(HolderConfig::default)
            .record_history = enabled;
        self
    }

    /// Keep at most `limit` transitions in history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config
            .get_or_insert_with(HolderConfig::default)
            .history_limit = Some(limit);
        self
    }

    /// Replace all history options at once.
    pub fn config(mut self, config: HolderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Continue from a snapshot.
    ///
    /// Takes the snapshot's initial state, published state, history and
    /// history options. Options set on the builder take precedence over the
    /// snapshot's, and the carried-over history is trimmed to fit them.
    /// Returns an error if the snapshot fails validation.
    pub fn resume(mut self, snapshot: Snapshot<S>) -> Result<Self, CheckpointError> {
        snapshot.validate()?;
        self.initial = Some(snapshot.initial_state);
        self.resumed = Some((snapshot.current_state, snapshot.history, snapshot.config));
        Ok(self)
    }

    /// Build the holder.
    /// Returns an error if required fields are missing or options are invalid.
    pub fn build(self) -> Result<StateHolder<S, E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let transition = self.transition.ok_or(BuildError::MissingTransition)?;

        let (current, history, config) = match self.resumed {
            Some((current, history, saved)) => {
                let config = self.config.unwrap_or(saved);
                let history = config.adopt_history(history);
                (current, history, config)
            }
            None => {
                let config = self.config.unwrap_or_default();
                (initial.clone(), config.new_history(), config)
            }
        };
        config.validate()?;

        Ok(StateHolder::from_parts(
            transition,
            Writable::new(current),
            initial,
            history,
            config,
        ))
    }
}

impl<S: State + 'static, E: Event + 'static> Default for MachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
