//! Transition strategies injected into a state holder.

use crate::core::{Event, State};
use std::fmt;
use std::marker::PhantomData;

/// Errors produced by a transition function.
///
/// The holder never creates these itself; it only hands back what the
/// caller-supplied transition returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionFailure {
    #[error("Event '{event}' is not accepted in state '{state}'")]
    Rejected { state: String, event: String },

    #[error("Transition from '{state}' on '{event}' failed: {reason}")]
    Failed {
        state: String,
        event: String,
        reason: String,
    },
}

impl TransitionFailure {
    /// The transition has no edge for this `(state, event)` pair.
    pub fn rejected<S: State, E: Event>(state: &S, event: &E) -> Self {
        Self::Rejected {
            state: state.name().to_string(),
            event: event.name().to_string(),
        }
    }

    /// The transition could not compute a next state.
    pub fn failed<S: State, E: Event>(state: &S, event: &E, reason: impl Into<String>) -> Self {
        Self::Failed {
            state: state.name().to_string(),
            event: event.name().to_string(),
            reason: reason.into(),
        }
    }
}

/// A transition function: maps the current state and an event to the next
/// state.
///
/// Implementations must be pure. The holder calls [`apply`](Self::apply)
/// exactly once per `send` and commits the result only on `Ok`.
pub trait Transition<S: State, E: Event> {
    fn apply(&self, state: &S, event: &E) -> Result<S, TransitionFailure>;
}

/// Adapter for infallible closures `Fn(&S, &E) -> S`.
pub struct Pure<S, E, F> {
    f: F,
    _phantom: PhantomData<fn(&S, &E) -> S>,
}

impl<S, E, F> Pure<S, E, F>
where
    S: State,
    E: Event,
    F: Fn(&S, &E) -> S,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}

impl<S, E, F> Transition<S, E> for Pure<S, E, F>
where
    S: State,
    E: Event,
    F: Fn(&S, &E) -> S,
{
    fn apply(&self, state: &S, event: &E) -> Result<S, TransitionFailure> {
        Ok((self.f)(state, event))
    }
}

impl<S, E, F> fmt::Debug for Pure<S, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pure(..)")
    }
}

/// Adapter for closures that may fail, `Fn(&S, &E) -> Result<S, TransitionFailure>`.
pub struct Fallible<S, E, F> {
    f: F,
    _phantom: PhantomData<fn(&S, &E) -> S>,
}

impl<S, E, F> Fallible<S, E, F>
where
    S: State,
    E: Event,
    F: Fn(&S, &E) -> Result<S, TransitionFailure>,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}

impl<S, E, F> Transition<S, E> for Fallible<S, E, F>
where
    S: State,
    E: Event,
    F: Fn(&S, &E) -> Result<S, TransitionFailure>,
{
    fn apply(&self, state: &S, event: &E) -> Result<S, TransitionFailure> {
        (self.f)(state, event)
    }
}

impl<S, E, F> fmt::Debug for Fallible<S, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fallible(..)")
    }
}

/// Wrap an infallible closure as a [`Transition`].
///
/// # Example
///
/// ```rust
/// use machine_store::game::{GameEvent, GameState};
/// use machine_store::machine::{pure, Transition};
///
/// let start = pure(|state: &GameState, event: &GameEvent| match (state, event) {
///     (GameState::Waiting, GameEvent::Start) => GameState::Playing,
///     _ => *state,
/// });
///
/// assert_eq!(start.apply(&GameState::Waiting, &GameEvent::Start), Ok(GameState::Playing));
/// ```
pub fn pure<S, E, F>(f: F) -> Pure<S, E, F>
where
    S: State,
    E: Event,
    F: Fn(&S, &E) -> S,
{
    Pure::new(f)
}

/// Wrap a fallible closure as a [`Transition`].
pub fn fallible<S, E, F>(f: F) -> Fallible<S, E, F>
where
    S: State,
    E: Event,
    F: Fn(&S, &E) -> Result<S, TransitionFailure>,
{
    Fallible::new(f)
}
