//! Transition history tracking.
//!
//! Records every transition a holder commits, in order, optionally bounded
//! so long-running holders (one transition per frame tick) keep a fixed
//! memory footprint.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use machine_store::core::StateTransition;
/// use machine_store::game::GameState;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: GameState::Waiting,
///     to: GameState::Playing,
///     event: "START".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.event, "START");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Name of the event that triggered the transition
    pub event: String,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed transitions.
///
/// `record` consumes the history and returns it with the transition
/// appended. A bounded history evicts its oldest entries first.
///
/// # Example
///
/// ```rust
/// use machine_store::core::{StateHistory, StateTransition};
/// use machine_store::game::GameState;
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: GameState::Waiting,
///         to: GameState::Playing,
///         event: "START".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: GameState::Playing,
///         to: GameState::Paused,
///         event: "ESCAPE".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&GameState::Waiting, &GameState::Playing, &GameState::Paused]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
    limit: Option<usize>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty history that keeps at most `limit` transitions.
    ///
    /// A limit of zero keeps nothing.
    pub fn bounded(limit: usize) -> Self {
        Self {
            transitions: Vec::with_capacity(limit.min(1024)),
            limit: Some(limit),
        }
    }

    /// Append a transition, evicting the oldest entries past the limit.
    pub fn record(mut self, transition: StateTransition<S>) -> Self {
        self.transitions.push(transition);
        self.evict();
        self
    }

    /// Replace the bound, evicting the oldest entries that no longer fit.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self.evict();
        self
    }

    fn evict(&mut self) {
        if let Some(limit) = self.limit {
            if self.transitions.len() > limit {
                let excess = self.transitions.len() - limit;
                self.transitions.drain(..excess);
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition followed
    /// by the `to` state of each transition. Empty when nothing is recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last retained transitions.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// Get all retained transitions, oldest first.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    /// Maximum number of retained transitions, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
