//! machine-store: bind a pure transition function to a subscribable store
//!
//! A [`StateHolder`] owns one published state. The only way to change it is
//! [`send`](StateHolder::send), which feeds the current state and an event
//! through a caller-supplied transition function and publishes the result to
//! every subscriber. Unchanged states are not re-published. The holder
//! defines no transitions of its own.
//!
//! # Core Concepts
//!
//! - **State** / **Event**: traits for the values a holder publishes and consumes
//! - **Transition**: injected strategy `(state, event) -> state`
//! - **Store**: explicitly owned observable cells (`Writable`, `Readable`)
//! - **History** and **Snapshot**: what was committed, and how to restore it
//!
//! # Example
//!
//! ```rust
//! use machine_store::game::{GameEvent, GameState};
//! use machine_store::use_machine;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let machine = use_machine(
//!     |state: &GameState, event: &GameEvent| match (state, event) {
//!         (GameState::Waiting, GameEvent::Start) => GameState::Playing,
//!         (GameState::Playing, GameEvent::Escape) => GameState::Paused,
//!         (GameState::Paused, GameEvent::Start) => GameState::Playing,
//!         _ => *state,
//!     },
//!     GameState::Waiting,
//! );
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! let _subscription = machine.state().subscribe(move |state| sink.borrow_mut().push(*state));
//!
//! machine.send(GameEvent::Start).unwrap();
//! machine.send(GameEvent::Escape).unwrap();
//! machine.send(GameEvent::Tick(16.0)).unwrap();
//!
//! assert_eq!(
//!     *seen.borrow(),
//!     vec![GameState::Waiting, GameState::Playing, GameState::Paused]
//! );
//! ```

extern crate self as machine_store;

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod game;
pub mod machine;
pub mod store;

// Re-export commonly used types
pub use builder::{BuildError, HolderConfig, MachineBuilder};
pub use checkpoint::{CheckpointError, Snapshot};
pub use crate::core::{Event, State, StateHistory, StateTransition};
pub use machine::{use_fallible_machine, use_machine, StateHolder, Transition, TransitionFailure};
pub use store::{Readable, Subscription, Writable};

#[doc(hidden)]
pub use serde as __serde;
