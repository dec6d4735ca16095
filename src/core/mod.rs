//! Core state machine types.
//!
//! This module contains the pure building blocks shared by every holder:
//! - State definitions via the `State` trait
//! - Event definitions via the `Event` trait
//! - History of applied transitions
//!
//! Nothing in this module performs I/O or touches a published cell.

mod event;
mod history;
mod state;

pub use event::Event;
pub use history::{StateHistory, StateTransition};
pub use state::State;
