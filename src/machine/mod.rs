//! Binding a transition function to a published state.
//!
//! A [`StateHolder`] owns one observable cell and one [`Transition`]. The
//! transition is an injected strategy: the holder never decides which edges
//! exist, it only applies whatever the caller supplied and publishes the
//! result.
//!
//! - [`use_machine`] binds a pure closure `Fn(&S, &E) -> S`
//! - [`use_fallible_machine`] binds a closure returning `Result`
//! - [`StateHolder::new`] accepts any [`Transition`] implementation

mod holder;
mod transition;

pub use holder::{use_fallible_machine, use_machine, StateHolder};
pub use transition::{fallible, pure, Fallible, Pure, Transition, TransitionFailure};
