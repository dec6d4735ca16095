//! Builder API and configuration for state holders.
//!
//! [`MachineBuilder`] wires an initial state, a transition and the history
//! options ([`HolderConfig`]) into a [`StateHolder`](crate::machine::StateHolder).
//! The [`state_enum!`](crate::state_enum) macro removes the boilerplate of
//! implementing `State` for plain enums.

pub mod config;
pub mod error;
pub mod machine;
pub mod macros;

pub use config::HolderConfig;
pub use error::BuildError;
pub use machine::MachineBuilder;
