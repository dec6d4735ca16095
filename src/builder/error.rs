//! Build errors for holder configuration.

use thiserror::Error;

/// Errors that can occur when building a state holder.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) or .resume(snapshot) before .build()")]
    MissingInitialState,

    #[error("Transition not specified. Call .transition(t), .pure(f) or .fallible(f)")]
    MissingTransition,

    #[error("History limit must be at least 1. Use .record_history(false) to disable history")]
    ZeroHistoryLimit,
}
