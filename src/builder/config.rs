//! Holder configuration.

use crate::builder::error::BuildError;
use crate::core::{State, StateHistory};
use serde::{Deserialize, Serialize};

/// Options controlling how a holder records its transitions.
///
/// Missing fields deserialize to their defaults, so a host can embed this
/// in its own configuration file.
///
/// # Example
///
/// ```rust
/// use machine_store::HolderConfig;
///
/// let config: HolderConfig = serde_json::from_str(r#"{ "history_limit": 64 }"#).unwrap();
/// assert!(config.record_history);
/// assert_eq!(config.history_limit, Some(64));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HolderConfig {
    /// Record every committed transition (default `true`).
    pub record_history: bool,

    /// Keep at most this many transitions (default unbounded).
    pub history_limit: Option<usize>,
}

impl Default for HolderConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: None,
        }
    }
}

impl HolderConfig {
    /// Check the options for values a holder cannot honor.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.history_limit == Some(0) {
            return Err(BuildError::ZeroHistoryLimit);
        }
        Ok(())
    }

    pub(crate) fn new_history<S: State>(&self) -> StateHistory<S> {
        match self.history_limit {
            Some(limit) => StateHistory::bounded(limit),
            None => StateHistory::new(),
        }
    }

    /// Fit a history carried over from a snapshot to these options.
    ///
    /// With recording disabled the history starts empty, so it can never
    /// end in a state other than the published one.
    pub(crate) fn adopt_history<S: State>(&self, history: StateHistory<S>) -> StateHistory<S> {
        if self.record_history {
            history.with_limit(self.history_limit)
        } else {
            self.new_history()
        }
    }
}
