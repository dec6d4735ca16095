//! Snapshot and restore of state holders.
//!
//! A [`Snapshot`] captures what a holder published and how it got there. It
//! does not include the transition (closures are not serializable); the
//! caller supplies it again when restoring.

use crate::builder::HolderConfig;
use crate::core::{State, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::{CheckpointError, Format};

/// Version identifier for snapshot format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable capture of a holder.
///
/// # Example
///
/// ```rust
/// use machine_store::checkpoint::Snapshot;
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
/// machine.send(GameEvent::Start).unwrap();
///
/// let json = machine.snapshot().to_json().unwrap();
/// let snapshot: Snapshot<GameState> = Snapshot::from_json(&json).unwrap();
/// assert_eq!(snapshot.current_state, GameState::Playing);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<S: State> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// State the holder was created with
    pub initial_state: S,

    /// State the holder was publishing
    pub current_state: S,

    /// Recorded transitions
    pub history: StateHistory<S>,

    /// History options the holder ran with
    #[serde(default)]
    pub config: HolderConfig,
}

impl<S: State> Snapshot<S> {
    /// Build a snapshot stamped with a fresh id and the current time.
    pub fn capture(
        initial_state: S,
        current_state: S,
        history: StateHistory<S>,
        config: HolderConfig,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial_state,
            current_state,
            history,
            config,
        }
    }

    /// Check that this snapshot can be restored.
    ///
    /// The version must match [`CHECKPOINT_VERSION`], the history options
    /// must be valid, and when history is present its last transition must
    /// end in `current_state`.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        self.config.validate()?;
        if let Some(last) = self.history.last() {
            if last.to != self.current_state {
                return Err(CheckpointError::HistoryMismatch {
                    history_ends: last.to.name().to_string(),
                    published: self.current_state.name().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::encode(Format::Json, e))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::decode(Format::Json, e))
    }

    /// Compact binary encoding.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::encode(Format::Binary, e))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes).map_err(|e| CheckpointError::decode(Format::Binary, e))
    }
}
