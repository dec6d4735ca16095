//! States and events of a simple game loop.
//!
//! These are the concrete types a game UI publishes through a
//! [`StateHolder`](crate::machine::StateHolder). The edges between states are
//! not defined here: the caller supplies them as the transition function.

use crate::core::{Event, State};
use serde::{Deserialize, Serialize};

/// Mode the game is in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Waiting,
    Playing,
    Paused,
    Gameover,
}

impl State for GameState {
    fn name(&self) -> &str {
        match self {
            Self::Waiting => "waiting",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Gameover => "gameover",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Gameover)
    }
}

/// Something that happened to the game.
///
/// Serializes as `{"type": "TICK", "data": 16.0}`; variants without a
/// payload omit `data`.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    Start,
    Escape,
    /// Elapsed time or frame count.
    Tick(f64),
    /// Position or index of the click.
    Click(f64),
}

impl GameEvent {
    /// The numeric payload, if the variant carries one.
    pub fn payload(&self) -> Option<f64> {
        match self {
            Self::Tick(value) | Self::Click(value) => Some(*value),
            Self::Start | Self::Escape => None,
        }
    }
}

impl Event for GameEvent {
    fn name(&self) -> &str {
        match self {
            Self::Start => "START",
            Self::Escape => "ESCAPE",
            Self::Tick(_) => "TICK",
            Self::Click(_) => "CLICK",
        }
    }
}
