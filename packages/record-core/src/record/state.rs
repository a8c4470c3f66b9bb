//! Record lifecycle state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What the owning collection must do with a record on the next synchronization.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum State {
    /// Placeholder waiting to be filled by a read
    #[default]
    Empty = 0,
    /// Mirrors a row already committed in the managed database
    Loaded = 1,
    /// Must be inserted into the remote database
    Inserting = 2,
    /// Exists remotely and must have its values updated
    Updating = 3,
    /// Must be removed from the remote database
    Deleting = 4,
}

impl State {
    pub const ALL: [State; 5] = [
        State::Empty,
        State::Loaded,
        State::Inserting,
        State::Updating,
        State::Deleting,
    ];

    /// Binary tag used by the record codec.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Converts a codec tag back into a state, returns None for unknown tags.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(State::Empty),
            1 => Some(State::Loaded),
            2 => Some(State::Inserting),
            3 => Some(State::Updating),
            4 => Some(State::Deleting),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            State::Empty => "empty",
            State::Loaded => "loaded",
            State::Inserting => "inserting",
            State::Updating => "updating",
            State::Deleting => "deleting",
        }
    }

    /// Returns true if the record carries a change the remote database has not seen.
    pub fn is_pending(self) -> bool {
        matches!(self, State::Inserting | State::Updating | State::Deleting)
    }
}

/// Visibility implied by a state: hidden while empty or pending deletion.
pub fn visible_for(state: State) -> bool {
    !matches!(state, State::Empty | State::Deleting)
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown state name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown record state '{0}'")]
pub struct ParseStateError(pub String);

impl FromStr for State {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        State::ALL
            .into_iter()
            .find(|state| state.as_str() == normalized)
            .ok_or_else(|| ParseStateError(s.to_string()))
    }
}
