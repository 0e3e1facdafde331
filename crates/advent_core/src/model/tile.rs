//! Derived tile state for one calendar day.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Presentation state of one calendar tile.
///
/// Derived from the unlock date, the current date and the opened-day set.
/// Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileState {
    /// Unlock date has not been reached yet.
    Locked,
    /// Unlocked and not yet viewed (includes past days never opened).
    Today,
    /// Viewed at least once.
    Opened,
}

impl TileState {
    /// Returns whether the tile reacts to user activation.
    pub fn is_clickable(self) -> bool {
        !matches!(self, Self::Locked)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Today => "today",
            Self::Opened => "opened",
        }
    }
}

impl Display for TileState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
