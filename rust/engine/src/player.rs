use std::fmt;

use serde::{Deserialize, Serialize};

/// A decision the player makes during their turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    /// Take one more card
    Hit,
    /// Keep the current total and hand over to the dealer
    Stand,
    /// Take exactly one more card, then the dealer plays (first decision only)
    DoubleDown,
}

impl PlayerAction {
    /// One-letter code the console prompt accepts (`h`, `s`, `d`).
    pub fn code(self) -> char {
        match self {
            PlayerAction::Hit => 'h',
            PlayerAction::Stand => 's',
            PlayerAction::DoubleDown => 'd',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerAction::Hit => "hit",
            PlayerAction::Stand => "stand",
            PlayerAction::DoubleDown => "double down",
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
