use thiserror::Error;

use crate::rules::RoundState;

/// Actions the engine refuses. A rejected action leaves the round and the
/// tally untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("No round in progress")]
    NoRoundInProgress,
    #[error("Round already resolved")]
    RoundResolved,
    #[error("Double down is only allowed on the first two cards (hand has {cards})")]
    DoubleDownNotAllowed { cards: usize },
    #[error("Player cannot act while the round is {state:?}")]
    NotPlayerTurn { state: RoundState },
}
