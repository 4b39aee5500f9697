use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::hand::BLACKJACK;
use crate::player::PlayerAction;

/// Dealer keeps drawing while below this total, soft or hard.
pub const DEALER_STANDS_AT: u32 = 17;

/// Phase of a single round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundState {
    /// Initial two cards each are being dealt. `Game::start_round` deals in
    /// one step, so a live round is never observed in this state.
    Dealing,
    /// Waiting for the player's next action
    PlayerTurn,
    /// Dealer hand revealed and drawing to 17
    DealerTurn,
    /// Outcome decided; no further actions accepted
    Resolved,
}

/// How a round ended, from the player's point of view.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerBust,
    PlayerBlackjack,
    DealerBust,
    DealerWin,
    PlayerWin,
    Push,
}

impl Outcome {
    pub fn player_wins(self) -> bool {
        matches!(
            self,
            Outcome::PlayerBlackjack | Outcome::DealerBust | Outcome::PlayerWin
        )
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::PlayerBust => "Busted! You lose.",
            Outcome::PlayerBlackjack => "Blackjack! You win!",
            Outcome::DealerBust => "Dealer busts! You win!",
            Outcome::DealerWin => "Dealer wins!",
            Outcome::PlayerWin => "You win!",
            Outcome::Push => "Push! It's a tie.",
        }
    }
}

/// Decides a round from the final totals.
///
/// Checked in order: player bust, player 21, dealer bust, then the higher
/// total wins and equal totals push.
///
/// # Examples
///
/// ```
/// use bjcoach_engine::rules::{resolve_outcome, Outcome};
///
/// assert_eq!(resolve_outcome(19, 18), Outcome::PlayerWin);
/// // a player bust loses even when the dealer also busts
/// assert_eq!(resolve_outcome(23, 24), Outcome::PlayerBust);
/// ```
pub fn resolve_outcome(player: u32, dealer: u32) -> Outcome {
    if player > BLACKJACK {
        Outcome::PlayerBust
    } else if player == BLACKJACK {
        Outcome::PlayerBlackjack
    } else if dealer > BLACKJACK {
        Outcome::DealerBust
    } else if player < dealer {
        Outcome::DealerWin
    } else if player > dealer {
        Outcome::PlayerWin
    } else {
        Outcome::Push
    }
}

/// Checks that `action` may be applied in `state` with `player_cards` cards held.
///
/// # Errors
///
/// - [`GameError::RoundResolved`] once the round is over
/// - [`GameError::NotPlayerTurn`] while dealing or during the dealer's turn
/// - [`GameError::DoubleDownNotAllowed`] when doubling after the first two cards
pub fn validate_action(
    state: RoundState,
    player_cards: usize,
    action: PlayerAction,
) -> Result<PlayerAction, GameError> {
    match state {
        RoundState::Resolved => Err(GameError::RoundResolved),
        RoundState::Dealing | RoundState::DealerTurn => Err(GameError::NotPlayerTurn { state }),
        RoundState::PlayerTurn => match action {
            PlayerAction::DoubleDown if player_cards != 2 => {
                Err(GameError::DoubleDownNotAllowed {
                    cards: player_cards,
                })
            }
            other => Ok(other),
        },
    }
}
