//! Basic-strategy table and the decision tally it feeds.
//!
//! The table covers hit, stand and double down only. It is used to grade the
//! player's choices, never to play for them inside the engine.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::{is_soft, score};
use crate::player::PlayerAction;

/// Basic-strategy action for `player_cards` against `dealer_up`.
///
/// # Examples
///
/// ```
/// use bjcoach_engine::cards::{Card, Rank, Suit};
/// use bjcoach_engine::player::PlayerAction;
/// use bjcoach_engine::strategy::recommend;
///
/// let hand = [Card::new(Rank::Five, Suit::Hearts), Card::new(Rank::Six, Suit::Clubs)];
/// let up = Card::new(Rank::Six, Suit::Spades);
/// assert_eq!(recommend(&hand, up), PlayerAction::DoubleDown);
/// ```
pub fn recommend(player_cards: &[Card], dealer_up: Card) -> PlayerAction {
    let total = score(player_cards);
    // Ace counts 11, faces 10
    let dealer = dealer_up.value();

    if is_soft(player_cards) {
        return if total >= 19 || (total == 18 && (2..=8).contains(&dealer)) {
            PlayerAction::Stand
        } else {
            PlayerAction::Hit
        };
    }

    let mut action = if total >= 17
        || ((13..=16).contains(&total) && (2..=6).contains(&dealer))
        || (total == 12 && (4..=6).contains(&dealer))
    {
        PlayerAction::Stand
    } else {
        PlayerAction::Hit
    };

    // doubling is only on the table for the opening two cards
    if player_cards.len() == 2 {
        let double = match total {
            11 => true,
            10 => dealer != 10 && dealer != 11,
            9 => (3..=6).contains(&dealer),
            _ => false,
        };
        if double {
            action = PlayerAction::DoubleDown;
        }
    }

    action
}

/// Outcome of grading one decision.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub taken: PlayerAction,
    pub recommended: PlayerAction,
    pub correct: bool,
}

impl Verdict {
    /// Grades `taken` by comparing its code letter with the recommendation's.
    pub fn grade(taken: PlayerAction, recommended: PlayerAction) -> Self {
        Self {
            taken,
            recommended,
            correct: taken.code() == recommended.code(),
        }
    }
}

/// Running count of graded decisions for one game.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub correct_decisions: u32,
    pub mistakes: u32,
}

impl Tally {
    /// Grades `taken` against the table and counts the result.
    pub fn evaluate(
        &mut self,
        taken: PlayerAction,
        player_cards: &[Card],
        dealer_up: Card,
    ) -> Verdict {
        let verdict = Verdict::grade(taken, recommend(player_cards, dealer_up));
        self.record(&verdict);
        verdict
    }

    pub fn record(&mut self, verdict: &Verdict) {
        if verdict.correct {
            self.correct_decisions += 1;
        } else {
            self.mistakes += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.correct_decisions + self.mistakes
    }
}
