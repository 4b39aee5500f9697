use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Highest total that is not a bust.
pub const BLACKJACK: u32 = 21;

/// Best blackjack total for `cards`.
///
/// Aces start at 11 and drop to 1, one at a time, while the total is over 21.
pub fn score(cards: &[Card]) -> u32 {
    let mut total = 0;
    let mut soft_aces = 0;

    for card in cards {
        if card.rank.is_ace() {
            soft_aces += 1;
        }
        total += card.value();
    }

    while total > BLACKJACK && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }

    total
}

/// Total with every Ace counted as 1.
pub fn hard_total(cards: &[Card]) -> u32 {
    cards
        .iter()
        .map(|c| if c.rank.is_ace() { 1 } else { c.value() })
        .sum()
}

/// A hand is soft when it holds an Ace and its all-aces-low total is at most 10,
/// so one Ace can still count as 11.
pub fn is_soft(cards: &[Card]) -> bool {
    cards.iter().any(|c| c.rank.is_ace()) && hard_total(cards) <= 10
}

pub fn is_busted(cards: &[Card]) -> bool {
    score(cards) > BLACKJACK
}

/// Cards held by the player or the dealer during one round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn first(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub fn score(&self) -> u32 {
        score(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}
