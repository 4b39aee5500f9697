use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four suits of a standard 52-card deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts suit (♥)
    Hearts,
    /// Diamonds suit (♦)
    Diamonds,
    /// Clubs suit (♣)
    Clubs,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        };
        f.write_str(name)
    }
}

/// Face value of a card, Ace through King.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace, counted as 11 or 1
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    /// Jack (10)
    Jack,
    /// Queen (10)
    Queen,
    /// King (10)
    King,
}

impl Rank {
    /// Blackjack value with the Ace at its high count.
    pub fn value(self) -> u32 {
        match self {
            Rank::Ace => 11,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    pub fn is_ace(self) -> bool {
        self == Rank::Ace
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized rank '{0}' (expected A, 2-10, J, Q or K)")]
pub struct ParseRankError(pub String);

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        all_ranks()
            .into_iter()
            .find(|r| r.symbol().eq_ignore_ascii_case(token))
            .or(match token {
                "1" | "11" => Some(Rank::Ace),
                "T" | "t" => Some(Rank::Ten),
                _ => None,
            })
            .ok_or_else(|| ParseRankError(token.to_string()))
    }
}

/// A single playing card. Cards are plain values and are copied freely between
/// the shoe and the hands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn value(&self) -> u32 {
        self.rank.value()
    }

    /// Compact form such as `10♥`.
    pub fn short(&self) -> String {
        format!("{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

/// One standard 52-card deck, suit by suit.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
