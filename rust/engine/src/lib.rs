//! # bjcoach-engine: Blackjack Strategy Trainer Core
//!
//! A single-player blackjack engine that grades every player decision against
//! a fixed basic-strategy table. Provides the shoe, hand scoring, the strategy
//! table, and the round state machine, with seeded RNG for reproducible play.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Two-deck shoe with Fisher-Yates shuffling and a 75% reshuffle point
//! - [`hand`] - Hand totals and soft-hand detection
//! - [`strategy`] - Basic-strategy table, decision verdicts and the running tally
//! - [`engine`] - The [`engine::Game`] state machine: deal, player turn, dealer turn, resolve
//! - [`rules`] - Action validation, dealer stop total and outcome precedence
//! - [`driver`] - Pluggable action sources that play a round to completion
//! - [`player`] - Player actions
//! - [`logger`] - RoundRecord serialization to JSONL
//! - [`errors`] - Error types for rejected actions
//!
//! ## Quick Start
//!
//! ```rust
//! use bjcoach_engine::engine::Game;
//! use bjcoach_engine::player::PlayerAction;
//!
//! let mut game = Game::new(Some(42));
//! let deal = game.start_round();
//! println!("You hold {:?}, dealer shows {}", deal.player_hand, deal.dealer_up_card);
//!
//! let snapshot = game.submit_action(PlayerAction::Stand).unwrap();
//! println!("Outcome: {:?}", snapshot.outcome);
//! println!("Tally: {:?}", game.tally());
//! ```
//!
//! ## Scoring
//!
//! ```rust
//! use bjcoach_engine::cards::{Card, Rank, Suit};
//! use bjcoach_engine::hand::score;
//!
//! let pair_of_aces = [
//!     Card::new(Rank::Ace, Suit::Hearts),
//!     Card::new(Rank::Ace, Suit::Spades),
//! ];
//! assert_eq!(score(&pair_of_aces), 12);
//! ```
//!
//! ## Automated Play
//!
//! ```rust
//! use bjcoach_engine::driver::{play_round, BasicStrategySource};
//! use bjcoach_engine::engine::Game;
//!
//! let mut game = Game::new(Some(1));
//! play_round(&mut game, &mut BasicStrategySource).unwrap();
//! assert_eq!(game.tally().mistakes, 0);
//! ```

pub mod cards;
pub mod deck;
pub mod driver;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
pub mod strategy;
