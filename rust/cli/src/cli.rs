//! Command-line surface of `bjcoach`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bjcoach",
    version,
    about = "Blackjack trainer that grades every decision against basic strategy"
)]
pub struct BjcoachCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play rounds at the console and get graded on each decision
    Play {
        /// Number of rounds to play (default from config, else 1)
        #[arg(long)]
        rounds: Option<u32>,
        /// Seed for the shoe shuffle
        #[arg(long)]
        seed: Option<u64>,
        /// Let basic strategy make every decision
        #[arg(long)]
        auto: bool,
        /// Append one JSON record per round to this file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Show the basic-strategy action for a hand against a dealer up-card
    Advise {
        /// Player cards, e.g. "A 7" or "10,6"
        #[arg(long)]
        hand: String,
        /// Dealer up-card, e.g. 9 or Kh
        #[arg(long)]
        dealer: String,
    },
    /// Display the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub const NAMES: &'static [&'static str] = &["play", "advise", "cfg"];
}
