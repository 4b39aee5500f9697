//! Terminal output helpers shared by the commands.

use std::io::Write;

use bjcoach_engine::cards::Card;
use bjcoach_engine::strategy::{Tally, Verdict};

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Cards in compact form separated by spaces, e.g. `A♠ 7♥`.
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::short)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Feedback line for a graded decision.
pub fn format_verdict(verdict: &Verdict) -> String {
    if verdict.correct {
        "Correct decision!".to_string()
    } else {
        format!(
            "Incorrect decision. Basic strategy says {}.",
            verdict.recommended
        )
    }
}

pub fn write_tally(out: &mut dyn Write, tally: &Tally) -> std::io::Result<()> {
    writeln!(out, "Correct decisions: {}", tally.correct_decisions)?;
    writeln!(out, "Mistakes: {}", tally.mistakes)
}
