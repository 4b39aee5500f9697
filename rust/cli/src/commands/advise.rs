//! One-shot basic-strategy lookup.

use crate::error::CliError;
use crate::ui;
use crate::validation::{parse_card, parse_hand};
use bjcoach_engine::hand::{is_soft, score, BLACKJACK};
use bjcoach_engine::strategy::recommend;
use std::io::Write;

/// Handle the advise command: print the recommended action for `hand`
/// against the dealer's `dealer` up-card.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for unreadable cards, hands with fewer
/// than two cards, and hands that are already busted.
pub fn handle_advise_command(
    hand: &str,
    dealer: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let parsed = parse_hand(hand).and_then(|cards| {
        let up = parse_card(dealer)?;
        Ok((cards, up))
    });
    let (cards, up) = match parsed {
        Ok(v) => v,
        Err(msg) => {
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
    };

    let total = score(&cards);
    if total > BLACKJACK {
        let msg = format!("hand is already busted ({})", total);
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }

    let kind = if is_soft(&cards) { "soft" } else { "hard" };
    writeln!(
        out,
        "Hand: {} ({} {})",
        ui::format_cards(&cards),
        kind,
        total
    )?;
    writeln!(out, "Dealer shows: {}", up.short())?;
    writeln!(out, "Recommended: {}", recommend(&cards, up))?;
    Ok(())
}
