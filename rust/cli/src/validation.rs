//! Input parsing and validation for the interactive and one-shot commands.
//!
//! - Player decisions typed at the `play` prompt
//! - Card tokens and hands for `advise`

use bjcoach_engine::cards::{Card, Rank, Suit};
use bjcoach_engine::player::PlayerAction;

/// Result type for parsing user input into player actions.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from input
    Action(PlayerAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input string into a PlayerAction or the quit command.
///
/// Accepts (case-insensitive):
/// - "h" or "hit" → Hit
/// - "s" or "stand" → Stand
/// - "d", "double" or "double down" → DoubleDown
/// - "q" or "quit" → Quit command
///
/// # Example
///
/// ```rust
/// # use bjcoach_cli::validation::{parse_player_action, ParseResult};
/// use bjcoach_engine::player::PlayerAction;
///
/// assert_eq!(parse_player_action("h"), ParseResult::Action(PlayerAction::Hit));
/// assert_eq!(
///     parse_player_action("Double"),
///     ParseResult::Action(PlayerAction::DoubleDown)
/// );
/// assert_eq!(parse_player_action("quit"), ParseResult::Quit);
///
/// match parse_player_action("split") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let words: Vec<&str> = input.split_whitespace().collect();

    match words.as_slice() {
        [] => ParseResult::Invalid("Empty input".to_string()),
        ["q"] | ["quit"] => ParseResult::Quit,
        ["h"] | ["hit"] => ParseResult::Action(PlayerAction::Hit),
        ["s"] | ["stand"] => ParseResult::Action(PlayerAction::Stand),
        ["d"] | ["double"] | ["double", "down"] => ParseResult::Action(PlayerAction::DoubleDown),
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: h(it), s(tand), d(ouble), q(uit)",
            input
        )),
    }
}

/// Suit named by a trailing letter or symbol.
fn parse_suit(c: char) -> Option<Suit> {
    match c.to_ascii_lowercase() {
        'h' | '♥' => Some(Suit::Hearts),
        'd' | '♦' => Some(Suit::Diamonds),
        'c' | '♣' => Some(Suit::Clubs),
        's' | '♠' => Some(Suit::Spades),
        _ => None,
    }
}

/// Parses a card token such as `A`, `10`, `Kh` or `7♣`.
///
/// The suit is optional and defaults to spades; only the rank matters for
/// scoring and advice.
pub fn parse_card(token: &str) -> Result<Card, String> {
    let token = token.trim();
    if let Ok(rank) = token.parse::<Rank>() {
        return Ok(Card::new(rank, Suit::Spades));
    }
    let mut chars = token.chars();
    let suit = chars
        .next_back()
        .and_then(parse_suit)
        .ok_or_else(|| format!("Invalid card '{}'", token))?;
    let rank = chars
        .as_str()
        .parse::<Rank>()
        .map_err(|e| format!("Invalid card '{}': {}", token, e))?;
    Ok(Card::new(rank, suit))
}

/// Parses a player hand like `"A 7"` or `"10,6,5"`. At least two cards.
pub fn parse_hand(input: &str) -> Result<Vec<Card>, String> {
    let cards = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(parse_card)
        .collect::<Result<Vec<_>, _>>()?;
    if cards.len() < 2 {
        return Err(format!(
            "A hand needs at least two cards, got {}",
            cards.len()
        ));
    }
    Ok(cards)
}

/// Validates the number of rounds requested for a session.
pub fn validate_rounds(rounds: u32) -> Result<u32, String> {
    if rounds == 0 {
        return Err("rounds must be >= 1".to_string());
    }
    Ok(rounds)
}
