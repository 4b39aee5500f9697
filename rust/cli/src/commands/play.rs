//! # Play Command
//!
//! Console blackjack session. Each round is dealt by the engine and driven by
//! a [`ConsoleSource`]: it prints the table, asks for a decision, and reports
//! whether the previous decision matched basic strategy. With `--auto` the
//! basic-strategy table answers every prompt instead of stdin.
//!
//! Typing `q` ends the session normally. Closing stdin while a round waits
//! for a decision ends it as interrupted.

use crate::config::Config;
use crate::error::CliError;
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_player_action, validate_rounds};
use bjcoach_engine::driver::{ActionSource, BasicStrategySource, RoundEnd, play_round};
use bjcoach_engine::engine::{Game, RoundSnapshot};
use bjcoach_engine::errors::GameError;
use bjcoach_engine::hand::score;
use bjcoach_engine::logger::RoundLogger;
use bjcoach_engine::player::PlayerAction;
use chrono::Utc;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const PROMPT: &str = "Do you want to (h)it, (s)tand, or (d)ouble down? ";

/// Settings for one `play` session after flags and config are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOptions {
    pub rounds: u32,
    pub seed: Option<u64>,
    pub auto: bool,
    pub log: Option<PathBuf>,
}

impl PlayOptions {
    /// Explicit flags win; anything left unset falls back to `config`.
    pub fn resolve(
        rounds: Option<u32>,
        seed: Option<u64>,
        auto: bool,
        log: Option<PathBuf>,
        config: &Config,
    ) -> Self {
        Self {
            rounds: rounds.unwrap_or(config.rounds),
            seed: seed.or(config.seed),
            auto,
            log: log.or_else(|| config.log.as_ref().map(PathBuf::from)),
        }
    }
}

/// Why a [`ConsoleSource`] stopped supplying actions.
#[derive(Debug)]
enum Stop {
    Quit,
    InputClosed,
    Failed(std::io::Error),
}

/// [`ActionSource`] over a console: prompts on `out`, reads decisions from
/// `input`, and reports rejected actions on `err`.
pub struct ConsoleSource<'a> {
    input: &'a mut dyn BufRead,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    auto: bool,
    /// Decisions already announced, compared with the tally to spot new grades
    announced: u32,
    stop: Option<Stop>,
}

impl<'a> ConsoleSource<'a> {
    pub fn new(
        input: &'a mut dyn BufRead,
        out: &'a mut dyn Write,
        err: &'a mut dyn Write,
        auto: bool,
        announced: u32,
    ) -> Self {
        Self {
            input,
            out,
            err,
            auto,
            announced,
            stop: None,
        }
    }

    /// Prints feedback for a decision graded since the last call.
    pub fn announce(&mut self, snapshot: &RoundSnapshot) -> std::io::Result<()> {
        if snapshot.tally.total() > self.announced {
            self.announced = snapshot.tally.total();
            if let Some(verdict) = &snapshot.last_verdict {
                writeln!(self.out, "{}", ui::format_verdict(verdict))?;
            }
        }
        Ok(())
    }

    fn ask(&mut self, snapshot: &RoundSnapshot) -> std::io::Result<Option<PlayerAction>> {
        self.announce(snapshot)?;
        writeln!(
            self.out,
            "Player hand: {}",
            ui::format_cards(&snapshot.player_hand)
        )?;
        writeln!(self.out, "Player score: {}", snapshot.player_score)?;
        if let Some(up) = snapshot.dealer_up_card() {
            writeln!(self.out, "Dealer's first card: {}", up.short())?;
        }

        if self.auto {
            let action = BasicStrategySource.next_action(snapshot);
            if let Some(action) = action {
                writeln!(self.out, "Auto plays: {}", action)?;
            }
            return Ok(action);
        }

        loop {
            write!(self.out, "{}", PROMPT)?;
            self.out.flush()?;
            let Some(line) = read_stdin_line(self.input) else {
                writeln!(self.out)?;
                self.stop = Some(Stop::InputClosed);
                return Ok(None);
            };
            match parse_player_action(&line) {
                ParseResult::Action(action) => {
                    if action == PlayerAction::DoubleDown {
                        writeln!(self.out, "You chose to double down!")?;
                    }
                    return Ok(Some(action));
                }
                ParseResult::Quit => {
                    self.stop = Some(Stop::Quit);
                    return Ok(None);
                }
                ParseResult::Invalid(msg) => ui::write_error(self.err, &msg)?,
            }
        }
    }

    fn finish(self) -> Result<Option<Stop>, CliError> {
        match self.stop {
            Some(Stop::Failed(e)) => Err(CliError::Io(e)),
            other => Ok(other),
        }
    }
}

impl ActionSource for ConsoleSource<'_> {
    fn next_action(&mut self, snapshot: &RoundSnapshot) -> Option<PlayerAction> {
        match self.ask(snapshot) {
            Ok(action) => action,
            Err(e) => {
                self.stop = Some(Stop::Failed(e));
                None
            }
        }
    }

    fn rejected(&mut self, error: &GameError) {
        if let Err(e) = ui::write_error(self.err, &format!("Invalid action: {}", error)) {
            self.stop = Some(Stop::Failed(e));
        }
    }
}

/// Handle the play command: a console session of `opts.rounds` rounds.
///
/// # Errors
///
/// * `CliError::InvalidInput` when zero rounds are requested
/// * `CliError::Interrupted` when input closes mid-round
/// * `CliError::Io` on output or round-log failures
pub fn handle_play_command(
    opts: &PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let rounds = match validate_rounds(opts.rounds) {
        Ok(r) => r,
        Err(msg) => {
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
    };

    let seed = opts.seed.unwrap_or_else(rand::random);
    let mut game = Game::new(Some(seed));
    let mut logger = match &opts.log {
        Some(path) => RoundLogger::create(path)?,
        None => RoundLogger::detached(&Utc::now().format("%Y%m%d").to_string()),
    };

    writeln!(
        out,
        "play: rounds={} seed={} mode={}",
        rounds,
        seed,
        if opts.auto { "auto" } else { "interactive" }
    )?;

    let mut played = 0u32;
    let mut stop = None;

    for i in 1..=rounds {
        writeln!(out)?;
        writeln!(out, "Round {}", i)?;

        let announced = game.tally().total();
        let mut source = ConsoleSource::new(stdin, out, err, opts.auto, announced);
        let end = play_round(&mut game, &mut source)?;
        if let RoundEnd::Resolved(snapshot) = &end
            && let Err(e) = source.announce(snapshot)
        {
            return Err(CliError::Io(e));
        }
        stop = source.finish()?;

        if let Some(record) = game.round_record(logger.next_id()) {
            logger.write(&record)?;
        }

        match end {
            RoundEnd::Resolved(snapshot) => {
                write_round_result(out, &snapshot)?;
                played += 1;
            }
            RoundEnd::Quit(_) => break,
        }
    }

    writeln!(out)?;
    writeln!(out, "Rounds played: {}", played)?;
    ui::write_tally(out, &game.tally())?;

    match stop {
        Some(Stop::InputClosed) => Err(CliError::Interrupted(format!(
            "input closed after {} of {} rounds",
            played, rounds
        ))),
        _ => Ok(()),
    }
}

fn write_round_result(out: &mut dyn Write, snapshot: &RoundSnapshot) -> Result<(), CliError> {
    writeln!(
        out,
        "Player hand: {} ({})",
        ui::format_cards(&snapshot.player_hand),
        snapshot.player_score
    )?;
    writeln!(
        out,
        "Dealer hand: {} ({})",
        ui::format_cards(&snapshot.dealer_hand),
        snapshot.dealer_score
    )?;
    if snapshot.dealer_revealed && snapshot.dealer_hand.len() >= 2 {
        let (opening, draws) = snapshot.dealer_hand.split_at(2);
        writeln!(out, "Dealer's score: {}", score(opening))?;
        for card in draws {
            writeln!(out, "Dealer hits: {}", card.short())?;
        }
    }
    if let Some(outcome) = snapshot.outcome {
        writeln!(out, "{}", outcome.message())?;
    }
    ui::write_tally(out, &snapshot.tally)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bjcoach_engine::cards::{Card, Rank, Suit};
    use bjcoach_engine::deck::{Shoe, ShuffleSource};
    use bjcoach_engine::rules::Outcome;
    use std::io::Cursor;

    /// Keeps a stacked shoe in order across reshuffles.
    struct NoShuffle;

    impl ShuffleSource for NoShuffle {
        fn pick_index(&mut self, upper: usize) -> usize {
            upper
        }
    }

    fn stacked_game(ranks: &[Rank]) -> Game<NoShuffle> {
        let mut cards: Vec<Card> = ranks.iter().map(|&r| Card::new(r, Suit::Hearts)).collect();
        cards.resize(104, Card::new(Rank::Three, Suit::Clubs));
        Game::with_shoe(Shoe::stacked(cards, NoShuffle))
    }

    /// Plays one console round on `game`, returning the end state, stdout and stderr.
    fn console_round(
        game: &mut Game<NoShuffle>,
        input: &str,
    ) -> (RoundEnd, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let mut source = ConsoleSource::new(&mut stdin, &mut out, &mut err, false, 0);
        let end = play_round(game, &mut source).unwrap();
        source.announce(end.snapshot()).unwrap();
        assert!(source.finish().unwrap().is_none());
        write_round_result(&mut out, end.snapshot()).unwrap();
        (
            end,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn opts(rounds: u32, seed: u64, auto: bool) -> PlayOptions {
        PlayOptions {
            rounds,
            seed: Some(seed),
            auto,
            log: None,
        }
    }

    fn play(
        options: &PlayOptions,
        input: &str,
    ) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let result = handle_play_command(options, &mut out, &mut err, &mut stdin);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_resolve_prefers_flags_over_config() {
        let config = Config {
            rounds: 4,
            seed: Some(1),
            log: Some("cfg.jsonl".into()),
        };
        let merged = PlayOptions::resolve(Some(2), None, true, None, &config);
        assert_eq!(merged.rounds, 2);
        assert_eq!(merged.seed, Some(1));
        assert!(merged.auto);
        assert_eq!(merged.log, Some(PathBuf::from("cfg.jsonl")));

        let merged = PlayOptions::resolve(None, Some(9), false, Some("x.jsonl".into()), &config);
        assert_eq!(merged.rounds, 4);
        assert_eq!(merged.seed, Some(9));
        assert_eq!(merged.log, Some(PathBuf::from("x.jsonl")));
    }

    #[test]
    fn test_double_after_hit_is_refused_and_round_continues() {
        // player 2, 3; dealer 10, 7; the hit draws a padding three
        let mut game = stacked_game(&[Rank::Two, Rank::Three, Rank::Ten, Rank::Seven]);
        let (end, out, err) = console_round(&mut game, "h\nd\ns\n");

        assert_eq!(
            err,
            "Error: Invalid action: Double down is only allowed on the first two cards (hand has 3)\n"
        );
        assert_eq!(out.matches(PROMPT).count(), 3);
        // the choice is echoed before the engine refuses it
        assert_eq!(out.matches("You chose to double down!").count(), 1);
        assert_eq!(out.matches("Correct decision!").count(), 1);
        assert_eq!(
            out.matches("Incorrect decision. Basic strategy says hit.").count(),
            1
        );

        let snapshot = end.snapshot();
        assert!(matches!(end, RoundEnd::Resolved(_)));
        assert_eq!(snapshot.player_hand.len(), 3);
        assert_eq!(snapshot.outcome, Some(Outcome::DealerWin));
        assert_eq!(game.tally().total(), 2);
        assert_eq!(game.tally().correct_decisions, 1);
        assert_eq!(game.tally().mistakes, 1);
    }

    #[test]
    fn test_dealer_draws_are_reported() {
        // player 10, 8 stands; dealer 10, 4 draws one padding three to 17
        let mut game = stacked_game(&[Rank::Ten, Rank::Eight, Rank::Ten, Rank::Four]);
        let (_, out, _) = console_round(&mut game, "s\n");

        assert!(out.contains("Dealer hand: 10♥ 4♥ 3♣ (17)"));
        assert!(out.contains("Dealer's score: 14"));
        assert_eq!(out.matches("Dealer hits: ").count(), 1);
        assert!(out.contains("Dealer hits: 3♣"));
        assert!(out.contains("You win!"));
    }

    #[test]
    fn test_dealer_standing_pat_reports_no_draws() {
        let mut game = stacked_game(&[Rank::Ten, Rank::Nine, Rank::Ten, Rank::Seven]);
        let (_, out, _) = console_round(&mut game, "s\n");

        assert!(out.contains("Dealer's score: 17"));
        assert!(!out.contains("Dealer hits:"));
    }

    #[test]
    fn test_zero_rounds_error() {
        let (result, _, err) = play(&opts(0, 1, true), "");
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(err.contains("rounds must be >= 1"));
    }

    #[test]
    fn test_auto_mode_plays_every_round_without_mistakes() {
        let (result, out, err) = play(&opts(5, 42, true), "");
        assert!(result.is_ok(), "auto mode should succeed: {}", err);
        assert!(out.contains("play: rounds=5 seed=42 mode=auto"));
        assert!(out.contains("Round 5"));
        assert!(out.contains("Rounds played: 5"));
        assert!(out.trim_end().ends_with("Mistakes: 0"));
        assert!(!out.contains(PROMPT));
    }

    #[test]
    fn test_standing_is_graded_and_tally_printed() {
        // standing every decision always resolves the round on the first input
        let (result, out, _) = play(&opts(2, 7, false), "s\ns\n");
        assert!(result.is_ok());
        assert_eq!(out.matches(PROMPT).count(), 2);
        let graded =
            out.matches("Correct decision!").count() + out.matches("Incorrect decision.").count();
        assert_eq!(graded, 2);
        assert!(out.contains("Rounds played: 2"));
        assert!(out.contains("Correct decisions: "));
        assert!(out.contains("Mistakes: "));
        assert!(out.contains("Dealer hand: "));
    }

    #[test]
    fn test_quit_ends_session_cleanly() {
        let (result, out, _) = play(&opts(3, 7, false), "q\n");
        assert!(result.is_ok());
        assert!(out.contains("Rounds played: 0"));
        assert!(out.contains("Correct decisions: 0"));
        assert!(!out.contains("Round 2"));
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let (result, out, err) = play(&opts(1, 7, false), "x\n\ns\n");
        assert!(result.is_ok());
        assert!(err.contains("Unrecognized action 'x'"));
        assert!(err.contains("Empty input"));
        assert_eq!(out.matches(PROMPT).count(), 3);
        assert!(out.contains("Rounds played: 1"));
    }

    #[test]
    fn test_closed_input_is_interrupted() {
        let (result, out, _) = play(&opts(2, 7, false), "");
        assert!(matches!(result, Err(CliError::Interrupted(_))));
        assert!(out.contains("Rounds played: 0"));
    }

    #[test]
    fn test_same_seed_same_transcript() {
        let (_, a, _) = play(&opts(3, 2024, true), "");
        let (_, b, _) = play(&opts(3, 2024, true), "");
        assert_eq!(a, b);
    }

    #[test]
    fn test_log_receives_one_line_per_round() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        let options = PlayOptions {
            log: Some(path.clone()),
            ..opts(3, 11, true)
        };
        let (result, _, _) = play(&options, "");
        assert!(result.is_ok());

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(v["seed"], 11);
            assert!(v["outcome"].is_string());
            assert!(v["ts"].is_string());
        }
    }

    #[test]
    fn test_quit_mid_round_logs_abandoned_round() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quit.jsonl");
        let options = PlayOptions {
            log: Some(path.clone()),
            ..opts(1, 11, false)
        };
        let (result, _, _) = play(&options, "q\n");
        assert!(result.is_ok());

        let content = std::fs::read_to_string(&path).unwrap();
        let v: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert!(v["outcome"].is_null());
        assert_eq!(v["decisions"].as_array().map(Vec::len), Some(0));
    }
}
