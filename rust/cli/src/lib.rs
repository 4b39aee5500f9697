//! # bjcoach CLI Library
//!
//! Command-line front-end for the `bjcoach-engine` blackjack trainer.
//!
//! ## Main Entry Point
//!
//! [`run`] parses command-line arguments, dispatches to a subcommand and
//! returns the process exit code. [`run_with_input`] does the same with an
//! explicit input stream for the interactive `play` command.
//!
//! ## Example Usage
//!
//! ```
//! use std::io;
//! let args = vec!["bjcoach", "advise", "--hand", "A 7", "--dealer", "9"];
//! let code = bjcoach_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play graded rounds at the console, or let basic strategy play with `--auto`
//! - `advise`: Look up the basic-strategy action for one hand
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::{BufRead, Write};

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{BjcoachCli, Commands};
use commands::{PlayOptions, handle_advise_command, handle_cfg_command, handle_play_command};

pub use commands::{ConsoleSource, PROMPT};
pub use error::CliError;

/// Main entry point for the CLI application, reading interactive input from
/// the process's stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when input closes
/// mid-round
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// [`run`] with the `play` command reading from `stdin`.
///
/// # Example
///
/// ```
/// use std::io::{self, Cursor};
/// let mut input = Cursor::new("s\n");
/// let code = bjcoach_cli::run_with_input(
///     ["bjcoach", "play", "--seed", "42"],
///     &mut io::stdout(),
///     &mut io::stderr(),
///     &mut input,
/// );
/// assert_eq!(code, 0);
/// ```
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BjcoachCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Advise { hand, dealer } => handle_advise_command(&hand, &dealer, out, err),
        Commands::Play {
            rounds,
            seed,
            auto,
            log,
        } => match config::load_with_sources() {
            Ok(resolved) => {
                let opts = PlayOptions::resolve(rounds, seed, auto, log, &resolved.config);
                handle_play_command(&opts, out, err, stdin)
            }
            Err(e) => {
                let msg = format!("Invalid configuration: {}", e);
                if ui::write_error(err, &msg).is_err() {
                    return exit_code::ERROR;
                }
                Err(CliError::Config(msg))
            }
        },
    };

    exit_status(result, err)
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version print to stdout and exit 0
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            let _ = writeln!(err, "{}", e);
            let _ = writeln!(err, "Usage: bjcoach <command> [options]\n");
            let _ = writeln!(err, "Commands:");
            for c in Commands::NAMES {
                let _ = writeln!(err, "  {}", c);
            }
            let _ = writeln!(err, "\nFor full help, run: bjcoach --help");
            exit_code::ERROR
        }
    }
}

/// Maps a handler result to an exit code. Input and configuration errors are
/// reported by the handler that detected them.
fn exit_status(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            let _ = ui::display_warning(err, &format!("Interrupted: {}", msg));
            exit_code::INTERRUPTED
        }
        Err(CliError::InvalidInput(_)) | Err(CliError::Config(_)) => exit_code::ERROR,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
