//! Command handler modules.
//!
//! Each subcommand lives in its own file and exposes
//! `handle_COMMAND_command(...) -> Result<(), CliError>`, taking its output
//! streams as `&mut dyn Write` parameters.

mod advise;
mod cfg;
mod play;

pub use advise::handle_advise_command;
pub use cfg::handle_cfg_command;
pub use play::{ConsoleSource, PROMPT, PlayOptions, handle_play_command};
