//! Configuration command handler.
//!
//! Prints each resolved setting with the layer it came from:
//!
//! ```json
//! {
//!   "rounds": {
//!     "value": 1,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config::{self, ConfigResolved};
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command using the process environment.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };
    write_resolved(&resolved, out)
}

fn write_resolved(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "rounds": {
            "value": config.rounds,
            "source": sources.rounds,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "log": {
            "value": config.log,
            "source": sources.log,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
