//! `cfg`: print the resolved configuration with the source of each value.
//!
//! ```json
//! {
//!   "players": {
//!     "value": 4,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "ai_players": {
            "value": config.ai_players,
            "source": sources.ai_players,
        },
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        },
        "starting_blind": {
            "value": config.starting_blind,
            "source": sources.starting_blind,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "weights_path": {
            "value": config.weights_path,
            "source": sources.weights_path,
        },
        "max_hands": {
            "value": config.max_hands,
            "source": sources.max_hands,
        },
        "log_filter": {
            "value": config.log_filter,
            "source": sources.log_filter,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
