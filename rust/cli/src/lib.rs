//! # Adaptive Hold'em CLI Library
//!
//! Command-line front end for the `adaptive-engine` table and the
//! `adaptive-ai` learning opponents.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, resolves the configuration and dispatches to
//! a subcommand, returning the process exit code.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["adaptive-holdem", "sim", "--hands", "50", "--seed", "7"];
//! let code = adaptive_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: AI players play each other and keep learning
//! - `play`: play from the terminal against AI players
//! - `weights`: show or reset the learned weights file
//! - `cfg`: show the resolved configuration

use clap::Parser;
use std::io::{BufReader, Write};

pub mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod formatters;
pub mod human;
pub mod io_utils;
pub mod logging;
pub mod renderer;
pub mod ui;
pub mod validation;

use cli::{AdaptiveCli, Commands};
use commands::{handle_cfg_command, handle_play_command, handle_sim_command, handle_weights_command};
use human::Console;

pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "play", "weights", "cfg"];

/// Main entry point for the CLI application.
///
/// Returns `0` on success and `2` for usage, configuration, engine or I/O
/// errors. `play` reads the human players' input from the process stdin.
///
/// ```
/// use std::io;
/// let mut out = Vec::new();
/// let code = adaptive_cli::run(["adaptive-holdem", "--help"], &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("sim"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match AdaptiveCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    // cfg reports configuration problems itself
    if let Commands::Cfg = cli.cmd {
        return finish(handle_cfg_command(out, err), err);
    }

    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => return finish(Err(e.into()), err),
    };
    logging::init(&cfg.log_filter);

    let result = match cli.cmd {
        Commands::Sim(args) => handle_sim_command(&args, cfg, out),
        Commands::Play(args) => {
            let console = Console::new(BufReader::new(std::io::stdin()), std::io::stdout());
            handle_play_command(&args, cfg, console, out, err)
        }
        Commands::Weights { path, reset } => {
            let path = path.unwrap_or_else(|| cfg.weights_path.clone());
            handle_weights_command(&path, reset, out)
        }
        Commands::Cfg => handle_cfg_command(out, err),
    };
    finish(result, err)
}

fn finish(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = writeln!(err, "{}", e)
        .and_then(|_| writeln!(err, "Usage: adaptive-holdem <command> [options]\n"))
        .and_then(|_| writeln!(err, "Commands: {}", COMMANDS.join(", ")))
        .and_then(|_| writeln!(err, "\nFor full help, run: adaptive-holdem --help"));
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_lists_the_real_ones() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["adaptive-holdem", "deal"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        let text = String::from_utf8(err).unwrap();
        assert!(text.contains("Commands: sim, play, weights, cfg"), "{}", text);
        assert!(out.is_empty());
    }

    #[test]
    fn version_goes_to_stdout() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        assert_eq!(run(["adaptive-holdem", "--version"], &mut out, &mut err), 0);
        assert!(String::from_utf8(out).unwrap().contains("adaptive-holdem"));
    }
}
