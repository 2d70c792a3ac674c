//! Command-line definitions.
//!
//! Flags given here override the resolved configuration for one run.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "adaptive-holdem",
    version,
    about = "Texas Hold'em against opponents that learn between hands"
)]
pub struct AdaptiveCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Let AI players play each other until one is left
    Sim(SimArgs),
    /// Sit down at a table with AI opponents
    Play(PlayArgs),
    /// Show or reset the learned weights file
    Weights {
        /// Weights file (defaults to the configured one)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite the file with the default weights
        #[arg(long)]
        reset: bool,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

/// Table options shared by `sim` and `play`.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Seats at the table
    #[arg(long)]
    pub players: Option<usize>,
    /// Deck seed; random when neither given nor configured
    #[arg(long)]
    pub seed: Option<u64>,
    /// Stop after this many hands
    #[arg(long)]
    pub hands: Option<u32>,
    /// Starting stack per player
    #[arg(long)]
    pub stack: Option<u32>,
    /// Big blind of the first level
    #[arg(long)]
    pub blind: Option<u32>,
    /// Learned weights file shared by the AI players
    #[arg(long)]
    pub weights: Option<PathBuf>,
    /// Append a JSON line per finished hand to this file
    #[arg(long)]
    pub history: Option<PathBuf>,
}

impl TableArgs {
    /// Copies every flag that was given over the configured value.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(v) = self.players {
            cfg.players = v;
        }
        if let Some(v) = self.seed {
            cfg.seed = Some(v);
        }
        if let Some(v) = self.hands {
            cfg.max_hands = Some(v);
        }
        if let Some(v) = self.stack {
            cfg.starting_stack = v;
        }
        if let Some(v) = self.blind {
            cfg.starting_blind = v;
        }
        if let Some(v) = &self.weights {
            cfg.weights_path = v.clone();
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SimArgs {
    #[command(flatten)]
    pub table: TableArgs,
    /// Print every blind, card and action instead of one line per hand
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub table: TableArgs,
    /// AI seats; the remaining seats are played from the terminal
    #[arg(long)]
    pub ai: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definitions_are_consistent() {
        AdaptiveCli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = AdaptiveCli::try_parse_from([
            "adaptive-holdem",
            "play",
            "--players",
            "3",
            "--ai",
            "2",
            "--seed",
            "9",
        ])
        .unwrap();
        let Commands::Play(args) = cli.cmd else {
            panic!("expected play");
        };
        let mut cfg = Config::default();
        args.table.apply(&mut cfg);
        assert_eq!(cfg.players, 3);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(args.ai, Some(2));
        assert_eq!(cfg.starting_blind, Config::default().starting_blind);
    }
}
