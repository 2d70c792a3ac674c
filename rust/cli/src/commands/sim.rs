//! `sim`: AI-only games.
//!
//! The game runs on its own thread via [`spawn_game`]; this side only reads
//! the event stream to render it and record history.

use std::io::Write;
use std::sync::mpsc;

use adaptive_engine::errors::GameError;
use adaptive_engine::events::TableObserver;
use adaptive_engine::game::{Game, spawn_game};
use tracing::info;

use super::table::{ai_seats, observers, open_history, resolve_seed, settings, validated, write_summary};
use crate::cli::SimArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::renderer::{Detail, TextRenderer};

pub fn handle_sim_command(args: &SimArgs, cfg: Config, out: &mut dyn Write) -> Result<(), CliError> {
    let mut cfg = cfg;
    args.table.apply(&mut cfg);
    cfg.ai_players = cfg.players;
    let cfg = validated(cfg)?;
    let seed = resolve_seed(&cfg);

    writeln!(
        out,
        "sim: players={} seed={} stack={} blind={} weights={}",
        cfg.players,
        seed,
        cfg.starting_stack,
        cfg.starting_blind,
        cfg.weights_path.display()
    )?;
    info!(players = cfg.players, seed, "starting simulation");

    let game = Game::new(ai_seats(&cfg, 0, cfg.players)?, settings(&cfg, seed))?;
    let mut history = open_history(args.table.history.as_deref(), seed)?;
    let detail = if args.verbose { Detail::Full } else { Detail::Results };

    let (tx, rx) = mpsc::channel();
    let worker = spawn_game(game, tx);
    {
        let mut renderer = TextRenderer::new(&mut *out, detail);
        let mut fan = observers(&mut renderer, history.as_mut());
        for event in rx {
            fan.on_event(&event);
        }
    }
    let summary = worker
        .join()
        .map_err(|_| GameError::StateInvariantViolation("game thread panicked".into()))??;

    write_summary(out, &summary, history.as_ref())
}
