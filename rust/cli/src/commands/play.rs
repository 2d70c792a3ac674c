//! `play`: human seats against adaptive AI seats.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use adaptive_engine::engine::TableSeat;
use adaptive_engine::game::Game;
use adaptive_engine::player::Player;
use tracing::info;

use super::table::{ai_seats, observers, open_history, resolve_seed, settings, validated, write_summary};
use crate::cli::PlayArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::human::{Console, HumanSeat};
use crate::renderer::{Detail, TextRenderer};
use crate::ui;

/// Plays until one player is left, `--hands` is reached, or a human quits.
///
/// Human seats come first and read from `console`; table events are
/// rendered to `out`.
pub fn handle_play_command(
    args: &PlayArgs,
    cfg: Config,
    console: Console,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut cfg = cfg;
    args.table.apply(&mut cfg);
    match args.ai {
        Some(ai) => cfg.ai_players = ai,
        None if args.table.players.is_some() => cfg.ai_players = cfg.players.saturating_sub(1),
        None => {}
    }
    let cfg = validated(cfg)?;
    let seed = resolve_seed(&cfg);
    let humans = cfg.players - cfg.ai_players;
    if humans == 0 {
        ui::display_warning(err, "no human seats, watching the AI players")?;
    }

    writeln!(
        out,
        "play: players={} humans={} seed={} stack={} blind={}",
        cfg.players, humans, seed, cfg.starting_stack, cfg.starting_blind
    )?;
    writeln!(out, "Type fold, check, call, raise <amount>, allin or q to leave.")?;
    info!(players = cfg.players, humans, seed, "starting interactive game");

    let stop = Arc::new(AtomicBool::new(false));
    let mut seats: Vec<TableSeat> = (0..humans)
        .map(|i| {
            let name = if humans == 1 {
                "You".to_string()
            } else {
                format!("Player {}", i + 1)
            };
            let seat = HumanSeat::new(name.clone(), console.clone()).with_stop(Arc::clone(&stop));
            TableSeat::new(Player::new(name, i, cfg.starting_stack), Box::new(seat))
        })
        .collect();
    seats.extend(ai_seats(&cfg, humans, cfg.ai_players)?);

    let mut game = Game::new(seats, settings(&cfg, seed))?.with_stop(Arc::clone(&stop));
    let mut history = open_history(args.table.history.as_deref(), seed)?;
    let summary = {
        let mut renderer = TextRenderer::new(&mut *out, Detail::Full);
        let mut fan = observers(&mut renderer, history.as_mut());
        game.play(&mut fan)?
    };

    if stop.load(Ordering::Relaxed) {
        writeln!(out, "Left the table after {} hands.", summary.hands_played)?;
    }
    write_summary(out, &summary, history.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TableArgs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn args(dir: &TempDir, ai: Option<usize>) -> PlayArgs {
        PlayArgs {
            table: TableArgs {
                players: Some(2),
                seed: Some(5),
                hands: Some(3),
                weights: Some(dir.path().join("w.json")),
                ..TableArgs::default()
            },
            ai,
        }
    }

    #[test]
    fn quitting_ends_after_the_first_hand() {
        let dir = TempDir::new().unwrap();
        let console = Console::new(Cursor::new("q\n"), std::io::sink());
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_play_command(&args(&dir, None), Config::default(), console, &mut out, &mut err).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("play: players=2 humans=1 seed=5"), "{}", text);
        assert!(text.contains("Left the table after 1 hands."), "{}", text);
        assert!(text.contains("You: fold"), "{}", text);
    }

    #[test]
    fn all_ai_table_warns_and_plays_out() {
        let dir = TempDir::new().unwrap();
        let console = Console::new(Cursor::new(""), std::io::sink());
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_play_command(&args(&dir, Some(2)), Config::default(), console, &mut out, &mut err).unwrap();
        assert!(String::from_utf8(err).unwrap().contains("WARNING: no human seats"));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Game over after"), "{}", text);
        assert!(!text.contains("Left the table"));
    }

    #[test]
    fn more_ai_than_seats_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let console = Console::new(Cursor::new(""), std::io::sink());
        let result = handle_play_command(
            &args(&dir, Some(4)),
            Config::default(),
            console,
            &mut Vec::new(),
            &mut Vec::new(),
        );
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
