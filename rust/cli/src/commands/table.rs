//! Building the table shared by `sim` and `play`.

use std::io::Write;
use std::path::Path;

use adaptive_ai::{FileStore, create_ai};
use adaptive_engine::engine::TableSeat;
use adaptive_engine::events::{Fanout, TableObserver};
use adaptive_engine::game::{GameSettings, GameSummary};
use adaptive_engine::logger::HandHistoryWriter;
use adaptive_engine::player::Player;
use tracing::info;

use crate::config::{self, Config};
use crate::error::CliError;

/// Configured seed, or a fresh random one that is reported to the user so
/// the game can be replayed.
pub(crate) fn resolve_seed(cfg: &Config) -> u64 {
    cfg.seed.unwrap_or_else(rand::random)
}

pub(crate) fn settings(cfg: &Config, seed: u64) -> GameSettings {
    GameSettings {
        starting_blind: cfg.starting_blind,
        seed,
        max_hands: cfg.max_hands,
    }
}

/// Re-checks a configuration after command-line flags were applied.
pub(crate) fn validated(cfg: Config) -> Result<Config, CliError> {
    config::validate(&cfg)?;
    Ok(cfg)
}

/// `count` adaptive AI seats numbered from `first_seat`, all learning from
/// the configured weights file.
pub(crate) fn ai_seats(cfg: &Config, first_seat: usize, count: usize) -> Result<Vec<TableSeat>, CliError> {
    (0..count)
        .map(|i| {
            let name = format!("Robot {}", i + 1);
            let store = Box::new(FileStore::new(&cfg.weights_path));
            let controller = create_ai("adaptive", &name, store)?;
            Ok(TableSeat::new(
                Player::new(name, first_seat + i, cfg.starting_stack),
                controller,
            ))
        })
        .collect()
}

pub(crate) fn open_history(path: Option<&Path>, seed: u64) -> Result<Option<HandHistoryWriter>, CliError> {
    path.map(|p| {
        info!(path = %p.display(), "writing hand history");
        HandHistoryWriter::create(p, Some(seed)).map_err(CliError::from)
    })
    .transpose()
}

/// Combines the renderer with the optional history writer.
pub(crate) fn observers<'a>(
    display: &'a mut dyn TableObserver,
    history: Option<&'a mut HandHistoryWriter>,
) -> Fanout<'a> {
    let fan = Fanout::new().with(display);
    match history {
        Some(h) => fan.with(h),
        None => fan,
    }
}

pub(crate) fn write_summary(
    out: &mut dyn Write,
    summary: &GameSummary,
    history: Option<&HandHistoryWriter>,
) -> Result<(), CliError> {
    let ending = if summary.completed {
        "last player standing"
    } else {
        "chip leader"
    };
    writeln!(
        out,
        "Winner: {} ({}) after {} hands",
        summary.winner, ending, summary.hands_played
    )?;
    for (name, stack) in &summary.final_stacks {
        writeln!(out, "  {:<10} {}", name, stack)?;
    }
    if !summary.eliminated.is_empty() {
        writeln!(out, "Eliminated: {}", summary.eliminated.join(", "))?;
    }
    if let Some(h) = history {
        writeln!(out, "History: {} hands written", h.hands_written())?;
    }
    Ok(())
}
