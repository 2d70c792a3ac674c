//! Plain-text rendering of table events.

use std::collections::BTreeMap;
use std::io::Write;

use adaptive_engine::events::{TableEvent, TableObserver};
use tracing::warn;

use crate::formatters::{format_action, format_board, format_street};

/// How much of each hand to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    /// One line per finished hand plus eliminations
    Results,
    /// Every blind, card and action
    Full,
}

/// Writes table events as text lines. Write failures are logged once and
/// further output is dropped; the game itself is never affected.
pub struct TextRenderer<'a> {
    out: &'a mut dyn Write,
    detail: Detail,
    names: BTreeMap<usize, String>,
    failed: bool,
}

impl<'a> TextRenderer<'a> {
    pub fn new(out: &'a mut dyn Write, detail: Detail) -> Self {
        Self {
            out,
            detail,
            names: BTreeMap::new(),
            failed: false,
        }
    }

    fn name(&self, seat: usize) -> String {
        self.names
            .get(&seat)
            .cloned()
            .unwrap_or_else(|| format!("seat {}", seat))
    }

    fn line(&mut self, text: String) {
        if self.failed {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!(error = %e, "cannot write table output");
            self.failed = true;
        }
    }

    fn render(&self, event: &TableEvent) -> Option<String> {
        let full = self.detail == Detail::Full;
        match event {
            TableEvent::HandStarted {
                hand,
                dealer,
                small_blind,
                big_blind,
                players,
            } if full => {
                let stacks: Vec<String> = players
                    .iter()
                    .map(|p| format!("{} {}", p.name, p.stack))
                    .collect();
                Some(format!(
                    "== Hand {} == dealer {} | blinds {}/{} | {}",
                    hand,
                    self.name(*dealer),
                    small_blind,
                    big_blind,
                    stacks.join(", ")
                ))
            }
            TableEvent::BlindPosted { seat, amount, .. } if full => {
                Some(format!("{} posts {}", self.name(*seat), amount))
            }
            TableEvent::StreetDealt { street, board, .. } if full => {
                Some(format!("-- {} {}", format_street(*street), format_board(board)))
            }
            TableEvent::ActionTaken {
                seat, action, pot, ..
            } if full => Some(format!(
                "{}: {} (pot {})",
                self.name(*seat),
                format_action(action),
                pot
            )),
            TableEvent::ActionRejected { seat, reason, .. } if full => {
                Some(format!("{}: rejected, {}", self.name(*seat), reason))
            }
            TableEvent::Showdown { hands, .. } if full => {
                let shown: Vec<String> = hands
                    .iter()
                    .map(|h| {
                        format!(
                            "{} shows {} ({})",
                            h.name,
                            format_board(&h.hole),
                            h.strength.category
                        )
                    })
                    .collect();
                Some(shown.join("\n"))
            }
            TableEvent::HandFinished {
                hand,
                winners,
                pot,
                board,
                ..
            } => {
                let names: Vec<String> = winners.iter().map(|&s| self.name(s)).collect();
                let verb = if names.len() > 1 { "split" } else { "wins" };
                Some(format!(
                    "Hand {}: {} {} {} {}",
                    hand,
                    names.join(" and "),
                    verb,
                    pot,
                    format_board(board)
                ))
            }
            TableEvent::PlayerEliminated { hand, name, .. } => {
                Some(format!("{} is out after hand {}", name, hand))
            }
            TableEvent::GameFinished {
                winner,
                hands_played,
            } => Some(format!(
                "Game over after {} hands: {} leads with {}",
                hands_played, winner.name, winner.stack
            )),
            _ => None,
        }
    }
}

impl TableObserver for TextRenderer<'_> {
    fn on_event(&mut self, event: &TableEvent) {
        if let TableEvent::HandStarted { players, .. } = event {
            self.names = players.iter().map(|p| (p.seat, p.name.clone())).collect();
        }
        if let Some(text) = self.render(event) {
            self.line(text);
        }
    }
}
