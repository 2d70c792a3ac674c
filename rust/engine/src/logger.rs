//! JSONL hand history.
//!
//! [`HandHistoryWriter`] is a [`TableObserver`] that gathers the events of
//! each hand and appends one [`HandRecord`] line when the hand finishes.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::engine::Street;
use crate::events::{PlayerSnapshot, ShownHand, TableEvent, TableObserver};
use crate::player::PlayerAction;

/// A single action as it appears in the history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    pub street: Street,
    pub action: PlayerAction,
}

/// One finished hand, serialized as a single JSON line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// `YYYYMMDD-NNNNNN`
    pub hand_id: String,
    pub hand: u32,
    pub seed: Option<u64>,
    pub blinds: (u32, u32),
    pub dealer: usize,
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    pub pot: u32,
    pub winners: Vec<usize>,
    #[serde(default)]
    pub showdown: Option<Vec<ShownHand>>,
    /// Stacks after the pot was awarded
    pub stacks: Vec<PlayerSnapshot>,
    /// RFC3339
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

#[derive(Debug, Default)]
struct PendingHand {
    hand: u32,
    blinds: (u32, u32),
    dealer: usize,
    actions: Vec<ActionRecord>,
    showdown: Option<Vec<ShownHand>>,
}

pub struct HandHistoryWriter {
    writer: Box<dyn Write + Send>,
    seed: Option<u64>,
    date: String,
    seq: u32,
    pending: Option<PendingHand>,
    failed: bool,
}

impl std::fmt::Debug for HandHistoryWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandHistoryWriter")
            .field("date", &self.date)
            .field("seq", &self.seq)
            .finish()
    }
}

impl HandHistoryWriter {
    /// Appends to the file at `path`, creating it and its parent directory.
    pub fn create<P: AsRef<Path>>(path: P, seed: Option<u64>) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f: File = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_writer(BufWriter::new(f), seed))
    }

    pub fn from_writer(writer: impl Write + Send + 'static, seed: Option<u64>) -> Self {
        Self {
            writer: Box::new(writer),
            seed,
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
            pending: None,
            failed: false,
        }
    }

    /// Fixes the date part of generated hand ids.
    pub fn with_date(mut self, yyyymmdd: &str) -> Self {
        self.date = yyyymmdd.to_string();
        self
    }

    pub fn hands_written(&self) -> u32 {
        self.seq
    }

    fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        let line = serde_json::to_string(record).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl TableObserver for HandHistoryWriter {
    fn on_event(&mut self, event: &TableEvent) {
        match event {
            TableEvent::HandStarted {
                hand,
                dealer,
                small_blind,
                big_blind,
                ..
            } => {
                self.pending = Some(PendingHand {
                    hand: *hand,
                    blinds: (*small_blind, *big_blind),
                    dealer: *dealer,
                    ..PendingHand::default()
                });
            }
            TableEvent::ActionTaken {
                seat, street, action, ..
            } => {
                if let Some(p) = &mut self.pending {
                    p.actions.push(ActionRecord {
                        seat: *seat,
                        street: *street,
                        action: *action,
                    });
                }
            }
            TableEvent::Showdown { hands, .. } => {
                if let Some(p) = &mut self.pending {
                    p.showdown = Some(hands.clone());
                }
            }
            TableEvent::HandFinished {
                winners,
                pot,
                board,
                players,
                ..
            } => {
                let Some(p) = self.pending.take() else {
                    return;
                };
                if self.failed {
                    return;
                }
                let record = HandRecord {
                    hand_id: self.next_id(),
                    hand: p.hand,
                    seed: self.seed,
                    blinds: p.blinds,
                    dealer: p.dealer,
                    actions: p.actions,
                    board: board.clone(),
                    pot: *pot,
                    winners: winners.clone(),
                    showdown: p.showdown,
                    stacks: players.clone(),
                    ts: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                };
                if let Err(e) = self.write(&record) {
                    tracing::warn!(error = %e, "hand history write failed, disabling history");
                    self.failed = true;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn snapshot(seat: usize, stack: u32) -> PlayerSnapshot {
        PlayerSnapshot {
            seat,
            name: format!("p{}", seat),
            stack,
        }
    }

    #[test]
    fn hand_id_is_zero_padded() {
        assert_eq!(format_hand_id("20250102", 7), "20250102-000007");
    }

    #[test]
    fn writes_one_line_per_finished_hand() {
        let buf = Shared::default();
        let mut w = HandHistoryWriter::from_writer(buf.clone(), Some(9)).with_date("20250102");
        w.on_event(&TableEvent::HandStarted {
            hand: 1,
            dealer: 0,
            small_blind: 5,
            big_blind: 10,
            players: vec![snapshot(0, 100), snapshot(1, 100)],
        });
        w.on_event(&TableEvent::ActionTaken {
            hand: 1,
            seat: 0,
            street: Street::Preflop,
            action: PlayerAction::Fold,
            pot: 15,
        });
        w.on_event(&TableEvent::HandFinished {
            hand: 1,
            winners: vec![1],
            pot: 15,
            showdown: false,
            board: vec![Card::new(Rank::Ace, Suit::Spades)],
            players: vec![snapshot(0, 95), snapshot(1, 105)],
        });

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        let rec: HandRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(rec.hand_id, "20250102-000001");
        assert_eq!(rec.seed, Some(9));
        assert_eq!(rec.blinds, (5, 10));
        assert_eq!(rec.actions.len(), 1);
        assert_eq!(rec.winners, vec![1]);
        assert!(rec.showdown.is_none());
        assert!(rec.ts.is_some());
        assert_eq!(w.hands_written(), 1);
    }
}
