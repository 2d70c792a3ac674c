//! One-way notifications from the game to display or logging collaborators.
//!
//! Every event is an owned snapshot, so observers can keep or forward them
//! without borrowing engine state.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::engine::Street;
use crate::hand::HandStrength;
use crate::player::PlayerAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub seat: usize,
    pub name: String,
    pub stack: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShownHand {
    pub seat: usize,
    pub name: String,
    pub hole: [Card; 2],
    pub strength: HandStrength,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    HandStarted {
        hand: u32,
        dealer: usize,
        small_blind: u32,
        big_blind: u32,
        players: Vec<PlayerSnapshot>,
    },
    BlindPosted {
        hand: u32,
        seat: usize,
        amount: u32,
    },
    StreetDealt {
        hand: u32,
        street: Street,
        board: Vec<Card>,
    },
    ActionTaken {
        hand: u32,
        seat: usize,
        street: Street,
        action: PlayerAction,
        pot: u32,
    },
    ActionRejected {
        hand: u32,
        seat: usize,
        reason: String,
    },
    Showdown {
        hand: u32,
        hands: Vec<ShownHand>,
    },
    HandFinished {
        hand: u32,
        winners: Vec<usize>,
        pot: u32,
        showdown: bool,
        board: Vec<Card>,
        players: Vec<PlayerSnapshot>,
    },
    PlayerEliminated {
        hand: u32,
        seat: usize,
        name: String,
    },
    GameFinished {
        winner: PlayerSnapshot,
        hands_played: u32,
    },
}

/// Receives table events. Observers never feed anything back into the game.
pub trait TableObserver {
    fn on_event(&mut self, event: &TableEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl TableObserver for NullObserver {
    fn on_event(&mut self, _event: &TableEvent) {}
}

/// Collects events in memory.
impl TableObserver for Vec<TableEvent> {
    fn on_event(&mut self, event: &TableEvent) {
        self.push(event.clone());
    }
}

/// Forwards events over a channel to another thread.
///
/// A dropped receiver is not an error for the game: the events are discarded
/// and the game keeps running.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<TableEvent>,
    disconnected: bool,
}

impl ChannelObserver {
    pub fn new(sender: Sender<TableEvent>) -> Self {
        Self {
            sender,
            disconnected: false,
        }
    }
}

impl TableObserver for ChannelObserver {
    fn on_event(&mut self, event: &TableEvent) {
        if self.disconnected {
            return;
        }
        if self.sender.send(event.clone()).is_err() {
            tracing::debug!("event receiver dropped, discarding further events");
            self.disconnected = true;
        }
    }
}

impl<T: TableObserver + ?Sized> TableObserver for &mut T {
    fn on_event(&mut self, event: &TableEvent) {
        (**self).on_event(event);
    }
}

/// Sends each event to several observers in order.
#[derive(Default)]
pub struct Fanout<'a> {
    observers: Vec<Box<dyn TableObserver + 'a>>,
}

impl<'a> Fanout<'a> {
    pub fn new() -> Self {
        Self { observers: Vec::new() }
    }

    pub fn with(mut self, observer: impl TableObserver + 'a) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl TableObserver for Fanout<'_> {
    fn on_event(&mut self, event: &TableEvent) {
        for o in &mut self.observers {
            o.on_event(event);
        }
    }
}
