use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::info;

use crate::deck::Deck;
use crate::engine::{big_blind_seat, play_hand, HandResult, HandSetup, TableSeat};
use crate::errors::GameError;
use crate::events::{ChannelObserver, PlayerSnapshot, TableEvent, TableObserver};
use crate::player::Player;
use crate::rules::blinds_for_hand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    /// Big blind of the first level
    pub starting_blind: u32,
    pub seed: u64,
    /// Stop after this many hands even if several players still hold chips
    pub max_hands: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    /// Last player standing, or the chip leader when `max_hands` cut the game short
    pub winner: String,
    pub hands_played: u32,
    /// Names in the order they ran out of chips
    pub eliminated: Vec<String>,
    pub final_stacks: Vec<(String, u32)>,
    /// False when the game stopped at `max_hands` or was stopped early
    pub completed: bool,
}

/// Runs hands until one player holds all the chips.
///
/// Owns the table and the deck. Between hands it drops busted players,
/// moves the dealer button to the next surviving seat and raises the blinds
/// every [`crate::rules::HANDS_PER_LEVEL`] hands.
#[derive(Debug)]
pub struct Game {
    table: Vec<TableSeat>,
    deck: Deck,
    settings: GameSettings,
    /// Table index of the dealer button
    dealer: usize,
    hands_played: u32,
    eliminated: Vec<String>,
    stop: Arc<AtomicBool>,
}

impl Game {
    pub fn new(table: Vec<TableSeat>, settings: GameSettings) -> Result<Self, GameError> {
        if table.len() < 2 {
            return Err(GameError::NotEnoughPlayers(table.len()));
        }
        if let Some(s) = table.iter().find(|s| s.player.is_busted()) {
            return Err(GameError::NoChips(s.player.name().to_string()));
        }
        if settings.starting_blind == 0 {
            return Err(GameError::InvalidBlind);
        }
        GameError::check_table_chips(table.iter().map(|s| u64::from(s.player.stack())).sum())?;
        Ok(Self {
            table,
            deck: Deck::new_with_seed(settings.seed),
            settings,
            dealer: 0,
            hands_played: 0,
            eliminated: Vec::new(),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Replaces the seeded deck, for replaying fixed deals.
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.table.iter().map(|s| &s.player)
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    pub fn total_chips(&self) -> u64 {
        self.players().map(|p| u64::from(p.stack())).sum()
    }

    /// Shares an externally owned stop flag, e.g. with a seat that can quit.
    pub fn with_stop(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    /// Flag that ends the game after the hand in progress once set.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn is_over(&self) -> bool {
        self.table.len() < 2
            || self.stop.load(Ordering::Relaxed)
            || self
                .settings
                .max_hands
                .is_some_and(|max| self.hands_played >= max)
    }

    /// Plays a single hand, then removes busted players and moves the button.
    pub fn play_next_hand(&mut self, observer: &mut dyn TableObserver) -> Result<HandResult, GameError> {
        let (_, big_blind) = blinds_for_hand(self.settings.starting_blind, self.hands_played);
        let setup = HandSetup {
            hand_number: self.hands_played + 1,
            blind: big_blind,
            big_blind_index: big_blind_seat(self.dealer, self.table.len()),
        };
        let result = play_hand(&mut self.table, &mut self.deck, setup, observer)?;
        self.hands_played += 1;
        self.remove_busted_and_rotate(observer);
        Ok(result)
    }

    /// Plays until one player remains or `max_hands` is reached.
    pub fn play(&mut self, observer: &mut dyn TableObserver) -> Result<GameSummary, GameError> {
        while !self.is_over() {
            self.play_next_hand(observer)?;
        }

        let leader = self
            .table
            .iter()
            .max_by(|a, b| a.player.stack().cmp(&b.player.stack()).then(b.player.seat().cmp(&a.player.seat())))
            .map(|s| &s.player)
            .ok_or(GameError::NotEnoughPlayers(0))?;
        let summary = GameSummary {
            winner: leader.name().to_string(),
            hands_played: self.hands_played,
            eliminated: self.eliminated.clone(),
            final_stacks: self
                .players()
                .map(|p| (p.name().to_string(), p.stack()))
                .collect(),
            completed: self.table.len() == 1,
        };
        info!(winner = %summary.winner, hands = summary.hands_played, "game finished");
        observer.on_event(&TableEvent::GameFinished {
            winner: PlayerSnapshot {
                seat: leader.seat(),
                name: leader.name().to_string(),
                stack: leader.stack(),
            },
            hands_played: self.hands_played,
        });
        Ok(summary)
    }

    fn remove_busted_and_rotate(&mut self, observer: &mut dyn TableObserver) {
        let n = self.table.len();
        let next_dealer = (1..=n)
            .map(|k| (self.dealer + k) % n)
            .find(|&i| !self.table[i].player.is_busted())
            .map(|i| self.table[i].player.seat());

        for p in self.players().filter(|p| p.is_busted()) {
            info!(player = p.name(), hand = self.hands_played, "player eliminated");
            observer.on_event(&TableEvent::PlayerEliminated {
                hand: self.hands_played,
                seat: p.seat(),
                name: p.name().to_string(),
            });
        }
        let busted: Vec<String> = self
            .players()
            .filter(|p| p.is_busted())
            .map(|p| p.name().to_string())
            .collect();
        self.eliminated.extend(busted);
        self.table.retain(|s| !s.player.is_busted());

        self.dealer = next_dealer
            .and_then(|seat| self.table.iter().position(|s| s.player.seat() == seat))
            .unwrap_or(0);
    }
}

/// Runs `game` on a worker thread that owns all round state. Progress is
/// only visible through the events sent to `events`.
pub fn spawn_game(mut game: Game, events: Sender<TableEvent>) -> JoinHandle<Result<GameSummary, GameError>> {
    thread::spawn(move || {
        let mut observer = ChannelObserver::new(events);
        game.play(&mut observer)
    })
}
