//! Seat controller that asks a person at the terminal.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use adaptive_engine::cards::Card;
use adaptive_engine::errors::GameError;
use adaptive_engine::player::PlayerAction;
use adaptive_engine::seat::{HandOutcome, Seat, SeatView};
use tracing::{debug, info};

use crate::formatters::{format_board, format_legal, format_street};
use crate::io_utils::read_stdin_line;
use crate::validation::{ParseResult, parse_player_action};

/// Terminal shared by every human seat at the table.
#[derive(Clone)]
pub struct Console {
    input: Arc<Mutex<Box<dyn BufRead + Send>>>,
    output: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    pub fn new(input: impl BufRead + Send + 'static, output: impl Write + Send + 'static) -> Self {
        Self {
            input: Arc::new(Mutex::new(Box::new(input))),
            output: Arc::new(Mutex::new(Box::new(output))),
        }
    }

    fn read_line(&self) -> Option<String> {
        let mut input = relock(&self.input);
        read_stdin_line(&mut *input)
    }

    fn say(&self, text: &str) {
        let mut out = relock(&self.output);
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            debug!(error = %e, "console write failed");
        }
    }
}

fn relock<T: ?Sized>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A person choosing actions by typing them.
///
/// Quitting (or closing the input) folds the current hand and raises the
/// stop flag so the game ends before the next deal.
pub struct HumanSeat {
    name: String,
    console: Console,
    stop: Option<Arc<AtomicBool>>,
    quit: bool,
}

impl HumanSeat {
    pub fn new(name: impl Into<String>, console: Console) -> Self {
        Self {
            name: name.into(),
            console,
            stop: None,
            quit: false,
        }
    }

    pub fn with_stop(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn has_quit(&self) -> bool {
        self.quit
    }

    fn quit(&mut self) -> PlayerAction {
        info!(player = %self.name, "human player left the table");
        self.quit = true;
        if let Some(stop) = &self.stop {
            stop.store(true, Ordering::Relaxed);
        }
        PlayerAction::Fold
    }
}

impl Seat for HumanSeat {
    fn begin_hand(&mut self, hole: [Card; 2]) {
        if !self.quit {
            self.console
                .say(&format!("{}, your cards: {}\n", self.name, format_board(&hole)));
        }
    }

    fn choose_action(&mut self, view: &SeatView<'_>) -> PlayerAction {
        if self.quit {
            return PlayerAction::Fold;
        }
        self.console.say(&format!(
            "{} | board {} | pot {} | your stack {}\n",
            format_street(view.street),
            format_board(view.board),
            view.pot,
            view.stack
        ));
        loop {
            self.console
                .say(&format!("Options: {} | q\n> ", format_legal(view.legal)));
            let Some(line) = self.console.read_line() else {
                return self.quit();
            };
            match parse_player_action(&line, view.legal) {
                ParseResult::Action(action) => return action,
                ParseResult::Quit => return self.quit(),
                ParseResult::Invalid(msg) => self.console.say(&format!("Error: {}\n", msg)),
            }
        }
    }

    fn action_rejected(&mut self, error: &GameError) {
        self.console.say(&format!("Error: {}\n", error));
    }

    fn end_hand(&mut self, outcome: &HandOutcome) {
        if !outcome.won || self.quit {
            return;
        }
        if outcome.winners.len() > 1 {
            self.console.say(&format!("You split the {} chip pot\n", outcome.pot));
        } else {
            self.console.say(&format!("You win the {} chip pot\n", outcome.pot));
        }
    }

    fn is_automated(&self) -> bool {
        false
    }

    fn kind(&self) -> &str {
        "human"
    }
}
