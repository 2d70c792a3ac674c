use thiserror::Error;

use crate::cards::Card;

/// Rejected input to the hand evaluator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("cannot evaluate an empty hand")]
    Empty,
    #[error("duplicate card {0} in hand")]
    DuplicateCard(Card),
    #[error("expected at most 7 cards, got {0}")]
    TooManyCards(usize),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Illegal action from seat {seat}: {reason}")]
    IllegalAction { seat: usize, reason: String },
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] EvalError),
    #[error("Insufficient chips: need {needed}, have {stack}")]
    InsufficientChips { needed: u32, stack: u32 },
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("At least two players with chips are required, found {0}")]
    NotEnoughPlayers(usize),
    #[error("Player {0} has no chips")]
    NoChips(String),
    #[error("Blind must be positive")]
    InvalidBlind,
    #[error("Table holds {0} chips, more than a pot can count")]
    TooManyChips(u64),
    #[error("Internal state invariant violated: {0}")]
    StateInvariantViolation(String),
}

impl GameError {
    /// Rejects tables whose combined stacks would not fit in one pot.
    pub fn check_table_chips(total: u64) -> Result<(), GameError> {
        if total > u64::from(u32::MAX) {
            return Err(GameError::TooManyChips(total));
        }
        Ok(())
    }

    pub fn illegal(seat: usize, reason: impl Into<String>) -> Self {
        GameError::IllegalAction {
            seat,
            reason: reason.into(),
        }
    }
}
