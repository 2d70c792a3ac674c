use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// A move a seat submits when it is its turn to act.
///
/// `Call` carries the chips put in to match the bet; `Raise` carries the raise
/// size on top of the call, so a raise costs `to_call + amount` chips.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    Fold,
    Check,
    Call(u32),
    Raise(u32),
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Fold => write!(f, "fold"),
            PlayerAction::Check => write!(f, "check"),
            PlayerAction::Call(n) => write!(f, "call {}", n),
            PlayerAction::Raise(n) => write!(f, "raise {}", n),
        }
    }
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 1_000;

/// A player at the table: identity, chips, and the two hole cards while dealt in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    /// Fixed seat number assigned when the table is built
    seat: usize,
    stack: u32,
    hole: Option<[Card; 2]>,
}

impl Player {
    pub fn new(name: impl Into<String>, seat: usize, stack: u32) -> Self {
        Self {
            name: name.into(),
            seat,
            stack,
            hole: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn seat(&self) -> usize {
        self.seat
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn is_busted(&self) -> bool {
        self.stack == 0
    }

    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }

    pub fn deal(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
    }

    pub fn clear_cards(&mut self) {
        self.hole = None;
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Moves `amount` chips out of the stack.
    pub fn bet(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.stack {
            return Err(GameError::InsufficientChips {
                needed: amount,
                stack: self.stack,
            });
        }
        self.stack -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn betting_reduces_stack_and_cannot_overbet() {
        let mut p = Player::new("ann", 0, STARTING_STACK);
        p.bet(250).unwrap();
        assert_eq!(p.stack(), 750);
        assert_eq!(
            p.bet(1_000),
            Err(GameError::InsufficientChips {
                needed: 1_000,
                stack: 750
            })
        );
        p.bet(750).unwrap();
        assert!(p.is_busted());
    }

    #[test]
    fn hole_cards_are_dealt_and_cleared() {
        let mut p = Player::new("bob", 1, 10);
        let hole = [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Spades),
        ];
        p.deal(hole);
        assert_eq!(p.hole_cards(), Some(hole));
        p.clear_cards();
        assert_eq!(p.hole_cards(), None);
    }

    #[test]
    fn actions_display_amounts() {
        assert_eq!(PlayerAction::Raise(40).to_string(), "raise 40");
        assert_eq!(PlayerAction::Check.to_string(), "check");
    }
}
