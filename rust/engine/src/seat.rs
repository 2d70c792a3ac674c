//! The contract between the round engine and whoever controls a seat.
//!
//! The engine owns all round state. A controller only ever sees a borrowed,
//! read-only [`SeatView`] and answers with one [`PlayerAction`]; automated
//! policies and human input adapters implement the same [`Seat`] trait, so
//! seats are interchangeable.

use crate::cards::Card;
use crate::engine::Street;
use crate::errors::GameError;
use crate::player::PlayerAction;
use crate::rules::LegalMoves;

/// What a seat can see about another player still holding cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentView {
    pub seat: usize,
    pub name: String,
    pub stack: u32,
}

/// Read-only snapshot handed to a seat when it is asked to act.
#[derive(Debug, Clone, Copy)]
pub struct SeatView<'a> {
    pub seat: usize,
    pub hand_number: u32,
    pub hole: [Card; 2],
    pub board: &'a [Card],
    pub street: Street,
    pub pot: u32,
    /// Own stack, excluding chips already committed this hand
    pub stack: u32,
    pub big_blind: u32,
    pub raises_this_street: u8,
    pub legal: &'a LegalMoves,
    /// Opponents that have not folded this hand
    pub opponents: &'a [OpponentView],
}

impl SeatView<'_> {
    /// Largest stack among the opponents still in the hand.
    pub fn highest_opponent_stack(&self) -> u32 {
        self.opponents.iter().map(|o| o.stack).max().unwrap_or(0)
    }
}

/// How a finished hand went, from one seat's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandOutcome {
    pub hand_number: u32,
    /// Whether this seat won or shared the pot
    pub won: bool,
    pub winners: Vec<String>,
    pub pot: u32,
    pub showdown: bool,
}

/// A seat controller.
///
/// # Example Implementation
///
/// ```rust
/// use adaptive_engine::player::PlayerAction;
/// use adaptive_engine::seat::{Seat, SeatView};
///
/// struct CheckOrFold;
///
/// impl Seat for CheckOrFold {
///     fn choose_action(&mut self, view: &SeatView<'_>) -> PlayerAction {
///         if view.legal.can_check() {
///             PlayerAction::Check
///         } else {
///             PlayerAction::Fold
///         }
///     }
///
///     fn kind(&self) -> &str {
///         "check-or-fold"
///     }
/// }
/// ```
pub trait Seat: Send {
    /// Called once per hand after the hole cards are dealt.
    fn begin_hand(&mut self, _hole: [Card; 2]) {}

    /// Picks one action for the current decision point.
    fn choose_action(&mut self, view: &SeatView<'_>) -> PlayerAction;

    /// The engine refused the last action; a re-prompt follows for seats that
    /// are not automated.
    fn action_rejected(&mut self, _error: &GameError) {}

    /// Called once per hand after the pot has been awarded.
    fn end_hand(&mut self, _outcome: &HandOutcome) {}

    /// Automated seats are folded on an illegal action instead of re-prompted.
    fn is_automated(&self) -> bool {
        true
    }

    /// Short identifier of the controller type.
    fn kind(&self) -> &str;
}
