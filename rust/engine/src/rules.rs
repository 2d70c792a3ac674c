use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::PlayerAction as A;

/// Raises allowed per betting street.
pub const RAISE_CAP: u8 = 3;

/// Completed hands between blind increases.
pub const HANDS_PER_LEVEL: u32 = 10;

/// Inclusive bounds on the raise size (chips on top of the call).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseBounds {
    pub min: u32,
    pub max: u32,
}

impl RaiseBounds {
    pub fn clamp(&self, amount: u32) -> u32 {
        amount.clamp(self.min, self.max)
    }
}

/// The moves open to one seat at one decision point. Folding is always legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMoves {
    pub check: bool,
    /// Chips needed to call, capped at the seat's stack
    pub call: Option<u32>,
    pub raise: Option<RaiseBounds>,
}

impl LegalMoves {
    pub fn can_check(&self) -> bool {
        self.check
    }

    pub fn call_amount(&self) -> Option<u32> {
        self.call
    }

    pub fn raise_bounds(&self) -> Option<RaiseBounds> {
        self.raise
    }

    pub fn allows(&self, action: &A) -> bool {
        match *action {
            A::Fold => true,
            A::Check => self.check,
            A::Call(n) => self.call == Some(n),
            A::Raise(n) => self.raise.is_some_and(|b| (b.min..=b.max).contains(&n)),
        }
    }
}

/// Betting state as seen from the seat about to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BettingSituation {
    pub stack: u32,
    pub to_call: u32,
    /// Smallest full raise: the last raise size this street, at least the big blind
    pub min_raise: u32,
    pub raises_this_street: u8,
    /// Largest raise every other live player could still match
    pub matchable: u32,
}

/// Derives the legal-move set for one decision.
///
/// # Examples
///
/// ```
/// use adaptive_engine::rules::{legal_moves, BettingSituation, RaiseBounds};
///
/// let legal = legal_moves(BettingSituation {
///     stack: 500,
///     to_call: 20,
///     min_raise: 20,
///     raises_this_street: 0,
///     matchable: 300,
/// });
/// assert!(!legal.can_check());
/// assert_eq!(legal.call_amount(), Some(20));
/// assert_eq!(legal.raise_bounds(), Some(RaiseBounds { min: 20, max: 300 }));
/// ```
pub fn legal_moves(s: BettingSituation) -> LegalMoves {
    let check = s.to_call == 0;
    let call = (s.to_call > 0).then(|| s.to_call.min(s.stack));
    let raise = if s.raises_this_street < RAISE_CAP && s.stack > s.to_call {
        let max = (s.stack - s.to_call).min(s.matchable);
        (max > 0).then(|| RaiseBounds {
            min: s.min_raise.clamp(1, max),
            max,
        })
    } else {
        None
    };
    LegalMoves { check, call, raise }
}

/// Checks a submitted action against the legal-move set.
///
/// # Errors
///
/// [`GameError::IllegalAction`] naming the seat when the action is not in the
/// set or its amount is outside the allowed bounds.
///
/// ```
/// use adaptive_engine::player::PlayerAction;
/// use adaptive_engine::rules::{validate_action, LegalMoves, RaiseBounds};
///
/// let legal = LegalMoves { check: false, call: Some(50), raise: Some(RaiseBounds { min: 50, max: 400 }) };
/// assert!(validate_action(2, &legal, PlayerAction::Call(50)).is_ok());
/// assert!(validate_action(2, &legal, PlayerAction::Check).is_err());
/// assert!(validate_action(2, &legal, PlayerAction::Raise(10)).is_err());
/// ```
pub fn validate_action(seat: usize, legal: &LegalMoves, action: A) -> Result<A, GameError> {
    if legal.allows(&action) {
        return Ok(action);
    }
    let reason = match action {
        A::Check => "cannot check while facing a bet".to_string(),
        A::Call(n) => match legal.call {
            Some(owed) => format!("call of {} does not match the {} owed", n, owed),
            None => "nothing to call".to_string(),
        },
        A::Raise(n) => match legal.raise {
            Some(b) => format!("raise of {} outside {}..={}", n, b.min, b.max),
            None => "raising is closed".to_string(),
        },
        A::Fold => return Ok(A::Fold),
    };
    Err(GameError::illegal(seat, reason))
}

/// Small and big blind for the hand after `hands_played` completed hands.
/// The big blind grows by one starting blind every [`HANDS_PER_LEVEL`] hands.
pub fn blinds_for_hand(starting_blind: u32, hands_played: u32) -> (u32, u32) {
    let level = 1 + hands_played / HANDS_PER_LEVEL;
    let bb = starting_blind.saturating_mul(level);
    ((bb / 2).max(1), bb)
}
