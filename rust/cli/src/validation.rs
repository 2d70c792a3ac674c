//! Parsing of typed player input.
//!
//! Input is turned into a [`PlayerAction`] against the seat's current
//! [`LegalMoves`], so `call` and `allin` pick up the right amounts. Whether
//! the resulting action is actually allowed is left to the engine, which
//! rejects it and asks again.

use adaptive_engine::player::PlayerAction;
use adaptive_engine::rules::LegalMoves;

/// Result type for parsing user input into player actions.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from input
    Action(PlayerAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input string into a PlayerAction or special commands.
///
/// Accepts the following input formats (case-insensitive):
/// - "f" or "fold" → Fold
/// - "k" or "check" → Check
/// - "c" or "call" → Call for the amount owed, or Check when nothing is owed
/// - "r X" or "raise X" → Raise by X on top of the call
/// - "allin" or "all-in" → the largest raise allowed, or a call when raising is closed
/// - "q" or "quit" → Quit command
///
/// # Example
///
/// ```rust
/// # use adaptive_cli::validation::{parse_player_action, ParseResult};
/// use adaptive_engine::player::PlayerAction;
/// use adaptive_engine::rules::LegalMoves;
///
/// let legal = LegalMoves { check: false, call: Some(20), raise: None };
/// assert_eq!(
///     parse_player_action("call", &legal),
///     ParseResult::Action(PlayerAction::Call(20))
/// );
/// assert_eq!(parse_player_action("q", &legal), ParseResult::Quit);
///
/// match parse_player_action("invalid", &legal) {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_action(input: &str, legal: &LegalMoves) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&command) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match command {
        "q" | "quit" => ParseResult::Quit,
        "fold" | "f" => ParseResult::Action(PlayerAction::Fold),
        "check" | "k" => ParseResult::Action(PlayerAction::Check),
        "call" | "c" => match legal.call_amount() {
            Some(n) => ParseResult::Action(PlayerAction::Call(n)),
            None if legal.can_check() => ParseResult::Action(PlayerAction::Check),
            None => ParseResult::Invalid("Nothing to call".to_string()),
        },
        "allin" | "all-in" => match (legal.raise_bounds(), legal.call_amount()) {
            (Some(b), _) => ParseResult::Action(PlayerAction::Raise(b.max)),
            (None, Some(n)) => ParseResult::Action(PlayerAction::Call(n)),
            (None, None) => ParseResult::Invalid("Cannot put more chips in".to_string()),
        },
        "raise" | "r" => {
            let Some(amount) = parts.get(1) else {
                return ParseResult::Invalid(
                    "Raise requires an amount (e.g., 'raise 50')".to_string(),
                );
            };
            match amount.parse::<u32>() {
                Ok(amount) if amount > 0 => ParseResult::Action(PlayerAction::Raise(amount)),
                Ok(_) => ParseResult::Invalid("Raise amount must be positive".to_string()),
                Err(_) => ParseResult::Invalid("Invalid raise amount".to_string()),
            }
        }
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, raise <amount>, allin, q",
            other
        )),
    }
}
