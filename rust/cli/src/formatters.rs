//! Card, board, and action formatters for terminal display.
//!
//! Pure functions over engine types. Suits use Unicode symbols with an ASCII
//! fallback for Windows consoles that cannot render them.
//!
//! ## Example
//!
//! ```rust
//! use adaptive_engine::cards::{Card, Rank, Suit};
//! use adaptive_cli::formatters::{format_card, format_board};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use adaptive_engine::Street;
use adaptive_engine::cards::{Card, Rank, Suit};
use adaptive_engine::player::PlayerAction;
use adaptive_engine::rules::LegalMoves;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Single character per rank, `T` for ten, so cards line up in columns.
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "T",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
    .to_string()
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Format a board (list of cards) as a string in bracket notation.
///
/// ```rust
/// use adaptive_engine::cards::parse_cards;
/// # use adaptive_cli::formatters::format_board;
///
/// let flop = parse_cards("As Kh Qd").unwrap();
/// let formatted = format_board(&flop);
/// assert!(formatted.starts_with("[A"));
/// assert!(formatted.ends_with("]"));
/// assert_eq!(format_board(&[]), "[]");
/// ```
pub fn format_board(cards: &[Card]) -> String {
    let formatted_cards: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted_cards.join(" "))
}

pub fn format_action(action: &PlayerAction) -> String {
    action.to_string()
}

pub fn format_street(street: Street) -> &'static str {
    match street {
        Street::Preflop => "Preflop",
        Street::Flop => "Flop",
        Street::Turn => "Turn",
        Street::River => "River",
        Street::Showdown => "Showdown",
    }
}

/// One-line summary of the moves open to a seat, e.g.
/// `fold | call 20 | raise 40-980`.
pub fn format_legal(legal: &LegalMoves) -> String {
    let mut parts = vec!["fold".to_string()];
    if legal.can_check() {
        parts.push("check".into());
    }
    if let Some(n) = legal.call_amount() {
        parts.push(format!("call {}", n));
    }
    if let Some(b) = legal.raise_bounds() {
        if b.min == b.max {
            parts.push(format!("raise {}", b.min));
        } else {
            parts.push(format!("raise {}-{}", b.min, b.max));
        }
    }
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use adaptive_engine::rules::RaiseBounds;

    #[test]
    fn test_format_rank() {
        assert_eq!(format_rank(&Rank::Two), "2");
        assert_eq!(format_rank(&Rank::Ten), "T");
        assert_eq!(format_rank(&Rank::Queen), "Q");
        assert_eq!(format_rank(&Rank::Ace), "A");
    }

    #[test]
    fn test_format_suit_unicode_or_ascii() {
        let hearts = format_suit(&Suit::Hearts);
        assert!(hearts == "♥" || hearts == "h");
        let spades = format_suit(&Suit::Spades);
        assert!(spades == "♠" || spades == "s");
    }

    #[test]
    fn test_format_ten() {
        let card = Card::new(Rank::Ten, Suit::Clubs);
        assert!(format_card(&card) == "T♣" || format_card(&card) == "Tc");
    }

    #[test]
    fn test_format_action() {
        assert_eq!(format_action(&PlayerAction::Fold), "fold");
        assert_eq!(format_action(&PlayerAction::Call(20)), "call 20");
        assert_eq!(format_action(&PlayerAction::Raise(50)), "raise 50");
    }

    #[test]
    fn test_format_legal_facing_a_bet() {
        let legal = LegalMoves {
            check: false,
            call: Some(20),
            raise: Some(RaiseBounds { min: 20, max: 980 }),
        };
        assert_eq!(format_legal(&legal), "fold | call 20 | raise 20-980");
    }

    #[test]
    fn test_format_legal_check_only() {
        let legal = LegalMoves {
            check: true,
            call: None,
            raise: Some(RaiseBounds { min: 40, max: 40 }),
        };
        assert_eq!(format_legal(&legal), "fold | check | raise 40");
    }
}
