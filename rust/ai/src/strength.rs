//! Post-flop strength estimates: how much of the made hand comes from the
//! hole cards, and what the next card most likely turns it into.

use adaptive_engine::cards::{Card, full_deck};
use adaptive_engine::errors::EvalError;
use adaptive_engine::hand::{ALL_CATEGORIES, Category, HandStrength, MAX_CARDS, evaluate_hand};

use crate::errors::AiError;

/// Most frequent category over every possible next card.
///
/// Each unseen card is added to `known` and the result evaluated; ties go to
/// the lower category. Returns `None` when `known` already holds seven cards.
pub fn most_likely_next_category(known: &[Card]) -> Result<Option<Category>, EvalError> {
    if known.len() >= MAX_CARDS {
        return Ok(None);
    }
    let mut tally = [0u32; ALL_CATEGORIES.len()];
    let mut hand = known.to_vec();
    for card in full_deck().into_iter().filter(|c| !known.contains(c)) {
        hand.push(card);
        let strength = evaluate_hand(&hand)?;
        tally[strength.category.value() as usize] += 1;
        hand.pop();
    }
    let mut best: Option<(Category, u32)> = None;
    for (category, &count) in ALL_CATEGORIES.iter().zip(&tally) {
        if count > best.map_or(0, |(_, n)| n) {
            best = Some((*category, count));
        }
    }
    Ok(best.map(|(c, _)| c))
}

/// Everything the post-flop decision needs to know about the hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostflopRead {
    pub current: HandStrength,
    pub board: HandStrength,
    pub next_category: Option<Category>,
    /// Categories the hole cards add over the board, plus one when the next
    /// card most likely improves the hand
    pub gap: i32,
}

/// Reads the hand on the flop, turn or river. The next-card estimate is
/// skipped when `project_next` is false.
///
/// # Errors
///
/// [`AiError::Eval`] for invalid card sets and
/// [`AiError::StateInvariantViolation`] if the board alone outranks the
/// combined hand.
pub fn read_postflop(hole: [Card; 2], board: &[Card], project_next: bool) -> Result<PostflopRead, AiError> {
    let mut combined = hole.to_vec();
    combined.extend_from_slice(board);
    let current = evaluate_hand(&combined)?;
    let board_strength = evaluate_hand(board)?;

    let mut gap = current.category.value() - board_strength.category.value();
    if gap < 0 {
        return Err(AiError::StateInvariantViolation(format!(
            "board {} outranks combined hand {}",
            board_strength.category, current.category
        )));
    }

    let next_category = if project_next {
        most_likely_next_category(&combined)?
    } else {
        None
    };
    if next_category.is_some_and(|c| c > current.category) {
        gap += 1;
    }

    Ok(PostflopRead {
        current,
        board: board_strength,
        next_category,
        gap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use adaptive_engine::cards::parse_cards;

    fn hole(s: &str) -> [Card; 2] {
        let c = parse_cards(s).unwrap();
        [c[0], c[1]]
    }

    #[test]
    fn quads_over_trips_board() {
        let board = parse_cards("Qd Qc Qh").unwrap();
        let read = read_postflop(hole("Qs 2c"), &board, true).unwrap();
        assert_eq!(read.current.category, Category::FourOfAKind);
        assert_eq!(read.board.category, Category::ThreeOfAKind);
        assert_eq!(read.next_category, Some(Category::FourOfAKind));
        assert_eq!(read.gap, 4);
    }

    #[test]
    fn board_pair_shared_by_everyone_has_no_gap() {
        let board = parse_cards("8d 8c 3h Jc").unwrap();
        let read = read_postflop(hole("2s 5d"), &board, false).unwrap();
        assert_eq!(read.current.category, Category::OnePair);
        assert_eq!(read.gap, 0);
        assert_eq!(read.next_category, None);
    }

    #[test]
    fn next_card_usually_leaves_high_card_alone() {
        // 5 known cards, 47 unseen: 15 pair up, 32 stay high card
        let known = parse_cards("2s 5d 9h Jc Kd").unwrap();
        assert_eq!(most_likely_next_category(&known).unwrap(), Some(Category::HighCard));
    }

    #[test]
    fn four_flush_projects_to_a_flush_only_when_most_cards_hit() {
        // nine hearts complete the flush, far fewer than the 37 that miss
        let known = parse_cards("2h 5h 9h Jh Kd").unwrap();
        let next = most_likely_next_category(&known).unwrap();
        assert_eq!(next, Some(Category::HighCard));
    }

    #[test]
    fn river_has_nothing_left_to_project() {
        let known = parse_cards("2s 5d 9h Jc Kd 3c 7h").unwrap();
        assert_eq!(most_likely_next_category(&known).unwrap(), None);
    }
}
