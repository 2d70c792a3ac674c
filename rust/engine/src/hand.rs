use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::EvalError;

/// Largest hand the evaluator accepts: two hole cards plus a full board.
pub const MAX_CARDS: usize = 7;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn value(self) -> i32 {
        self as i32
    }
}

pub const ALL_CATEGORIES: [Category; 9] = [
    Category::HighCard,
    Category::OnePair,
    Category::TwoPair,
    Category::ThreeOfAKind,
    Category::Straight,
    Category::Flush,
    Category::FullHouse,
    Category::FourOfAKind,
    Category::StraightFlush,
];

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        };
        f.write_str(name)
    }
}

/// Result of one evaluation. Field order matters: the derived ordering ranks
/// by category first, then kickers lexicographically.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks, zero padded
    pub kickers: [u8; 5],
}

/// Scores between one and seven cards.
///
/// Hands shorter than five cards are scored by the best category they can
/// form on their own, so two hole cards yield either [`Category::HighCard`] or
/// [`Category::OnePair`]. The result does not depend on input order.
///
/// # Errors
///
/// [`EvalError::Empty`] for no cards, [`EvalError::TooManyCards`] past seven,
/// and [`EvalError::DuplicateCard`] when the same card appears twice.
///
/// # Examples
///
/// ```
/// use adaptive_engine::cards::parse_cards;
/// use adaptive_engine::hand::{evaluate_hand, Category};
///
/// let wheel = parse_cards("Ac 2d 3h 4s 5c").unwrap();
/// let hs = evaluate_hand(&wheel).unwrap();
/// assert_eq!(hs.category, Category::Straight);
/// assert_eq!(hs.kickers[0], 5);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> Result<HandStrength, EvalError> {
    if cards.is_empty() {
        return Err(EvalError::Empty);
    }
    if cards.len() > MAX_CARDS {
        return Err(EvalError::TooManyCards(cards.len()));
    }

    let mut seen: u64 = 0;
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    let mut suit_counts = [0u8; 4];
    let mut by_suit_mask = [0u16; 4];
    for &c in cards {
        let s = c.suit.index();
        let r = c.rank.value();
        let bit = 1u64 << (s * 13 + c.rank.ordinal() as usize);
        if seen & bit != 0 {
            return Err(EvalError::DuplicateCard(c));
        }
        seen |= bit;
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
        suit_counts[s] += 1;
        by_suit_mask[s] |= 1 << r;
    }

    let flush_suit = suit_counts.iter().position(|&n| n >= 5);

    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(by_suit_mask[s]) {
            return Ok(strength(Category::StraightFlush, &[high]));
        }
    }

    if let Some(quad) = highest_with_count(&rank_counts, 4) {
        let rest = ranks_desc_excluding(&rank_counts, &[quad]);
        return Ok(grouped(Category::FourOfAKind, &[quad], &rest, 1));
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return Ok(strength(Category::FullHouse, &[trip, pair]));
    }

    if let Some(s) = flush_suit {
        let ranks = mask_ranks_desc(by_suit_mask[s]);
        return Ok(strength(Category::Flush, &ranks[..5]));
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return Ok(strength(Category::Straight, &[high]));
    }

    if let Some(trip) = highest_with_count(&rank_counts, 3) {
        let rest = ranks_desc_excluding(&rank_counts, &[trip]);
        return Ok(grouped(Category::ThreeOfAKind, &[trip], &rest, 2));
    }

    let pairs = ranks_with_count_desc(&rank_counts, 2);
    if pairs.len() >= 2 {
        let (high, low) = (pairs[0], pairs[1]);
        let rest = ranks_desc_excluding(&rank_counts, &[high, low]);
        return Ok(grouped(Category::TwoPair, &[high, low], &rest, 1));
    }
    if let Some(&pair) = pairs.first() {
        let rest = ranks_desc_excluding(&rank_counts, &[pair]);
        return Ok(grouped(Category::OnePair, &[pair], &rest, 3));
    }

    let highs = ranks_desc_excluding(&rank_counts, &[]);
    Ok(strength(Category::HighCard, &highs[..highs.len().min(5)]))
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn strength(category: Category, ranks: &[u8]) -> HandStrength {
    let mut kickers = [0u8; 5];
    for (slot, &r) in kickers.iter_mut().zip(ranks) {
        *slot = r;
    }
    HandStrength { category, kickers }
}

// made ranks first, then the best `kicker_count` of the remaining ranks
fn grouped(category: Category, made: &[u8], rest: &[u8], kicker_count: usize) -> HandStrength {
    let ranks: Vec<u8> = made
        .iter()
        .chain(rest.iter().take(kicker_count))
        .copied()
        .collect();
    strength(category, &ranks)
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    (5..=14u8).rev().find(|&high| {
        let window = 0b1_1111u16 << (high - 4);
        (m & window) == window
    })
}

fn mask_ranks_desc(mask: u16) -> Vec<u8> {
    (2..=14u8).rev().filter(|&r| mask & (1 << r) != 0).collect()
}

fn highest_with_count(rank_counts: &[u8; 15], count: u8) -> Option<u8> {
    (2..=14u8).rev().find(|&r| rank_counts[r as usize] == count)
}

fn ranks_with_count_desc(rank_counts: &[u8; 15], count: u8) -> Vec<u8> {
    (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] == count)
        .collect()
}

fn ranks_desc_excluding(rank_counts: &[u8; 15], exclude: &[u8]) -> Vec<u8> {
    (2..=14u8)
        .rev()
        .filter(|r| rank_counts[*r as usize] > 0 && !exclude.contains(r))
        .collect()
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let trips = ranks_with_count_desc(rank_counts, 3);
    let &trip = trips.first()?;
    // a second set of trips plays as the pair
    let pair = (2..=14u8)
        .rev()
        .find(|&r| r != trip && rank_counts[r as usize] >= 2)?;
    Some((trip, pair))
}
