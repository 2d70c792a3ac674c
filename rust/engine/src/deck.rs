use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Seeded 52-card shoe. The same seed always yields the same sequence of
/// shuffles, which keeps whole games reproducible.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
    /// Fixed order restored by every shuffle
    stacked: Option<Vec<Card>>,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
            stacked: None,
        }
    }

    /// A deck that deals `top` first, then the remaining cards in natural
    /// order, and comes back in exactly that order after every shuffle.
    /// Used to replay fixed deals.
    pub fn stacked(top: Vec<Card>) -> Self {
        let mut order = top;
        let rest: Vec<Card> = full_deck().into_iter().filter(|c| !order.contains(c)).collect();
        order.extend(rest);
        Self {
            cards: order.clone(),
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(0),
            stacked: Some(order),
        }
    }

    /// Collects every card back and shuffles the full deck.
    pub fn shuffle(&mut self) {
        match &self.stacked {
            Some(order) => self.cards = order.clone(),
            None => {
                self.cards = full_deck();
                self.cards.shuffle(&mut self.rng);
            }
        }
        self.position = 0;
    }

    pub fn deal(&mut self) -> Result<Card, GameError> {
        let card = self
            .cards
            .get(self.position)
            .copied()
            .ok_or(GameError::DeckExhausted)?;
        self.position += 1;
        Ok(card)
    }

    pub fn deal_n(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        (0..n).map(|_| self.deal()).collect()
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        self.deal().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
