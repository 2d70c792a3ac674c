use adaptive_engine::cards::Card;

use crate::weights::{Feature, LearnedWeights};

/// Ordinal above which a card counts as high (King, Ace).
const HIGH_CARD_ORDINAL: u8 = 10;

/// Starting-hand characteristics derived from the two hole cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreflopFeatures {
    pub suited: bool,
    pub pair: bool,
    pub high_straight_chance: bool,
    pub low_straight_chance: bool,
    pub high_card: bool,
    pub double_high_card: bool,
}

impl PreflopFeatures {
    /// # Examples
    ///
    /// ```
    /// use adaptive_ai::features::PreflopFeatures;
    /// use adaptive_engine::cards::parse_cards;
    ///
    /// let cards = parse_cards("As Ks").unwrap();
    /// let f = PreflopFeatures::from_hole([cards[0], cards[1]]);
    /// assert!(f.suited && f.double_high_card && !f.pair);
    /// ```
    pub fn from_hole(hole: [Card; 2]) -> Self {
        let (a, b) = (hole[0].rank.ordinal(), hole[1].rank.ordinal());
        let suited = hole[0].suit == hole[1].suit;
        let pair = !suited && a == b;

        let gap = a.abs_diff(b);
        let sum = a + b;
        let high_straight_chance = gap == 1 && sum > 3 && sum < 19;
        let wraparound = a.max(b) == 12 && a.min(b) == 0;
        let low_straight_chance = !high_straight_chance && (gap < 5 || wraparound);

        let high_a = a > HIGH_CARD_ORDINAL;
        let high_b = b > HIGH_CARD_ORDINAL;

        Self {
            suited,
            pair,
            high_straight_chance,
            low_straight_chance,
            high_card: high_a || high_b,
            double_high_card: high_a && high_b,
        }
    }

    /// Every flag that is set. These are the weights a finished hand adjusts.
    pub fn active(&self) -> Vec<Feature> {
        [
            (Feature::Suited, self.suited),
            (Feature::Pair, self.pair),
            (Feature::HighStraightChance, self.high_straight_chance),
            (Feature::LowStraightChance, self.low_straight_chance),
            (Feature::HighCard, self.high_card),
            (Feature::DoubleHighCard, self.double_high_card),
        ]
        .into_iter()
        .filter_map(|(f, on)| on.then_some(f))
        .collect()
    }

    /// Flags whose weight multiplies into the hand value. A double high card
    /// replaces the single high-card factor.
    pub fn value_factors(&self) -> Vec<Feature> {
        self.active()
            .into_iter()
            .filter(|&f| !(f == Feature::HighCard && self.double_high_card))
            .collect()
    }

    /// Product of the weights of [`PreflopFeatures::value_factors`]; 1.0 with no flags.
    pub fn hand_value(&self, weights: &LearnedWeights) -> f64 {
        self.value_factors().into_iter().map(|f| weights.get(f)).product()
    }
}
