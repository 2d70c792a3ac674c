//! Learned multipliers for the preflop hand value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Step applied to a weight after each hand.
pub const LEARNING_RATE: f64 = 0.05;

/// Weights never drop below this, so no feature can zero out a hand value.
pub const MIN_WEIGHT: f64 = 0.05;

/// A preflop feature with its own learned weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Suited,
    Pair,
    HighStraightChance,
    LowStraightChance,
    HighCard,
    DoubleHighCard,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Suited,
        Feature::Pair,
        Feature::HighStraightChance,
        Feature::LowStraightChance,
        Feature::HighCard,
        Feature::DoubleHighCard,
    ];

    /// Field name in the persisted record.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Suited => "suited",
            Feature::Pair => "pair",
            Feature::HighStraightChance => "highStraightChance",
            Feature::LowStraightChance => "lowStraightChance",
            Feature::HighCard => "highCard",
            Feature::DoubleHighCard => "doubleHighCard",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The six learned factors, persisted as one JSON record.
///
/// Defaults are priors that already rank strong starting hands above weak
/// ones; learning moves them by [`LEARNING_RATE`] per hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnedWeights {
    pub suited: f64,
    pub pair: f64,
    pub high_straight_chance: f64,
    pub low_straight_chance: f64,
    pub high_card: f64,
    pub double_high_card: f64,
}

impl Default for LearnedWeights {
    fn default() -> Self {
        Self {
            suited: 1.2,
            pair: 1.6,
            high_straight_chance: 1.3,
            low_straight_chance: 1.1,
            high_card: 1.25,
            double_high_card: 1.6,
        }
    }
}

impl LearnedWeights {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Suited => self.suited,
            Feature::Pair => self.pair,
            Feature::HighStraightChance => self.high_straight_chance,
            Feature::LowStraightChance => self.low_straight_chance,
            Feature::HighCard => self.high_card,
            Feature::DoubleHighCard => self.double_high_card,
        }
    }

    fn slot(&mut self, feature: Feature) -> &mut f64 {
        match feature {
            Feature::Suited => &mut self.suited,
            Feature::Pair => &mut self.pair,
            Feature::HighStraightChance => &mut self.high_straight_chance,
            Feature::LowStraightChance => &mut self.low_straight_chance,
            Feature::HighCard => &mut self.high_card,
            Feature::DoubleHighCard => &mut self.double_high_card,
        }
    }

    pub fn increment(&mut self, feature: Feature) {
        *self.slot(feature) += LEARNING_RATE;
    }

    pub fn decrement(&mut self, feature: Feature) {
        let w = self.slot(feature);
        *w = (*w - LEARNING_RATE).max(MIN_WEIGHT);
    }

    /// Mean of all six factors; the preflop tier thresholds scale with it.
    pub fn average(&self) -> f64 {
        Feature::ALL.iter().map(|&f| self.get(f)).sum::<f64>() / Feature::ALL.len() as f64
    }

    /// True when every factor is finite and at least [`MIN_WEIGHT`].
    pub fn is_valid(&self) -> bool {
        Feature::ALL
            .iter()
            .map(|&f| self.get(f))
            .all(|w| w.is_finite() && w >= MIN_WEIGHT)
    }

    /// First factor that fails [`LearnedWeights::is_valid`], if any.
    pub fn first_invalid(&self) -> Option<(Feature, f64)> {
        Feature::ALL
            .iter()
            .map(|&f| (f, self.get(f)))
            .find(|(_, w)| !(w.is_finite() && *w >= MIN_WEIGHT))
    }

    /// Moves every listed feature up on a win and down otherwise.
    pub fn reward(&mut self, features: impl IntoIterator<Item = Feature>, won: bool) {
        for f in features {
            if won {
                self.increment(f);
            } else {
                self.decrement(f);
            }
        }
    }
}
