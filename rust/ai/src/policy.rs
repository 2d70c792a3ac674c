//! The adaptive decision policy.
//!
//! Preflop, the two hole cards are reduced to [`PreflopFeatures`] and scored
//! with the learned weights; the score picks a [`PreflopTier`]. After the flop
//! the policy compares the combined hand with the board alone and picks a
//! [`PostflopTier`]. Every tier maps to a fixed raise/call/check/fold rule, and
//! every answer is drawn from the legal-move set it was offered.

use adaptive_engine::Street;
use adaptive_engine::cards::Card;
use adaptive_engine::hand::Category;
use adaptive_engine::player::PlayerAction;
use adaptive_engine::rules::{LegalMoves, RAISE_CAP};
use adaptive_engine::seat::{HandOutcome, Seat, SeatView};
use tracing::{debug, error, info, warn};

use crate::features::PreflopFeatures;
use crate::store::ParameterStore;
use crate::strength::read_postflop;
use crate::weights::LearnedWeights;

/// Decision phase, derived from the street in the seat view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PreFlop,
    /// Flop and turn share one rule set
    PostFlop,
    River,
}

impl Phase {
    fn for_street(street: Street) -> Self {
        match street {
            Street::Preflop => Phase::PreFlop,
            Street::Flop | Street::Turn => Phase::PostFlop,
            Street::River | Street::Showdown => Phase::River,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreflopTier {
    Fold,
    Marginal,
    MarginalStrong,
    Strong,
    Premium,
}

impl PreflopTier {
    /// Thresholds are multiples of the average weight; a tier needs to beat
    /// its threshold strictly.
    pub fn classify(hand_value: f64, average_weight: f64) -> Self {
        if hand_value > average_weight * 2.0 {
            PreflopTier::Premium
        } else if hand_value > average_weight * 1.5 {
            PreflopTier::Strong
        } else if hand_value > average_weight * 1.25 {
            PreflopTier::MarginalStrong
        } else if hand_value > average_weight {
            PreflopTier::Marginal
        } else {
            PreflopTier::Fold
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PostflopTier {
    Weak,
    Moderate,
    Aggressive,
}

impl PostflopTier {
    pub fn classify(gap: i32) -> Self {
        if gap >= 3 {
            PostflopTier::Aggressive
        } else if gap > 0 {
            PostflopTier::Moderate
        } else {
            PostflopTier::Weak
        }
    }
}

/// Call-size gate thresholds.
const STRONG_GATE: f64 = 0.10;
const WEAK_GATE: f64 = 0.05;

/// Inputs every tier rule reads.
#[derive(Debug, Clone, Copy)]
struct Spot<'a> {
    legal: &'a LegalMoves,
    stack: u32,
    stack_share: f64,
    raises: u8,
    opponents: usize,
}

impl<'a> Spot<'a> {
    fn from_view(view: &'a SeatView<'_>) -> Self {
        let divisor = view.highest_opponent_stack().max(1);
        Self {
            legal: view.legal,
            stack: view.stack,
            stack_share: f64::from(view.stack) / f64::from(divisor),
            raises: view.raises_this_street,
            opponents: view.opponents.len(),
        }
    }

    /// Minimum raise plus `bonus` of the own stack, clamped to the legal
    /// bounds. `None` when raising is closed.
    fn raise(&self, bonus: f64) -> Option<PlayerAction> {
        let bounds = self.legal.raise_bounds()?;
        let extra = (f64::from(self.stack) * bonus).round() as u32;
        Some(PlayerAction::Raise(bounds.clamp(bounds.min.saturating_add(extra))))
    }

    fn check_or_fold(&self) -> PlayerAction {
        if self.legal.can_check() {
            PlayerAction::Check
        } else {
            PlayerAction::Fold
        }
    }

    fn check_or_call(&self) -> PlayerAction {
        if self.legal.can_check() {
            return PlayerAction::Check;
        }
        match self.legal.call_amount() {
            Some(n) => PlayerAction::Call(n),
            None => PlayerAction::Fold,
        }
    }

    /// Checks when free, otherwise calls only when the call is more than
    /// `threshold` of the own stack.
    fn gate(&self, threshold: f64) -> PlayerAction {
        if self.legal.can_check() {
            return PlayerAction::Check;
        }
        match self.legal.call_amount() {
            Some(n) if self.stack > 0 && f64::from(n) / f64::from(self.stack) > threshold => {
                PlayerAction::Call(n)
            }
            _ => PlayerAction::Fold,
        }
    }
}

fn preflop_action(tier: PreflopTier, spot: &Spot<'_>) -> PlayerAction {
    match tier {
        PreflopTier::Premium => {
            let bonus = if spot.opponents < 3 { 0.10 } else { 0.20 };
            (spot.stack_share > 0.85 && spot.raises < RAISE_CAP)
                .then(|| spot.raise(bonus))
                .flatten()
                .unwrap_or_else(|| spot.check_or_call())
        }
        PreflopTier::Strong => {
            if spot.opponents < 3 || spot.raises > 0 {
                spot.check_or_call()
            } else {
                spot.raise(0.10).unwrap_or_else(|| spot.check_or_call())
            }
        }
        PreflopTier::MarginalStrong => (spot.stack_share > 0.75 && spot.raises == 0)
            .then(|| spot.raise(0.10))
            .flatten()
            .unwrap_or_else(|| spot.gate(STRONG_GATE)),
        PreflopTier::Marginal => spot.gate(WEAK_GATE),
        PreflopTier::Fold => spot.check_or_fold(),
    }
}

fn postflop_action(tier: PostflopTier, phase: Phase, category: Category, spot: &Spot<'_>) -> PlayerAction {
    match tier {
        PostflopTier::Aggressive => {
            let (share_needed, bonus) = if phase == Phase::River {
                (0.75, 0.10)
            } else {
                (0.60, 0.10 + f64::from(category.value()) / 100.0)
            };
            (spot.stack_share > share_needed && spot.raises < RAISE_CAP)
                .then(|| spot.raise(bonus))
                .flatten()
                .unwrap_or_else(|| spot.gate(STRONG_GATE))
        }
        PostflopTier::Moderate => spot.gate(WEAK_GATE),
        PostflopTier::Weak => spot.check_or_fold(),
    }
}

/// An automated seat that learns from each hand it plays.
///
/// Weights are loaded from the store once at construction and written back
/// after every hand. A failed save is logged and play continues.
pub struct AdaptivePolicy {
    name: String,
    weights: LearnedWeights,
    store: Box<dyn ParameterStore>,
    features: Option<PreflopFeatures>,
    phase: Phase,
}

impl std::fmt::Debug for AdaptivePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptivePolicy")
            .field("name", &self.name)
            .field("weights", &self.weights)
            .field("phase", &self.phase)
            .finish()
    }
}

impl AdaptivePolicy {
    pub fn new(name: impl Into<String>, store: Box<dyn ParameterStore>) -> Self {
        let weights = store.load_or_default();
        Self::with_weights(name, weights, store)
    }

    pub fn with_weights(name: impl Into<String>, weights: LearnedWeights, store: Box<dyn ParameterStore>) -> Self {
        Self {
            name: name.into(),
            weights,
            store,
            features: None,
            phase: Phase::PreFlop,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weights(&self) -> &LearnedWeights {
        &self.weights
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn features(&self) -> Option<&PreflopFeatures> {
        self.features.as_ref()
    }

    /// Tier the given hole cards reach with the current weights.
    pub fn preflop_tier(&self, hole: [Card; 2]) -> PreflopTier {
        let value = PreflopFeatures::from_hole(hole).hand_value(&self.weights);
        PreflopTier::classify(value, self.weights.average())
    }

    fn decide_preflop(&mut self, view: &SeatView<'_>, spot: &Spot<'_>) -> PlayerAction {
        let features = *self
            .features
            .get_or_insert_with(|| PreflopFeatures::from_hole(view.hole));
        let value = features.hand_value(&self.weights);
        let tier = PreflopTier::classify(value, self.weights.average());
        debug!(seat = view.seat, value, ?tier, "preflop read");
        preflop_action(tier, spot)
    }

    fn decide_postflop(&self, view: &SeatView<'_>, spot: &Spot<'_>) -> PlayerAction {
        let read = match read_postflop(view.hole, view.board, self.phase != Phase::River) {
            Ok(r) => r,
            Err(e) => {
                error!(seat = view.seat, hand = view.hand_number, error = %e, "post-flop read failed, folding");
                return PlayerAction::Fold;
            }
        };
        let tier = PostflopTier::classify(read.gap);
        debug!(
            seat = view.seat,
            street = ?view.street,
            current = %read.current.category,
            board = %read.board.category,
            gap = read.gap,
            ?tier,
            "post-flop read"
        );
        postflop_action(tier, self.phase, read.current.category, spot)
    }
}

impl Seat for AdaptivePolicy {
    fn begin_hand(&mut self, hole: [Card; 2]) {
        self.features = Some(PreflopFeatures::from_hole(hole));
        self.phase = Phase::PreFlop;
    }

    fn choose_action(&mut self, view: &SeatView<'_>) -> PlayerAction {
        let phase = Phase::for_street(view.street);
        if phase != self.phase {
            debug!(seat = view.seat, from = ?self.phase, to = ?phase, "phase advanced");
            self.phase = phase;
        }

        let spot = Spot::from_view(view);
        let action = match self.phase {
            Phase::PreFlop => self.decide_preflop(view, &spot),
            _ => self.decide_postflop(view, &spot),
        };

        if view.legal.allows(&action) {
            action
        } else {
            // unreachable with well-formed legal sets; fall back to the safest move
            warn!(seat = view.seat, %action, "policy produced an illegal action");
            spot.check_or_fold()
        }
    }

    fn end_hand(&mut self, outcome: &HandOutcome) {
        if let Some(features) = self.features.take() {
            self.weights.reward(features.active(), outcome.won);
        }
        self.phase = Phase::PreFlop;
        info!(player = %self.name, won = outcome.won, average = self.weights.average(), "weights updated");
        if let Err(e) = self.store.save(&self.weights) {
            warn!(player = %self.name, error = %e, "could not persist weights");
        }
    }

    fn kind(&self) -> &str {
        "adaptive"
    }
}
