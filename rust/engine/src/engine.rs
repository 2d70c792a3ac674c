//! Round engine: plays one hand from blinds to pot award.
//!
//! [`play_hand`] owns the round state for the duration of the hand and moves
//! it through [`RoundPhase`]. Seat controllers are asked for actions in turn
//! order and only see a read-only [`SeatView`]; every action is validated
//! against the [`LegalMoves`] it was offered before any chips move.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{PlayerSnapshot, ShownHand, TableEvent, TableObserver};
use crate::hand::evaluate_hand;
use crate::player::{Player, PlayerAction};
use crate::rules::{legal_moves, validate_action, BettingSituation, LegalMoves};
use crate::seat::{HandOutcome, OpponentView, Seat, SeatView};

/// Prompts a non-automated seat gets for one decision before it is folded.
pub const MAX_PROMPTS: usize = 5;

/// A betting street in Texas Hold'em.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Street {
    /// Hole cards dealt, no board
    Preflop,
    /// Three board cards
    Flop,
    /// Fourth board card
    Turn,
    /// Fifth board card
    River,
    /// Remaining hands revealed
    Showdown,
}

/// States of the round state machine. Deal states advance unconditionally;
/// betting states hold until the street's action is closed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RoundPhase {
    DealPreflop,
    BettingPreflop,
    DealFlop,
    BettingFlop,
    DealTurn,
    BettingTurn,
    DealRiver,
    BettingRiver,
    Showdown,
    Complete,
}

/// A seat at the table: the player and whoever decides for it.
pub struct TableSeat {
    pub player: Player,
    pub controller: Box<dyn Seat>,
}

impl TableSeat {
    pub fn new(player: Player, controller: Box<dyn Seat>) -> Self {
        Self { player, controller }
    }
}

impl std::fmt::Debug for TableSeat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSeat")
            .field("player", &self.player)
            .field("controller", &self.controller.kind())
            .finish()
    }
}

/// Seat of the big blind for a given dealer: the seat after the dealer heads
/// up, otherwise two seats after.
pub fn big_blind_seat(dealer: usize, players: usize) -> usize {
    if players == 2 {
        (dealer + 1) % 2
    } else {
        (dealer + 2) % players
    }
}

/// Parameters of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandSetup {
    pub hand_number: u32,
    /// Big blind amount; the small blind is half of it, at least one chip
    pub blind: u32,
    /// Index into the table of the seat posting the big blind
    pub big_blind_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandResult {
    pub hand_number: u32,
    /// Table indices of the seats that won or split the pot
    pub winners: Vec<usize>,
    pub pot: u32,
    pub showdown: bool,
    pub board: Vec<Card>,
}

/// Mutable state of the hand in progress. Owned by [`play_hand`] and
/// discarded at hand end.
#[derive(Debug, Clone)]
pub(crate) struct RoundState {
    phase: RoundPhase,
    street: Street,
    pot: u32,
    /// Highest total committed by any seat this street
    current_bet: u32,
    min_raise: u32,
    raises_this_street: u8,
    board: Vec<Card>,
    to_act: usize,
    street_bets: Vec<u32>,
    folded: Vec<bool>,
    needs_action: Vec<bool>,
}

impl RoundState {
    fn new(players: usize, big_blind: u32) -> Self {
        Self {
            phase: RoundPhase::DealPreflop,
            street: Street::Preflop,
            pot: 0,
            current_bet: 0,
            min_raise: big_blind,
            raises_this_street: 0,
            board: Vec::with_capacity(5),
            to_act: 0,
            street_bets: vec![0; players],
            folded: vec![false; players],
            needs_action: vec![false; players],
        }
    }

    fn to_call(&self, seat: usize) -> u32 {
        self.current_bet.saturating_sub(self.street_bets[seat])
    }
}

/// Plays one hand over every seat in `table`.
///
/// Posts blinds, deals, runs the four betting streets and awards the pot,
/// then reports the outcome to each seat controller and clears hole cards.
/// Every seat must hold chips. There are no side pots: raises are capped at
/// what every other live player can still match, and a seat that is short for
/// a blind or a call goes all in for less and stays eligible for the whole pot.
///
/// # Errors
///
/// [`GameError::NotEnoughPlayers`] for fewer than two seats,
/// [`GameError::NoChips`] for a seat without chips, [`GameError::InvalidBlind`]
/// for a zero blind, [`GameError::TooManyChips`] when the stacks together
/// exceed `u32::MAX`, and [`GameError::StateInvariantViolation`] if chips are
/// ever created or destroyed.
pub fn play_hand(
    table: &mut [TableSeat],
    deck: &mut Deck,
    setup: HandSetup,
    observer: &mut dyn TableObserver,
) -> Result<HandResult, GameError> {
    if table.len() < 2 {
        return Err(GameError::NotEnoughPlayers(table.len()));
    }
    if let Some(s) = table.iter().find(|s| s.player.is_busted()) {
        return Err(GameError::NoChips(s.player.name().to_string()));
    }
    if setup.blind == 0 {
        return Err(GameError::InvalidBlind);
    }
    GameError::check_table_chips(table.iter().map(|s| u64::from(s.player.stack())).sum())?;
    if setup.big_blind_index >= table.len() {
        return Err(GameError::StateInvariantViolation(format!(
            "big blind index {} outside table of {}",
            setup.big_blind_index,
            table.len()
        )));
    }

    let mut round = Round::new(table, deck, setup, observer);
    round.run()
}

struct Round<'a> {
    table: &'a mut [TableSeat],
    deck: &'a mut Deck,
    observer: &'a mut dyn TableObserver,
    state: RoundState,
    hand: u32,
    dealer: usize,
    small_blind_seat: usize,
    big_blind_seat: usize,
    small_blind: u32,
    big_blind: u32,
    total_chips: u64,
    result: Option<HandResult>,
}

impl<'a> Round<'a> {
    fn new(
        table: &'a mut [TableSeat],
        deck: &'a mut Deck,
        setup: HandSetup,
        observer: &'a mut dyn TableObserver,
    ) -> Self {
        let n = table.len();
        let bb = setup.big_blind_index;
        let (dealer, sb) = if n == 2 {
            let other = (bb + 1) % 2;
            (other, other)
        } else {
            ((bb + n - 2) % n, (bb + n - 1) % n)
        };
        let total_chips = table.iter().map(|s| u64::from(s.player.stack())).sum();
        Self {
            state: RoundState::new(n, setup.blind),
            table,
            deck,
            observer,
            hand: setup.hand_number,
            dealer,
            small_blind_seat: sb,
            big_blind_seat: bb,
            small_blind: (setup.blind / 2).max(1),
            big_blind: setup.blind,
            total_chips,
            result: None,
        }
    }

    fn run(&mut self) -> Result<HandResult, GameError> {
        use RoundPhase as P;
        self.deck.shuffle();
        info!(
            hand = self.hand,
            dealer = self.dealer,
            big_blind = self.big_blind,
            players = self.table.len(),
            "hand started"
        );
        let started = TableEvent::HandStarted {
            hand: self.hand,
            dealer: self.seat_id(self.dealer),
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            players: self.snapshots(),
        };
        self.observer.on_event(&started);

        loop {
            let next = match self.state.phase {
                P::DealPreflop => {
                    self.post_blinds()?;
                    self.deal_hole_cards()?;
                    P::BettingPreflop
                }
                P::BettingPreflop => self.betting((self.big_blind_seat + 1) % self.table.len(), P::DealFlop)?,
                P::DealFlop => {
                    self.deal_board(Street::Flop, 3)?;
                    P::BettingFlop
                }
                P::BettingFlop => self.betting(self.first_after_dealer(), P::DealTurn)?,
                P::DealTurn => {
                    self.deal_board(Street::Turn, 1)?;
                    P::BettingTurn
                }
                P::BettingTurn => self.betting(self.first_after_dealer(), P::DealRiver)?,
                P::DealRiver => {
                    self.deal_board(Street::River, 1)?;
                    P::BettingRiver
                }
                P::BettingRiver => self.betting(self.first_after_dealer(), P::Showdown)?,
                P::Showdown => {
                    self.showdown()?;
                    P::Complete
                }
                P::Complete => break,
            };
            self.state.phase = next;
        }

        self.finish()
    }

    fn first_after_dealer(&self) -> usize {
        (self.dealer + 1) % self.table.len()
    }

    fn post_blinds(&mut self) -> Result<(), GameError> {
        for (seat, amount) in [
            (self.small_blind_seat, self.small_blind),
            (self.big_blind_seat, self.big_blind),
        ] {
            let posted = amount.min(self.table[seat].player.stack());
            self.commit(seat, posted)?;
            debug!(hand = self.hand, seat, amount = posted, "blind posted");
            let posted_event = TableEvent::BlindPosted {
                hand: self.hand,
                seat: self.seat_id(seat),
                amount: posted,
            };
            self.observer.on_event(&posted_event);
        }
        self.state.current_bet = self.state.street_bets.iter().copied().max().unwrap_or(0);
        self.state.min_raise = self.big_blind;
        Ok(())
    }

    fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        let n = self.table.len();
        let mut dealt: Vec<Vec<Card>> = vec![Vec::with_capacity(2); n];
        for _ in 0..2 {
            for k in 1..=n {
                dealt[(self.dealer + k) % n].push(self.deck.deal()?);
            }
        }
        for (seat, cards) in self.table.iter_mut().zip(dealt) {
            let hole = [cards[0], cards[1]];
            seat.player.deal(hole);
            seat.controller.begin_hand(hole);
        }
        Ok(())
    }

    fn deal_board(&mut self, street: Street, count: usize) -> Result<(), GameError> {
        self.deck.burn()?;
        let cards = self.deck.deal_n(count)?;
        self.state.board.extend(cards);
        self.state.street = street;
        debug!(hand = self.hand, ?street, board = ?self.state.board, "board dealt");
        self.observer.on_event(&TableEvent::StreetDealt {
            hand: self.hand,
            street,
            board: self.state.board.clone(),
        });
        Ok(())
    }

    fn live_count(&self) -> usize {
        self.state.folded.iter().filter(|f| !**f).count()
    }

    fn can_act(&self, seat: usize) -> bool {
        !self.state.folded[seat] && self.table[seat].player.stack() > 0
    }

    /// Runs one street's betting. Returns `next` when the street closes with
    /// two or more hands live, or [`RoundPhase::Complete`] when everyone but
    /// one seat folded.
    fn betting(&mut self, first: usize, next: RoundPhase) -> Result<RoundPhase, GameError> {
        let n = self.table.len();
        if self.state.street != Street::Preflop {
            self.state.street_bets.iter_mut().for_each(|b| *b = 0);
            self.state.current_bet = 0;
            self.state.min_raise = self.big_blind;
        }
        self.state.raises_this_street = 0;

        let able = (0..n).filter(|&i| self.can_act(i)).count();
        let anyone_owes = (0..n).any(|i| self.can_act(i) && self.state.to_call(i) > 0);
        for i in 0..n {
            self.state.needs_action[i] = self.can_act(i) && (able > 1 || anyone_owes);
        }

        let mut from = first;
        while self.live_count() > 1 {
            let Some(seat) = (0..n).map(|k| (from + k) % n).find(|&i| self.state.needs_action[i]) else {
                break;
            };
            self.state.to_act = seat;
            self.take_turn(seat)?;
            from = (seat + 1) % n;
        }

        if self.live_count() == 1 {
            self.award_uncontested()?;
            return Ok(RoundPhase::Complete);
        }
        Ok(next)
    }

    fn legal_moves_for(&self, seat: usize) -> LegalMoves {
        let current = self.state.current_bet;
        let matchable = (0..self.table.len())
            .filter(|&j| j != seat && !self.state.folded[j])
            .map(|j| (self.table[j].player.stack() + self.state.street_bets[j]).saturating_sub(current))
            .min()
            .unwrap_or(0);
        legal_moves(BettingSituation {
            stack: self.table[seat].player.stack(),
            to_call: self.state.to_call(seat),
            min_raise: self.state.min_raise,
            raises_this_street: self.state.raises_this_street,
            matchable,
        })
    }

    fn opponents_of(&self, seat: usize) -> Vec<OpponentView> {
        self.table
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != seat && !self.state.folded[*j])
            .map(|(j, s)| OpponentView {
                seat: j,
                name: s.player.name().to_string(),
                stack: s.player.stack(),
            })
            .collect()
    }

    fn take_turn(&mut self, seat: usize) -> Result<(), GameError> {
        let legal = self.legal_moves_for(seat);
        let opponents = self.opponents_of(seat);
        let hole = self.table[seat].player.hole_cards().ok_or_else(|| {
            GameError::StateInvariantViolation(format!("seat {} has no hole cards", seat))
        })?;

        let seat_id = self.seat_id(seat);
        let mut prompts = 0;
        let action = loop {
            let view = SeatView {
                seat,
                hand_number: self.hand,
                hole,
                board: &self.state.board,
                street: self.state.street,
                pot: self.state.pot,
                stack: self.table[seat].player.stack(),
                big_blind: self.big_blind,
                raises_this_street: self.state.raises_this_street,
                legal: &legal,
                opponents: &opponents,
            };
            let controller = &mut self.table[seat].controller;
            let proposed = controller.choose_action(&view);
            match validate_action(seat, &legal, proposed) {
                Ok(action) => break action,
                Err(err) => {
                    prompts += 1;
                    warn!(hand = self.hand, seat, ?proposed, error = %err, "illegal action");
                    self.observer.on_event(&TableEvent::ActionRejected {
                        hand: self.hand,
                        seat: seat_id,
                        reason: err.to_string(),
                    });
                    if controller.is_automated() || prompts >= MAX_PROMPTS {
                        break PlayerAction::Fold;
                    }
                    controller.action_rejected(&err);
                }
            }
        };

        self.apply(seat, action)?;
        self.check_chips()?;
        debug!(hand = self.hand, seat, street = ?self.state.street, %action, pot = self.state.pot, "action");
        self.observer.on_event(&TableEvent::ActionTaken {
            hand: self.hand,
            seat: seat_id,
            street: self.state.street,
            action,
            pot: self.state.pot,
        });
        Ok(())
    }

    fn apply(&mut self, seat: usize, action: PlayerAction) -> Result<(), GameError> {
        self.state.needs_action[seat] = false;
        match action {
            PlayerAction::Fold => self.state.folded[seat] = true,
            PlayerAction::Check => {}
            PlayerAction::Call(amount) => self.commit(seat, amount)?,
            PlayerAction::Raise(amount) => {
                let owed = self.state.to_call(seat);
                self.commit(seat, owed + amount)?;
                self.state.current_bet = self.state.street_bets[seat];
                self.state.min_raise = self.state.min_raise.max(amount);
                self.state.raises_this_street += 1;
                // a raise reopens the action for everyone else still able to bet
                for i in 0..self.table.len() {
                    if i != seat && self.can_act(i) {
                        self.state.needs_action[i] = true;
                    }
                }
            }
        }
        Ok(())
    }

    fn commit(&mut self, seat: usize, amount: u32) -> Result<(), GameError> {
        self.table[seat].player.bet(amount)?;
        self.state.street_bets[seat] += amount;
        self.state.pot += amount;
        Ok(())
    }

    fn check_chips(&self) -> Result<(), GameError> {
        let in_play: u64 = self
            .table
            .iter()
            .map(|s| u64::from(s.player.stack()))
            .sum::<u64>()
            + u64::from(self.state.pot);
        if in_play != self.total_chips {
            return Err(GameError::StateInvariantViolation(format!(
                "chips in play {} differ from {} at hand start",
                in_play, self.total_chips
            )));
        }
        Ok(())
    }

    fn award_uncontested(&mut self) -> Result<(), GameError> {
        let winner = (0..self.table.len())
            .find(|&i| !self.state.folded[i])
            .ok_or_else(|| GameError::StateInvariantViolation("every seat folded".into()))?;
        self.award(vec![winner], false)
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        self.state.street = Street::Showdown;
        let n = self.table.len();
        let mut shown = Vec::new();
        // clockwise from the dealer's left, which also decides odd chips
        for seat in (1..=n).map(|k| (self.dealer + k) % n) {
            if self.state.folded[seat] {
                continue;
            }
            let player = &self.table[seat].player;
            let hole = player.hole_cards().ok_or_else(|| {
                GameError::StateInvariantViolation(format!("seat {} has no hole cards", seat))
            })?;
            let mut cards = hole.to_vec();
            cards.extend_from_slice(&self.state.board);
            shown.push((
                seat,
                ShownHand {
                    seat: player.seat(),
                    name: player.name().to_string(),
                    hole,
                    strength: evaluate_hand(&cards)?,
                },
            ));
        }

        let best = shown
            .iter()
            .map(|(_, h)| &h.strength)
            .max()
            .cloned()
            .ok_or_else(|| GameError::StateInvariantViolation("showdown without hands".into()))?;
        let winners: Vec<usize> = shown
            .iter()
            .filter(|(_, h)| h.strength == best)
            .map(|(i, _)| *i)
            .collect();
        info!(hand = self.hand, category = %best.category, ?winners, "showdown");
        self.observer.on_event(&TableEvent::Showdown {
            hand: self.hand,
            hands: shown.into_iter().map(|(_, h)| h).collect(),
        });
        self.award(winners, true)
    }

    /// Splits the pot evenly between `winners`, given in clockwise order from
    /// the dealer; leftover chips go one each to the first winners.
    fn award(&mut self, winners: Vec<usize>, showdown: bool) -> Result<(), GameError> {
        let pot = self.state.pot;
        let count = winners.len() as u32;
        let share = pot / count;
        let odd = (pot % count) as usize;
        for (k, &seat) in winners.iter().enumerate() {
            let extra = u32::from(k < odd);
            self.table[seat].player.add_chips(share + extra);
        }
        self.state.pot = 0;
        self.check_chips()?;
        self.result = Some(HandResult {
            hand_number: self.hand,
            winners,
            pot,
            showdown,
            board: self.state.board.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<HandResult, GameError> {
        let result = self
            .result
            .take()
            .ok_or_else(|| GameError::StateInvariantViolation("hand ended without a result".into()))?;
        let winner_names: Vec<String> = result
            .winners
            .iter()
            .map(|&i| self.table[i].player.name().to_string())
            .collect();

        for (i, seat) in self.table.iter_mut().enumerate() {
            let outcome = HandOutcome {
                hand_number: self.hand,
                won: result.winners.contains(&i),
                winners: winner_names.clone(),
                pot: result.pot,
                showdown: result.showdown,
            };
            seat.controller.end_hand(&outcome);
            seat.player.clear_cards();
        }

        info!(hand = self.hand, winners = ?winner_names, pot = result.pot, "hand finished");
        let finished = TableEvent::HandFinished {
            hand: self.hand,
            winners: result.winners.iter().map(|&i| self.seat_id(i)).collect(),
            pot: result.pot,
            showdown: result.showdown,
            board: result.board.clone(),
            players: self.snapshots(),
        };
        self.observer.on_event(&finished);
        Ok(result)
    }

    fn seat_id(&self, index: usize) -> usize {
        self.table[index].player.seat()
    }

    fn snapshots(&self) -> Vec<PlayerSnapshot> {
        self.table
            .iter()
            .map(|s| PlayerSnapshot {
                seat: s.player.seat(),
                name: s.player.name().to_string(),
                stack: s.player.stack(),
            })
            .collect()
    }
}
