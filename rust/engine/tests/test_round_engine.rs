use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use adaptive_engine::cards::parse_cards;
use adaptive_engine::deck::Deck;
use adaptive_engine::engine::{play_hand, HandSetup, TableSeat};
use adaptive_engine::errors::GameError;
use adaptive_engine::events::{NullObserver, TableEvent};
use adaptive_engine::player::{Player, PlayerAction};
use adaptive_engine::seat::{HandOutcome, Seat, SeatView};

struct Passive;

impl Seat for Passive {
    fn choose_action(&mut self, view: &SeatView<'_>) -> PlayerAction {
        match view.legal.call_amount() {
            Some(n) => PlayerAction::Call(n),
            None => PlayerAction::Check,
        }
    }
    fn kind(&self) -> &str {
        "passive"
    }
}

/// Always raises as much as allowed, otherwise calls.
struct Shover;

impl Seat for Shover {
    fn choose_action(&mut self, view: &SeatView<'_>) -> PlayerAction {
        if let Some(b) = view.legal.raise_bounds() {
            return PlayerAction::Raise(b.max);
        }
        match view.legal.call_amount() {
            Some(n) => PlayerAction::Call(n),
            None => PlayerAction::Check,
        }
    }
    fn kind(&self) -> &str {
        "shover"
    }
}

/// Insists on checking, which is illegal when facing a bet.
struct Stubborn {
    automated: bool,
    asked: Arc<AtomicUsize>,
    rejected: Arc<AtomicUsize>,
    outcomes: Arc<AtomicUsize>,
}

impl Seat for Stubborn {
    fn choose_action(&mut self, _view: &SeatView<'_>) -> PlayerAction {
        self.asked.fetch_add(1, Ordering::SeqCst);
        PlayerAction::Check
    }
    fn action_rejected(&mut self, _error: &GameError) {
        self.rejected.fetch_add(1, Ordering::SeqCst);
    }
    fn end_hand(&mut self, _outcome: &HandOutcome) {
        self.outcomes.fetch_add(1, Ordering::SeqCst);
    }
    fn is_automated(&self) -> bool {
        self.automated
    }
    fn kind(&self) -> &str {
        "stubborn"
    }
}

fn seat(i: usize, stack: u32, controller: Box<dyn Seat>) -> TableSeat {
    TableSeat::new(Player::new(format!("p{}", i), i, stack), controller)
}

fn stubborn(automated: bool) -> (Stubborn, [Arc<AtomicUsize>; 3]) {
    let counters = [
        Arc::new(AtomicUsize::new(0)),
        Arc::new(AtomicUsize::new(0)),
        Arc::new(AtomicUsize::new(0)),
    ];
    let s = Stubborn {
        automated,
        asked: counters[0].clone(),
        rejected: counters[1].clone(),
        outcomes: counters[2].clone(),
    };
    (s, counters)
}

fn stacks(table: &[TableSeat]) -> Vec<u32> {
    table.iter().map(|s| s.player.stack()).collect()
}

#[test]
fn chips_are_conserved_after_every_action() {
    let mut table = vec![
        seat(0, 300, Box::new(Shover)),
        seat(1, 800, Box::new(Passive)),
        seat(2, 500, Box::new(Shover)),
        seat(3, 120, Box::new(Passive)),
    ];
    let total: u32 = stacks(&table).iter().sum();
    let mut deck = Deck::new_with_seed(5);
    let mut events: Vec<TableEvent> = Vec::new();

    for hand in 1..=3 {
        if table.iter().any(|s| s.player.is_busted()) {
            break;
        }
        let setup = HandSetup {
            hand_number: hand,
            blind: 20,
            big_blind_index: 2,
        };
        play_hand(&mut table, &mut deck, setup, &mut events).unwrap();
        assert_eq!(stacks(&table).iter().sum::<u32>(), total);
    }

    let mut last_pot = 0u32;
    for event in &events {
        match event {
            TableEvent::HandStarted { .. } => last_pot = 0,
            TableEvent::ActionTaken { pot, .. } => {
                assert!(*pot >= last_pot, "pot never shrinks mid-hand");
                last_pot = *pot;
            }
            _ => {}
        }
    }
}

#[test]
fn everyone_folding_awards_the_pot_without_showdown() {
    let (folder, _) = stubborn(true);
    let (other, _) = stubborn(true);
    // heads-up: the dealer posts the small blind and acts first preflop
    let mut table = vec![seat(0, 100, Box::new(folder)), seat(1, 100, Box::new(other))];
    let mut deck = Deck::new_with_seed(2);
    let setup = HandSetup {
        hand_number: 1,
        blind: 10,
        big_blind_index: 1,
    };
    let result = play_hand(&mut table, &mut deck, setup, &mut NullObserver).unwrap();
    assert!(!result.showdown);
    assert_eq!(result.winners, vec![1]);
    assert_eq!(result.pot, 15);
    assert_eq!(stacks(&table), vec![95, 105]);
}

#[test]
fn automated_seat_is_folded_on_first_illegal_action() {
    let (seat0, [asked, rejected, outcomes]) = stubborn(true);
    let mut table = vec![seat(0, 100, Box::new(seat0)), seat(1, 100, Box::new(Passive))];
    let mut deck = Deck::new_with_seed(9);
    let mut events: Vec<TableEvent> = Vec::new();
    let setup = HandSetup {
        hand_number: 1,
        blind: 10,
        big_blind_index: 1,
    };
    play_hand(&mut table, &mut deck, setup, &mut events).unwrap();

    assert_eq!(asked.load(Ordering::SeqCst), 1);
    assert_eq!(rejected.load(Ordering::SeqCst), 0);
    assert_eq!(outcomes.load(Ordering::SeqCst), 1);
    let rejections = events
        .iter()
        .filter(|e| matches!(e, TableEvent::ActionRejected { seat: 0, .. }))
        .count();
    assert_eq!(rejections, 1);
    assert!(events.iter().any(|e| matches!(
        e,
        TableEvent::ActionTaken {
            seat: 0,
            action: PlayerAction::Fold,
            ..
        }
    )));
}

#[test]
fn human_seat_is_reprompted_then_folded() {
    let (seat0, [asked, rejected, _]) = stubborn(false);
    let mut table = vec![seat(0, 100, Box::new(seat0)), seat(1, 100, Box::new(Passive))];
    let mut deck = Deck::new_with_seed(9);
    let setup = HandSetup {
        hand_number: 1,
        blind: 10,
        big_blind_index: 1,
    };
    let result = play_hand(&mut table, &mut deck, setup, &mut NullObserver).unwrap();

    assert_eq!(asked.load(Ordering::SeqCst), adaptive_engine::engine::MAX_PROMPTS);
    assert_eq!(rejected.load(Ordering::SeqCst), adaptive_engine::engine::MAX_PROMPTS - 1);
    assert_eq!(result.winners, vec![1]);
}

#[test]
fn tied_hands_split_with_odd_chip_to_first_seat_after_dealer() {
    // dealer 0, small blind 1, big blind 2; deal starts at seat 1
    let order = parse_cards("Ac Ad Qc 3d 4c 3h 9c Ks Kd 7c 9d 7h 9h 2s").unwrap();
    let mut deck = Deck::stacked(order);
    let mut table = vec![
        seat(0, 100, Box::new(Passive)),
        seat(1, 100, Box::new(Passive)),
        seat(2, 100, Box::new(Passive)),
    ];
    let mut events: Vec<TableEvent> = Vec::new();
    let setup = HandSetup {
        hand_number: 1,
        blind: 5,
        big_blind_index: 2,
    };
    let result = play_hand(&mut table, &mut deck, setup, &mut events).unwrap();

    assert!(result.showdown);
    assert_eq!(result.pot, 15);
    assert_eq!(result.winners, vec![1, 2]);
    assert_eq!(stacks(&table), vec![95, 103, 102]);
    assert_eq!(result.board, parse_cards("Ks Kd 7c 7h 2s").unwrap());
}

#[test]
fn short_big_blind_goes_all_in_and_can_win_the_whole_pot() {
    // heads-up, dealer 0 posts the small blind; seat 1 only has 6 chips
    let order = parse_cards("As 7d Ad 2c 9c Ah Kc 4s 9d 8c 9h Jd").unwrap();
    let mut deck = Deck::stacked(order);
    let mut table = vec![seat(0, 100, Box::new(Passive)), seat(1, 6, Box::new(Passive))];
    let setup = HandSetup {
        hand_number: 1,
        blind: 20,
        big_blind_index: 1,
    };
    let result = play_hand(&mut table, &mut deck, setup, &mut NullObserver).unwrap();

    // seat 1 holds three aces
    assert_eq!(result.winners, vec![1]);
    assert_eq!(result.pot, 16);
    assert_eq!(stacks(&table), vec![90, 16]);
}

#[test]
fn raises_never_exceed_what_opponents_can_match() {
    let mut table = vec![
        seat(0, 1_000, Box::new(Shover)),
        seat(1, 50, Box::new(Passive)),
    ];
    let mut deck = Deck::new_with_seed(3);
    let mut events: Vec<TableEvent> = Vec::new();
    let setup = HandSetup {
        hand_number: 1,
        blind: 10,
        big_blind_index: 1,
    };
    play_hand(&mut table, &mut deck, setup, &mut events).unwrap();
    let pot = events
        .iter()
        .find_map(|e| match e {
            TableEvent::HandFinished { pot, .. } => Some(*pot),
            _ => None,
        })
        .unwrap();
    assert_eq!(pot, 100);
    assert_eq!(stacks(&table).iter().sum::<u32>(), 1_050);
}

#[test]
fn stacks_too_large_for_one_pot_are_refused_before_any_chips_move() {
    let mut table = vec![
        seat(0, 2_000_000_000, Box::new(Shover)),
        seat(1, 2_000_000_000, Box::new(Shover)),
        seat(2, 2_000_000_000, Box::new(Shover)),
    ];
    let setup = HandSetup {
        hand_number: 1,
        blind: 20,
        big_blind_index: 2,
    };
    let result = play_hand(&mut table, &mut Deck::new_with_seed(1), setup, &mut NullObserver);
    assert_eq!(result, Err(GameError::TooManyChips(6_000_000_000)));
    assert_eq!(stacks(&table), vec![2_000_000_000; 3]);

    // exactly u32::MAX in play still fits
    let mut table = vec![
        seat(0, u32::MAX - 1, Box::new(Shover)),
        seat(1, 1, Box::new(Shover)),
    ];
    let setup = HandSetup {
        hand_number: 1,
        blind: 2,
        big_blind_index: 1,
    };
    play_hand(&mut table, &mut Deck::new_with_seed(1), setup, &mut NullObserver).unwrap();
    assert_eq!(stacks(&table).iter().map(|&s| u64::from(s)).sum::<u64>(), u64::from(u32::MAX));
}
