use adaptive_ai::policy::{AdaptivePolicy, PreflopTier};
use adaptive_ai::store::{FileStore, MemoryStore, ParameterStore};
use adaptive_engine::cards::{Card, parse_cards};
use adaptive_engine::engine::TableSeat;
use adaptive_engine::events::{NullObserver, TableEvent};
use adaptive_engine::game::{Game, GameSettings};
use adaptive_engine::player::Player;
use tempfile::TempDir;

fn hole(s: &str) -> [Card; 2] {
    let c = parse_cards(s).unwrap();
    [c[0], c[1]]
}

fn ai_table(stores: &[MemoryStore], stack: u32) -> Vec<TableSeat> {
    stores
        .iter()
        .enumerate()
        .map(|(i, store)| {
            let name = format!("Robot {}", i + 1);
            let policy = AdaptivePolicy::new(name.clone(), Box::new(store.clone()));
            TableSeat::new(Player::new(name, i, stack), Box::new(policy))
        })
        .collect()
}

#[test]
fn suited_ace_king_outranks_seven_deuce() {
    let policy = AdaptivePolicy::new("ai", Box::new(MemoryStore::new()));
    let strong = policy.preflop_tier(hole("As Ks"));
    let weak = policy.preflop_tier(hole("7c 2d"));
    assert!(strong > weak, "{:?} vs {:?}", strong, weak);
    assert_eq!(weak, PreflopTier::Fold);
}

#[test]
fn long_ai_game_runs_without_rejections_and_conserves_chips() {
    let stores: Vec<MemoryStore> = (0..4).map(|_| MemoryStore::new()).collect();
    let settings = GameSettings {
        starting_blind: 20,
        seed: 7,
        max_hands: Some(150),
    };
    let mut game = Game::new(ai_table(&stores, 1_000), settings).unwrap();
    let mut events: Vec<TableEvent> = Vec::new();
    let summary = game.play(&mut events).unwrap();

    let rejected: Vec<&TableEvent> = events
        .iter()
        .filter(|e| matches!(e, TableEvent::ActionRejected { .. }))
        .collect();
    assert!(rejected.is_empty(), "{:?}", rejected);
    assert!(summary.hands_played > 0);
    assert_eq!(summary.final_stacks.iter().map(|(_, s)| s).sum::<u32>(), 4_000);
}

#[test]
fn every_hand_persists_weights_and_keeps_them_positive() {
    let stores: Vec<MemoryStore> = (0..3).map(|_| MemoryStore::new()).collect();
    let settings = GameSettings {
        starting_blind: 10,
        seed: 99,
        max_hands: Some(40),
    };
    let mut game = Game::new(ai_table(&stores, 2_000), settings).unwrap();
    let mut events: Vec<TableEvent> = Vec::new();
    let summary = game.play(&mut events).unwrap();

    for store in &stores {
        assert!(store.save_count() >= 1);
        assert!(store.save_count() as u32 <= summary.hands_played);
        let w = store.saved().unwrap();
        assert!(w.is_valid(), "{:?}", w);
    }
}

#[test]
fn weights_carry_over_between_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("weights.json");
    let settings = GameSettings {
        starting_blind: 20,
        seed: 3,
        max_hands: Some(10),
    };
    let seats = |n: usize| -> Vec<TableSeat> {
        (0..n)
            .map(|i| {
                let name = format!("Robot {}", i + 1);
                let policy = AdaptivePolicy::new(name.clone(), Box::new(FileStore::new(&path)));
                TableSeat::new(Player::new(name, i, 1_000), Box::new(policy))
            })
            .collect()
    };

    let mut first = Game::new(seats(2), settings).unwrap();
    first.play(&mut NullObserver).unwrap();
    assert!(path.exists());
    let saved = FileStore::new(&path).load().unwrap();
    assert!(saved.is_valid());

    let resumed = AdaptivePolicy::new("Robot 1", Box::new(FileStore::new(&path)));
    assert_eq!(*resumed.weights(), saved);
}
