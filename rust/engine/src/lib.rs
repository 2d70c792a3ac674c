//! # adaptive-engine: Multi-Seat Hold'em Table
//!
//! A deterministic No-Limit Texas Hold'em engine for two to ten seats with
//! escalating blinds and elimination. Seats are driven through the [`seat::Seat`]
//! trait so automated policies and human input are interchangeable, and
//! progress is published as [`events::TableEvent`]s.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seeded deck shuffling with ChaCha20
//! - [`hand`] - Hand evaluation over one to seven cards
//! - [`rules`] - Legal moves, action validation and the blind schedule
//! - [`engine`] - The per-hand round state machine
//! - [`game`] - Multi-hand game loop, eliminations and button rotation
//! - [`seat`] - The seat controller contract
//! - [`events`] - Table events and observers
//! - [`logger`] - JSONL hand history
//! - [`player`] - Player stacks and actions
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use adaptive_engine::cards::parse_cards;
//! use adaptive_engine::hand::{evaluate_hand, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let strength = evaluate_hand(&cards).unwrap();
//! assert_eq!(strength.category, Category::StraightFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use adaptive_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.deal_n(5).unwrap(), b.deal_n(5).unwrap());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
pub mod seat;

pub use engine::Street;
