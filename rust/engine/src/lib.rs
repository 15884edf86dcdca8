//! # hilo-engine: Blackjack Engine with Hi-Lo Counting
//!
//! A single-player blackjack table against a dealer who stands on 17, with a
//! running Hi-Lo count that only sees cards once they are face up. The
//! engine is a synchronous state machine; presentation layers drive it
//! through its operations and render from snapshots and event lists.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) with count and game values
//! - [`shoe`] - Seeded 52-card shoe with ChaCha20 shuffling
//! - [`hand`] - Hand totals with soft-ace handling
//! - [`count`] - Running Hi-Lo count
//! - [`player`] - Chip ledger and player hand
//! - [`rules`] - Bet validation, dealer policy and legal actions
//! - [`game`] - Round states, outcomes and snapshots
//! - [`events`] - Narrated round events
//! - [`engine`] - The round state machine
//! - [`logger`] - RoundRecord serialization to JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use hilo_engine::engine::RoundEngine;
//! use hilo_engine::game::PlayerAction;
//!
//! let mut engine = RoundEngine::new(1_000, Some(42)).unwrap();
//! engine.start_round(25).unwrap();
//!
//! if engine.player_hand().value() < 12 {
//!     engine.apply(PlayerAction::Hit).unwrap();
//! }
//! if engine.round_in_progress() {
//!     for event in engine.apply(PlayerAction::Stand).unwrap() {
//!         println!("{}", event);
//!     }
//! }
//! println!("running count: {}", engine.running_count());
//! ```
//!
//! ## Deterministic Shoes
//!
//! ```rust
//! use hilo_engine::shoe::Shoe;
//!
//! let mut a = Shoe::new_with_seed(7);
//! let mut b = Shoe::new_with_seed(7);
//! assert_eq!(a.draw(), b.draw());
//! ```

pub mod cards;
pub mod count;
pub mod engine;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
pub mod shoe;
