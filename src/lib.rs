//! holdem-duel: heads-up Texas Hold'em against a scripted opponent
//!
//! Goals:
//! - One hand at a time, driven through a small engine API (`engine::HoldemEngine`)
//! - Deterministic with a seed, so every hand can be replayed in tests
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_duel::evaluator::{evaluate, Category};
//! use holdem_duel::hand::{Board, HoleCards};
//!
//! let hole: HoleCards = "As Ah".parse().unwrap();
//! let board: Board = "Kc Qd Jh 3s 2c".parse().unwrap();
//!
//! let rank = evaluate(&hole, &board).unwrap();
//! assert_eq!(rank.category, Category::Pair);
//! ```
//!
//! ## Quick start: play a hand
//! ```
//! use holdem_duel::agents::Action;
//! use holdem_duel::config::TableConfig;
//! use holdem_duel::game::Game;
//!
//! let mut game = Game::new(TableConfig::default().with_seed(7)).unwrap();
//! game.start_hand(1000, 1000).unwrap();
//! let snap = game.submit_human_action(Action::Fold).unwrap();
//! assert_eq!(snap.human_stack + snap.opponent_stack, 2000);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin holdem-duel
//! ```

pub mod agents;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod history;
pub mod snapshot;
pub mod table;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
