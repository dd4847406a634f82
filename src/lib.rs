//! holdem-engine: Texas Hold'em rules engine
//!
//! - Best-hand evaluation for 2..=7 cards, with a total order over hands
//! - Betting-round state machine: blinds, turn order, stage advancement
//! - Side-pot settlement when players are all-in for different amounts
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::evaluator::{evaluate, Category};
//! use holdem_engine::hand::HoleCards;
//!
//! let hole: HoleCards = "Ah Kh".parse().unwrap();
//! let community = parse_cards("Qh Jh 10h").unwrap();
//! let eval = evaluate(&hole, &community).unwrap();
//! assert_eq!(eval.category, Category::RoyalFlush);
//! assert_eq!(eval.tiebreak(), &[14]);
//! ```
//!
//! ## Playing a round
//! ```
//! use holdem_engine::agents::{AgentTable, BotAgent, Progress, Style};
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::game::GameSession;
//!
//! let config = TableConfig { player_count: 3, ..TableConfig::default() };
//! let mut session = GameSession::with_seed(config.clone(), 42).unwrap();
//! let mut agents = AgentTable::for_seats(config.table_size);
//! for seat in config.seating_order() {
//!     agents.set_agent(seat, Some(Box::new(BotAgent::new(Style::CheckCall).with_seed(1))));
//! }
//! session.start_round().unwrap();
//! let progress = agents.progress(&mut session).unwrap();
//! assert!(matches!(progress, Progress::RoundComplete(_)));
//! ```
//!
//! ## CLI
//! Play bot rounds from the command line with:
//! ```sh
//! cargo run --bin holdem -- --rounds 10 --seed 7
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod events;
pub mod game;
pub mod hand;
pub mod settlement;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
