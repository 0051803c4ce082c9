//! Match engine for the Iterated Prisoner's Dilemma
//!
//! Drives repeated games between pluggable strategies. The crate provides:
//! - The round-by-round match loop and its contract with strategies
//! - Player state: history, reset lifecycle, class-shared genomes
//! - A seeded random stream that makes stochastic strategies reproducible
//! - An introspection channel for strategies that read their opponent
//! - Per-kind classifiers stating what each strategy guarantees
//!
//! Tournament scheduling, scoring tables and presentation live elsewhere.

mod action;
mod classifier;
mod error;
mod game;
mod introspection;
mod player;
mod random;
pub mod registry;
mod strategy;
pub mod strategies;

pub use action::{Action, History, C, D};
pub use classifier::{Classifier, MemoryDepth};
pub use error::MatchError;
pub use game::{run_match, Game, Match, MatchConfig, MatchLength, MatchResult};
pub use introspection::{LOOK_AHEAD_ROUNDS, MAX_INSPECTION_DEPTH};
pub use player::Player;
pub use random::SeededRng;
pub use registry::{classifier_for, reset_shared_state};
pub use strategy::{Inspectable, Strategy, Turn};
