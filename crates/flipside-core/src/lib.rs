//! Flipside - a two-sided shedding card game engine
//!
//! This crate provides the core rules for Flipside, including:
//! - Two-faced cards whose light or dark side governs play
//! - Deck construction and seeded shuffling
//! - The turn state machine with its press-next gate
//! - Card effects, pile recycling and scoring
//! - A built-in opponent strategy
//!
//! # Architecture
//!
//! The engine is synchronous and single-owner. Every mutating command
//! validates before it mutates, then pushes a snapshot to registered
//! observers. A presentation layer drives it through [`Game`] and listens
//! through [`Observer`].
//!
//! # Modules
//!
//! - [`card`]: Colors, ranks, faces and cards
//! - [`deck`]: The 108-card deck
//! - [`player`]: Seats and hands
//! - [`actions`]: Commands as values
//! - [`effects`]: Rank to effect mapping
//! - [`events`]: Snapshots and observers
//! - [`piles`]: Draw/discard piles and recycling
//! - [`game`]: The game state machine
//! - [`bot`]: Opponent strategy

pub mod actions;
pub mod bot;
pub mod card;
pub mod deck;
pub mod effects;
pub mod events;
pub mod game;
pub mod piles;
pub mod player;

// Re-export commonly used types
pub use actions::GameAction;
pub use bot::{choose_action, classify, CardCategory, TurnView};
pub use card::{Card, Color, Face, Rank};
pub use deck::{standard_deck, DECK_SIZE};
pub use effects::{Effect, Penalty};
pub use events::{GameEvent, GameSnapshot, Observer};
pub use game::{Direction, Game, GameError, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS};
pub use player::{Player, PlayerId};
