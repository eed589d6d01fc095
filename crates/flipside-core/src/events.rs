//! State snapshots and the observers that receive them.
//!
//! After every mutating command the engine builds a [`GameSnapshot`] and hands
//! a [`GameEvent`] to each registered [`Observer`], synchronously and in
//! registration order.

use crate::card::{Card, Color};
use serde::{Deserialize, Serialize};
use std::sync::mpsc;

/// What a presentation layer needs to draw the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Copy of the current player's hand
    pub hand: Vec<Card>,
    /// Top discard as text, with the active color in brackets once set
    pub top_text: String,
    pub current_player: String,
    pub is_dark: bool,
    pub current_is_ai: bool,
    /// Last status message
    pub info: String,
    pub must_press_next: bool,
    pub active_color: Color,
}

/// Notifications pushed to observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// State changed
    Update(GameSnapshot),
    /// A player emptied their hand
    GameOver { message: String },
}

/// Receives engine notifications
///
/// Observers must be `Send` so a [`crate::Game`] can move between threads
/// behind a caller's lock.
pub trait Observer: Send {
    fn notify(&mut self, event: &GameEvent);
}

impl Observer for mpsc::Sender<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        // A dropped receiver just stops listening
        let _ = self.send(event.clone());
    }
}

/// Registered observers
#[derive(Default)]
pub struct ObserverList {
    observers: Vec<Box<dyn Observer>>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer and deliver `current` to it right away
    pub fn register(&mut self, mut observer: Box<dyn Observer>, current: GameSnapshot) {
        observer.notify(&GameEvent::Update(current));
        self.observers.push(observer);
    }

    /// Fan an event out to every observer
    pub fn broadcast(&mut self, event: &GameEvent) {
        for observer in &mut self.observers {
            observer.notify(event);
        }
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("len", &self.observers.len())
            .finish()
    }
}
