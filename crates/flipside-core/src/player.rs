//! Player state.

use crate::card::Card;
use serde::{Deserialize, Serialize};

/// Player index into the game's seat list
pub type PlayerId = usize;

/// A seat at the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Whether the built-in strategy plays this seat
    pub is_ai: bool,
    /// Cards in display order
    pub hand: Vec<Card>,
}

impl Player {
    pub fn new(id: PlayerId, name: String, is_ai: bool) -> Self {
        Self {
            id,
            name,
            is_ai,
            hand: Vec::new(),
        }
    }

    /// Number of cards in hand
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    pub fn has_empty_hand(&self) -> bool {
        self.hand.is_empty()
    }

    /// Look at a card without removing it
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.hand.get(index)
    }

    /// Add a card to the end of the hand
    pub fn receive(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Remove the card at `index`, keeping the order of the rest
    pub fn take_card(&mut self, index: usize) -> Option<Card> {
        if index < self.hand.len() {
            Some(self.hand.remove(index))
        } else {
            None
        }
    }

    /// Total penalty points left in hand under the given polarity
    pub fn hand_points(&self, dark: bool) -> u32 {
        self.hand.iter().map(|c| c.points(dark)).sum()
    }
}
