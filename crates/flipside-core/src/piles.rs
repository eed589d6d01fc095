//! Draw and discard piles.

use crate::card::Card;
use crate::deck::shuffle_deck;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Discard pile. Always has a top card once the game is set up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardPile {
    top: Card,
    /// Cards under the top, oldest first
    below: Vec<Card>,
}

impl DiscardPile {
    pub fn new(top: Card) -> Self {
        Self {
            top,
            below: Vec::new(),
        }
    }

    pub fn top(&self) -> &Card {
        &self.top
    }

    pub fn push(&mut self, card: Card) {
        let previous = std::mem::replace(&mut self.top, card);
        self.below.push(previous);
    }

    /// Cards in the pile, top included
    pub(crate) fn len(&self) -> usize {
        self.below.len() + 1
    }

    /// Remove every card except the top
    fn take_below(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.below)
    }
}

/// Both piles together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    /// Top of the pile is the last element
    draw: Vec<Card>,
    discard: DiscardPile,
}

impl Piles {
    pub fn new(draw: Vec<Card>, first_discard: Card) -> Self {
        Self {
            draw,
            discard: DiscardPile::new(first_discard),
        }
    }

    pub fn top(&self) -> &Card {
        self.discard.top()
    }

    pub fn discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    pub fn draw_len(&self) -> usize {
        self.draw.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn total(&self) -> usize {
        self.draw_len() + self.discard_len()
    }

    /// Pop the top draw card, recycling the discard pile first when the
    /// draw pile is empty. `None` when no card is left anywhere but the
    /// discard top.
    pub fn pop_or_recycle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.draw.is_empty() {
            self.recycle(rng);
        }
        self.draw.pop()
    }

    /// Shuffle everything under the discard top into a new draw pile
    fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut back = self.discard.take_below();
        if back.is_empty() {
            return;
        }
        shuffle_deck(&mut back, rng);
        tracing::debug!(cards = back.len(), "recycled discard pile");
        self.draw.extend(back);
    }

    #[cfg(test)]
    pub(crate) fn draw_pile_mut(&mut self) -> &mut Vec<Card> {
        &mut self.draw
    }

    #[cfg(test)]
    pub(crate) fn bury(&mut self, cards: Vec<Card>) {
        self.discard.below.extend(cards);
    }

    #[cfg(test)]
    pub(crate) fn set_top(&mut self, card: Card) {
        self.discard.top = card;
    }
}
