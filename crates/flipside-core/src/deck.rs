//! Deck construction.
//!
//! Building the deck is pure; randomness only enters through [`shuffle_deck`].

use crate::card::{Card, Color, Rank};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of cards in a full deck
pub const DECK_SIZE: usize = 108;

/// Plain wild cards (wild on both faces)
const WILD_COUNT: usize = 2;

/// Wild draw two / wild draw color cards
const WILD_DRAW_COUNT: usize = 2;

/// Create the full two-sided deck (108 cards), unshuffled
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);

    for (light, dark) in Color::LIGHT.into_iter().zip(Color::DARK) {
        let pair = |light_rank: Rank, dark_rank: Rank| Card::new(light, light_rank, dark, dark_rank);

        // One zero
        deck.push(pair(Rank::Zero, Rank::Zero));

        // Two of each 1-9
        for rank in Rank::NUMBERS {
            deck.extend(std::iter::repeat(pair(rank, rank)).take(2));
        }

        // Action pairs
        deck.extend(std::iter::repeat(pair(Rank::Skip, Rank::SkipEveryone)).take(2));
        deck.extend(std::iter::repeat(pair(Rank::Reverse, Rank::Reverse)).take(2));
        deck.push(pair(Rank::DrawOne, Rank::DrawFive));
        deck.extend(std::iter::repeat(pair(Rank::Flip, Rank::Flip)).take(2));
    }

    deck.extend(
        std::iter::repeat(Card::new(Color::Wild, Rank::Wild, Color::Wild, Rank::Wild))
            .take(WILD_COUNT),
    );
    deck.extend(
        std::iter::repeat(Card::new(
            Color::Wild,
            Rank::WildDrawTwo,
            Color::Wild,
            Rank::WildDrawColor,
        ))
        .take(WILD_DRAW_COUNT),
    );

    deck
}

/// Shuffle a deck
pub fn shuffle_deck<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}
