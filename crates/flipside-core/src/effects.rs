//! Card effect resolution.
//!
//! Resolving a played card is split in two: [`resolve`] maps the active rank
//! to a declarative [`Effect`], and the engine applies that descriptor to the
//! state it owns. Nothing here touches hands or piles.

use crate::card::Rank;
use serde::{Deserialize, Serialize};

/// Cards the victim must take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Penalty {
    None,
    /// Draw a fixed number of cards
    Cards(usize),
    /// Draw until a card showing the active color comes up (inclusive)
    UntilActiveColor,
}

/// What a played card does to the turn state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// Penalty for the next seat in the current direction
    pub penalty: Penalty,
    /// Seats to move on the next advance (0 = same seat again)
    pub steps_after: usize,
    /// Flip the turn direction
    pub reverse: bool,
    /// Toggle light/dark
    pub flip_polarity: bool,
}

impl Effect {
    const PLAIN: Effect = Effect {
        penalty: Penalty::None,
        steps_after: 1,
        reverse: false,
        flip_polarity: false,
    };
}

/// Map a played rank to its effect
pub fn resolve(rank: Rank) -> Effect {
    match rank {
        Rank::Reverse => Effect {
            reverse: true,
            ..Effect::PLAIN
        },
        Rank::Skip => Effect {
            steps_after: 2,
            ..Effect::PLAIN
        },
        Rank::SkipEveryone => Effect {
            steps_after: 0,
            ..Effect::PLAIN
        },
        Rank::DrawOne => draw(Penalty::Cards(1)),
        Rank::DrawFive => draw(Penalty::Cards(5)),
        Rank::WildDrawTwo => draw(Penalty::Cards(2)),
        Rank::WildDrawColor => draw(Penalty::UntilActiveColor),
        Rank::Flip => Effect {
            flip_polarity: true,
            ..Effect::PLAIN
        },
        _ => Effect::PLAIN,
    }
}

/// Status line for this effect, if it has one
pub fn describe(rank: Rank) -> Option<&'static str> {
    match rank {
        Rank::Reverse => Some("Direction reversed."),
        Rank::Skip => Some("Skip! The next player is skipped."),
        Rank::SkipEveryone => Some("Skip everyone! Play again."),
        Rank::DrawOne => Some("Draw One! Next player draws 1 and is skipped."),
        Rank::DrawFive => Some("Draw Five! Next player draws 5 and is skipped."),
        Rank::WildDrawTwo => Some("Wild Draw Two! Next player draws 2 and is skipped."),
        Rank::WildDrawColor => {
            Some("Wild Draw Color! Next player draws until the color comes up.")
        }
        Rank::Flip => Some("Flip! The deck turns over."),
        _ => None,
    }
}

fn draw(penalty: Penalty) -> Effect {
    Effect {
        penalty,
        steps_after: 2,
        ..Effect::PLAIN
    }
}
