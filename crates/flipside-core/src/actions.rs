//! Commands a seat can issue.

use crate::card::Color;
use serde::{Deserialize, Serialize};

/// All mutating commands the engine accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Play a non-wild (or already colored) card from hand
    Play(usize),
    /// Play a wild card and name the color in play
    PlayWild(usize, Color),
    /// Draw one card
    Draw,
    /// Pass control to the next seat after an action
    AdvanceTurn,
}
