//! Cards, colors and ranks.
//!
//! Every card carries two printed faces. Which face is in effect depends on
//! the game's polarity (light or dark), and all rule code reads a card through
//! [`Card::face`] so it never has to look at the light/dark fields directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    // Light side
    Red,
    Green,
    Blue,
    Yellow,
    // Dark side
    Teal,
    Pink,
    Purple,
    Orange,
    /// Printed on wild faces
    Wild,
    /// No color chosen yet
    None,
}

impl Color {
    /// The four light colors, in deck order
    pub const LIGHT: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    /// The four dark colors, in the same order as their light counterparts
    pub const DARK: [Color; 4] = [Color::Teal, Color::Pink, Color::Purple, Color::Orange];

    /// The four concrete colors for a polarity
    pub fn palette(dark: bool) -> [Color; 4] {
        if dark {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    /// Color used when a wild face is revealed without a choice being made
    pub fn default_for(dark: bool) -> Color {
        if dark {
            Color::Teal
        } else {
            Color::Red
        }
    }

    /// Fixed dark counterpart of a light color
    pub fn dark_counterpart(&self) -> Option<Color> {
        Self::LIGHT
            .iter()
            .position(|c| c == self)
            .map(|i| Self::DARK[i])
    }

    /// Whether this is one of the eight playable colors
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Color::Wild | Color::None)
    }

    pub fn is_dark(&self) -> bool {
        Self::DARK.contains(self)
    }

    fn label(&self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
            Color::Yellow => "YELLOW",
            Color::Teal => "TEAL",
            Color::Pink => "PINK",
            Color::Purple => "PURPLE",
            Color::Orange => "ORANGE",
            Color::Wild => "WILD",
            Color::None => "NONE",
        }
    }

    /// Parse a color name, case-insensitive
    pub fn from_name(name: &str) -> Option<Color> {
        let upper = name.trim().to_ascii_uppercase();
        Self::LIGHT
            .iter()
            .chain(Self::DARK.iter())
            .find(|c| c.label() == upper)
            .copied()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Card rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Reverse,
    Skip,
    SkipEveryone,
    DrawOne,
    DrawFive,
    /// Light-side wild that makes the next player draw two
    WildDrawTwo,
    Flip,
    Wild,
    /// Dark-side wild that makes the next player draw until the chosen color
    WildDrawColor,
}

impl Rank {
    /// Numeric ranks 1 through 9, in order
    pub const NUMBERS: [Rank; 9] = [
        Rank::One,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
    ];

    pub fn is_wild(&self) -> bool {
        matches!(self, Rank::Wild | Rank::WildDrawTwo | Rank::WildDrawColor)
    }

    /// Face value for numeric ranks
    pub fn number(&self) -> Option<u32> {
        match self {
            Rank::Zero => Some(0),
            Rank::One => Some(1),
            Rank::Two => Some(2),
            Rank::Three => Some(3),
            Rank::Four => Some(4),
            Rank::Five => Some(5),
            Rank::Six => Some(6),
            Rank::Seven => Some(7),
            Rank::Eight => Some(8),
            Rank::Nine => Some(9),
            _ => None,
        }
    }

    /// Penalty points this rank is worth when left in a hand at game end
    pub fn points(&self) -> u32 {
        match self {
            Rank::WildDrawColor => 60,
            Rank::WildDrawTwo => 50,
            Rank::Wild => 40,
            Rank::SkipEveryone => 30,
            Rank::DrawFive | Rank::Flip | Rank::DrawOne | Rank::Skip | Rank::Reverse => 20,
            other => other.number().unwrap_or(0),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Rank::Zero => "ZERO",
            Rank::One => "ONE",
            Rank::Two => "TWO",
            Rank::Three => "THREE",
            Rank::Four => "FOUR",
            Rank::Five => "FIVE",
            Rank::Six => "SIX",
            Rank::Seven => "SEVEN",
            Rank::Eight => "EIGHT",
            Rank::Nine => "NINE",
            Rank::Reverse => "REVERSE",
            Rank::Skip => "SKIP",
            Rank::SkipEveryone => "SKIP_EVERYONE",
            Rank::DrawOne => "DRAW_ONE",
            Rank::DrawFive => "DRAW_FIVE",
            Rank::WildDrawTwo => "WILD_DRAW_TWO",
            Rank::Flip => "FLIP",
            Rank::Wild => "WILD",
            Rank::WildDrawColor => "WILD_DRAW_COLOR",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One printed side of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    pub color: Color,
    pub rank: Rank,
}

impl Face {
    pub fn new(color: Color, rank: Rank) -> Self {
        Self { color, rank }
    }

    pub fn is_wild(&self) -> bool {
        self.rank.is_wild()
    }

    /// Whether this face may be played on `top` while `active` is the color in play
    pub fn matches(&self, top: &Face, active: Color) -> bool {
        self.is_wild() || self.color == active || self.rank == top.rank
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.color == Color::Wild {
            write!(f, "{}", self.rank)
        } else {
            write!(f, "{}-{}", self.color, self.rank)
        }
    }
}

/// A two-sided card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    light: Face,
    dark: Face,
}

impl Card {
    pub fn new(light_color: Color, light_rank: Rank, dark_color: Color, dark_rank: Rank) -> Self {
        Self {
            light: Face::new(light_color, light_rank),
            dark: Face::new(dark_color, dark_rank),
        }
    }

    /// The face in effect for the given polarity
    pub fn face(&self, dark: bool) -> Face {
        if dark {
            self.dark
        } else {
            self.light
        }
    }

    pub fn color(&self, dark: bool) -> Color {
        self.face(dark).color
    }

    pub fn rank(&self, dark: bool) -> Rank {
        self.face(dark).rank
    }

    pub fn is_wild(&self, dark: bool) -> bool {
        self.face(dark).is_wild()
    }

    /// Legality of playing this card on `top` under the given polarity
    pub fn matches(&self, top: &Card, active: Color, dark: bool) -> bool {
        self.face(dark).matches(&top.face(dark), active)
    }

    /// Penalty points of the face in effect
    pub fn points(&self, dark: bool) -> u32 {
        self.rank(dark).points()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.light, self.dark)
    }
}
