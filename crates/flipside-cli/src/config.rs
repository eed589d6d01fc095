//! Environment configuration for the terminal game.

use flipside_core::{MAX_PLAYERS, MIN_PLAYERS};
use thiserror::Error;

/// Default table when `FLIPSIDE_PLAYERS` is unset
const DEFAULT_PLAYERS: &str = "You,bot:Robo";

/// Prefix marking a seat for the built-in strategy
const BOT_PREFIX: &str = "bot:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("FLIPSIDE_PLAYERS must name {MIN_PLAYERS}-{MAX_PLAYERS} players, got {0}")]
    PlayerCount(usize),

    #[error("Empty player name in FLIPSIDE_PLAYERS")]
    EmptyName,

    #[error("FLIPSIDE_SEED is not a number: {0}")]
    Seed(String),
}

/// One seat at the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub name: String,
    pub is_ai: bool,
}

/// Settings for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seats: Vec<Seat>,
    pub seed: Option<u64>,
    /// Print snapshots as JSON lines instead of text
    pub json: bool,
}

impl Config {
    /// Read `FLIPSIDE_PLAYERS`, `FLIPSIDE_SEED` and `FLIPSIDE_JSON`
    pub fn from_env() -> Result<Self, ConfigError> {
        let players = std::env::var("FLIPSIDE_PLAYERS").ok();
        let seed = std::env::var("FLIPSIDE_SEED").ok();
        let json = std::env::var("FLIPSIDE_JSON").ok();
        Self::parse(players.as_deref(), seed.as_deref(), json.as_deref())
    }

    pub fn parse(
        players: Option<&str>,
        seed: Option<&str>,
        json: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let seats = players
            .unwrap_or(DEFAULT_PLAYERS)
            .split(',')
            .map(parse_seat)
            .collect::<Result<Vec<_>, _>>()?;

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&seats.len()) {
            return Err(ConfigError::PlayerCount(seats.len()));
        }

        let seed = seed
            .map(|s| s.trim().parse().map_err(|_| ConfigError::Seed(s.to_string())))
            .transpose()?;

        Ok(Self {
            seats,
            seed,
            json: json.map(|v| v.trim() == "1").unwrap_or(false),
        })
    }

    pub fn names(&self) -> Vec<String> {
        self.seats.iter().map(|s| s.name.clone()).collect()
    }

    pub fn ai_flags(&self) -> Vec<bool> {
        self.seats.iter().map(|s| s.is_ai).collect()
    }
}

fn parse_seat(entry: &str) -> Result<Seat, ConfigError> {
    let entry = entry.trim();
    let (name, is_ai) = match entry.strip_prefix(BOT_PREFIX) {
        Some(name) => (name.trim(), true),
        None => (entry, false),
    };
    if name.is_empty() {
        return Err(ConfigError::EmptyName);
    }
    Ok(Seat {
        name: name.to_string(),
        is_ai,
    })
}
