//! Translates typed commands into engine calls.

use flipside_core::{Color, Game, GameAction, GameError};
use std::str::FromStr;
use thiserror::Error;

/// A line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(usize),
    Draw,
    Next,
    /// Let the AI act for the current seat
    Ai,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Type a command (help for a list)")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Not a card number: {0}")]
    BadIndex(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Err(CommandError::Empty);
        };

        match word.to_ascii_lowercase().as_str() {
            "play" | "p" => {
                let arg = words.next().unwrap_or("");
                arg.parse()
                    .map(Command::Play)
                    .map_err(|_| CommandError::BadIndex(arg.to_string()))
            }
            "draw" | "d" => Ok(Command::Draw),
            "next" | "n" => Ok(Command::Next),
            "ai" => Ok(Command::Ai),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Asks the player which color a wild card should name
pub trait ColorPrompt {
    /// `None` cancels the play
    fn choose_color(&mut self, dark: bool) -> Option<Color>;
}

/// Result of handling one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The engine accepted the command
    Applied(GameAction),
    /// Nothing was sent to the engine; show this message
    Info(&'static str),
    Quit,
}

pub const HELP: &str = "Commands: play <n>, draw, next, ai, help, quit";

/// Run one command against the game
pub fn handle(
    game: &mut Game,
    command: Command,
    prompt: &mut dyn ColorPrompt,
) -> Result<Reply, GameError> {
    let action = match command {
        Command::Play(index) => {
            if game.peek_card(index).is_none() {
                return Ok(Reply::Info("Invalid card."));
            }
            if game.is_card_wild(index) {
                match prompt.choose_color(game.is_dark()) {
                    Some(color) if color.is_concrete() => GameAction::PlayWild(index, color),
                    _ => return Ok(Reply::Info("Wild play cancelled.")),
                }
            } else {
                GameAction::Play(index)
            }
        }
        Command::Draw => GameAction::Draw,
        Command::Next => GameAction::AdvanceTurn,
        Command::Ai => return game.run_ai_turn().map(Reply::Applied),
        Command::Help => return Ok(Reply::Info(HELP)),
        Command::Quit => return Ok(Reply::Quit),
    };

    game.apply_action(action)?;
    Ok(Reply::Applied(action))
}
