//! Core game state machine.
//!
//! This module contains the `Game` engine: setup, the four turn commands,
//! card effects, the AI trigger and end-of-game scoring.

use crate::actions::GameAction;
use crate::bot::{self, TurnView};
use crate::card::{Card, Color, Face};
use crate::deck::{shuffle_deck, standard_deck};
use crate::effects::{self, Effect, Penalty};
use crate::events::{GameEvent, GameSnapshot, Observer, ObserverList};
use crate::piles::Piles;
use crate::player::{Player, PlayerId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Cards dealt to each player at the start
pub const HAND_SIZE: usize = 7;

/// Fewest seats a game can have
pub const MIN_PLAYERS: usize = 2;

/// Most seats a game can have
pub const MAX_PLAYERS: usize = 4;

/// Errors that can occur when issuing commands
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Number of players must be 2-4, got {0}")]
    InvalidPlayerCount(usize),

    #[error("Expected {expected} players, got {names} names and {flags} AI flags")]
    PlayerInfoMismatch {
        expected: usize,
        names: usize,
        flags: usize,
    },

    #[error("Press next to continue.")]
    MustAdvanceTurn,

    #[error("You must perform an action first.")]
    ActionRequired,

    #[error("You cannot play {card} on {top}.")]
    IllegalPlay { card: Face, top: Face },

    #[error("No card at hand position {0}")]
    NoSuchCard(usize),

    #[error("A color must be chosen for this card")]
    ColorRequired,

    #[error("{0} is not a color in play")]
    InvalidColor(Color),

    #[error("Current player is not controlled by the AI")]
    NotAiTurn,

    #[error("Game is over")]
    GameOver,
}

/// Seating direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(&self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// The complete game
pub struct Game {
    players: Vec<Player>,
    piles: Piles,
    /// Index of the player to act
    current: PlayerId,
    direction: Direction,
    /// Color the next play must match
    active_color: Color,
    /// Dark faces are in effect
    is_dark: bool,
    /// An action was taken and the turn must be advanced
    must_press_next: bool,
    /// Seats to move on the next advance
    pending_steps: usize,
    /// Last status message
    info: String,
    /// Winner and their score once the game is over
    outcome: Option<(PlayerId, u32)>,
    rng: StdRng,
    observers: ObserverList,
}

impl Game {
    /// Create a new game with an entropy-seeded random source
    pub fn new(
        player_count: usize,
        names: Vec<String>,
        ai_flags: Vec<bool>,
    ) -> Result<Self, GameError> {
        Self::with_rng(player_count, names, ai_flags, StdRng::from_entropy())
    }

    /// Create a reproducible game
    pub fn with_seed(
        player_count: usize,
        names: Vec<String>,
        ai_flags: Vec<bool>,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::with_rng(player_count, names, ai_flags, StdRng::seed_from_u64(seed))
    }

    /// Create a game drawing all shuffles from `rng`
    pub fn with_rng(
        player_count: usize,
        names: Vec<String>,
        ai_flags: Vec<bool>,
        mut rng: StdRng,
    ) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(GameError::InvalidPlayerCount(player_count));
        }
        if names.len() != player_count || ai_flags.len() != player_count {
            return Err(GameError::PlayerInfoMismatch {
                expected: player_count,
                names: names.len(),
                flags: ai_flags.len(),
            });
        }

        let mut players: Vec<Player> = names
            .into_iter()
            .zip(ai_flags)
            .enumerate()
            .map(|(i, (name, is_ai))| Player::new(i, name, is_ai))
            .collect();

        let mut deck = standard_deck();
        shuffle_deck(&mut deck, &mut rng);

        // Round-robin deal from the top
        for _ in 0..HAND_SIZE {
            for player in &mut players {
                if let Some(card) = deck.pop() {
                    player.receive(card);
                }
            }
        }

        let first = deck
            .pop()
            .expect("a full deck always has cards left after the deal");
        let face = first.face(false);
        let active_color = if face.is_wild() || !face.color.is_concrete() {
            Color::default_for(false)
        } else {
            face.color
        };
        let info = format!(
            "First card on top is {}. {}, it's your turn.",
            face, players[0].name
        );

        info!(players = player_count, first = %face, "game started");

        Ok(Self {
            players,
            piles: Piles::new(deck, first),
            current: 0,
            direction: Direction::Forward,
            active_color,
            is_dark: false,
            must_press_next: false,
            pending_steps: 1,
            info,
            outcome: None,
            rng,
            observers: ObserverList::new(),
        })
    }

    // ==================== Queries ====================

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn current_player_id(&self) -> PlayerId {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn must_press_next(&self) -> bool {
        self.must_press_next
    }

    pub fn pending_steps(&self) -> usize {
        self.pending_steps
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn top_card(&self) -> Card {
        *self.piles.top()
    }

    pub fn draw_pile_len(&self) -> usize {
        self.piles.draw_len()
    }

    pub fn discard_pile_len(&self) -> usize {
        self.piles.discard_len()
    }

    /// Cards across both piles and every hand
    pub fn total_cards(&self) -> usize {
        self.piles.total() + self.players.iter().map(Player::hand_size).sum::<usize>()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn winner(&self) -> Option<&Player> {
        self.outcome.and_then(|(id, _)| self.players.get(id))
    }

    pub fn final_score(&self) -> Option<u32> {
        self.outcome.map(|(_, score)| score)
    }

    /// A card in the current player's hand
    pub fn peek_card(&self, index: usize) -> Option<Card> {
        self.current_player().card(index).copied()
    }

    /// Whether the current player's card at `index` is wild right now
    pub fn is_card_wild(&self, index: usize) -> bool {
        self.peek_card(index)
            .map(|card| card.is_wild(self.is_dark))
            .unwrap_or(false)
    }

    /// Hand positions the current player could legally play
    pub fn valid_plays(&self) -> Vec<usize> {
        if self.must_press_next || self.is_finished() {
            return Vec::new();
        }
        let top = self.top_card();
        self.current_player()
            .hand
            .iter()
            .enumerate()
            .filter(|(_, card)| card.matches(&top, self.active_color, self.is_dark))
            .map(|(i, _)| i)
            .collect()
    }

    /// Penalty points left in every hand
    pub fn score(&self) -> u32 {
        self.players.iter().map(|p| p.hand_points(self.is_dark)).sum()
    }

    /// Build the snapshot observers receive
    pub fn snapshot(&self) -> GameSnapshot {
        let player = self.current_player();
        let mut top_text = self.top_face().to_string();
        if self.active_color != Color::None {
            top_text.push_str(&format!(" [{}]", self.active_color));
        }

        GameSnapshot {
            hand: player.hand.clone(),
            top_text,
            current_player: player.name.clone(),
            is_dark: self.is_dark,
            current_is_ai: player.is_ai,
            info: self.info.clone(),
            must_press_next: self.must_press_next,
            active_color: self.active_color,
        }
    }

    // ==================== Observers ====================

    /// Add an observer; it receives the current snapshot immediately
    pub fn register_observer(&mut self, observer: Box<dyn Observer>) {
        let snapshot = self.snapshot();
        self.observers.register(observer, snapshot);
    }

    fn notify(&mut self) {
        let event = GameEvent::Update(self.snapshot());
        self.observers.broadcast(&event);
    }

    // ==================== Commands ====================

    /// Apply any command
    pub fn apply_action(&mut self, action: GameAction) -> Result<(), GameError> {
        match action {
            GameAction::Play(index) => self.play(index),
            GameAction::PlayWild(index, color) => self.play_wild(index, color),
            GameAction::Draw => self.draw(),
            GameAction::AdvanceTurn => self.advance_turn(),
        }
    }

    /// Play the card at `index` from the current player's hand
    pub fn play(&mut self, index: usize) -> Result<(), GameError> {
        self.ensure_awaiting_action()?;

        let card = self
            .current_player()
            .card(index)
            .copied()
            .ok_or(GameError::NoSuchCard(index))?;
        let face = card.face(self.is_dark);
        let top = self.top_face();

        if !face.matches(&top, self.active_color) {
            return Err(GameError::IllegalPlay { card: face, top });
        }
        if !face.color.is_concrete() {
            return Err(GameError::ColorRequired);
        }

        self.place(index, face.color)
    }

    /// Play the wild card at `index`, naming the color in play
    pub fn play_wild(&mut self, index: usize, color: Color) -> Result<(), GameError> {
        self.ensure_awaiting_action()?;

        if self.current_player().card(index).is_none() {
            return Err(GameError::NoSuchCard(index));
        }
        if !Color::palette(self.is_dark).contains(&color) {
            return Err(GameError::InvalidColor(color));
        }

        self.place(index, color)
    }

    /// The current player draws one card
    pub fn draw(&mut self) -> Result<(), GameError> {
        self.ensure_awaiting_action()?;

        let name = self.current_player().name.clone();
        match self.piles.pop_or_recycle(&mut self.rng) {
            Some(card) => {
                self.players[self.current].receive(card);
                self.info = format!("{name} drew 1 card. Press Next to continue.");
            }
            None => {
                warn!(player = %name, "no card left to draw");
                self.info = format!("{name} could not draw, no cards left. Press Next to continue.");
            }
        }

        debug!(player = %name, "draw");
        self.must_press_next = true;
        self.notify();
        Ok(())
    }

    /// Move to the next seat after an action
    pub fn advance_turn(&mut self) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        if !self.must_press_next {
            return Err(GameError::ActionRequired);
        }

        self.current = self.seat_at(self.pending_steps);
        self.must_press_next = false;
        self.pending_steps = 1;
        self.info = format!("{}, your turn.", self.current_player().name);

        debug!(current = self.current, "turn advanced");
        self.notify();
        Ok(())
    }

    /// Let the built-in strategy act for the current AI player
    pub fn run_ai_turn(&mut self) -> Result<GameAction, GameError> {
        self.ensure_in_progress()?;
        if !self.current_player().is_ai {
            return Err(GameError::NotAiTurn);
        }

        let view = TurnView {
            hand: &self.players[self.current].hand,
            top: *self.piles.top(),
            active_color: self.active_color,
            is_dark: self.is_dark,
            must_press_next: self.must_press_next,
        };
        let action = bot::choose_action(&view, &mut self.rng);

        debug!(?action, player = self.current, "ai turn");
        self.apply_action(action)?;
        Ok(action)
    }

    // ==================== Helper Methods ====================

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    fn ensure_awaiting_action(&self) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        if self.must_press_next {
            return Err(GameError::MustAdvanceTurn);
        }
        Ok(())
    }

    fn top_face(&self) -> Face {
        self.piles.top().face(self.is_dark)
    }

    /// Seat `steps` places away in the current direction
    fn seat_at(&self, steps: usize) -> PlayerId {
        let n = self.players.len() as isize;
        let offset = self.direction.sign() * steps as isize;
        (self.current as isize + offset).rem_euclid(n) as PlayerId
    }

    /// Move a validated card to the discard pile and resolve it
    fn place(&mut self, index: usize, color: Color) -> Result<(), GameError> {
        let card = self.players[self.current]
            .take_card(index)
            .ok_or(GameError::NoSuchCard(index))?;
        let face = card.face(self.is_dark);

        self.piles.discard(card);
        self.active_color = color;

        let effect = effects::resolve(face.rank);
        debug!(player = self.current, card = %face, ?effect, "card played");
        self.apply_effect(effect);

        let name = &self.players[self.current].name;
        let mut message = if face.is_wild() {
            format!("{name} played {face} and set color to {color}.")
        } else {
            format!("{name} played {face}.")
        };
        if let Some(line) = effects::describe(face.rank) {
            message.push(' ');
            message.push_str(line);
        }
        self.finish_play(message);
        Ok(())
    }

    fn apply_effect(&mut self, effect: Effect) {
        if effect.reverse {
            self.direction = self.direction.reversed();
        }

        let victim = self.seat_at(1);
        match effect.penalty {
            Penalty::None => {}
            Penalty::Cards(count) => {
                let drawn = self.deal_to(victim, count);
                if drawn < count {
                    warn!(victim, drawn, wanted = count, "piles exhausted during penalty");
                }
            }
            Penalty::UntilActiveColor => self.draw_until_color(victim),
        }

        if effect.flip_polarity {
            self.flip();
        }

        self.pending_steps = effect.steps_after;
    }

    /// Give up to `count` cards to a player, returning how many were dealt
    fn deal_to(&mut self, player: PlayerId, count: usize) -> usize {
        for dealt in 0..count {
            match self.piles.pop_or_recycle(&mut self.rng) {
                Some(card) => self.players[player].receive(card),
                None => return dealt,
            }
        }
        count
    }

    fn draw_until_color(&mut self, player: PlayerId) {
        let mut drawn = 0;
        while let Some(card) = self.piles.pop_or_recycle(&mut self.rng) {
            drawn += 1;
            self.players[player].receive(card);
            if card.color(self.is_dark) == self.active_color {
                debug!(victim = player, drawn, "color came up");
                return;
            }
        }
        warn!(victim = player, drawn, "piles exhausted before the color came up");
    }

    fn flip(&mut self) {
        self.is_dark = !self.is_dark;
        let top = self.top_face();
        self.active_color = if top.is_wild() || !top.color.is_concrete() {
            Color::default_for(self.is_dark)
        } else {
            top.color
        };
        debug!(dark = self.is_dark, active = %self.active_color, "polarity flipped");
    }

    fn finish_play(&mut self, message: String) {
        if self.players[self.current].has_empty_hand() {
            let score = self.score();
            self.outcome = Some((self.current, score));
            self.info = format!(
                "{} won! Score: {}",
                self.players[self.current].name, score
            );

            info!(winner = self.current, score, "game over");
            let end = GameEvent::GameOver {
                message: self.info.clone(),
            };
            self.observers.broadcast(&end);
            self.notify();
            return;
        }

        self.must_press_next = true;
        self.info = format!("{message} Press Next to continue.");
        self.notify();
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("players", &self.players)
            .field("piles", &self.piles)
            .field("current", &self.current)
            .field("direction", &self.direction)
            .field("active_color", &self.active_color)
            .field("is_dark", &self.is_dark)
            .field("must_press_next", &self.must_press_next)
            .field("pending_steps", &self.pending_steps)
            .field("info", &self.info)
            .field("outcome", &self.outcome)
            .field("observers", &self.observers)
            .finish()
    }
}
