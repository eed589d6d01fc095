//! Built-in opponent strategy.
//!
//! The strategy is a single pass over the hand with no lookahead: every
//! legal card is classified, and the best category wins, earliest hand
//! position breaking ties.
//! - Action cards (skip, reverse, draws, flip) first
//! - Then plain number cards
//! - Then wilds, with a random color from the current polarity
//! - Otherwise draw

use crate::actions::GameAction;
use crate::card::{Card, Color, Face, Rank};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the strategy groups a legal card, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardCategory {
    Action,
    Normal,
    Wild,
}

/// Classify a face. Wildness wins over any action the wild also carries, so
/// wild draw cards rank behind plain numbers and are kept for last.
pub fn classify(face: &Face) -> CardCategory {
    if face.is_wild() {
        return CardCategory::Wild;
    }
    match face.rank {
        Rank::Skip
        | Rank::SkipEveryone
        | Rank::Reverse
        | Rank::DrawOne
        | Rank::DrawFive
        | Rank::Flip => CardCategory::Action,
        _ => CardCategory::Normal,
    }
}

/// What the strategy is allowed to see
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    pub hand: &'a [Card],
    pub top: Card,
    pub active_color: Color,
    pub is_dark: bool,
    pub must_press_next: bool,
}

impl TurnView<'_> {
    /// Every legal card with its category, in hand order
    pub fn candidates(&self) -> Vec<(usize, CardCategory)> {
        let top = self.top.face(self.is_dark);
        self.hand
            .iter()
            .enumerate()
            .map(|(i, card)| (i, card.face(self.is_dark)))
            .filter(|(_, face)| face.matches(&top, self.active_color))
            .map(|(i, face)| (i, classify(&face)))
            .collect()
    }
}

/// Pick the next action for an AI seat
pub fn choose_action<R: Rng + ?Sized>(view: &TurnView<'_>, rng: &mut R) -> GameAction {
    if view.must_press_next {
        return GameAction::AdvanceTurn;
    }

    let best = view
        .candidates()
        .into_iter()
        .min_by_key(|&(index, category)| (category, index));

    match best {
        Some((index, CardCategory::Wild)) => {
            GameAction::PlayWild(index, random_color(view.is_dark, rng))
        }
        Some((index, _)) => GameAction::Play(index),
        None => GameAction::Draw,
    }
}

/// Uniform pick among the four colors of a polarity
pub fn random_color<R: Rng + ?Sized>(dark: bool, rng: &mut R) -> Color {
    let palette = Color::palette(dark);
    palette[rng.gen_range(0..palette.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn light(color: Color, rank: Rank) -> Card {
        let dark = color.dark_counterpart().unwrap_or(Color::Wild);
        Card::new(color, rank, dark, rank)
    }

    fn wild() -> Card {
        Card::new(Color::Wild, Rank::Wild, Color::Wild, Rank::Wild)
    }

    fn view(hand: &[Card]) -> TurnView<'_> {
        TurnView {
            hand,
            top: light(Color::Red, Rank::Five),
            active_color: Color::Red,
            is_dark: false,
            must_press_next: false,
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&light(Color::Red, Rank::Skip).face(false)), CardCategory::Action);
        assert_eq!(classify(&light(Color::Red, Rank::Flip).face(false)), CardCategory::Action);
        assert_eq!(classify(&light(Color::Red, Rank::Two).face(false)), CardCategory::Normal);
        assert_eq!(classify(&wild().face(false)), CardCategory::Wild);
        let wild_draw = Card::new(Color::Wild, Rank::WildDrawTwo, Color::Wild, Rank::WildDrawColor);
        assert_eq!(classify(&wild_draw.face(true)), CardCategory::Wild);
    }

    #[test]
    fn test_prefers_action_over_number() {
        let hand = [light(Color::Red, Rank::Two), light(Color::Red, Rank::Skip)];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_action(&view(&hand), &mut rng), GameAction::Play(1));
    }

    #[test]
    fn test_prefers_number_over_wild() {
        let hand = [wild(), light(Color::Blue, Rank::Five)];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_action(&view(&hand), &mut rng), GameAction::Play(1));
    }

    #[test]
    fn test_wild_draw_waits_behind_number() {
        let wild_draw = Card::new(Color::Wild, Rank::WildDrawTwo, Color::Wild, Rank::WildDrawColor);
        let hand = [light(Color::Red, Rank::Three), wild_draw];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_action(&view(&hand), &mut rng), GameAction::Play(0));
    }

    #[test]
    fn test_first_match_wins_within_category() {
        let hand = [
            light(Color::Blue, Rank::Two),
            light(Color::Red, Rank::Reverse),
            light(Color::Red, Rank::Skip),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_action(&view(&hand), &mut rng), GameAction::Play(1));
    }

    #[test]
    fn test_wild_picks_color_from_polarity() {
        let hand = [light(Color::Blue, Rank::Two), wild()];
        let mut rng = StdRng::seed_from_u64(3);
        match choose_action(&view(&hand), &mut rng) {
            GameAction::PlayWild(1, color) => assert!(Color::LIGHT.contains(&color)),
            other => panic!("expected a wild play, got {other:?}"),
        }

        let mut dark_view = view(&hand);
        dark_view.is_dark = true;
        dark_view.active_color = Color::Teal;
        match choose_action(&dark_view, &mut rng) {
            GameAction::PlayWild(1, color) => assert!(Color::DARK.contains(&color)),
            other => panic!("expected a wild play, got {other:?}"),
        }
    }

    #[test]
    fn test_draws_without_match() {
        let hand = [light(Color::Blue, Rank::Two), light(Color::Green, Rank::Skip)];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_action(&view(&hand), &mut rng), GameAction::Draw);
    }

    #[test]
    fn test_advances_when_gate_closed() {
        let hand = [light(Color::Red, Rank::Skip)];
        let mut closed = view(&hand);
        closed.must_press_next = true;
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_action(&closed, &mut rng), GameAction::AdvanceTurn);
    }
}
