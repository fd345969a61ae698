//! Read-only rendering data for front-ends.

use crate::game::session::GameSession;
use crate::model::card::Card;
use crate::model::suit::Suit;
use crate::model::table::Table;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub rank: u8,
    pub suit: Suit,
    pub face_up: bool,
    pub label: String,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            rank: card.rank.value(),
            suit: card.suit,
            face_up: card.face_up,
            label: card.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundationView {
    pub suit: Suit,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub seed: u64,
    pub tableaus: Vec<Vec<CardView>>,
    pub foundations: Vec<FoundationView>,
    pub stock_count: usize,
    pub waste: Vec<CardView>,
    pub recycles_used: u8,
    pub recycles_remaining: u8,
    pub undo_depth: usize,
    pub won: bool,
}

impl DisplayState {
    pub fn capture(session: &GameSession) -> Self {
        Self::from_table(session.table(), session.seed(), session.undo_depth())
    }

    pub fn from_table(table: &Table, seed: u64, undo_depth: usize) -> Self {
        let cards = |cards: &[Card]| cards.iter().map(CardView::from).collect::<Vec<_>>();
        Self {
            seed,
            tableaus: table.tableaus().iter().map(|pile| cards(pile.cards())).collect(),
            foundations: table
                .foundations()
                .iter()
                .zip(Suit::ALL)
                .map(|(pile, suit)| FoundationView {
                    suit,
                    cards: cards(pile.cards()),
                })
                .collect(),
            stock_count: table.stock().len(),
            waste: cards(table.waste().cards()),
            recycles_used: table.recycles(),
            recycles_remaining: table.recycles_remaining(),
            undo_depth,
            won: table.is_won(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::DisplayState;
    use crate::game::session::GameSession;

    #[test]
    fn captures_the_deal() {
        let session = GameSession::new(Some(21));
        let state = session.display_state();
        assert_eq!(state.seed, 21);
        assert_eq!(state.tableaus.len(), 7);
        assert_eq!(state.tableaus[6].len(), 7);
        assert!(state.tableaus[6].last().expect("dealt").face_up);
        assert_eq!(state.foundations.len(), 4);
        assert_eq!(state.stock_count, 24);
        assert!(state.waste.is_empty());
        assert_eq!(state.recycles_remaining, 3);
        assert!(!state.won);
    }

    #[test]
    fn serializes_to_json() {
        let state = DisplayState::capture(&GameSession::new(Some(5)));
        let json = state.to_json().unwrap();
        assert!(json.contains("\"seed\": 5"));
        assert!(json.contains("\"stock_count\": 24"));
        assert!(json.contains("\"suit\": \"Hearts\""));
    }
}
