//! Piles are one value type tagged with their role; the placement rules are
//! free functions keyed on that tag.

use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PileKind {
    Tableau,
    Foundation(Suit),
    Stock,
    Waste,
}

/// Ordered cards, bottom first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pile {
    kind: PileKind,
    cards: Vec<Card>,
}

impl Pile {
    pub fn new(kind: PileKind) -> Self {
        Self {
            kind,
            cards: Vec::new(),
        }
    }

    pub fn with_cards(kind: PileKind, cards: Vec<Card>) -> Self {
        Self { kind, cards }
    }

    pub fn kind(&self) -> PileKind {
        self.kind
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub(crate) fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub(crate) fn top_mut(&mut self) -> Option<&mut Card> {
        self.cards.last_mut()
    }

    pub(crate) fn split_off(&mut self, at: usize) -> Vec<Card> {
        self.cards.split_off(at)
    }

    pub(crate) fn append(&mut self, run: &mut Vec<Card>) {
        self.cards.append(run);
    }

    pub(crate) fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }
}

/// Whether `card` may be placed on `pile` by a player move.
///
/// Stock and waste never accept placements: cards only reach them through
/// draw and recycle.
pub fn accepts(pile: &Pile, card: Card) -> bool {
    match pile.kind {
        PileKind::Tableau => tableau_accepts(pile.top().copied(), card),
        PileKind::Foundation(suit) => foundation_accepts(suit, pile.top().copied(), card),
        PileKind::Stock | PileKind::Waste => false,
    }
}

pub fn tableau_accepts(top: Option<Card>, card: Card) -> bool {
    match top {
        None => card.rank == Rank::King,
        Some(top) => top.face_up && card.stacks_on(top),
    }
}

pub fn foundation_accepts(suit: Suit, top: Option<Card>, card: Card) -> bool {
    if card.suit != suit {
        return false;
    }
    match top {
        None => card.rank == Rank::Ace,
        Some(top) => card.rank.is_one_above(top.rank),
    }
}

/// Every card is face-up and each adjacent pair descends by one rank with
/// alternating color.
pub fn is_valid_run(run: &[Card]) -> bool {
    run.iter().all(|card| card.face_up) && run.windows(2).all(|pair| pair[1].stacks_on(pair[0]))
}
