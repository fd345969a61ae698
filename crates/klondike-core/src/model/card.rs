use crate::model::rank::Rank;
use crate::model::suit::{Color, Suit};
use core::fmt;

/// A playing card. Identity is `(rank, suit)`; `face_up` is the only part
/// that changes during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub face_up: bool,
}

impl Card {
    /// Creates a face-down card.
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            face_up: false,
        }
    }

    pub const fn up(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            face_up: true,
        }
    }

    pub const fn with_face_up(self, face_up: bool) -> Self {
        Self { face_up, ..self }
    }

    pub const fn color(self) -> Color {
        self.suit.color()
    }

    pub const fn is_red(self) -> bool {
        self.suit.is_red()
    }

    pub const fn identity(self) -> (Rank, Suit) {
        (self.rank, self.suit)
    }

    /// Tableau stacking: `self` may sit directly on `below`.
    pub fn stacks_on(self, below: Card) -> bool {
        below.rank.is_one_above(self.rank) && below.is_red() != self.is_red()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
