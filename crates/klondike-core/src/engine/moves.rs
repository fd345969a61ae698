use crate::model::card::Card;
use crate::model::suit::Suit;
use std::fmt;

/// A player move between piles. Draw and recycle are separate operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    WasteToFoundation { foundation: usize },
    WasteToTableau { tableau: usize },
    TableauToFoundation { tableau: usize, foundation: usize },
    TableauToTableau { from: usize, to: usize, start: usize },
}

/// Descriptor text, with 1-based tableau numbers and foundations named by
/// suit. Hints and the reversal rules work on this text.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::WasteToFoundation { foundation } => {
                write!(f, "Move waste to foundation {}", foundation_name(foundation))
            }
            Move::WasteToTableau { tableau } => write!(f, "Move waste to tableau {}", tableau + 1),
            Move::TableauToFoundation {
                tableau,
                foundation,
            } => write!(
                f,
                "Move tableau {} to foundation {}",
                tableau + 1,
                foundation_name(foundation)
            ),
            Move::TableauToTableau { from, to, .. } => {
                write!(f, "Move cards from tableau {} to tableau {}", from + 1, to + 1)
            }
        }
    }
}

fn foundation_name(index: usize) -> &'static str {
    Suit::from_index(index).map(Suit::as_str).unwrap_or("?")
}

/// Side effects of a successful move beyond the cards that changed pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// The tableau card turned face-up after the source pile shrank.
    pub revealed: Option<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    NoSuchTableau(usize),
    NoSuchFoundation(usize),
    EmptySource,
    StartOutOfRange { start: usize, len: usize },
    FaceDown,
    MalformedRun,
    SamePile,
    Rejected,
    StockEmpty,
    RecycleLimit,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::NoSuchTableau(index) => write!(f, "there is no tableau {}", index + 1),
            MoveError::NoSuchFoundation(index) => write!(f, "there is no foundation {}", index + 1),
            MoveError::EmptySource => write!(f, "source pile is empty"),
            MoveError::StartOutOfRange { start, len } => {
                write!(f, "card {} is outside a pile of {len}", start + 1)
            }
            MoveError::FaceDown => write!(f, "card is face-down"),
            MoveError::MalformedRun => write!(f, "cards do not form a descending alternating run"),
            MoveError::SamePile => write!(f, "source and destination are the same pile"),
            MoveError::Rejected => write!(f, "destination does not accept that card"),
            MoveError::StockEmpty => write!(f, "stock is empty"),
            MoveError::RecycleLimit => write!(f, "no recycles left"),
        }
    }
}

impl std::error::Error for MoveError {}
