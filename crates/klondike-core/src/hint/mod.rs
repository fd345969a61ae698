mod reversal;
mod search;

pub use reversal::{is_reversal, reversal_of};
pub use search::{DEFAULT_MAX_DEPTH, HintConfig, find_hint};

use crate::engine::Move;
use std::fmt;

/// A suggested continuation. Only the outermost step is meant to be played
/// right away; the nested part explains why a draw or recycle comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    Move(Move),
    AfterDraw(Box<Hint>),
    AfterRecycle(Box<Hint>),
}

/// The action a player can take immediately to follow a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintStep {
    Draw,
    Recycle,
    Move(Move),
}

impl Hint {
    pub fn first_step(&self) -> HintStep {
        match self {
            Hint::Move(mv) => HintStep::Move(*mv),
            Hint::AfterDraw(_) => HintStep::Draw,
            Hint::AfterRecycle(_) => HintStep::Recycle,
        }
    }

    /// The pile move the hint is leading up to.
    pub fn target_move(&self) -> Move {
        match self {
            Hint::Move(mv) => *mv,
            Hint::AfterDraw(next) | Hint::AfterRecycle(next) => next.target_move(),
        }
    }

    /// Number of draws and recycles in front of the target move.
    pub fn lead_in(&self) -> usize {
        match self {
            Hint::Move(_) => 0,
            Hint::AfterDraw(next) | Hint::AfterRecycle(next) => 1 + next.lead_in(),
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Move(mv) => write!(f, "{mv}"),
            Hint::AfterDraw(next) => write!(f, "Draw card from stock, then: {next}"),
            Hint::AfterRecycle(next) => write!(f, "Recycle waste to stock, then: {next}"),
        }
    }
}
