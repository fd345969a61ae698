mod apply;
mod moves;

pub use moves::{Move, MoveError, MoveOutcome};
