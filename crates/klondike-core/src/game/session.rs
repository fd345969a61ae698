use crate::engine::{Move, MoveError, MoveOutcome};
use crate::fingerprint::Fingerprint;
use crate::game::history::{Snapshot, UndoStack};
use crate::game::view::DisplayState;
use crate::hint::{Hint, HintConfig, HintStep, find_hint};
use crate::model::card::Card;
use crate::model::table::Table;
use std::fmt;
use tracing::{debug, info};

pub const DRAW_DESCRIPTOR: &str = "Draw card from stock";
pub const RECYCLE_DESCRIPTOR: &str = "Recycle waste to stock";

/// A card picked up by the player and waiting for a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Waste,
    Tableau { tableau: usize, start: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Foundation(usize),
    Tableau(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    NothingToUndo,
    NothingSelected,
    CannotSelect,
    Move(MoveError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NothingToUndo => write!(f, "nothing to undo"),
            SessionError::NothingSelected => write!(f, "no card selected"),
            SessionError::CannotSelect => write!(f, "only face-up cards can be selected"),
            SessionError::Move(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        SessionError::Move(err)
    }
}

/// One game in progress: the live table plus everything needed to undo and
/// to hint. Every mutation goes through here.
#[derive(Debug, Clone)]
pub struct GameSession {
    table: Table,
    history: UndoStack,
    last_move: Option<String>,
    selection: Option<Selection>,
    seed: u64,
    hint_config: HintConfig,
}

impl GameSession {
    /// Deals a new game. Without a seed one is drawn at random.
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_config(seed, HintConfig::default())
    }

    pub fn with_config(seed: Option<u64>, hint_config: HintConfig) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        info!(target: "klondike_core::session", seed, "dealt new game");
        Self {
            table: Table::deal_with_seed(seed),
            history: UndoStack::new(),
            last_move: None,
            selection: None,
            seed,
            hint_config,
        }
    }

    /// Continues from an arbitrary position with an empty history.
    pub fn from_table(table: Table, seed: u64) -> Self {
        Self {
            table,
            history: UndoStack::new(),
            last_move: None,
            selection: None,
            seed,
            hint_config: HintConfig::default(),
        }
    }

    /// Replaces the game wholesale and forgets the undo history.
    pub fn new_game(&mut self, seed: Option<u64>) {
        *self = Self::with_config(seed, self.hint_config);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn hint_config(&self) -> HintConfig {
        self.hint_config
    }

    pub fn set_hint_config(&mut self, config: HintConfig) {
        self.hint_config = config;
    }

    /// Descriptor of the most recent successful action.
    pub fn last_move(&self) -> Option<&str> {
        self.last_move.as_deref()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn is_won(&self) -> bool {
        self.table.is_won()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.table)
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState::capture(self)
    }

    pub fn draw(&mut self) -> Result<Card, MoveError> {
        self.commit(DRAW_DESCRIPTOR.to_string(), Table::draw_from_stock)
    }

    pub fn recycle(&mut self) -> Result<usize, MoveError> {
        self.commit(RECYCLE_DESCRIPTOR.to_string(), Table::recycle_stock)
    }

    pub fn apply_move(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        self.commit(mv.to_string(), |table| table.apply(mv))
    }

    /// Plays the immediate step of a hint.
    pub fn follow(&mut self, step: HintStep) -> Result<(), MoveError> {
        match step {
            HintStep::Draw => self.draw().map(|_| ()),
            HintStep::Recycle => self.recycle().map(|_| ()),
            HintStep::Move(mv) => self.apply_move(mv).map(|_| ()),
        }
    }

    /// Searches from the live position; the table and history are untouched.
    pub fn hint(&self) -> Option<Hint> {
        find_hint(&self.table, self.last_move(), &self.hint_config)
    }

    pub fn undo(&mut self) -> Result<(), SessionError> {
        let snapshot = self.history.pop().ok_or(SessionError::NothingToUndo)?;
        self.table = snapshot.table;
        self.last_move = snapshot.last_move;
        self.selection = None;
        debug!(
            target: "klondike_core::session",
            remaining = self.history.len(),
            fingerprint = %self.fingerprint(),
            "undo"
        );
        Ok(())
    }

    pub fn select_waste(&mut self) -> Result<(), SessionError> {
        if self.table.waste().is_empty() {
            return Err(SessionError::CannotSelect);
        }
        self.selection = Some(Selection::Waste);
        Ok(())
    }

    pub fn select_tableau(&mut self, tableau: usize, start: usize) -> Result<(), SessionError> {
        let face_up = self
            .table
            .tableau(tableau)
            .and_then(|pile| pile.get(start))
            .is_some_and(|card| card.face_up);
        if !face_up {
            return Err(SessionError::CannotSelect);
        }
        self.selection = Some(Selection::Tableau { tableau, start });
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Moves the selected card(s) to `target`.
    ///
    /// A failed drop keeps the selection, except when the target is the
    /// selected tableau itself.
    pub fn place_selection(&mut self, target: Target) -> Result<MoveOutcome, SessionError> {
        let selection = self.selection.ok_or(SessionError::NothingSelected)?;
        let mv = self.resolve(selection, target)?;
        match self.apply_move(mv) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                if let (Selection::Tableau { tableau, .. }, Target::Tableau(to)) = (selection, target) {
                    if tableau == to {
                        self.selection = None;
                    }
                }
                Err(err.into())
            }
        }
    }

    fn resolve(&self, selection: Selection, target: Target) -> Result<Move, SessionError> {
        let mv = match (selection, target) {
            (Selection::Waste, Target::Foundation(foundation)) => Move::WasteToFoundation { foundation },
            (Selection::Waste, Target::Tableau(tableau)) => Move::WasteToTableau { tableau },
            (Selection::Tableau { tableau, start }, Target::Foundation(foundation)) => {
                let is_top = self
                    .table
                    .tableau(tableau)
                    .is_some_and(|pile| pile.len() == start + 1);
                if !is_top {
                    return Err(SessionError::Move(MoveError::Rejected));
                }
                Move::TableauToFoundation {
                    tableau,
                    foundation,
                }
            }
            (Selection::Tableau { tableau, start }, Target::Tableau(to)) => Move::TableauToTableau {
                from: tableau,
                to,
                start,
            },
        };
        Ok(mv)
    }

    /// Snapshot, attempt, and keep the snapshot only if the attempt worked.
    /// Failed attempts have no side effects, so the live table needs no
    /// restore.
    fn commit<T>(
        &mut self,
        descriptor: String,
        action: impl FnOnce(&mut Table) -> Result<T, MoveError>,
    ) -> Result<T, MoveError> {
        let before = self.table.clone();
        match action(&mut self.table) {
            Ok(value) => {
                self.history.push(Snapshot {
                    table: before,
                    last_move: self.last_move.take(),
                });
                debug!(
                    target: "klondike_core::session",
                    action = %descriptor,
                    undo_depth = self.history.len(),
                    fingerprint = %self.fingerprint(),
                    "applied"
                );
                self.last_move = Some(descriptor);
                self.selection = None;
                if self.table.is_won() {
                    info!(target: "klondike_core::session", seed = self.seed, "game won");
                }
                Ok(value)
            }
            Err(err) => {
                debug!(
                    target: "klondike_core::session",
                    action = %descriptor,
                    reason = %err,
                    "rejected"
                );
                Err(err)
            }
        }
    }
}
