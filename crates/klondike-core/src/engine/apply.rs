//! Move validation and application. Every operation checks all of its
//! preconditions before touching a pile, so an `Err` leaves the table
//! exactly as it was.

use super::moves::{Move, MoveError, MoveOutcome};
use crate::model::card::Card;
use crate::model::pile::{accepts, is_valid_run};
use crate::model::table::{TABLEAU_COUNT, Table};

impl Table {
    pub fn apply(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        match mv {
            Move::WasteToFoundation { foundation } => self.move_waste_to_foundation(foundation),
            Move::WasteToTableau { tableau } => self.move_waste_to_tableau(tableau),
            Move::TableauToFoundation {
                tableau,
                foundation,
            } => self.move_tableau_to_foundation(tableau, foundation),
            Move::TableauToTableau { from, to, start } => {
                self.move_tableau_to_tableau(from, to, start)
            }
        }
    }

    /// State in, state out: the position after `mv`, leaving `self` alone.
    pub fn after(&self, mv: Move) -> Result<(Table, MoveOutcome), MoveError> {
        let mut next = self.clone();
        let outcome = next.apply(mv)?;
        Ok((next, outcome))
    }

    /// Runs the same checks as [`Table::apply`] without moving anything.
    pub fn check(&self, mv: Move) -> Result<(), MoveError> {
        match mv {
            Move::WasteToFoundation { foundation } => {
                let card = self.waste_top()?;
                self.check_foundation_accepts(foundation, card)
            }
            Move::WasteToTableau { tableau } => {
                let card = self.waste_top()?;
                self.check_tableau_accepts(tableau, card)
            }
            Move::TableauToFoundation {
                tableau,
                foundation,
            } => {
                let card = self.tableau_top(tableau)?;
                self.check_foundation_accepts(foundation, card)
            }
            Move::TableauToTableau { from, to, start } => self.check_run_move(from, to, start),
        }
    }

    pub fn move_tableau_to_foundation(
        &mut self,
        tableau: usize,
        foundation: usize,
    ) -> Result<MoveOutcome, MoveError> {
        let card = self.tableau_top(tableau)?;
        self.check_foundation_accepts(foundation, card)?;

        if let Some(card) = self.tableau_mut(tableau).pop() {
            self.foundation_mut(foundation).push(card);
        }
        Ok(MoveOutcome {
            revealed: self.reveal_top(tableau),
        })
    }

    pub fn move_waste_to_foundation(&mut self, foundation: usize) -> Result<MoveOutcome, MoveError> {
        let card = self.waste_top()?;
        self.check_foundation_accepts(foundation, card)?;

        if let Some(card) = self.waste_mut().pop() {
            self.foundation_mut(foundation).push(card);
        }
        Ok(MoveOutcome::default())
    }

    pub fn move_waste_to_tableau(&mut self, tableau: usize) -> Result<MoveOutcome, MoveError> {
        let card = self.waste_top()?;
        self.check_tableau_accepts(tableau, card)?;

        if let Some(card) = self.waste_mut().pop() {
            self.tableau_mut(tableau).push(card);
        }
        Ok(MoveOutcome::default())
    }

    /// Moves the run from `start` to the top of `from` onto `to`, keeping
    /// its order.
    pub fn move_tableau_to_tableau(
        &mut self,
        from: usize,
        to: usize,
        start: usize,
    ) -> Result<MoveOutcome, MoveError> {
        self.check_run_move(from, to, start)?;

        let (source, destination) = self.two_tableaus_mut(from, to);
        let mut run = source.split_off(start);
        destination.append(&mut run);
        Ok(MoveOutcome {
            revealed: self.reveal_top(from),
        })
    }

    /// Turns the stock's top card face-up onto the waste.
    pub fn draw_from_stock(&mut self) -> Result<Card, MoveError> {
        let (stock, waste) = self.stock_and_waste_mut();
        let card = stock.pop().ok_or(MoveError::StockEmpty)?.with_face_up(true);
        waste.push(card);
        Ok(card)
    }

    /// Returns the whole waste to the stock face-down. The waste top goes in
    /// first, so the last card drawn ends up at the bottom of the stock.
    /// Returns the number of cards moved.
    pub fn recycle_stock(&mut self) -> Result<usize, MoveError> {
        if !self.can_recycle() {
            return Err(MoveError::RecycleLimit);
        }
        let (stock, waste) = self.stock_and_waste_mut();
        let returned = waste.take_all();
        let count = returned.len();
        for card in returned.into_iter().rev() {
            stock.push(card.with_face_up(false));
        }
        self.note_recycle();
        Ok(count)
    }

    /// Turns a face-down tableau top face-up. Returns whether a card turned.
    pub fn flip_top_tableau(&mut self, tableau: usize) -> bool {
        self.reveal_top(tableau).is_some()
    }

    fn reveal_top(&mut self, tableau: usize) -> Option<Card> {
        if tableau >= TABLEAU_COUNT {
            return None;
        }
        let card = self.tableau_mut(tableau).top_mut()?;
        if card.face_up {
            return None;
        }
        card.face_up = true;
        Some(*card)
    }

    fn waste_top(&self) -> Result<Card, MoveError> {
        self.waste().top().copied().ok_or(MoveError::EmptySource)
    }

    fn tableau_top(&self, tableau: usize) -> Result<Card, MoveError> {
        let pile = self
            .tableau(tableau)
            .ok_or(MoveError::NoSuchTableau(tableau))?;
        let card = pile.top().copied().ok_or(MoveError::EmptySource)?;
        if !card.face_up {
            return Err(MoveError::FaceDown);
        }
        Ok(card)
    }

    fn check_foundation_accepts(&self, foundation: usize, card: Card) -> Result<(), MoveError> {
        let pile = self
            .foundation(foundation)
            .ok_or(MoveError::NoSuchFoundation(foundation))?;
        if accepts(pile, card) {
            Ok(())
        } else {
            Err(MoveError::Rejected)
        }
    }

    fn check_tableau_accepts(&self, tableau: usize, card: Card) -> Result<(), MoveError> {
        let pile = self
            .tableau(tableau)
            .ok_or(MoveError::NoSuchTableau(tableau))?;
        if accepts(pile, card) {
            Ok(())
        } else {
            Err(MoveError::Rejected)
        }
    }

    fn check_run_move(&self, from: usize, to: usize, start: usize) -> Result<(), MoveError> {
        let source = self.tableau(from).ok_or(MoveError::NoSuchTableau(from))?;
        if to >= TABLEAU_COUNT {
            return Err(MoveError::NoSuchTableau(to));
        }
        if from == to {
            return Err(MoveError::SamePile);
        }
        if source.is_empty() {
            return Err(MoveError::EmptySource);
        }
        let run = source
            .cards()
            .get(start..)
            .filter(|run| !run.is_empty())
            .ok_or(MoveError::StartOutOfRange {
                start,
                len: source.len(),
            })?;
        if !run[0].face_up {
            return Err(MoveError::FaceDown);
        }
        if !is_valid_run(run) {
            return Err(MoveError::MalformedRun);
        }
        self.check_tableau_accepts(to, run[0])
    }
}
