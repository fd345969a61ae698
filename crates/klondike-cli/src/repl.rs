use std::io::{BufRead, Write};

use anyhow::Result;
use klondike_core::engine::{Move, MoveError, MoveOutcome};
use klondike_core::game::session::{GameSession, SessionError};
use tracing::{debug, info};

use crate::command::{Command, HELP, MoveRequest, PickRequest};
use crate::render::render_board;

const PROMPT: &str = "> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-driven game loop over any reader and writer.
pub struct Repl<R, W> {
    session: GameSession,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(session: GameSession, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_session(self) -> GameSession {
        self.session
    }

    /// Prints the board, then reads commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        self.show_board()?;
        let mut line = String::new();
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let flow = match Command::parse(&line) {
                Ok(command) => self.execute(command)?,
                Err(err) => {
                    writeln!(self.output, "{err}. Type 'help' for commands.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!(target: "klondike_cli::repl", ?command, "command");
        match command {
            Command::Draw => match self.session.draw() {
                Ok(card) => {
                    writeln!(self.output, "Drew {card}.")?;
                    self.after_change()?;
                }
                Err(MoveError::StockEmpty) => {
                    writeln!(self.output, "Stock empty. Use recycle if available.")?;
                }
                Err(err) => self.report(err)?,
            },
            Command::Recycle => match self.session.recycle() {
                Ok(count) => {
                    writeln!(
                        self.output,
                        "Returned {count} cards to the stock. Recycles left: {}.",
                        self.session.table().recycles_remaining()
                    )?;
                    self.after_change()?;
                }
                Err(MoveError::RecycleLimit) => writeln!(self.output, "No more recycles left.")?,
                Err(err) => self.report(err)?,
            },
            Command::Move(request) => self.play(request)?,
            Command::Pick(request) => self.pick(request)?,
            Command::Drop(target) => match self.session.place_selection(target) {
                Ok(outcome) => self.moved(outcome)?,
                Err(SessionError::NothingSelected) => {
                    writeln!(self.output, "Pick a card first.")?;
                }
                Err(err) => writeln!(self.output, "Illegal move: {err}.")?,
            },
            Command::Hint => match self.session.hint() {
                Some(hint) => writeln!(self.output, "Hint: {hint}")?,
                None => writeln!(self.output, "No moves found.")?,
            },
            Command::Undo => match self.session.undo() {
                Ok(()) => {
                    writeln!(self.output, "Undone.")?;
                    self.show_board()?;
                }
                Err(_) => writeln!(self.output, "Nothing to undo.")?,
            },
            Command::New(seed) => {
                self.session.new_game(seed);
                info!(target: "klondike_cli::repl", seed = self.session.seed(), "new game");
                writeln!(self.output, "New game, seed {}.", self.session.seed())?;
                self.show_board()?;
            }
            Command::Show => self.show_board()?,
            Command::Json => {
                let json = self.session.display_state().to_json()?;
                writeln!(self.output, "{json}")?;
            }
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => {
                writeln!(self.output, "Bye.")?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn play(&mut self, request: MoveRequest) -> Result<()> {
        let mv = match request {
            MoveRequest::Exact(mv) => mv,
            MoveRequest::FirstRun { from, to } => match self.first_run(from, to) {
                Some(mv) => mv,
                None => {
                    writeln!(
                        self.output,
                        "Illegal move: no cards on tableau {} fit tableau {}.",
                        from + 1,
                        to + 1
                    )?;
                    return Ok(());
                }
            },
        };
        match self.session.apply_move(mv) {
            Ok(outcome) => self.moved(outcome),
            Err(err) => self.report(err),
        }
    }

    fn first_run(&self, from: usize, to: usize) -> Option<Move> {
        let len = self.session.table().tableau(from)?.len();
        (0..len)
            .map(|start| Move::TableauToTableau { from, to, start })
            .find(|mv| self.session.table().check(*mv).is_ok())
    }

    fn pick(&mut self, request: PickRequest) -> Result<()> {
        let picked = match request {
            PickRequest::Waste => self
                .session
                .select_waste()
                .map(|()| self.session.table().waste().top()),
            PickRequest::Tableau { tableau, start } => {
                let pile = self.session.table().tableau(tableau);
                let start = start.or_else(|| pile.and_then(|pile| pile.len().checked_sub(1)));
                match start {
                    Some(start) => self
                        .session
                        .select_tableau(tableau, start)
                        .map(|()| self.session.table().tableau(tableau).and_then(|pile| pile.get(start))),
                    None => Err(SessionError::CannotSelect),
                }
            }
        };
        match picked {
            Ok(Some(card)) => writeln!(self.output, "Selected {card}.")?,
            Ok(None) | Err(_) => writeln!(self.output, "Cannot select that card.")?,
        }
        Ok(())
    }

    fn moved(&mut self, outcome: MoveOutcome) -> Result<()> {
        if let Some(last) = self.session.last_move() {
            writeln!(self.output, "{last}.")?;
        }
        if let Some(card) = outcome.revealed {
            writeln!(self.output, "Revealed {card}.")?;
        }
        self.after_change()
    }

    fn report(&mut self, err: MoveError) -> Result<()> {
        writeln!(self.output, "Illegal move: {err}.")?;
        Ok(())
    }

    fn after_change(&mut self) -> Result<()> {
        self.show_board()?;
        if self.session.is_won() {
            writeln!(self.output, "You won! Every card is on its foundation.")?;
        }
        Ok(())
    }

    fn show_board(&mut self) -> Result<()> {
        let board = render_board(&self.session.display_state());
        write!(self.output, "{board}")?;
        if let Some(selection) = self.session.selection() {
            writeln!(self.output, "Selected: {selection:?}")?;
        }
        Ok(())
    }
}
