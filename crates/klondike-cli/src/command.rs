//! Text commands typed at the prompt.
//!
//! Pile tokens are `w` (waste), `f1`..`f4` (foundations in suit order) and
//! `t1`..`t7` (tableaus). All numbers a player types are 1-based; parsed
//! commands carry 0-based indices.

use klondike_core::engine::Move;
use klondike_core::game::session::Target;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Draw,
    Recycle,
    Move(MoveRequest),
    Pick(PickRequest),
    Drop(Target),
    Hint,
    Undo,
    New(Option<u64>),
    Show,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRequest {
    Exact(Move),
    /// `move tA tB` with no start card: the first start index that forms a
    /// legal move, scanning from the bottom of the pile.
    FirstRun { from: usize, to: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickRequest {
    Waste,
    /// `start` of `None` means the top card.
    Tableau { tableau: usize, start: Option<usize> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PileToken {
    Waste,
    Foundation(usize),
    Tableau(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' is not a pile; use w, f1-f4 or t1-t7")]
    BadPile(String),
    #[error("'{0}' is not a positive number")]
    BadNumber(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("cannot move from {from} to {to}")]
    Unsupported { from: String, to: String },
}

const MOVE_USAGE: &str = "move <w|tN> <fN|tN> [start]";
const PICK_USAGE: &str = "pick <w|tN> [card]";
const DROP_USAGE: &str = "drop <fN|tN>";
const NEW_USAGE: &str = "new [seed]";

pub const HELP: &str = "\
Commands:
  draw                  turn the top stock card onto the waste
  recycle               return the waste to the stock (3 times per game)
  move w fN | w tN      play the waste card to a foundation or tableau
  move tN fN            play a tableau's top card to a foundation
  move tA tB [card]     move cards from card number [card] of tableau A onto B
  pick w | pick tN [card]
  drop fN | drop tN     select cards, then place them
  hint                  suggest a move
  undo                  take back the last action
  new [seed]            deal a new game
  show                  print the board
  json                  print the board as JSON
  help                  show this text
  quit                  leave the game";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let lowered = line.trim().to_ascii_lowercase();
        let mut words = lowered.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb {
            "draw" | "d" => no_args(Command::Draw, &args, "draw")?,
            "recycle" | "r" => no_args(Command::Recycle, &args, "recycle")?,
            "move" | "m" => Command::Move(parse_move(&args)?),
            "pick" | "p" => Command::Pick(parse_pick(&args)?),
            "drop" => Command::Drop(parse_drop(&args)?),
            "hint" | "h" => no_args(Command::Hint, &args, "hint")?,
            "undo" | "u" => no_args(Command::Undo, &args, "undo")?,
            "new" => match args.as_slice() {
                [] => Command::New(None),
                [seed] => Command::New(Some(
                    seed.parse()
                        .map_err(|_| CommandError::BadNumber(seed.to_string()))?,
                )),
                _ => return Err(CommandError::Usage(NEW_USAGE)),
            },
            "show" | "s" => Command::Show,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn no_args(command: Command, args: &[&str], usage: &'static str) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::Usage(usage))
    }
}

fn parse_move(args: &[&str]) -> Result<MoveRequest, CommandError> {
    let (from, to, start) = match args {
        [from, to] => (*from, *to, None),
        [from, to, start] => (*from, *to, Some(parse_ordinal(start)?)),
        _ => return Err(CommandError::Usage(MOVE_USAGE)),
    };
    let unsupported = || CommandError::Unsupported {
        from: from.to_string(),
        to: to.to_string(),
    };

    let request = match (parse_pile(from)?, parse_pile(to)?, start) {
        (PileToken::Waste, PileToken::Foundation(foundation), None) => {
            MoveRequest::Exact(Move::WasteToFoundation { foundation })
        }
        (PileToken::Waste, PileToken::Tableau(tableau), None) => {
            MoveRequest::Exact(Move::WasteToTableau { tableau })
        }
        (PileToken::Tableau(tableau), PileToken::Foundation(foundation), None) => {
            MoveRequest::Exact(Move::TableauToFoundation {
                tableau,
                foundation,
            })
        }
        (PileToken::Tableau(from), PileToken::Tableau(to), Some(start)) => {
            MoveRequest::Exact(Move::TableauToTableau { from, to, start })
        }
        (PileToken::Tableau(from), PileToken::Tableau(to), None) => {
            MoveRequest::FirstRun { from, to }
        }
        _ => return Err(unsupported()),
    };
    Ok(request)
}

fn parse_pick(args: &[&str]) -> Result<PickRequest, CommandError> {
    match args {
        [pile] => match parse_pile(pile)? {
            PileToken::Waste => Ok(PickRequest::Waste),
            PileToken::Tableau(tableau) => Ok(PickRequest::Tableau {
                tableau,
                start: None,
            }),
            PileToken::Foundation(_) => Err(CommandError::Usage(PICK_USAGE)),
        },
        [pile, card] => match parse_pile(pile)? {
            PileToken::Tableau(tableau) => Ok(PickRequest::Tableau {
                tableau,
                start: Some(parse_ordinal(card)?),
            }),
            _ => Err(CommandError::Usage(PICK_USAGE)),
        },
        _ => Err(CommandError::Usage(PICK_USAGE)),
    }
}

fn parse_drop(args: &[&str]) -> Result<Target, CommandError> {
    match args {
        [pile] => match parse_pile(pile)? {
            PileToken::Foundation(foundation) => Ok(Target::Foundation(foundation)),
            PileToken::Tableau(tableau) => Ok(Target::Tableau(tableau)),
            PileToken::Waste => Err(CommandError::Usage(DROP_USAGE)),
        },
        _ => Err(CommandError::Usage(DROP_USAGE)),
    }
}

fn parse_pile(token: &str) -> Result<PileToken, CommandError> {
    let bad = || CommandError::BadPile(token.to_string());
    if token == "w" {
        return Ok(PileToken::Waste);
    }
    let (kind, number) = token.split_at_checked(1).ok_or_else(bad)?;
    let index = parse_ordinal(number).map_err(|_| bad())?;
    match kind {
        "f" => Ok(PileToken::Foundation(index)),
        "t" => Ok(PileToken::Tableau(index)),
        _ => Err(bad()),
    }
}

/// Converts a 1-based number to a 0-based index.
fn parse_ordinal(text: &str) -> Result<usize, CommandError> {
    match text.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value - 1),
        _ => Err(CommandError::BadNumber(text.to_string())),
    }
}
