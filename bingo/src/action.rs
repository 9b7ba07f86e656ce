use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Cell, PairType};

/// One of the three kinds of moves a player can make.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Put a tile from the stock onto an empty cell.
    Place {
        cell: Cell,
        pair: PairType,
        /// Whether the tile is placed with its canonical back color facing up.
        flipped: bool,
    },
    /// Slide a tile one step up, down, left or right onto an empty cell.
    Move { from: Cell, to: Cell },
    /// Turn a tile over.
    Flip { cell: Cell },
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place {
                cell,
                pair,
                flipped: false,
            } => write!(f, "place {} {}", cell, pair),
            Action::Place {
                cell,
                pair,
                flipped: true,
            } => write!(f, "place {} {} flipped", cell, pair),
            Action::Move { from, to } => write!(f, "move {} {}", from, to),
            Action::Flip { cell } => write!(f, "flip {}", cell),
        }
    }
}

/// The error type for the [`FromStr`] instance of [`Action`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionFromStrErr {
    UnknownKind(String),
    WrongNumberOfArguments { kind: &'static str },
    InvalidArgument(String),
}

impl std::error::Error for ActionFromStrErr {}

impl std::fmt::Display for ActionFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionFromStrErr::UnknownKind(kind) => {
                write!(f, "Unknown action '{}', expected place, move or flip", kind)
            }
            ActionFromStrErr::WrongNumberOfArguments { kind: "place" } => {
                write!(f, "Usage: place <row>,<col> <tile type> [flipped]")
            }
            ActionFromStrErr::WrongNumberOfArguments { kind: "move" } => {
                write!(f, "Usage: move <row>,<col> <row>,<col>")
            }
            ActionFromStrErr::WrongNumberOfArguments { kind } => {
                write!(f, "Usage: {} <row>,<col>", kind)
            }
            ActionFromStrErr::InvalidArgument(msg) => write!(f, "{}", msg),
        }
    }
}

impl FromStr for Action {
    type Err = ActionFromStrErr;

    /// Parses the format produced by the [`Display`](std::fmt::Display) instance,
    /// e.g. `place 1,2 yellow-red flipped`, `move 0,0 0,1` or `flip 3,3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn arg<T: FromStr>(s: &str) -> Result<T, ActionFromStrErr>
        where
            T::Err: std::fmt::Display,
        {
            s.parse::<T>()
                .map_err(|err| ActionFromStrErr::InvalidArgument(err.to_string()))
        }

        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            ["place", cell, pair] => Ok(Action::Place {
                cell: arg(cell)?,
                pair: arg(pair)?,
                flipped: false,
            }),
            ["place", cell, pair, "flipped"] => Ok(Action::Place {
                cell: arg(cell)?,
                pair: arg(pair)?,
                flipped: true,
            }),
            ["place", ..] => Err(ActionFromStrErr::WrongNumberOfArguments { kind: "place" }),
            ["move", from, to] => Ok(Action::Move {
                from: arg(from)?,
                to: arg(to)?,
            }),
            ["move", ..] => Err(ActionFromStrErr::WrongNumberOfArguments { kind: "move" }),
            ["flip", cell] => Ok(Action::Flip { cell: arg(cell)? }),
            ["flip", ..] => Err(ActionFromStrErr::WrongNumberOfArguments { kind: "flip" }),
            [kind, ..] => Err(ActionFromStrErr::UnknownKind(String::from(*kind))),
            [] => Err(ActionFromStrErr::UnknownKind(String::new())),
        }
    }
}

/// Shorthand for creating actions from their text form.
///
/// This macro is just calling the [`FromStr`] instance of [`Action`].
/// ```
/// # use bingo::{action, Action, Cell};
/// assert_eq!(
///     action!("flip 2,3"),
///     Action::Flip { cell: Cell::new(2, 3) }
/// );
/// ```
#[macro_export]
macro_rules! action {
    ($s:literal) => {
        <$crate::Action as std::str::FromStr>::from_str($s)
            .expect("Invalid action given to action! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use action;
