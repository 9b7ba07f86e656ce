use crate::{Cell, PairType, Player};

/// The error type for the rule engine, i.e. for a single proposed action.
///
/// A rejected action leaves the game untouched, so the same player can
/// simply try again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    OutOfBounds { cell: Cell },
    OccupiedCell { cell: Cell },
    EmptyCell { cell: Cell },
    InsufficientStock { pair: PairType },
    IllegalAdjacency { from: Cell, to: Cell },
    GameAlreadyWon { winner: Player },
    /// The player has nothing to do. For the computer player, this means
    /// the turn is passed rather than that a malformed action was sent.
    NoLegalMove,
}

impl std::error::Error for Rejection {}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::OutOfBounds { cell } => {
                write!(f, "Cell ({}) is outside of the board", cell)
            }
            Rejection::OccupiedCell { cell } => {
                write!(f, "Cell ({}) already holds a tile", cell)
            }
            Rejection::EmptyCell { cell } => write!(f, "Cell ({}) holds no tile", cell),
            Rejection::InsufficientStock { pair } => {
                write!(f, "No {} tiles are left in the player's stock", pair)
            }
            Rejection::IllegalAdjacency { from, to } => write!(
                f,
                "A tile can only move one step up, down, left or right, not from ({}) to ({})",
                from, to
            ),
            Rejection::GameAlreadyWon { winner } => {
                write!(f, "The game is already over, {} won", winner)
            }
            Rejection::NoLegalMove => write!(f, "There is no legal move"),
        }
    }
}
