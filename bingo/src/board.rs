mod bitboard;

pub use bitboard::*;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Color, Player, Tile};

pub const BOARD_SIZE: u8 = 4;

/// A position on the board, counted from the top left corner.
///
/// Cells are plain coordinates and may be out of bounds; the rule engine
/// rejects actions that refer to such cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn is_in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// All 16 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE * BOARD_SIZE).map(Cell::from_index)
    }

    /// Are the two cells exactly one orthogonal step apart?
    pub fn is_adjacent_to(self, other: Cell) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// The in-bounds orthogonal neighbors: up, down, left, right.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        let Cell { row, col } = self;
        [
            row.checked_sub(1).map(|r| Cell::new(r, col)),
            row.checked_add(1).map(|r| Cell::new(r, col)),
            col.checked_sub(1).map(|c| Cell::new(row, c)),
            col.checked_add(1).map(|c| Cell::new(row, c)),
        ]
        .into_iter()
        .flatten()
        .filter(|cell| cell.is_in_bounds())
    }

    pub(crate) fn index(self) -> u8 {
        debug_assert!(self.is_in_bounds());
        self.row * BOARD_SIZE + self.col
    }

    pub(crate) fn from_index(idx: u8) -> Self {
        debug_assert!(idx < BOARD_SIZE * BOARD_SIZE);
        Self {
            row: idx / BOARD_SIZE,
            col: idx % BOARD_SIZE,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// The error type for the [`FromStr`] instance of [`Cell`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidCell(pub String);

impl std::error::Error for InvalidCell {}

impl std::fmt::Display for InvalidCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a cell, expected <row>,<col>", self.0)
    }
}

impl FromStr for Cell {
    type Err = InvalidCell;

    /// Parses `row,col`. Bounds are not checked here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidCell(String::from(s));
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse::<u8>().map_err(|_| invalid())?;
        let col = col.trim().parse::<u8>().map_err(|_| invalid())?;
        Ok(Cell { row, col })
    }
}

/// The 4x4 grid. Every cell holds at most one [`Tile`].
///
/// The board only stores tiles; it knows nothing about turns or stocks.
/// It is [`Copy`], so that search can work on independent snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Tile>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tile on this cell, if any. Out-of-bounds cells are empty.
    pub fn get(&self, cell: Cell) -> Option<Tile> {
        if cell.is_in_bounds() {
            self.cells[cell.row as usize][cell.col as usize]
        } else {
            None
        }
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// The front color on this cell, or `None` if it is empty.
    pub fn front(&self, cell: Cell) -> Option<Color> {
        self.get(cell).map(Tile::front)
    }

    /// All tiles with their cells, in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        Cell::all().filter_map(|cell| self.get(cell).map(|tile| (cell, tile)))
    }

    pub fn occupied(&self) -> BitBoard {
        self.cells_where(|_| true)
    }

    pub fn empty_cells(&self) -> BitBoard {
        !self.occupied()
    }

    /// The cells whose visible color is `color`.
    pub fn fronts(&self, color: Color) -> BitBoard {
        self.cells_where(|tile| tile.front() == color)
    }

    pub fn owned_by(&self, player: Player) -> BitBoard {
        self.cells_where(|tile| tile.owner() == player)
    }

    /// Is there a row, column or diagonal of four tiles all showing `color`?
    ///
    /// Empty cells never match, so only fully occupied lines can win.
    pub fn check_win(&self, color: Color) -> bool {
        self.fronts(color).has_complete_line()
    }

    /// Overwrites the cell. The rule engine is responsible for validation.
    pub(crate) fn set(&mut self, cell: Cell, tile: Option<Tile>) {
        self.cells[cell.row as usize][cell.col as usize] = tile;
    }

    fn cells_where(&self, pred: impl Fn(Tile) -> bool) -> BitBoard {
        self.tiles()
            .filter(|&(_, tile)| pred(tile))
            .fold(BitBoard::empty(), |bb, (cell, _)| bb.insert(cell))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::visualize_board(self))
    }
}
