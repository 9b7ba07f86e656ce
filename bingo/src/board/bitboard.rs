use std::fmt::{self, Debug};

use crate::{Cell, BOARD_SIZE};

/// A [`Copy`] board representation that stores only a single
/// bit per cell.
///
/// Intended for storing e.g. all cells showing a particular color, for
/// efficient line detection. Bit `4 * row + col` belongs to the cell
/// `(row, col)`.
///
/// It can be converted back into a list of cells by means of its
/// [`IntoIterator`] instance, which yields them in row-major order.
///
/// Note that its "mutating" methods return a new object instead of really mutating.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BitBoard {
    bits: u16,
}

/// The 4 rows, 4 columns and 2 diagonals.
pub const LINES: [BitBoard; 10] = [
    BitBoard { bits: 0x000f },
    BitBoard { bits: 0x00f0 },
    BitBoard { bits: 0x0f00 },
    BitBoard { bits: 0xf000 },
    BitBoard { bits: 0x1111 },
    BitBoard { bits: 0x2222 },
    BitBoard { bits: 0x4444 },
    BitBoard { bits: 0x8888 },
    // (0, 0) to (3, 3)
    BitBoard { bits: 0x8421 },
    // (0, 3) to (3, 0)
    BitBoard { bits: 0x1248 },
];

impl BitBoard {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Set the bit for the cell to `true`. Out-of-bounds cells are ignored.
    #[must_use]
    pub fn insert(self, cell: Cell) -> Self {
        if !cell.is_in_bounds() {
            return self;
        }
        Self {
            bits: self.bits | (1u16 << cell.index()),
        }
    }

    /// Set the bit for the cell to `false`. Out-of-bounds cells are ignored.
    #[must_use]
    pub fn remove(self, cell: Cell) -> Self {
        if !cell.is_in_bounds() {
            return self;
        }
        Self {
            bits: self.bits & !(1u16 << cell.index()),
        }
    }

    pub fn contains(self, cell: Cell) -> bool {
        cell.is_in_bounds() && self.bits & (1u16 << cell.index()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn num_entries(self) -> u32 {
        self.bits.count_ones()
    }

    /// Does this board contain every cell of `other`?
    pub fn is_superset(self, other: BitBoard) -> bool {
        self.bits & other.bits == other.bits
    }

    /// Is any of the [`LINES`] fully contained in this board?
    pub fn has_complete_line(self) -> bool {
        LINES.iter().any(|&line| self.is_superset(line))
    }
}

impl std::ops::BitAnd for BitBoard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl std::ops::Not for BitBoard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self { bits: !self.bits }
    }
}

impl Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::with_capacity(16 * 2);
        for idx in 0..BOARD_SIZE * BOARD_SIZE {
            s.push(if self.bits & (1u16 << idx) != 0 { '1' } else { '.' });
            if idx % BOARD_SIZE == BOARD_SIZE - 1 {
                s.push('\n');
            } else {
                s.push(' ');
            }
        }
        write!(f, "{}", s)
    }
}

/// Iterator produced by [`BitBoard::into_iter()`].
pub struct BitBoardIter {
    bitboard: BitBoard,
}

impl IntoIterator for BitBoard {
    type Item = Cell;

    type IntoIter = BitBoardIter;

    fn into_iter(self) -> Self::IntoIter {
        BitBoardIter { bitboard: self }
    }
}

impl Iterator for BitBoardIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bitboard.is_empty() {
            None
        } else {
            let idx = self.bitboard.bits.trailing_zeros() as u8;
            // Clear the flag corresponding to this cell
            self.bitboard.bits ^= 1u16 << idx;
            Some(Cell::from_index(idx))
        }
    }
}
