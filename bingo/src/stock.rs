use serde::{Deserialize, Serialize};

use crate::{PairType, PAIR_TYPES};

/// How many tiles of each pair type every player starts with.
pub const TILES_PER_PAIR_TYPE: u8 = 3;

/// The tiles a single player has not placed yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileStock {
    counts: [u8; 3],
}

impl TileStock {
    /// The starting stock: three tiles of every pair type.
    pub fn full() -> Self {
        Self {
            counts: [TILES_PER_PAIR_TYPE; 3],
        }
    }

    pub fn remaining(self, pair: PairType) -> u8 {
        self.counts[pair.index()]
    }

    pub fn total(self) -> u8 {
        self.counts.iter().sum()
    }

    /// The pair types with at least one tile left, in [`PAIR_TYPES`] order.
    pub fn available(self) -> impl Iterator<Item = PairType> {
        PAIR_TYPES
            .into_iter()
            .filter(move |&pair| self.remaining(pair) > 0)
    }

    /// Removes one tile of this type, or returns `None` if there is none left.
    #[must_use]
    pub(crate) fn take(self, pair: PairType) -> Option<Self> {
        let mut counts = self.counts;
        counts[pair.index()] = counts[pair.index()].checked_sub(1)?;
        Some(Self { counts })
    }
}
