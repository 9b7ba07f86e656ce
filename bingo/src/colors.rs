use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Player;

/// The color shown on one face of a [tile](Tile).
///
/// An empty cell has no color; APIs that look at a cell return
/// `Option<Color>` for that.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    Red,
    Yellow,
    Blue,
}

/// All colors, in the order targets are drawn from.
pub const COLORS: [Color; 3] = [Color::Red, Color::Yellow, Color::Blue];

impl Color {
    /// Single uppercase letter, used in the board visualization.
    pub fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Blue => 'B',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
        };
        write!(f, "{}", name)
    }
}

/// The error type for the [`FromStr`] instances of [`Color`] and [`PairType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl std::error::Error for UnknownColor {}

impl std::fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' does not name a color or tile type", self.0)
    }
}

impl FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Color::Red),
            "y" | "yellow" => Ok(Color::Yellow),
            "b" | "blue" => Ok(Color::Blue),
            _ => Err(UnknownColor(String::from(s))),
        }
    }
}

/// One of the three two-colored tile templates.
///
/// Every player starts with three tiles of each type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum PairType {
    YellowRed,
    BlueYellow,
    RedBlue,
}

/// All pair types, in move generation order.
pub const PAIR_TYPES: [PairType; 3] = [PairType::YellowRed, PairType::BlueYellow, PairType::RedBlue];

impl PairType {
    /// The `(front, back)` colors of a tile of this type that was placed unflipped.
    pub fn canonical_faces(self) -> (Color, Color) {
        match self {
            PairType::YellowRed => (Color::Yellow, Color::Red),
            PairType::BlueYellow => (Color::Blue, Color::Yellow),
            PairType::RedBlue => (Color::Red, Color::Blue),
        }
    }

    /// The `(front, back)` colors of a tile of this type in the given orientation.
    pub fn faces(self, flipped: bool) -> (Color, Color) {
        let (front, back) = self.canonical_faces();
        if flipped {
            (back, front)
        } else {
            (front, back)
        }
    }

    /// Finds the pair type made of these two colors, in any order.
    pub fn from_colors(a: Color, b: Color) -> Option<PairType> {
        PAIR_TYPES.into_iter().find(|pair| {
            let (front, back) = pair.canonical_faces();
            (front, back) == (a, b) || (front, back) == (b, a)
        })
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for PairType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (front, back) = self.canonical_faces();
        write!(f, "{}-{}", front, back)
    }
}

impl FromStr for PairType {
    type Err = UnknownColor;

    /// Accepts both the long form (`yellow-red`) and two letters (`yr`).
    /// The order of the two colors does not matter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownColor(String::from(s));
        let (a, b) = match s.split_once('-') {
            Some((a, b)) => (a.parse::<Color>()?, b.parse::<Color>()?),
            None => {
                let mut chars = s.chars();
                let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next()) else {
                    return Err(unknown());
                };
                (
                    a.to_string().parse::<Color>()?,
                    b.to_string().parse::<Color>()?,
                )
            }
        };
        PairType::from_colors(a, b).ok_or_else(unknown)
    }
}

/// A double-faced tile lying on the board.
///
/// The tile stores its pair type and orientation, so the front and back
/// colors are always the two colors of one pair type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pair: PairType,
    flipped: bool,
    owner: Player,
}

impl Tile {
    pub fn new(pair: PairType, flipped: bool, owner: Player) -> Self {
        Self {
            pair,
            flipped,
            owner,
        }
    }

    /// The visible color, which counts for lines.
    pub fn front(self) -> Color {
        self.pair.faces(self.flipped).0
    }

    /// The hidden color.
    pub fn back(self) -> Color {
        self.pair.faces(self.flipped).1
    }

    pub fn owner(self) -> Player {
        self.owner
    }

    /// The same tile turned over.
    #[must_use]
    pub fn flipped(self) -> Self {
        Self {
            flipped: !self.flipped,
            ..self
        }
    }
}

impl std::fmt::Display for Tile {
    /// Front letter, back letter in lowercase, and the owner's number, e.g. `Yr1`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.front().letter(),
            self.back().letter().to_ascii_lowercase(),
            self.owner.number()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_type_faces() {
        assert_eq!(
            PairType::YellowRed.faces(false),
            (Color::Yellow, Color::Red)
        );
        assert_eq!(PairType::YellowRed.faces(true), (Color::Red, Color::Yellow));
        assert_eq!(PairType::BlueYellow.faces(true), (Color::Yellow, Color::Blue));
        assert_eq!(PairType::RedBlue.faces(false), (Color::Red, Color::Blue));
    }

    #[test]
    fn pair_type_from_str() {
        assert_eq!("yr".parse::<PairType>(), Ok(PairType::YellowRed));
        assert_eq!("RY".parse::<PairType>(), Ok(PairType::YellowRed));
        assert_eq!("blue-yellow".parse::<PairType>(), Ok(PairType::BlueYellow));
        assert_eq!("red-blue".parse::<PairType>(), Ok(PairType::RedBlue));
        assert!("rr".parse::<PairType>().is_err());
        assert!("ryb".parse::<PairType>().is_err());
        for pair in PAIR_TYPES {
            assert_eq!(pair.to_string().parse::<PairType>(), Ok(pair));
        }
    }

    #[test]
    fn flipping_a_tile_swaps_faces_and_keeps_owner() {
        let tile = Tile::new(PairType::RedBlue, false, Player::Two);
        let flipped = tile.flipped();
        assert_eq!(flipped.front(), Color::Blue);
        assert_eq!(flipped.back(), Color::Red);
        assert_eq!(flipped.owner(), Player::Two);
        assert_eq!(flipped.flipped(), tile);
        assert_eq!(tile.to_string(), "Rb2");
    }
}
