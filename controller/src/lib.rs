mod controller;
mod error;
mod game;
pub use controller::*;
pub use error::*;
pub use game::*;

use minimax_bot::Strategy;

/// Who makes the decisions for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seat {
    /// Actions arrive through [`GameController::apply()`] and friends.
    Human,
    /// Actions are computed in the background after [`GameController::request_ai_move()`].
    Computer(Strategy),
}

pub struct Config {
    /// Only used for drawing the target colors of new games.
    pub rng: rand::rngs::StdRng,
    /// Indexed by [`Player::index()`](bingo::Player::index).
    pub seats: [Seat; 2],
}
