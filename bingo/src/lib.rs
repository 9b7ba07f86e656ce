pub use action::*;
pub use board::*;
pub use colors::*;
pub use errors::*;
pub use player::*;
pub use state::*;
pub use stock::*;
pub use visualization::*;

mod action;
#[cfg(test)]
mod arbitrary;
mod board;
mod colors;
mod errors;
mod moves;
mod player;
mod state;
mod stock;
mod visualization;
