mod evaluator;
mod search;
mod strategy;

pub use evaluator::*;
pub use search::*;
pub use strategy::*;
