pub mod errors;

pub use errors::{GameError, GameResult, InvalidMove};
