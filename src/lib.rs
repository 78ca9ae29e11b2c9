pub mod config;
pub mod core;
pub mod ui;
pub mod utils;

pub use crate::config::Config;
pub use crate::core::{engine::GameEngine, Board, CellIndex, GameStatus, MoveOutcome, Player};
pub use ui::GameInterface;
pub use utils::{GameError, GameResult, InvalidMove};

// Re-export commonly used types
pub type Result<T> = anyhow::Result<T>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
