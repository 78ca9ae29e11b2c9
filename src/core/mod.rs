pub mod board;
pub mod engine;
pub mod events;
pub mod game_state;
pub mod player;

pub use board::{Board, Cell, CellIndex, GameStatus, BOARD_SIZE, WINNING_LINES};
pub use engine::{GameEngine, MoveOutcome};
pub use events::{EventLogger, GameEvent, GameEventHandler, GameEventType};
pub use game_state::SessionStats;
pub use player::Player;
