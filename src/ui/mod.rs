pub mod components;
pub mod interface;
pub mod theme;

pub use components::*;
pub use interface::{parse_command, Command, GameInterface, TurnOutcome};
pub use theme::{Theme, ThemeManager};
