use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

/// Why the engine refused a move. The engine is left untouched in every case.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("Cell {index} is outside the board (valid cells are 0-8)")]
    OutOfRange { index: i64 },

    #[error("Cell {index} is already taken")]
    Occupied { index: usize },

    #[error("The game is over, restart to play again")]
    GameOver,
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),

    #[error("Input error: {message}")]
    Input { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl GameError {
    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Errors the interface can report and then keep running after.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidMove(_) | Self::Input { .. })
    }
}
