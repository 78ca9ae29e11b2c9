use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two marks. X always opens a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::X, Player::O];

    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    /// Seat label used when no custom name is configured.
    pub fn default_name(self) -> &'static str {
        match self {
            Player::X => "Player 1",
            Player::O => "Player 2",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent(), Player::X);
        assert_eq!(Player::X.opponent().opponent(), Player::X);
    }

    #[test]
    fn test_symbols_and_names() {
        assert_eq!(Player::X.to_string(), "X");
        assert_eq!(Player::O.symbol(), 'O');
        assert_eq!(Player::X.default_name(), "Player 1");
        assert_eq!(Player::O.default_name(), "Player 2");
    }
}
