use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{GameStatus, Player};

/// Running tally of finished rounds. Lives only as long as the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds_played: u32,
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
    pub session_start_time: DateTime<Utc>,
    pub last_result: Option<GameStatus>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            rounds_played: 0,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            session_start_time: Utc::now(),
            last_result: None,
        }
    }

    /// Counts a finished round. Returns false and changes nothing for `InProgress`.
    pub fn record(&mut self, status: GameStatus) -> bool {
        match status {
            GameStatus::InProgress => return false,
            GameStatus::Won(Player::X) => self.x_wins += 1,
            GameStatus::Won(Player::O) => self.o_wins += 1,
            GameStatus::Draw => self.draws += 1,
        }
        self.rounds_played += 1;
        self.last_result = Some(status);
        true
    }

    pub fn wins_for(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    pub fn leader(&self) -> Option<Player> {
        match self.x_wins.cmp(&self.o_wins) {
            std::cmp::Ordering::Greater => Some(Player::X),
            std::cmp::Ordering::Less => Some(Player::O),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn get_session_length_formatted(&self) -> String {
        let seconds = (Utc::now() - self.session_start_time).num_seconds().max(0);
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let seconds = seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
