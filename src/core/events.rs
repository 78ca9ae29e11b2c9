use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::core::{CellIndex, Player};
use crate::utils::InvalidMove;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: Uuid,
    pub event_type: GameEventType,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventType {
    GameStarted,
    MarkPlaced,
    MoveRejected,
    GameWon,
    GameDrawn,
    GameReset,
}

impl GameEvent {
    pub fn new(event_type: GameEventType, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            timestamp: Utc::now(),
            data,
        }
    }

    pub fn game_started(first_player: Player) -> Self {
        let data = serde_json::json!({
            "first_player": first_player.to_string()
        });
        Self::new(GameEventType::GameStarted, data)
    }

    pub fn mark_placed(player: Player, index: CellIndex, move_number: usize) -> Self {
        let data = serde_json::json!({
            "player": player.to_string(),
            "index": index.get(),
            "move_number": move_number
        });
        Self::new(GameEventType::MarkPlaced, data)
    }

    pub fn move_rejected(player: Player, reason: &InvalidMove) -> Self {
        let data = serde_json::json!({
            "player": player.to_string(),
            "reason": reason.to_string()
        });
        Self::new(GameEventType::MoveRejected, data)
    }

    pub fn game_won(winner: Player, line: Option<[usize; 3]>, moves: usize) -> Self {
        let data = serde_json::json!({
            "winner": winner.to_string(),
            "line": line,
            "moves": moves
        });
        Self::new(GameEventType::GameWon, data)
    }

    pub fn game_drawn(moves: usize) -> Self {
        let data = serde_json::json!({
            "moves": moves
        });
        Self::new(GameEventType::GameDrawn, data)
    }

    pub fn game_reset(moves_discarded: usize) -> Self {
        let data = serde_json::json!({
            "moves_discarded": moves_discarded
        });
        Self::new(GameEventType::GameReset, data)
    }
}

pub trait GameEventHandler {
    fn handle_event(&mut self, event: &GameEvent);
}

/// Keeps the most recent `max_events` events, oldest first.
pub struct EventLogger {
    events: VecDeque<GameEvent>,
    max_events: usize,
}

impl EventLogger {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::new(),
            max_events,
        }
    }

    pub fn get_events(&self) -> Vec<&GameEvent> {
        self.events.iter().collect()
    }

    /// Newest first.
    pub fn get_recent_events(&self, count: usize) -> Vec<&GameEvent> {
        self.events.iter().rev().take(count).collect()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.push_back(event.clone());

        while self.events.len() > self.max_events {
            self.events.pop_front();
        }
    }
}
