use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::{Board, CellIndex, EventLogger, GameEvent, GameEventHandler, GameStatus, Player};
use crate::utils::InvalidMove;

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub index: CellIndex,
    pub mark: Player,
    pub status: GameStatus,
}

/// Board, turn and outcome for one game at a time.
///
/// Every operation runs to completion synchronously. A move is either applied
/// in full or rejected with nothing changed.
pub struct GameEngine {
    board: Board,
    current_player: Player,
    status: GameStatus,
    history: Vec<CellIndex>,
    event_logger: EventLogger,
}

impl GameEngine {
    pub fn new() -> Self {
        let mut engine = Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
            event_logger: EventLogger::default(),
        };
        engine.emit_event(GameEvent::game_started(Player::X));
        engine
    }

    /// Empties the board and hands the first move back to X.
    pub fn reset(&mut self) {
        let discarded = self.history.len();

        self.board.clear();
        self.current_player = Player::X;
        self.status = GameStatus::InProgress;
        self.history.clear();

        info!("Game reset ({} moves discarded)", discarded);
        self.emit_event(GameEvent::game_reset(discarded));
        self.emit_event(GameEvent::game_started(Player::X));
    }

    pub fn apply_move(&mut self, index: usize) -> Result<MoveOutcome, InvalidMove> {
        match self.validate_move(index) {
            Ok(cell) => Ok(self.place_mark(cell)),
            Err(reason) => {
                debug!("Rejected move at {} by {}: {}", index, self.current_player, reason);
                self.emit_event(GameEvent::move_rejected(self.current_player, &reason));
                Err(reason)
            }
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Accepted moves of the current game, in play order.
    pub fn history(&self) -> &[CellIndex] {
        &self.history
    }

    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Cells that would accept a move right now. Empty once the game is over.
    pub fn available_cells(&self) -> Vec<CellIndex> {
        if self.status.is_over() {
            Vec::new()
        } else {
            self.board.empty_cells()
        }
    }

    /// Line to highlight when the game has been won.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.status
            .winner()
            .and_then(|winner| self.board.winning_line(winner))
    }

    pub fn recent_events(&self, count: usize) -> Vec<GameEvent> {
        self.event_logger
            .get_recent_events(count)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Events recorded after the one with id `last_seen`, oldest first. All
    /// retained events when `last_seen` is `None` or no longer retained.
    pub fn events_since(&self, last_seen: Option<Uuid>) -> Vec<GameEvent> {
        let events = self.event_logger.get_events();
        let start = last_seen
            .and_then(|id| events.iter().position(|event| event.id == id))
            .map_or(0, |position| position + 1);

        events[start..].iter().map(|event| (*event).clone()).collect()
    }

    fn validate_move(&self, index: usize) -> Result<CellIndex, InvalidMove> {
        if self.status.is_over() {
            return Err(InvalidMove::GameOver);
        }

        let cell = CellIndex::new(index)?;
        if !self.board.get(cell).is_empty() {
            return Err(InvalidMove::Occupied { index });
        }

        Ok(cell)
    }

    fn place_mark(&mut self, cell: CellIndex) -> MoveOutcome {
        let mark = self.current_player;

        self.board.place(cell, mark);
        self.history.push(cell);
        self.status = self.board.status_after_move(mark);

        debug!("{} played cell {} (move {})", mark, cell, self.history.len());
        self.emit_event(GameEvent::mark_placed(mark, cell, self.history.len()));

        match self.status {
            GameStatus::InProgress => {
                self.current_player = mark.opponent();
            }
            GameStatus::Won(winner) => {
                info!("{} won after {} moves", winner, self.history.len());
                self.emit_event(GameEvent::game_won(
                    winner,
                    self.board.winning_line(winner),
                    self.history.len(),
                ));
            }
            GameStatus::Draw => {
                info!("Game drawn after {} moves", self.history.len());
                self.emit_event(GameEvent::game_drawn(self.history.len()));
            }
        }

        MoveOutcome {
            index: cell,
            mark,
            status: self.status,
        }
    }

    fn emit_event(&mut self, event: GameEvent) {
        self.event_logger.handle_event(&event);
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
