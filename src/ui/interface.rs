use dialoguer::{Confirm, Input, Select};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::core::{CellIndex, GameEngine, GameStatus, MoveOutcome, SessionStats};
use crate::ui::{Display, ThemeManager};
use crate::utils::{GameError, GameResult};

/// What the player typed at the turn prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(CellIndex),
    Restart,
    Quit,
}

/// Maps typed text to a command. Cells are numbered 1-9 on screen and
/// translated to board indices 0-8 here.
pub fn parse_command(input: &str) -> GameResult<Command> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "r" | "restart" => Ok(Command::Restart),
        "q" | "quit" => Ok(Command::Quit),
        "" => Err(GameError::input("Type a cell number (1-9), 'r' to restart or 'q' to quit")),
        other => {
            let number = parse_cell_number(other)?;
            let index = CellIndex::try_from(number.saturating_sub(1))?;
            Ok(Command::Play(index))
        }
    }
}

// Digit strings too long for i64 clamp to the nearest bound so they still
// report as off the board.
fn parse_cell_number(text: &str) -> GameResult<i64> {
    if let Ok(number) = text.parse::<i64>() {
        return Ok(number);
    }

    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(if negative { i64::MIN } else { i64::MAX });
    }

    Err(GameError::input(format!("'{}' is not a cell number", text)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Played(MoveOutcome),
    Restarted,
    Quit,
}

pub struct GameInterface {
    engine: GameEngine,
    stats: SessionStats,
    display: Display,
    config: Config,
    last_seen_event: Option<Uuid>,
}

impl GameInterface {
    pub async fn new(config: Config) -> GameResult<Self> {
        info!("Initializing game interface");

        config.validate()?;

        let theme_manager = ThemeManager::new();
        let mut display = Display::new(theme_manager, config.ui.text_width)
            .map_err(|e| GameError::configuration(format!("Failed to create display: {}", e)))?;

        if !display.set_theme(&config.ui.theme) {
            warn!("Unknown theme '{}', using default", config.ui.theme);
        }

        let engine = GameEngine::new();
        let last_seen_event = engine.recent_events(1).first().map(|event| event.id);

        Ok(Self {
            engine,
            stats: SessionStats::new(),
            display,
            config,
            last_seen_event,
        })
    }

    pub async fn run(&mut self) -> GameResult<()> {
        info!("Starting game interface");

        loop {
            match self.show_landing_page().await {
                Ok(should_continue) => {
                    if !should_continue {
                        break;
                    }
                }
                Err(e) => {
                    error!("Landing page error: {}", e);
                    self.display.show_error(&format!("An error occurred: {}", e)).ok();
                    self.display.wait_for_enter().ok();
                }
            }
        }

        self.display.show_message("Thanks for playing!", "success").ok();
        Ok(())
    }

    pub async fn show_landing_page(&mut self) -> GameResult<bool> {
        self.display.clear_screen().ok();
        self.show_game_title()?;

        let choices = vec!["🎮 Start Game", "⚙️ Settings", "🚪 Exit"];

        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(&choices)
            .default(0)
            .interact()
            .map_err(|e| GameError::input(format!("Menu selection error: {}", e)))?;

        match selection {
            0 => self.play().await?,
            1 => self.settings_menu()?,
            2 => return Ok(false),
            _ => unreachable!(),
        }

        Ok(true)
    }

    fn show_game_title(&self) -> GameResult<()> {
        let title = r#"
 _____ _        _____            _____
|_   _(_) ___  |_   _|_ _  ___  |_   _|__   ___
  | | | |/ __|   | |/ _` |/ __|   | |/ _ \ / _ \
  | | | | (__    | | (_| | (__    | | (_) |  __/
  |_| |_|\___|   |_|\__,_|\___|   |_|\___/ \___|
"#;

        self.display.show_title(title)?;
        self.display.show_message(
            &format!(
                "{} (X) vs {} (O)",
                self.config.game.player_one_name, self.config.game.player_two_name
            ),
            "info",
        )?;
        self.display.show_message(&format!("Version {}", crate::VERSION), "info")?;
        println!();

        Ok(())
    }

    /// Plays rounds until a player quits back to the landing page.
    pub async fn play(&mut self) -> GameResult<()> {
        if self.engine.moves_played() > 0 {
            self.engine.reset();
            self.mark_events_seen();
        }

        loop {
            self.draw_screen()?;

            let status = self.engine.status();
            if status.is_over() {
                if self.config.get_animation_delay_ms() > 0 {
                    sleep(Duration::from_millis(self.config.get_animation_delay_ms())).await;
                }
                if self.round_over_menu()? {
                    self.execute(Command::Restart)?;
                    continue;
                }
                return Ok(());
            }

            let input: String = Input::new()
                .with_prompt("Cell (1-9), 'r' restart, 'q' quit")
                .allow_empty(true)
                .interact_text()
                .map_err(|e| GameError::input(format!("Turn input error: {}", e)))?;

            let command = match parse_command(&input) {
                Ok(command) => command,
                Err(e) => {
                    self.show_recoverable(&e)?;
                    continue;
                }
            };

            if command == Command::Restart && !self.confirm_restart()? {
                continue;
            }

            match self.execute(command) {
                Ok(TurnOutcome::Quit) => return Ok(()),
                Ok(_) => {}
                Err(e) if e.is_recoverable() => self.show_recoverable(&e)?,
                Err(e) => return Err(e),
            }
        }
    }

    /// Applies one command to the engine. Finished rounds are counted in the
    /// session statistics as they end.
    pub fn execute(&mut self, command: Command) -> GameResult<TurnOutcome> {
        match command {
            Command::Play(index) => {
                let outcome = self.engine.apply_move(index.get())?;
                if outcome.status.is_over() {
                    self.stats.record(outcome.status);
                    debug!("Session now at {} rounds", self.stats.rounds_played);
                }
                Ok(TurnOutcome::Played(outcome))
            }
            Command::Restart => {
                self.engine.reset();
                Ok(TurnOutcome::Restarted)
            }
            Command::Quit => {
                info!("Leaving round after {} moves", self.engine.moves_played());
                Ok(TurnOutcome::Quit)
            }
        }
    }

    fn draw_screen(&mut self) -> GameResult<()> {
        self.display.clear_screen().ok();

        if self.config.game.show_scoreboard {
            self.display.show_scoreboard(&self.stats, &self.config)?;
        }

        self.display.show_board(
            self.engine.board(),
            self.engine.winning_line(),
            self.config.ui.show_cell_numbers,
        )?;

        for event in self.engine.events_since(self.last_seen_event) {
            self.display.show_cue(&event)?;
            self.last_seen_event = Some(event.id);
        }

        self.display
            .show_status(self.engine.status(), self.engine.current_player(), &self.config)?;
        self.display.show_separator()?;
        Ok(())
    }

    fn mark_events_seen(&mut self) {
        if let Some(event) = self.engine.recent_events(1).first() {
            self.last_seen_event = Some(event.id);
        }
    }

    fn show_recoverable(&self, error: &GameError) -> GameResult<()> {
        let message = match error {
            GameError::InvalidMove(reason) => reason.to_string(),
            GameError::Input { message } => message.clone(),
            other => other.to_string(),
        };
        self.display.show_error(&message)?;
        self.display.wait_for_enter()?;
        Ok(())
    }

    fn round_over_menu(&self) -> GameResult<bool> {
        let choices = vec!["🔄 Play Again", "🔙 Back to Menu"];

        let selection = Select::new()
            .with_prompt("Round over")
            .items(&choices)
            .default(0)
            .interact()
            .map_err(|e| GameError::input(format!("Round menu error: {}", e)))?;

        Ok(selection == 0)
    }

    fn confirm_restart(&self) -> GameResult<bool> {
        if !self.config.game.confirm_restart || self.engine.moves_played() == 0 {
            return Ok(true);
        }

        Confirm::new()
            .with_prompt("Restart this round? The board will be cleared")
            .default(true)
            .interact()
            .map_err(|e| GameError::input(format!("Restart confirmation error: {}", e)))
    }

    fn settings_menu(&mut self) -> GameResult<()> {
        loop {
            let scoreboard_label = if self.config.game.show_scoreboard {
                "🏆 Hide Scoreboard"
            } else {
                "🏆 Show Scoreboard"
            };
            let choices = vec!["🎨 Change Theme", scoreboard_label, "📊 Session Statistics", "🔙 Back"];

            let selection = Select::new()
                .with_prompt("Settings")
                .items(&choices)
                .interact()
                .map_err(|e| GameError::input(format!("Settings selection error: {}", e)))?;

            match selection {
                0 => self.change_theme()?,
                1 => self.toggle_scoreboard(),
                2 => self.show_session_statistics()?,
                3 => break,
                _ => unreachable!(),
            }
        }

        Ok(())
    }

    fn change_theme(&mut self) -> GameResult<()> {
        let themes = self.display.get_available_themes();

        let selection = Select::new()
            .with_prompt("Choose theme")
            .items(&themes)
            .interact()
            .map_err(|e| GameError::input(format!("Theme selection error: {}", e)))?;

        let selected_theme = &themes[selection];

        if self.display.set_theme(selected_theme) {
            self.config.ui.theme = selected_theme.clone();
            self.display.show_success(&format!("Theme changed to '{}'", selected_theme))?;
        } else {
            self.display.show_error(&format!("Failed to set theme '{}'", selected_theme))?;
        }

        self.display.wait_for_enter()?;
        Ok(())
    }

    fn toggle_scoreboard(&mut self) {
        self.config.game.show_scoreboard = !self.config.game.show_scoreboard;
        let status = if self.config.game.show_scoreboard { "shown" } else { "hidden" };
        self.display.show_success(&format!("Scoreboard {}", status)).ok();
        self.display.wait_for_enter().ok();
    }

    fn show_session_statistics(&self) -> GameResult<()> {
        let stats = &self.stats;

        self.display.show_message("📊 Session Statistics", "title")?;
        self.display.show_separator()?;
        self.display.show_message(&format!("Session length: {}", stats.get_session_length_formatted()), "info")?;
        self.display.show_message(&format!("Rounds played: {}", stats.rounds_played), "info")?;
        self.display.show_scoreboard(stats, &self.config)?;

        match stats.leader() {
            Some(player) => self
                .display
                .show_message(&format!("{} is ahead", self.config.player_name(player)), "status")?,
            None if stats.rounds_played > 0 => self.display.show_message("All square", "status")?,
            None => self.display.show_info("No rounds finished yet")?,
        }

        self.display.show_separator()?;
        self.display.wait_for_enter()?;
        Ok(())
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;
    use crate::utils::InvalidMove;

    fn play_cells(interface: &mut GameInterface, cells: &[usize]) {
        for &cell in cells {
            let index = CellIndex::new(cell).unwrap();
            interface.execute(Command::Play(index)).unwrap();
        }
    }

    #[test]
    fn test_parse_cell_numbers() {
        assert_eq!(parse_command("1").unwrap(), Command::Play(CellIndex::new(0).unwrap()));
        assert_eq!(parse_command(" 9 ").unwrap(), Command::Play(CellIndex::new(8).unwrap()));
    }

    #[test]
    fn test_parse_out_of_range() {
        // "0" would be index -1
        assert!(matches!(
            parse_command("0"),
            Err(GameError::InvalidMove(InvalidMove::OutOfRange { index: -1 }))
        ));
        assert!(matches!(
            parse_command("10"),
            Err(GameError::InvalidMove(InvalidMove::OutOfRange { index: 9 }))
        ));
        assert!(matches!(
            parse_command("-3"),
            Err(GameError::InvalidMove(InvalidMove::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_parse_huge_numbers_out_of_range() {
        assert!(matches!(
            parse_command("99999999999999999999"),
            Err(GameError::InvalidMove(InvalidMove::OutOfRange { index })) if index > 8
        ));
        assert!(matches!(
            parse_command("-99999999999999999999"),
            Err(GameError::InvalidMove(InvalidMove::OutOfRange { index })) if index < 0
        ));
        assert!(matches!(parse_command("12a"), Err(GameError::Input { .. })));
        assert!(matches!(parse_command("-"), Err(GameError::Input { .. })));
    }

    #[test]
    fn test_parse_words() {
        assert_eq!(parse_command("r").unwrap(), Command::Restart);
        assert_eq!(parse_command("RESTART").unwrap(), Command::Restart);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert!(matches!(parse_command("hello"), Err(GameError::Input { .. })));
        assert!(matches!(parse_command("   "), Err(GameError::Input { .. })));
    }

    #[tokio::test]
    async fn test_execute_round_and_record() {
        let mut interface = GameInterface::new(Config::default()).await.unwrap();

        play_cells(&mut interface, &[0, 3, 1, 4, 2]);

        assert_eq!(interface.status(), GameStatus::Won(Player::X));
        assert_eq!(interface.stats().wins_for(Player::X), 1);
        assert_eq!(interface.stats().rounds_played, 1);
    }

    #[tokio::test]
    async fn test_execute_rejects_after_game_over() {
        let mut interface = GameInterface::new(Config::default()).await.unwrap();
        play_cells(&mut interface, &[0, 3, 1, 4, 2]);

        let result = interface.execute(Command::Play(CellIndex::new(8).unwrap()));

        assert!(matches!(result, Err(GameError::InvalidMove(InvalidMove::GameOver))));
        // still only one round counted
        assert_eq!(interface.stats().rounds_played, 1);
    }

    #[tokio::test]
    async fn test_execute_restart_keeps_stats() {
        let mut interface = GameInterface::new(Config::default()).await.unwrap();
        play_cells(&mut interface, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(interface.status(), GameStatus::Draw);

        let outcome = interface.execute(Command::Restart).unwrap();

        assert_eq!(outcome, TurnOutcome::Restarted);
        assert_eq!(interface.status(), GameStatus::InProgress);
        assert_eq!(interface.engine().current_player(), Player::X);
        assert_eq!(interface.engine().moves_played(), 0);
        assert_eq!(interface.stats().draws, 1);
    }

    #[tokio::test]
    async fn test_occupied_cell_is_recoverable() {
        let mut interface = GameInterface::new(Config::default()).await.unwrap();
        play_cells(&mut interface, &[4]);

        let error = interface
            .execute(Command::Play(CellIndex::new(4).unwrap()))
            .unwrap_err();

        assert!(error.is_recoverable());
        assert_eq!(interface.engine().current_player(), Player::O);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.ui.text_width = 5;

        assert!(GameInterface::new(config).await.is_err());
    }
}
