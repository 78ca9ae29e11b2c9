use console::Term;
use std::io::{self, Write};

use crate::config::Config;
use crate::core::{Board, Cell, GameEvent, GameEventType, GameStatus, Player, SessionStats};
use crate::ui::ThemeManager;

pub struct Display {
    term: Term,
    theme_manager: ThemeManager,
    text_width: usize,
}

impl Display {
    pub fn new(theme_manager: ThemeManager, text_width: usize) -> io::Result<Self> {
        Ok(Self {
            term: Term::stdout(),
            theme_manager,
            text_width,
        })
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        self.term.clear_screen()
    }

    pub fn show_title(&self, title: &str) -> io::Result<()> {
        let styled_title = self.theme_manager.apply_style(title, "title");

        let border = "═".repeat(self.text_width);
        let styled_border = self.theme_manager.apply_style(&border, "separator");

        writeln!(io::stdout(), "{}", styled_title)?;
        writeln!(io::stdout(), "{}", styled_border)?;
        writeln!(io::stdout())?;

        Ok(())
    }

    pub fn show_board(&self, board: &Board, highlight: Option<[usize; 3]>, show_numbers: bool) -> io::Result<()> {
        writeln!(io::stdout(), "{}", self.render_board(board, highlight, show_numbers))?;
        writeln!(io::stdout())?;
        Ok(())
    }

    /// Three rows of cells separated by grid lines. Empty cells show their
    /// 1-based number when `show_numbers` is set.
    pub fn render_board(&self, board: &Board, highlight: Option<[usize; 3]>, show_numbers: bool) -> String {
        let divider = self.theme_manager.apply_style("───┼───┼───", "grid");
        let bar = self.theme_manager.apply_style("│", "grid");

        let rows: Vec<String> = board
            .cells()
            .chunks(3)
            .enumerate()
            .map(|(row, cells)| {
                let rendered: Vec<String> = cells
                    .iter()
                    .enumerate()
                    .map(|(column, cell)| {
                        let index = row * 3 + column;
                        let highlighted = highlight.is_some_and(|line| line.contains(&index));
                        self.render_cell(*cell, index, highlighted, show_numbers)
                    })
                    .collect();
                rendered.join(bar.as_str())
            })
            .collect();

        rows.join(format!("\n{}\n", divider).as_str())
    }

    fn render_cell(&self, cell: Cell, index: usize, highlighted: bool, show_numbers: bool) -> String {
        let (text, style) = match cell {
            Cell::Marked(player) => (format!(" {} ", player), mark_style(player)),
            Cell::Empty if show_numbers => (format!(" {} ", index + 1), "cell_number"),
            Cell::Empty => ("   ".to_string(), "grid"),
        };

        if highlighted {
            self.theme_manager.apply_style(&text, "highlight")
        } else {
            self.theme_manager.apply_style(&text, style)
        }
    }

    pub fn show_status(&self, status: GameStatus, current_player: Player, config: &Config) -> io::Result<()> {
        self.show_message(&status_text(status, current_player, config), "status")
    }

    pub fn show_scoreboard(&self, stats: &SessionStats, config: &Config) -> io::Result<()> {
        let text = format!(
            "🏆 {} (X): {} | {} (O): {} | Draws: {} | Rounds: {}",
            config.player_name(Player::X),
            stats.x_wins,
            config.player_name(Player::O),
            stats.o_wins,
            stats.draws,
            stats.rounds_played
        );
        self.show_message(&text, "scoreboard")?;
        writeln!(io::stdout())?;
        Ok(())
    }

    /// Short notice standing in for the move, win and restart sounds.
    pub fn show_cue(&self, event: &GameEvent) -> io::Result<()> {
        if let Some((text, style)) = cue_for(event) {
            self.show_message(&text, style)?;
        }
        Ok(())
    }

    pub fn show_message(&self, message: &str, style: &str) -> io::Result<()> {
        let styled_message = self.theme_manager.apply_style(message, style);
        writeln!(io::stdout(), "{}", styled_message)?;
        Ok(())
    }

    pub fn show_error(&self, error: &str) -> io::Result<()> {
        self.show_message(&format!("❌ {}", error), "error")
    }

    pub fn show_success(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("✅ {}", message), "success")
    }

    pub fn show_info(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("ℹ️ {}", message), "info")
    }

    pub fn show_separator(&self) -> io::Result<()> {
        let separator = "━".repeat(self.text_width);
        let styled = self.theme_manager.apply_style(&separator, "separator");
        writeln!(io::stdout(), "{}", styled)?;
        Ok(())
    }

    pub fn wait_for_enter(&self) -> io::Result<()> {
        let styled_prompt = self.theme_manager.apply_style("Press Enter to continue...", "info");
        print!("{}", styled_prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(())
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        self.theme_manager.set_theme(theme_name)
    }

    pub fn get_available_themes(&self) -> Vec<String> {
        self.theme_manager.list_themes()
    }
}

fn mark_style(player: Player) -> &'static str {
    match player {
        Player::X => "mark_x",
        Player::O => "mark_o",
    }
}

/// Status line under the board, e.g. "Player 1 has won!".
pub fn status_text(status: GameStatus, current_player: Player, config: &Config) -> String {
    match status {
        GameStatus::InProgress => format!(
            "{}'s turn ({})",
            config.player_name(current_player),
            current_player
        ),
        GameStatus::Won(winner) => format!("{} has won!", config.player_name(winner)),
        GameStatus::Draw => "It's a Draw!".to_string(),
    }
}

pub fn cue_for(event: &GameEvent) -> Option<(String, &'static str)> {
    match event.event_type {
        GameEventType::MarkPlaced => {
            let player = event.data["player"].as_str().unwrap_or("?");
            let cell = event.data["index"].as_u64().map(|i| i + 1).unwrap_or(0);
            Some((format!("♪ {} takes cell {}", player, cell), "info"))
        }
        GameEventType::GameWon => Some(("🎉 Three in a row!".to_string(), "success")),
        GameEventType::GameDrawn => Some(("🤝 Board full".to_string(), "warning")),
        GameEventType::GameReset => Some(("♪ New round".to_string(), "info")),
        GameEventType::GameStarted | GameEventType::MoveRejected => None,
    }
}
