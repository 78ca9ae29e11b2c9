use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::core::Player;
use crate::utils::{GameError, GameResult};

/// Prefix for environment overrides, e.g. `TICTACTOE__UI__THEME=dark`.
pub const ENV_PREFIX: &str = "TICTACTOE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_one_name: String,
    pub player_two_name: String,
    pub confirm_restart: bool,
    pub show_scoreboard: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
    pub show_cell_numbers: bool,
    pub animation_speed: AnimationSpeed,
    pub text_width: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationSpeed {
    None,
    Slow,
    Medium,
    Fast,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_one_name: Player::X.default_name().to_string(),
            player_two_name: Player::O.default_name().to_string(),
            confirm_restart: true,
            show_scoreboard: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            show_cell_numbers: true,
            animation_speed: AnimationSpeed::Medium,
            text_width: 40,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads a TOML config file, writing the defaults there first if it is missing.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GameError::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Layers defaults, the optional file at `path`, then `TICTACTOE__*` variables.
    pub fn load(path: Option<&Path>) -> GameResult<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            debug!("Reading configuration from {:?}", path);
            builder = builder.add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(false),
            );
        }

        let settings = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GameError::configuration(format!("Failed to create config directory: {}", e)))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .map_err(|e| GameError::configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_content)
            .map_err(|e| GameError::configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> GameResult<()> {
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(GameError::configuration("Invalid logging level")),
        }

        if self.game.player_one_name.trim().is_empty() || self.game.player_two_name.trim().is_empty() {
            return Err(GameError::configuration("Player names cannot be empty"));
        }
        if self.game.player_one_name == self.game.player_two_name {
            return Err(GameError::configuration("Player names must differ"));
        }
        if self.ui.text_width < 20 {
            return Err(GameError::configuration("Text width must be at least 20"));
        }

        Ok(())
    }

    pub fn merge_with_cli(&mut self, cli_config: CliConfig) {
        if let Some(log_level) = cli_config.log_level {
            self.logging.level = log_level;
        }
        if cli_config.debug {
            self.logging.level = "debug".to_string();
        }
        if let Some(theme) = cli_config.theme {
            self.ui.theme = theme;
        }
    }

    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::X => &self.game.player_one_name,
            Player::O => &self.game.player_two_name,
        }
    }

    /// Pause after a round ends, before the result menu appears.
    pub fn get_animation_delay_ms(&self) -> u64 {
        match self.ui.animation_speed {
            AnimationSpeed::None => 0,
            AnimationSpeed::Slow => 600,
            AnimationSpeed::Medium => 300,
            AnimationSpeed::Fast => 100,
        }
    }
}

// Configuration that can be overridden by CLI arguments
#[derive(Debug, Default)]
pub struct CliConfig {
    pub log_level: Option<String>,
    pub debug: bool,
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.game.player_one_name, "Player 1");
        assert_eq!(config.game.player_two_name, "Player 2");
        assert!(config.game.confirm_restart);
        assert_eq!(config.ui.theme, "default");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());

        config = Config::default();
        config.game.player_two_name = "Player 1".to_string();
        assert!(config.validate().is_err());

        config = Config::default();
        config.game.player_one_name = "  ".to_string();
        assert!(config.validate().is_err());

        config = Config::default();
        config.ui.text_width = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut original_config = Config::default();
        original_config.game.player_one_name = "Alice".to_string();
        original_config.save_to_file(&config_path).unwrap();

        let loaded_config = Config::from_file(&config_path).unwrap();
        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_from_file_writes_defaults_when_missing() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::from_file(&config_path).unwrap();

        assert_eq!(config, Config::default());
        assert!(config_path.exists());
    }

    #[test]
    fn test_from_file_rejects_malformed_toml() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        std::fs::write(&config_path, "[ui\ntheme = ").unwrap();

        let result = Config::from_file(&config_path);
        assert!(matches!(result, Err(GameError::Toml(_))));
    }

    #[test]
    fn test_layered_load_fills_missing_keys() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        std::fs::write(&config_path, "[ui]\ntheme = \"dark\"\n").unwrap();

        let config = Config::load(Some(config_path.as_path())).unwrap();

        assert_eq!(config.ui.theme, "dark");
        assert_eq!(config.ui.text_width, UiConfig::default().text_width);
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn test_cli_config_merge() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            log_level: Some("warn".to_string()),
            debug: false,
            theme: Some("light".to_string()),
        };

        config.merge_with_cli(cli_config);

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.ui.theme, "light");

        config.merge_with_cli(CliConfig {
            debug: true,
            ..Default::default()
        });
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_player_names_and_delay() {
        let mut config = Config::default();
        assert_eq!(config.player_name(Player::X), "Player 1");
        assert_eq!(config.player_name(Player::O), "Player 2");

        config.ui.animation_speed = AnimationSpeed::None;
        assert_eq!(config.get_animation_delay_ms(), 0);
        config.ui.animation_speed = AnimationSpeed::Fast;
        assert_eq!(config.get_animation_delay_ms(), 100);
    }
}
