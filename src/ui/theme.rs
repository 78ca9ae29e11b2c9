use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: HashMap<String, ColorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    pub foreground: Option<String>,
    pub style: Vec<String>,
}

impl ColorConfig {
    fn new(foreground: &str, style: &[&str]) -> Self {
        Self {
            foreground: Some(foreground.to_string()),
            style: style.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    current_theme: String,
}

impl ThemeManager {
    pub fn new() -> Self {
        let mut manager = Self {
            themes: HashMap::new(),
            current_theme: "default".to_string(),
        };

        manager.load_default_themes();
        manager
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        if self.themes.contains_key(theme_name) {
            self.current_theme = theme_name.to_string();
            true
        } else {
            false
        }
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme
    }

    fn get_current_theme(&self) -> Option<&Theme> {
        self.themes
            .get(&self.current_theme)
            .or_else(|| self.themes.get("default"))
    }

    /// Styles `text` with the named entry of the current theme. Styles the
    /// theme does not define fall back to the default theme, then to plain text.
    pub fn apply_style(&self, text: &str, style_name: &str) -> String {
        let color_config = self
            .get_current_theme()
            .and_then(|theme| theme.colors.get(style_name))
            .or_else(|| self.themes.get("default").and_then(|theme| theme.colors.get(style_name)));

        let Some(color_config) = color_config else {
            return text.to_string();
        };

        let mut styled = text.normal();

        if let Some(color) = color_config.foreground.as_deref().and_then(parse_color) {
            styled = styled.color(color);
        }

        for style in &color_config.style {
            styled = match style.as_str() {
                "bold" => styled.bold(),
                "italic" => styled.italic(),
                "underline" => styled.underline(),
                "dimmed" => styled.dimmed(),
                "reversed" => styled.reversed(),
                _ => styled,
            };
        }

        styled.to_string()
    }

    pub fn list_themes(&self) -> Vec<String> {
        let mut names: Vec<String> = self.themes.keys().cloned().collect();
        names.sort();
        names
    }

    fn load_default_themes(&mut self) {
        let default_colors = HashMap::from([
            ("title".to_string(), ColorConfig::new("cyan", &["bold"])),
            ("mark_x".to_string(), ColorConfig::new("red", &["bold"])),
            ("mark_o".to_string(), ColorConfig::new("blue", &["bold"])),
            ("cell_number".to_string(), ColorConfig::new("bright_black", &["dimmed"])),
            ("grid".to_string(), ColorConfig::new("white", &[])),
            ("highlight".to_string(), ColorConfig::new("green", &["bold", "reversed"])),
            ("status".to_string(), ColorConfig::new("yellow", &["bold"])),
            ("scoreboard".to_string(), ColorConfig::new("magenta", &[])),
            ("error".to_string(), ColorConfig::new("red", &["bold"])),
            ("success".to_string(), ColorConfig::new("green", &["bold"])),
            ("warning".to_string(), ColorConfig::new("yellow", &["bold"])),
            ("info".to_string(), ColorConfig::new("blue", &[])),
            ("separator".to_string(), ColorConfig::new("bright_black", &["dimmed"])),
        ]);

        self.themes.insert("default".to_string(), Theme {
            name: "default".to_string(),
            colors: default_colors,
        });

        let dark_colors = HashMap::from([
            ("title".to_string(), ColorConfig::new("bright_cyan", &["bold"])),
            ("mark_x".to_string(), ColorConfig::new("bright_red", &["bold"])),
            ("mark_o".to_string(), ColorConfig::new("bright_blue", &["bold"])),
            ("grid".to_string(), ColorConfig::new("bright_white", &[])),
            ("highlight".to_string(), ColorConfig::new("bright_green", &["bold", "reversed"])),
            ("status".to_string(), ColorConfig::new("bright_yellow", &["bold"])),
            ("scoreboard".to_string(), ColorConfig::new("bright_magenta", &[])),
        ]);

        self.themes.insert("dark".to_string(), Theme {
            name: "dark".to_string(),
            colors: dark_colors,
        });

        let light_colors = HashMap::from([
            ("title".to_string(), ColorConfig::new("blue", &["bold"])),
            ("mark_x".to_string(), ColorConfig::new("magenta", &["bold"])),
            ("mark_o".to_string(), ColorConfig::new("cyan", &["bold"])),
            ("grid".to_string(), ColorConfig::new("black", &[])),
            ("status".to_string(), ColorConfig::new("black", &["bold"])),
        ]);

        self.themes.insert("light".to_string(), Theme {
            name: "light".to_string(),
            colors: light_colors,
        });
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_color(color_name: &str) -> Option<Color> {
    match color_name.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "bright_black" => Some(Color::BrightBlack),
        "bright_red" => Some(Color::BrightRed),
        "bright_green" => Some(Color::BrightGreen),
        "bright_yellow" => Some(Color::BrightYellow),
        "bright_blue" => Some(Color::BrightBlue),
        "bright_magenta" => Some(Color::BrightMagenta),
        "bright_cyan" => Some(Color::BrightCyan),
        "bright_white" => Some(Color::BrightWhite),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_manager_creation() {
        let manager = ThemeManager::new();
        assert_eq!(manager.current_theme_name(), "default");
        assert_eq!(manager.list_themes(), vec!["dark", "default", "light"]);
    }

    #[test]
    fn test_set_theme() {
        let mut manager = ThemeManager::new();

        assert!(manager.set_theme("dark"));
        assert_eq!(manager.current_theme_name(), "dark");

        assert!(!manager.set_theme("nonexistent"));
        assert_eq!(manager.current_theme_name(), "dark");
    }

    #[test]
    fn test_apply_style() {
        colored::control::set_override(true);
        let mut manager = ThemeManager::new();

        let styled = manager.apply_style("X", "mark_x");
        assert!(styled.contains('X'));
        assert_ne!(styled, "X");

        assert_eq!(manager.apply_style("Test", "nonexistent"), "Test");

        // light theme has no "error" entry, falls back to default
        manager.set_theme("light");
        assert_ne!(manager.apply_style("oops", "error"), "oops");
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("RED"), Some(Color::Red));
        assert_eq!(parse_color("bright_green"), Some(Color::BrightGreen));
        assert_eq!(parse_color("invalid"), None);
    }
}
