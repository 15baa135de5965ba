use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
}

impl Theme {
    /// Catppuccin Mocha.
    pub fn default() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(108, 112, 134),
            text: Color::Rgb(205, 214, 244),
            red: Color::Rgb(243, 139, 168),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            blue: Color::Rgb(137, 180, 250),
            magenta: Color::Rgb(203, 166, 247),
            cyan: Color::Rgb(148, 226, 213),
        }
    }

    /// The brand pair: the web app's purple-to-blue gradient collapses to
    /// magenta for the wordmark and blue for accents.
    pub fn brand(&self) -> Color {
        self.magenta
    }
}

#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

pub fn get_theme_path() -> std::path::PathBuf {
    crate::config::AppConfig::get_config_dir().join("theme.toml")
}

pub fn load_current_theme() -> Theme {
    let path = get_theme_path();

    if path.exists() {
        if let Ok(content) = fs::read_to_string(&path) {
            // Nested [theme] table first, flat file as fallback
            if let Ok(wrapper) = toml::from_str::<ThemeFile>(&content) {
                return wrapper.theme;
            }
            if let Ok(theme) = toml::from_str::<Theme>(&content) {
                return theme;
            }
        }
        return Theme::default();
    }

    // Auto-create the default theme file so it's editable
    let default_theme = Theme::default();
    let wrapper = ThemeFile {
        theme: default_theme.clone(),
    };
    if let Ok(toml_str) = toml::to_string_pretty(&wrapper) {
        let _ = fs::write(&path, toml_str);
    }
    default_theme
}
