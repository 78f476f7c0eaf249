//! Theme colors, optionally overridden from ~/.config/autox/theme.conf
//!
//! The file uses kitty-style `key #hexcolor` lines; unknown keys are ignored.

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct Theme {
    pub brand: Color,          // Logo, prices, active nav entry
    pub brand_bright: Color,   // Focused inputs
    pub danger: Color,         // Logout, not-found, unavailable
    pub success: Color,        // Feature checks, available, verified
    pub rating: Color,         // Stars
    pub text: Color,
    pub text_dim: Color,
    pub bg_selected: Color,
    pub inactive: Color,       // Borders, disabled button
    pub header: Color,         // Section headings
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            brand: Color::Rgb(37, 99, 235),
            brand_bright: Color::Rgb(96, 165, 250),
            danger: Color::Rgb(220, 38, 38),
            success: Color::Rgb(34, 197, 94),
            rating: Color::Rgb(250, 204, 21),
            text: Color::Rgb(229, 231, 235),
            text_dim: Color::Rgb(156, 163, 175),
            bg_selected: Color::Rgb(30, 58, 138),
            inactive: Color::Rgb(75, 85, 99),
            header: Color::Rgb(243, 244, 246),
        }
    }
}

impl Theme {
    pub fn load() -> Self {
        match AppConfig::config_dir() {
            Some(dir) => Self::load_from(&dir.join("theme.conf")),
            None => Self::default(),
        }
    }

    /// Read overrides from `path`; a missing or unreadable file means defaults
    fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_conf(&content),
            Err(_) => Self::default(),
        }
    }

    /// Apply overrides from theme.conf content on top of the defaults
    fn from_conf(content: &str) -> Self {
        let colors = Self::parse_conf(content);
        let base = Self::default();
        let pick = |key: &str, fallback: Color| colors.get(key).copied().unwrap_or(fallback);

        Self {
            brand: pick("brand", base.brand),
            brand_bright: pick("brand_bright", base.brand_bright),
            danger: pick("danger", base.danger),
            success: pick("success", base.success),
            rating: pick("rating", base.rating),
            text: pick("text", base.text),
            text_dim: pick("text_dim", base.text_dim),
            bg_selected: pick("bg_selected", base.bg_selected),
            inactive: pick("inactive", base.inactive),
            header: pick("header", base.header),
        }
    }

    fn parse_conf(content: &str) -> HashMap<String, Color> {
        let mut colors = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(char::is_whitespace) {
                if let Some(color) = Self::parse_hex_color(value) {
                    colors.insert(key.trim().to_string(), color);
                }
            }
        }

        colors
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Theme::parse_hex_color("#2563eb"), Some(Color::Rgb(37, 99, 235)));
        assert_eq!(Theme::parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("#12345"), None);
        assert_eq!(Theme::parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_missing_theme_file_uses_defaults() {
        let path = std::env::temp_dir().join("autox-no-such-dir").join("theme.conf");
        let theme = Theme::load_from(&path);
        let defaults = Theme::default();

        assert_eq!(theme.brand, defaults.brand);
        assert_eq!(theme.text, defaults.text);
        assert_eq!(theme.danger, defaults.danger);
    }

    #[test]
    fn test_conf_overrides_only_known_keys() {
        let theme = Theme::from_conf("# comment\nbrand #ff0000\nunknown #00ff00\nrating   nothex\n");

        assert_eq!(theme.brand, Color::Rgb(255, 0, 0));
        assert_eq!(theme.rating, Theme::default().rating);
    }
}
