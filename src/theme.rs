//! Application-wide theme system
//!
//! Maps the semantic [`Tone`]s used by report content onto terminal colors,
//! plus the chrome colors of the sidebar, cards and status bar. Two built-in
//! presets ship: `dark` and `light`.

use crate::data::Tone;
use ratatui::style::Color;
use std::collections::HashMap;

/// Complete application theme defining all UI colors
#[derive(Debug, Clone)]
pub struct DeckTheme {
    pub name: String,

    // Sidebar
    pub sidebar_background: Color,
    pub sidebar_text: Color,
    pub sidebar_active_background: Color,
    pub sidebar_active_text: Color,
    pub sidebar_header: Color,
    pub overlay_dim: Color,

    // Content
    pub background: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub heading: Color,

    // Cards
    pub card_border: Color,
    pub card_border_focused: Color,
    pub card_title: Color,

    // Tables
    pub table_header_background: Color,
    pub table_header_text: Color,
    pub table_highlight_background: Color,

    // Status bar
    pub status_background: Color,
    pub status_text: Color,

    // Semantic tones
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub info: Color,
    pub accent: Color,
    pub gold: Color,
    pub silver: Color,
    pub bronze: Color,
}

impl DeckTheme {
    /// Terminal color for a semantic tone. `Default` yields `None` so the
    /// cell keeps the surrounding color.
    pub fn tone(&self, tone: Tone) -> Option<Color> {
        match tone {
            Tone::Default => None,
            Tone::Strong => Some(self.heading),
            Tone::Muted => Some(self.text_secondary),
            Tone::Positive => Some(self.positive),
            Tone::Negative => Some(self.negative),
            Tone::Warning => Some(self.warning),
            Tone::Info => Some(self.info),
            Tone::Accent => Some(self.accent),
            Tone::Gold => Some(self.gold),
            Tone::Silver => Some(self.silver),
            Tone::Bronze => Some(self.bronze),
        }
    }

    /// Series color from a `#rrggbb` string, falling back to the accent.
    pub fn series_color(&self, hex: &str) -> Color {
        hex_to_color(hex).unwrap_or(self.accent)
    }
}

/// Convert hex string to ratatui Color
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color::Rgb(r, g, b))
}

pub struct ThemePresets;

impl ThemePresets {
    /// Get all available built-in themes
    pub fn all() -> HashMap<String, DeckTheme> {
        let mut themes = HashMap::new();
        themes.insert("dark".to_string(), Self::dark());
        themes.insert("light".to_string(), Self::light());
        themes
    }

    /// Theme by name; unknown names fall back to `dark`.
    pub fn by_name(name: &str) -> DeckTheme {
        match Self::all().remove(&name.trim().to_lowercase()) {
            Some(theme) => theme,
            None => {
                tracing::warn!("Unknown theme '{}', using dark", name);
                Self::dark()
            }
        }
    }

    /// Slate sidebar on a near-black canvas
    pub fn dark() -> DeckTheme {
        DeckTheme {
            name: "Dark".to_string(),

            sidebar_background: Color::Rgb(30, 41, 59),
            sidebar_text: Color::Rgb(203, 213, 225),
            sidebar_active_background: Color::Rgb(37, 99, 235),
            sidebar_active_text: Color::White,
            sidebar_header: Color::White,
            overlay_dim: Color::Rgb(15, 23, 42),

            background: Color::Reset,
            text_primary: Color::Rgb(226, 232, 240),
            text_secondary: Color::Rgb(148, 163, 184),
            heading: Color::White,

            card_border: Color::Rgb(71, 85, 105),
            card_border_focused: Color::Rgb(96, 165, 250),
            card_title: Color::Rgb(191, 219, 254),

            table_header_background: Color::Rgb(51, 65, 85),
            table_header_text: Color::White,
            table_highlight_background: Color::Rgb(30, 58, 138),

            status_background: Color::Rgb(30, 41, 59),
            status_text: Color::Rgb(148, 163, 184),

            positive: Color::Rgb(34, 197, 94),
            negative: Color::Rgb(239, 68, 68),
            warning: Color::Rgb(245, 158, 11),
            info: Color::Rgb(59, 130, 246),
            accent: Color::Rgb(20, 184, 166),
            gold: Color::Rgb(234, 179, 8),
            silver: Color::Rgb(156, 163, 175),
            bronze: Color::Rgb(180, 83, 9),
        }
    }

    /// Print-like palette for light terminals
    pub fn light() -> DeckTheme {
        DeckTheme {
            name: "Light".to_string(),

            sidebar_background: Color::Rgb(30, 41, 59),
            sidebar_text: Color::Rgb(226, 232, 240),
            sidebar_active_background: Color::Rgb(37, 99, 235),
            sidebar_active_text: Color::White,
            sidebar_header: Color::White,
            overlay_dim: Color::Rgb(100, 116, 139),

            background: Color::Rgb(248, 250, 252),
            text_primary: Color::Rgb(30, 41, 59),
            text_secondary: Color::Rgb(71, 85, 105),
            heading: Color::Rgb(15, 23, 42),

            card_border: Color::Rgb(203, 213, 225),
            card_border_focused: Color::Rgb(37, 99, 235),
            card_title: Color::Rgb(30, 64, 175),

            table_header_background: Color::Rgb(226, 232, 240),
            table_header_text: Color::Rgb(15, 23, 42),
            table_highlight_background: Color::Rgb(219, 234, 254),

            status_background: Color::Rgb(226, 232, 240),
            status_text: Color::Rgb(71, 85, 105),

            positive: Color::Rgb(22, 163, 74),
            negative: Color::Rgb(220, 38, 38),
            warning: Color::Rgb(217, 119, 6),
            info: Color::Rgb(37, 99, 235),
            accent: Color::Rgb(13, 148, 136),
            gold: Color::Rgb(202, 138, 4),
            silver: Color::Rgb(107, 114, 128),
            bronze: Color::Rgb(154, 52, 18),
        }
    }
}

impl Default for DeckTheme {
    fn default() -> Self {
        ThemePresets::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color() {
        assert_eq!(hex_to_color("#3b82f6"), Some(Color::Rgb(59, 130, 246)));
        assert_eq!(hex_to_color("14b8a6"), Some(Color::Rgb(20, 184, 166)));
        assert_eq!(hex_to_color("#fff"), None);
        assert_eq!(hex_to_color("#zzzzzz"), None);
    }

    #[test]
    fn test_default_tone_has_no_color() {
        let theme = ThemePresets::dark();
        assert_eq!(theme.tone(Tone::Default), None);
        assert_eq!(theme.tone(Tone::Positive), Some(theme.positive));
    }

    #[test]
    fn test_unknown_theme_falls_back_to_dark() {
        assert_eq!(ThemePresets::by_name("neon").name, "Dark");
        assert_eq!(ThemePresets::by_name(" Light ").name, "Light");
    }

    #[test]
    fn test_series_color_fallback() {
        let theme = ThemePresets::light();
        assert_eq!(theme.series_color("bogus"), theme.accent);
    }
}
