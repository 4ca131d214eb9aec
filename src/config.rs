//! Configuration loader/writer plus strongly typed settings structures.
//!
//! The config lives in `config.toml` inside the data directory
//! (`~/.fiscal-deck` unless `FISCAL_DECK_DIR` or `--data-dir` says
//! otherwise). The embedded default is extracted there on first run.

use crate::data::SectionId;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::widgets::BorderType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub mod keybind_validator;

// Embed default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "FISCAL_DECK_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default = "default_keybinds")]
    pub keybinds: HashMap<String, String>,

    /// Directory the config was loaded from (not serialized)
    #[serde(skip)]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Section shown at startup
    pub default_section: String,
    /// Terminal width (columns) below which the sidebar becomes an overlay
    pub narrow_breakpoint: u16,
    pub poll_timeout_ms: u64,
    /// "plain", "rounded", "double" or "thick"
    pub border_style: String,
    pub show_status_bar: bool,
    pub theme: String,
    /// Rows reserved for the chart inside a chart card
    pub chart_height: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_section: SectionId::Context.as_str().to_string(),
            narrow_breakpoint: 100,
            poll_timeout_ms: 50,
            border_style: "rounded".to_string(),
            show_status_bar: true,
            theme: "dark".to_string(),
            chart_height: 14,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Region presented by the full-screen toggle
    pub target: String,
    /// When false the display host refuses every full-screen request
    pub allow_fullscreen: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            target: crate::presentation::CONTENT_TARGET.to_string(),
            allow_fullscreen: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    /// Management report document, relative to the data directory
    pub management_report: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            management_report: "reports/cali.html".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig::default(),
            presentation: PresentationConfig::default(),
            reports: ReportsConfig::default(),
            keybinds: default_keybinds(),
            data_dir: PathBuf::new(),
        }
    }
}

impl Config {
    /// Data directory: `FISCAL_DECK_DIR` if set, else `~/.fiscal-deck`
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".fiscal-deck"))
    }

    pub fn config_path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    pub fn log_path(data_dir: &Path) -> PathBuf {
        data_dir.join("fiscal-deck.log")
    }

    /// Extract default files on first run (only creates missing files)
    pub fn extract_defaults(data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)
            .context(format!("Failed to create data directory: {:?}", data_dir))?;

        let config_path = Self::config_path(data_dir);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write config.toml")?;
            tracing::info!("Extracted config.toml to {:?}", config_path);
        }

        let reports_dir = data_dir.join("reports");
        if !reports_dir.exists() {
            fs::create_dir_all(&reports_dir).context("Failed to create reports directory")?;
            tracing::info!("Created reports directory: {:?}", reports_dir);
        }

        Ok(())
    }

    /// Load `config.toml` from the data directory, extracting defaults first
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::extract_defaults(data_dir)?;
        Self::load_from_path(&Self::config_path(data_dir), data_dir)
    }

    /// Load config from a custom file path. Relative paths inside it
    /// (the management report) still resolve against `data_dir`.
    pub fn load_from_path(path: &Path, data_dir: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let mut config: Config = toml::from_str(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        config.data_dir = data_dir.to_path_buf();

        // Validate and auto-fix keybinds
        let validation = keybind_validator::validate_keybinds(&config.keybinds);
        if validation.has_errors() {
            tracing::warn!("Keybind validation found {} errors", validation.errors().len());
            for error in validation.errors() {
                tracing::warn!("  {}", error.message());
            }

            let fixed = keybind_validator::auto_fix_keybinds(&mut config.keybinds, &validation.issues);
            if fixed > 0 {
                tracing::info!("Auto-fixed {} keybind issues", fixed);
            }
        }
        if validation.has_warnings() {
            for warning in validation.warnings() {
                tracing::warn!("Keybind warning: {}", warning.message());
            }
        }

        Ok(config)
    }

    /// Startup section; unknown ids fall back to `context`
    pub fn default_section(&self) -> SectionId {
        match self.ui.default_section.parse() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("{}; starting on '{}'", e, SectionId::Context);
                SectionId::Context
            }
        }
    }

    pub fn border_type(&self) -> BorderType {
        match self.ui.border_style.as_str() {
            "plain" | "single" => BorderType::Plain,
            "double" => BorderType::Double,
            "thick" => BorderType::Thick,
            _ => BorderType::Rounded,
        }
    }

    /// Absolute path of the management report document
    pub fn management_report_path(&self) -> PathBuf {
        let path = Path::new(&self.reports.management_report);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn theme(&self) -> crate::theme::DeckTheme {
        crate::theme::ThemePresets::by_name(&self.ui.theme)
    }
}

/// Parse a key string like "ctrl+shift+p" or "f11" into KeyCode and KeyModifiers
pub fn parse_key_string(key_str: &str) -> Option<(KeyCode, KeyModifiers)> {
    let key_str = key_str.trim();
    let parts: Vec<&str> = key_str.split('+').collect();
    let mut modifiers = KeyModifiers::empty();

    // Parse modifiers
    for part in &parts[..parts.len() - 1] {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }
    let key_part = parts[parts.len() - 1];

    // Parse the actual key
    let key_code = match key_part.to_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "page_up" | "pageup" => KeyCode::PageUp,
        "page_down" | "pagedown" => KeyCode::PageDown,

        // Function keys
        f if f.len() > 1 && f.starts_with('f') => {
            let n: u8 = f[1..].parse().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }

        // Single character
        _ => {
            let mut chars = key_part.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return None,
            }
        }
    };

    Some((key_code, modifiers))
}

/// Get default keybindings
pub fn default_keybinds() -> HashMap<String, String> {
    let bindings = [
        ("q", "quit"),
        ("ctrl+c", "quit"),
        ("tab", "next_section"),
        ("shift+tab", "previous_section"),
        ("]", "next_section"),
        ("[", "previous_section"),
        ("s", "toggle_sidebar"),
        ("down", "scroll_down"),
        ("j", "scroll_down"),
        ("up", "scroll_up"),
        ("k", "scroll_up"),
        ("page_down", "page_down"),
        ("page_up", "page_up"),
        ("home", "scroll_top"),
        ("end", "scroll_bottom"),
        ("n", "focus_next"),
        ("shift+n", "focus_previous"),
        ("right", "cursor_next"),
        ("l", "cursor_next"),
        ("left", "cursor_previous"),
        ("h", "cursor_previous"),
        ("esc", "clear_focus"),
        ("ctrl+shift+p", "toggle_fullscreen"),
        ("f11", "toggle_fullscreen"),
        ("o", "open_report"),
    ];
    let mut map: HashMap<String, String> = bindings
        .iter()
        .map(|(combo, action)| (combo.to_string(), action.to_string()))
        .collect();

    // Digits select sidebar positions; 0 is the tenth entry
    for position in 1..=SectionId::ALL.len() {
        let key = (position % 10).to_string();
        map.insert(key, format!("section_{}", position));
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_key_string() {
        assert_eq!(
            parse_key_string("ctrl+shift+p"),
            Some((KeyCode::Char('p'), KeyModifiers::CONTROL | KeyModifiers::SHIFT))
        );
        assert_eq!(parse_key_string("f11"), Some((KeyCode::F(11), KeyModifiers::empty())));
        assert_eq!(parse_key_string("F"), Some((KeyCode::Char('F'), KeyModifiers::empty())));
        assert_eq!(parse_key_string("page_down"), Some((KeyCode::PageDown, KeyModifiers::empty())));
        assert_eq!(parse_key_string("hyper+x"), None);
        assert_eq!(parse_key_string("f13"), None);
        assert_eq!(parse_key_string("abc"), None);
    }

    #[test]
    fn test_embedded_default_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.ui.narrow_breakpoint, 100);
        assert_eq!(config.default_section(), SectionId::Context);
        assert_eq!(config.keybinds.get("ctrl+shift+p").map(String::as_str), Some("toggle_fullscreen"));
        assert!(keybind_validator::validate_keybinds(&config.keybinds).is_valid());
    }

    #[test]
    fn test_default_keybinds_are_valid() {
        let keybinds = default_keybinds();
        assert_eq!(keybinds.get("0").map(String::as_str), Some("section_10"));
        assert_eq!(keybinds.get("1").map(String::as_str), Some("section_1"));
        let result = keybind_validator::validate_keybinds(&keybinds);
        assert!(result.is_valid());
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_load_extracts_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(Config::config_path(dir.path()).exists());
        assert!(dir.path().join("reports").is_dir());
        assert_eq!(config.data_dir, dir.path());
        assert_eq!(
            config.management_report_path(),
            dir.path().join("reports").join("cali.html")
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[ui]\ndefault_section = \"debt\"\ntheme = \"light\"\n").unwrap();
        let config = Config::load_from_path(&path, dir.path()).unwrap();
        assert_eq!(config.default_section(), SectionId::Debt);
        assert_eq!(config.ui.narrow_breakpoint, 100);
        assert!(config.presentation.allow_fullscreen);
        assert_eq!(config.keybinds, default_keybinds());
        assert_eq!(config.theme().name, "Light");
    }

    #[test]
    fn test_unknown_default_section_falls_back() {
        let mut config = Config::default();
        config.ui.default_section = "budget".to_string();
        assert_eq!(config.default_section(), SectionId::Context);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[ui\n").unwrap();
        let err = Config::load_from_path(&path, dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_serialized_settings_load_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = Config::default();
        config.presentation.allow_fullscreen = false;
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = Config::load_from_path(&path, dir.path()).unwrap();
        assert!(!loaded.presentation.allow_fullscreen);
    }

    #[test]
    fn test_border_type() {
        let mut config = Config::default();
        assert_eq!(config.border_type(), BorderType::Rounded);
        config.ui.border_style = "double".to_string();
        assert_eq!(config.border_type(), BorderType::Double);
    }
}
