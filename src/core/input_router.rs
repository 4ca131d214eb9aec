//! Input routing for the dashboard
//!
//! Translates raw `KeyEvent`s into semantic [`Action`]s using the
//! `[keybinds]` table of the configuration (combo string -> action name).

use crate::config::parse_key_string;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

pub type KeyCombo = (KeyCode, KeyModifiers);

/// All actions a key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,

    // Sections
    NextSection,
    PreviousSection,
    /// 1-based sidebar position
    SelectSection(usize),
    ToggleSidebar,

    // Scrolling
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    ScrollBottom,

    // Chart inspection
    FocusNext,
    FocusPrevious,
    CursorNext,
    CursorPrevious,
    ClearFocus,

    ToggleFullscreen,
    OpenReport,

    // Key not bound
    None,
}

impl Action {
    pub fn from_name(name: &str) -> Option<Self> {
        let action = match name.trim() {
            "quit" => Self::Quit,
            "next_section" => Self::NextSection,
            "previous_section" => Self::PreviousSection,
            "toggle_sidebar" => Self::ToggleSidebar,
            "scroll_up" => Self::ScrollUp,
            "scroll_down" => Self::ScrollDown,
            "page_up" => Self::PageUp,
            "page_down" => Self::PageDown,
            "scroll_top" => Self::ScrollTop,
            "scroll_bottom" => Self::ScrollBottom,
            "focus_next" => Self::FocusNext,
            "focus_previous" => Self::FocusPrevious,
            "cursor_next" => Self::CursorNext,
            "cursor_previous" => Self::CursorPrevious,
            "clear_focus" => Self::ClearFocus,
            "toggle_fullscreen" => Self::ToggleFullscreen,
            "open_report" => Self::OpenReport,
            other => {
                let position = other.strip_prefix("section_")?.parse::<usize>().ok()?;
                if position == 0 {
                    return None;
                }
                Self::SelectSection(position)
            }
        };
        Some(action)
    }

    pub fn name(&self) -> String {
        match self {
            Self::Quit => "quit".to_string(),
            Self::NextSection => "next_section".to_string(),
            Self::PreviousSection => "previous_section".to_string(),
            Self::SelectSection(n) => format!("section_{}", n),
            Self::ToggleSidebar => "toggle_sidebar".to_string(),
            Self::ScrollUp => "scroll_up".to_string(),
            Self::ScrollDown => "scroll_down".to_string(),
            Self::PageUp => "page_up".to_string(),
            Self::PageDown => "page_down".to_string(),
            Self::ScrollTop => "scroll_top".to_string(),
            Self::ScrollBottom => "scroll_bottom".to_string(),
            Self::FocusNext => "focus_next".to_string(),
            Self::FocusPrevious => "focus_previous".to_string(),
            Self::CursorNext => "cursor_next".to_string(),
            Self::CursorPrevious => "cursor_previous".to_string(),
            Self::ClearFocus => "clear_focus".to_string(),
            Self::ToggleFullscreen => "toggle_fullscreen".to_string(),
            Self::OpenReport => "open_report".to_string(),
            Self::None => "none".to_string(),
        }
    }
}

/// Canonical form of a key combo so that config strings and terminal
/// events compare equal: letters are lowercase with SHIFT made explicit,
/// other characters drop SHIFT (it is already part of the glyph), and
/// BackTab is Shift+Tab.
pub fn normalize_key(code: KeyCode, modifiers: KeyModifiers) -> KeyCombo {
    let modifiers = modifiers & (KeyModifiers::CONTROL | KeyModifiers::SHIFT | KeyModifiers::ALT);
    match code {
        KeyCode::Char(c) if c.is_ascii_uppercase() => {
            (KeyCode::Char(c.to_ascii_lowercase()), modifiers | KeyModifiers::SHIFT)
        }
        KeyCode::Char(c) if c.is_ascii_lowercase() => (KeyCode::Char(c), modifiers),
        KeyCode::Char(c) => (KeyCode::Char(c), modifiers.difference(KeyModifiers::SHIFT)),
        KeyCode::BackTab => (KeyCode::Tab, modifiers | KeyModifiers::SHIFT),
        other => (other, modifiers),
    }
}

/// Parsed keybindings map (key combo -> action)
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<KeyCombo, Action>,
}

impl Keymap {
    /// Build from config strings. Entries that fail to parse are skipped;
    /// the keybind validator reports them.
    pub fn from_config(keybinds: &HashMap<String, String>) -> Self {
        let mut bindings = HashMap::new();
        for (combo, action_name) in keybinds {
            let Some((code, modifiers)) = parse_key_string(combo) else {
                tracing::warn!("Ignoring keybind with invalid key '{}'", combo);
                continue;
            };
            let Some(action) = Action::from_name(action_name) else {
                tracing::warn!("Ignoring keybind '{}' with unknown action '{}'", combo, action_name);
                continue;
            };
            bindings.insert(normalize_key(code, modifiers), action);
        }
        tracing::debug!("Loaded {} keybinds", bindings.len());
        Self { bindings }
    }

    /// Route a key event to an Action
    pub fn route(&self, key: KeyEvent) -> Action {
        self.bindings
            .get(&normalize_key(key.code, key.modifiers))
            .copied()
            .unwrap_or(Action::None)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
