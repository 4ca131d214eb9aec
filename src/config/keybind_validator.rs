//! Keybind validator
//!
//! Checks the `[keybinds]` table: every combo must parse, every action
//! must exist, critical actions must stay reachable, and two spellings of
//! the same combo are reported.

use crate::config::parse_key_string;
use crate::core::input_router::{normalize_key, Action};
use std::collections::HashMap;

/// Actions that must always have at least one key, with their default.
const CRITICAL_ACTIONS: [(&str, &str); 2] = [("quit", "q"), ("toggle_fullscreen", "f11")];

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    InvalidKey {
        keybind: String,
    },
    UnknownAction {
        keybind: String,
        action: String,
    },
    MissingCriticalBinding {
        action: String,
        default: String,
    },
    DuplicateBinding {
        keybinds: Vec<String>,
        actions: Vec<String>,
    },
}

impl ValidationIssue {
    pub fn severity(&self) -> ValidationSeverity {
        match self {
            ValidationIssue::InvalidKey { .. }
            | ValidationIssue::UnknownAction { .. }
            | ValidationIssue::MissingCriticalBinding { .. } => ValidationSeverity::Error,
            ValidationIssue::DuplicateBinding { .. } => ValidationSeverity::Warning,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ValidationIssue::InvalidKey { keybind } => {
                format!("Keybind '{}' is not a valid key combination", keybind)
            }
            ValidationIssue::UnknownAction { keybind, action } => {
                format!("Keybind '{}' refers to unknown action '{}'", keybind, action)
            }
            ValidationIssue::MissingCriticalBinding { action, default } => {
                format!(
                    "Critical action '{}' has no keybind! Default: {}",
                    action, default
                )
            }
            ValidationIssue::DuplicateBinding { keybinds, actions } => {
                format!(
                    "Keybinds {} are the same key, assigned to: {}",
                    keybinds.join(" / "),
                    actions.join(", ")
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.severity(), ValidationSeverity::Error))
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.severity(), ValidationSeverity::Warning))
    }

    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i.severity(), ValidationSeverity::Error))
            .collect()
    }

    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i.severity(), ValidationSeverity::Warning))
            .collect()
    }
}

/// Validate the keybinds table
pub fn validate_keybinds(keybinds: &HashMap<String, String>) -> ValidationResult {
    let mut issues = Vec::new();
    let mut by_key: HashMap<_, Vec<(&str, &str)>> = HashMap::new();

    let mut sorted: Vec<_> = keybinds.iter().collect();
    sorted.sort();

    for (keybind, action) in sorted {
        let Some((code, modifiers)) = parse_key_string(keybind) else {
            issues.push(ValidationIssue::InvalidKey {
                keybind: keybind.clone(),
            });
            continue;
        };
        if Action::from_name(action).is_none() {
            issues.push(ValidationIssue::UnknownAction {
                keybind: keybind.clone(),
                action: action.clone(),
            });
            continue;
        }
        by_key
            .entry(normalize_key(code, modifiers))
            .or_default()
            .push((keybind.as_str(), action.as_str()));
    }

    // Check critical bindings
    for (action, default) in CRITICAL_ACTIONS {
        let bound = by_key
            .values()
            .flatten()
            .any(|(_, bound_action)| bound_action.trim() == action);
        if !bound {
            issues.push(ValidationIssue::MissingCriticalBinding {
                action: action.to_string(),
                default: default.to_string(),
            });
        }
    }

    // Find duplicates
    let mut duplicates: Vec<_> = by_key.into_values().filter(|v| v.len() > 1).collect();
    duplicates.sort();
    for entries in duplicates {
        issues.push(ValidationIssue::DuplicateBinding {
            keybinds: entries.iter().map(|(k, _)| k.to_string()).collect(),
            actions: entries.iter().map(|(_, a)| a.to_string()).collect(),
        });
    }

    ValidationResult { issues }
}

/// Auto-fix validation issues: drop broken entries and restore defaults
/// for critical actions.
pub fn auto_fix_keybinds(keybinds: &mut HashMap<String, String>, issues: &[ValidationIssue]) -> usize {
    let mut fixed_count = 0;

    for issue in issues {
        match issue {
            ValidationIssue::InvalidKey { keybind } | ValidationIssue::UnknownAction { keybind, .. } => {
                if keybinds.remove(keybind).is_some() {
                    fixed_count += 1;
                }
            }
            ValidationIssue::MissingCriticalBinding { action, default } => {
                keybinds.insert(default.clone(), action.clone());
                fixed_count += 1;
            }
            ValidationIssue::DuplicateBinding { .. } => {}
        }
    }

    fixed_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_keybinds;

    #[test]
    fn test_valid_keybinds() {
        let result = validate_keybinds(&default_keybinds());
        assert!(result.is_valid());
        assert!(!result.has_errors());
    }

    #[test]
    fn test_invalid_key_and_unknown_action() {
        let mut keybinds = default_keybinds();
        keybinds.insert("hyper+x".to_string(), "quit".to_string());
        keybinds.insert("x".to_string(), "launch".to_string());

        let result = validate_keybinds(&keybinds);
        assert_eq!(result.errors().len(), 2);
        assert!(result.errors()[0].message().contains("hyper+x"));
    }

    #[test]
    fn test_missing_critical_binding() {
        let mut keybinds = default_keybinds();
        keybinds.retain(|_, action| action != "quit");

        let result = validate_keybinds(&keybinds);
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
    }

    #[test]
    fn test_duplicate_spelling_is_warning() {
        let mut keybinds = default_keybinds();
        keybinds.insert("shift+ctrl+p".to_string(), "toggle_sidebar".to_string());

        let result = validate_keybinds(&keybinds);
        assert!(result.is_valid());
        assert!(result.has_warnings());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_auto_fix() {
        let mut keybinds = default_keybinds();
        keybinds.retain(|_, action| action != "quit" && action != "toggle_fullscreen");
        keybinds.insert("x".to_string(), "launch".to_string());

        let result = validate_keybinds(&keybinds);
        assert_eq!(result.errors().len(), 3);

        let fixed = auto_fix_keybinds(&mut keybinds, &result.issues);
        assert_eq!(fixed, 3);
        assert_eq!(keybinds.get("q").map(String::as_str), Some("quit"));
        assert_eq!(keybinds.get("f11").map(String::as_str), Some("toggle_fullscreen"));
        assert!(!keybinds.contains_key("x"));

        // Validate again - should be clean
        let result2 = validate_keybinds(&keybinds);
        assert!(result2.is_valid());
    }
}
