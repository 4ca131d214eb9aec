//! Headless export of one section, used by the `show` subcommand.

use super::section_view::{buffer_to_text, SectionView, ViewSettings};
use crate::data::Section;
use crate::theme::DeckTheme;
use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Rendered page as plain text
    Text,
    /// Section content as JSON
    Json,
}

/// Render `section` at `width` columns as plain text, exactly as the
/// content pane would draw it with no scroll.
pub fn section_text(section: &Section, settings: &ViewSettings, width: u16) -> String {
    let theme = DeckTheme::default();
    let (page, _) = SectionView::new(section, settings).render_page(width, &theme);
    buffer_to_text(&page)
}

pub fn export_section(
    section: &Section,
    settings: &ViewSettings,
    width: u16,
    format: ExportFormat,
) -> Result<String> {
    match format {
        ExportFormat::Text => Ok(section_text(section, settings, width)),
        ExportFormat::Json => serde_json::to_string_pretty(section)
            .with_context(|| format!("Failed to serialize section '{}'", section.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportsConfig;
    use crate::data::SectionId;
    use crate::sections::Registry;
    use ratatui::widgets::BorderType;
    use std::path::PathBuf;

    fn settings() -> ViewSettings {
        ViewSettings {
            border_type: BorderType::Rounded,
            chart_height: 12,
            narrow: false,
            data_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn test_text_export_of_performance_lists_cali() {
        let registry = Registry::new(&ReportsConfig::default());
        let text = export_section(registry.get(SectionId::Performance), &settings(), 140, ExportFormat::Text)
            .unwrap();
        assert!(text.contains("Cali"));
        assert!(text.lines().all(|line| line.chars().count() <= 140));
    }

    #[test]
    fn test_json_export_keeps_block_structure() {
        let registry = Registry::new(&ReportsConfig::default());
        let json = export_section(registry.get(SectionId::Decentralized), &settings(), 100, ExportFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "decentralized");
        assert!(value["blocks"].as_array().map(|b| !b.is_empty()).unwrap_or(false));
    }
}
