//! Navigation sidebar: report header plus one row per section.

use super::text::{fill, put, truncate};
use crate::data::{navigation_entries, SectionId};
use crate::theme::DeckTheme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Clear, Widget},
};

/// Columns used by the docked sidebar and the narrow overlay.
pub const SIDEBAR_WIDTH: u16 = 28;

/// Rows above the first entry: title, subtitle and a blank line.
const HEADER_ROWS: u16 = 3;

pub struct Sidebar {
    active: SectionId,
}

impl Sidebar {
    pub fn new(active: SectionId) -> Self {
        Self { active }
    }

    /// Draw the sidebar and return the row of each entry for hit testing.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) -> Vec<(Rect, SectionId)> {
        let base = Style::default()
            .fg(theme.sidebar_text)
            .bg(theme.sidebar_background);
        Clear.render(area, buf);
        fill(buf, area, base);
        if area.width < 4 || area.height == 0 {
            return Vec::new();
        }

        let header = base.fg(theme.sidebar_header).add_modifier(Modifier::BOLD);
        put(buf, area, area.x + 1, area.y, "Reporte Financiero", header);
        put(buf, area, area.x + 1, area.y + 1, "Santiago de Cali", base.fg(theme.text_secondary));

        let mut hits = Vec::new();
        for (i, entry) in navigation_entries().into_iter().enumerate() {
            let y = area.y + HEADER_ROWS + i as u16;
            if y >= area.bottom() {
                break;
            }
            let row = Rect::new(area.x, y, area.width, 1);
            let style = if entry.id == self.active {
                Style::default()
                    .fg(theme.sidebar_active_text)
                    .bg(theme.sidebar_active_background)
                    .add_modifier(Modifier::BOLD)
            } else {
                base
            };
            fill(buf, row, style);
            let position = (i + 1) % 10;
            let text = format!("{} {} {}", position, entry.icon, entry.label);
            put(buf, row, area.x + 1, y, &truncate(&text, area.width - 2), style);
            hits.push((row, entry.id));
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_lists_every_section_with_hit_rows() {
        let mut buf = Buffer::empty(Rect::new(0, 0, SIDEBAR_WIDTH, 20));
        let hits = Sidebar::new(SectionId::Income).render(buf.area, &mut buf, &DeckTheme::default());
        assert_eq!(hits.len(), SectionId::ALL.len());
        assert_eq!(hits[0].1, SectionId::Context);
        assert_eq!(hits[0].0.y, HEADER_ROWS);
        assert!(row_text(&buf, 0).contains("Reporte Financiero"));
        assert!(row_text(&buf, HEADER_ROWS + 2).contains("3 ◫ Ingresos"));
        assert!(row_text(&buf, HEADER_ROWS + 9).contains("0 ◧ Reporte Gerencial"));
    }

    #[test]
    fn test_active_entry_is_highlighted() {
        let theme = DeckTheme::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, SIDEBAR_WIDTH, 20));
        Sidebar::new(SectionId::Debt).render(buf.area, &mut buf, &theme);
        let debt_row = HEADER_ROWS + SectionId::Debt.index() as u16;
        assert_eq!(buf[(0, debt_row)].bg, theme.sidebar_active_background);
        assert_eq!(buf[(0, HEADER_ROWS)].bg, theme.sidebar_background);
    }

    #[test]
    fn test_exactly_one_entry_highlighted_for_every_section() {
        let theme = DeckTheme::default();
        for active in SectionId::ALL {
            let mut buf = Buffer::empty(Rect::new(0, 0, SIDEBAR_WIDTH, 20));
            let hits = Sidebar::new(active).render(buf.area, &mut buf, &theme);
            let highlighted: Vec<SectionId> = hits
                .iter()
                .filter(|(rect, _)| buf[(rect.x, rect.y)].bg == theme.sidebar_active_background)
                .map(|(_, id)| *id)
                .collect();
            assert_eq!(highlighted, vec![active]);
        }
    }

    #[test]
    fn test_short_area_drops_entries() {
        let mut buf = Buffer::empty(Rect::new(0, 0, SIDEBAR_WIDTH, 5));
        let hits = Sidebar::new(SectionId::Context).render(buf.area, &mut buf, &DeckTheme::default());
        assert_eq!(hits.len(), 2);
    }
}
