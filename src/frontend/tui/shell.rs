//! Layout shell: docked or overlay sidebar, section content and status bar.
//!
//! Wide terminals dock the sidebar on the left. Below the narrow breakpoint
//! the content takes the full width and the sidebar opens as an overlay
//! over dimmed content. Presentation mode hides every piece of chrome.

use super::section_view::{SectionView, ViewSettings};
use super::sidebar::{Sidebar, SIDEBAR_WIDTH};
use super::text::{fill, put, truncate};
use crate::core::{AppCore, HitMap};
use crate::data::navigation_entries;
use crate::theme::DeckTheme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

const KEY_HINTS: &str = "q salir · Tab sección · s menú · n inspeccionar · F11 presentar";

/// Corner control shown while presenting.
const EXIT_HINT: &str = " ✕ salir (Esc) ";

/// Bottom line: active section, last status message, key hints and clock.
pub struct StatusBar<'a> {
    pub label: &'a str,
    pub message: Option<&'a str>,
    pub clock: &'a str,
}

impl StatusBar<'_> {
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) {
        let base = Style::default().fg(theme.status_text).bg(theme.status_background);
        fill(buf, area, base);
        if area.width == 0 || area.height == 0 {
            return;
        }

        let clock_width = self.clock.chars().count() as u16 + 1;
        let clock_x = area.right().saturating_sub(clock_width);
        put(buf, area, clock_x, area.y, self.clock, base);

        let mut x = put(
            buf,
            area,
            area.x + 1,
            area.y,
            self.label,
            base.add_modifier(Modifier::BOLD),
        );
        if let Some(message) = self.message {
            x = put(buf, area, x, area.y, " │ ", base);
            x = put(buf, area, x, area.y, message, base.fg(theme.accent));
        }
        let room = clock_x.saturating_sub(x + 3);
        if room > 10 {
            let hints = truncate(KEY_HINTS, room);
            let hints_x = clock_x - 1 - hints.chars().count() as u16;
            put(buf, area, hints_x, area.y, &hints, base.fg(theme.text_secondary));
        }
    }
}

/// Draw one frame of the dashboard into `buf`, recording scroll layout and
/// click targets back into `core`.
pub fn render(core: &mut AppCore, area: Rect, buf: &mut Buffer, theme: &DeckTheme, clock: &str) {
    core.resize(area.width, area.height);
    fill(buf, area, Style::default().fg(theme.text_primary).bg(theme.background));

    let mode = core.presentation_mode();
    let narrow = core.is_narrow();
    let settings = ViewSettings::from_config(&core.config, narrow);
    let mut hits = HitMap::default();

    let mut body = area;
    if mode.shows_chrome() && core.config.ui.show_status_bar && area.height > 1 {
        body.height -= 1;
        let label = navigation_entries()
            .into_iter()
            .find(|entry| entry.id == core.active)
            .map(|entry| format!("{} {}", entry.icon, entry.label))
            .unwrap_or_default();
        StatusBar {
            label: &label,
            message: core.status.as_deref(),
            clock,
        }
        .render(Rect::new(area.x, area.bottom() - 1, area.width, 1), buf, theme);
    }

    let docked = mode.shows_chrome() && !narrow && body.width > SIDEBAR_WIDTH;
    let content = if docked {
        hits.entries = Sidebar::new(core.active).render(
            Rect::new(body.x, body.y, SIDEBAR_WIDTH, body.height),
            buf,
            theme,
        );
        Rect::new(
            body.x + SIDEBAR_WIDTH + 1,
            body.y,
            body.width - SIDEBAR_WIDTH - 1,
            body.height,
        )
    } else {
        body
    };

    let section = core.registry.get(core.active);
    SectionView::new(section, &settings)
        .focus(core.view.focus, core.view.cursor)
        .render(content, buf, theme, &mut core.view);

    if mode.shows_chrome() && narrow && core.sidebar_open {
        let width = SIDEBAR_WIDTH.min(body.width);
        if body.width > width {
            let overlay = Rect::new(body.x + width, body.y, body.width - width, body.height);
            dim(buf, overlay, theme);
            hits.overlay = Some(overlay);
        }
        hits.entries = Sidebar::new(core.active).render(
            Rect::new(body.x, body.y, width, body.height),
            buf,
            theme,
        );
    }

    if mode.fullscreen {
        hits.exit_presentation = exit_control(area, buf, theme);
    }

    core.hits = hits;
}

/// Draw the presentation exit control in the bottom-right corner.
fn exit_control(area: Rect, buf: &mut Buffer, theme: &DeckTheme) -> Option<Rect> {
    let width = EXIT_HINT.chars().count() as u16;
    if area.width < width || area.height == 0 {
        return None;
    }
    let rect = Rect::new(area.right() - width, area.bottom() - 1, width, 1);
    let style = Style::default()
        .fg(theme.status_text)
        .bg(theme.status_background)
        .add_modifier(Modifier::BOLD);
    put(buf, rect, rect.x, rect.y, EXIT_HINT, style);
    Some(rect)
}

/// Fade content behind the sidebar overlay.
fn dim(buf: &mut Buffer, area: Rect, theme: &DeckTheme) {
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let cell = &mut buf[(x, y)];
            cell.set_fg(theme.overlay_dim);
            cell.modifier.insert(Modifier::DIM);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data::SectionId;
    use crossterm::event::{MouseButton, MouseEventKind};

    fn core() -> AppCore {
        AppCore::new(Config::default())
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn frame(core: &mut AppCore, width: u16, height: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        let area = buf.area;
        render(core, area, &mut buf, &DeckTheme::default(), "12:00");
        buf
    }

    #[test]
    fn test_wide_layout_docks_sidebar() {
        let mut core = core();
        let buf = frame(&mut core, 140, 40);
        assert_eq!(core.hits.entries.len(), SectionId::ALL.len());
        assert!(core.hits.overlay.is_none());
        assert!(row_text(&buf, 0).contains("Reporte Financiero"));
        assert!(row_text(&buf, 39).contains("12:00"));
    }

    #[test]
    fn test_narrow_closed_sidebar_has_no_hits() {
        let mut core = core();
        frame(&mut core, 60, 30);
        assert!(core.hits.entries.is_empty());
        assert!(core.hits.overlay.is_none());
    }

    #[test]
    fn test_scenario_context_to_income_on_narrow() {
        let mut core = core();
        core.set_sidebar_open(true);
        frame(&mut core, 60, 30);
        let overlay = core.hits.overlay.unwrap();
        let (income_rect, _) = core.hits.entries[SectionId::Income.index()];

        core.handle_mouse(MouseEventKind::Down(MouseButton::Left), income_rect.x + 1, income_rect.y);
        assert_eq!(core.active, SectionId::Income);
        assert!(!core.sidebar_open);

        core.set_sidebar_open(true);
        core.handle_mouse(MouseEventKind::Down(MouseButton::Left), overlay.x + 1, overlay.y);
        assert!(!core.sidebar_open);
    }

    #[test]
    fn test_overlay_dims_content() {
        let mut core = core();
        core.set_sidebar_open(true);
        let buf = frame(&mut core, 60, 30);
        assert!(buf[(SIDEBAR_WIDTH + 2, 0)].modifier.contains(Modifier::DIM));
        assert!(!buf[(1, 0)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_presentation_mode_hides_chrome() {
        let mut core = core();
        core.handle_key(crossterm::event::KeyCode::F(11), crossterm::event::KeyModifiers::NONE);
        core.tick();
        assert!(core.presentation_mode().fullscreen);
        let buf = frame(&mut core, 140, 40);
        assert!(core.hits.entries.is_empty());
        assert!(!row_text(&buf, 39).contains("12:00"));
        assert!(row_text(&buf, 0).starts_with("Contexto"));
    }

    #[test]
    fn test_presentation_draws_clickable_exit_control() {
        let mut core = core();
        core.handle_key(crossterm::event::KeyCode::F(11), crossterm::event::KeyModifiers::NONE);
        core.tick();
        let buf = frame(&mut core, 140, 40);
        let exit = core.hits.exit_presentation.unwrap();
        assert_eq!(exit.y, 39);
        assert_eq!(exit.right(), 140);
        assert!(row_text(&buf, 39).trim_end().ends_with("✕ salir (Esc)"));

        core.handle_mouse(MouseEventKind::Down(MouseButton::Left), exit.x + 1, exit.y);
        core.tick();
        assert!(!core.presentation_mode().fullscreen);
        frame(&mut core, 140, 40);
        assert!(core.hits.exit_presentation.is_none());
    }

    #[test]
    fn test_status_bar_shows_message() {
        let theme = DeckTheme::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 1));
        StatusBar {
            label: "◫ Ingresos",
            message: Some("Modo normal"),
            clock: "09:30",
        }
        .render(buf.area, &mut buf, &theme);
        let text = row_text(&buf, 0);
        assert!(text.starts_with(" ◫ Ingresos │ Modo normal"));
        assert!(text.trim_end().ends_with("09:30"));
    }
}
