use crate::config::Config;
use crate::core::input_router::{Action, Keymap};
use crate::core::view_state::ViewState;
use crate::data::{Block, Section, SectionId};
use crate::presentation::{DisplayHost, FullscreenController, PresentationMode, VirtualDisplay, CONTENT_TARGET};
use crate::sections::Registry;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::path::Path;
use std::process::Child;

/// Rows moved by one mouse wheel notch
const WHEEL_STEP: i32 = 3;

/// Clickable regions recorded by the last render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    /// Sidebar entries and their rows
    pub entries: Vec<(Rect, SectionId)>,

    /// Dimmed content area behind the open sidebar overlay
    pub overlay: Option<Rect>,

    /// Exit control drawn while presenting
    pub exit_presentation: Option<Rect>,
}

/// Core application state (frontend-agnostic)
///
/// AppCore owns the only interactive state of the dashboard: which section
/// is active, whether the sidebar overlay is open and the view-local
/// scroll/focus of the active section. Frontends read it to render and feed
/// it input events.
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// Every section, built once
    pub registry: Registry,

    /// Parsed keybindings
    pub keymap: Keymap,

    /// Section currently shown
    pub active: SectionId,

    /// Sidebar overlay flag (only meaningful on narrow viewports)
    pub sidebar_open: bool,

    /// Terminal size from the last resize/render
    pub viewport: (u16, u16),

    /// Scroll and inspect state of the active section
    pub view: ViewState,

    /// Display host that owns the true full-screen flag
    pub display: VirtualDisplay,

    /// Mirrors the host's full-screen flag
    pub fullscreen: FullscreenController,

    /// Regions from the last render, for mouse hit testing
    pub hits: HitMap,

    /// Application running flag
    pub running: bool,

    /// One-line message for the status bar
    pub status: Option<String>,

    /// Report openers not yet reaped
    openers: Vec<Child>,
}

impl AppCore {
    pub fn new(config: Config) -> Self {
        let registry = Registry::new(&config.reports);
        for issue in registry.table_issues() {
            tracing::warn!("{}", issue.message());
        }

        let keymap = Keymap::from_config(&config.keybinds);
        if keymap.is_empty() {
            tracing::warn!("No usable keybinds configured; only mouse input will work");
        }
        let active = config.default_section();

        let mut display = VirtualDisplay::new(config.presentation.allow_fullscreen);
        display.register_region(CONTENT_TARGET);
        let fullscreen = FullscreenController::attach(&mut display, config.presentation.target.clone());

        tracing::info!(
            "Dashboard ready: {} sections, {} keybinds, starting on '{}'",
            registry.all().len(),
            keymap.len(),
            active
        );

        Self {
            config,
            registry,
            keymap,
            active,
            sidebar_open: false,
            viewport: (0, 0),
            view: ViewState::default(),
            display,
            fullscreen,
            hits: HitMap::default(),
            running: true,
            status: None,
            openers: Vec::new(),
        }
    }

    pub fn active_section(&self) -> &Section {
        self.registry.get(self.active)
    }

    pub fn presentation_mode(&self) -> PresentationMode {
        self.fullscreen.mode()
    }

    /// Viewport narrower than the responsive breakpoint
    pub fn is_narrow(&self) -> bool {
        self.viewport.0 < self.config.ui.narrow_breakpoint
    }

    /// Make `id` the active section. On narrow viewports the sidebar
    /// overlay closes even when `id` is already active; view state is only
    /// discarded when the section actually changes.
    pub fn select_section(&mut self, id: SectionId) {
        if self.is_narrow() {
            self.sidebar_open = false;
        }
        if id == self.active {
            return;
        }
        tracing::debug!("Section {} -> {}", self.active, id);
        self.active = id;
        self.view.reset();
    }

    /// Select by 1-based sidebar position; out-of-range positions are ignored.
    pub fn select_position(&mut self, position: usize) {
        match position.checked_sub(1).and_then(|i| SectionId::ALL.get(i)) {
            Some(id) => self.select_section(*id),
            None => tracing::debug!("No section at position {}", position),
        }
    }

    pub fn next_section(&mut self) {
        self.select_section(self.active.next());
    }

    pub fn previous_section(&mut self) {
        self.select_section(self.active.previous());
    }

    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
    }

    pub fn toggle_sidebar(&mut self) {
        self.set_sidebar_open(!self.sidebar_open);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    /// Cursor lengths of the active section's inspectable blocks
    fn inspect_lens(&self) -> Vec<usize> {
        self.active_section()
            .inspectable()
            .iter()
            .map(|block| block.cursor_len())
            .collect()
    }

    /// Block under inspection, if any
    pub fn focused_block(&self) -> Option<&Block> {
        let index = self.view.focus?;
        self.active_section().inspectable().get(index).copied()
    }

    pub fn handle_action(&mut self, action: Action) {
        if action != Action::None {
            tracing::trace!("Action: {}", action.name());
        }
        match action {
            Action::Quit => self.running = false,
            Action::NextSection => self.next_section(),
            Action::PreviousSection => self.previous_section(),
            Action::SelectSection(position) => self.select_position(position),
            Action::ToggleSidebar => self.toggle_sidebar(),
            Action::ScrollUp => self.view.scroll_by(-1),
            Action::ScrollDown => self.view.scroll_by(1),
            Action::PageUp => self.view.page(-1),
            Action::PageDown => self.view.page(1),
            Action::ScrollTop => self.view.scroll_to_top(),
            Action::ScrollBottom => self.view.scroll_to_bottom(),
            Action::FocusNext => {
                let lens = self.inspect_lens();
                self.view.focus_step(&lens, true);
            }
            Action::FocusPrevious => {
                let lens = self.inspect_lens();
                self.view.focus_step(&lens, false);
            }
            Action::CursorNext | Action::CursorPrevious => {
                let len = self.focused_block().map(|b| b.cursor_len()).unwrap_or(0);
                self.view.cursor_step(len, action == Action::CursorNext);
            }
            Action::ClearFocus => {
                self.view.clear_focus();
                if self.is_narrow() {
                    self.sidebar_open = false;
                }
            }
            Action::ToggleFullscreen => self.fullscreen.toggle(&mut self.display),
            Action::OpenReport => {
                if let Err(e) = self.open_report() {
                    tracing::warn!("{:#}", e);
                    self.set_status(format!("{:#}", e));
                }
            }
            Action::None => {}
        }
    }

    /// Esc while presenting is the host's own exit gesture; everything
    /// else goes through the keymap.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Esc && self.display.native_escape() {
            return;
        }
        let action = self.keymap.route(crossterm::event::KeyEvent::new(code, modifiers));
        self.handle_action(action);
    }

    pub fn handle_mouse(&mut self, kind: MouseEventKind, x: u16, y: u16) {
        let position = Position::new(x, y);
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self
                    .hits
                    .exit_presentation
                    .map(|rect| rect.contains(position))
                    .unwrap_or(false)
                {
                    self.fullscreen.toggle(&mut self.display);
                } else if let Some((_, id)) = self.hits.entries.iter().find(|(rect, _)| rect.contains(position)) {
                    let id = *id;
                    self.select_section(id);
                } else if self
                    .hits
                    .overlay
                    .map(|rect| rect.contains(position))
                    .unwrap_or(false)
                {
                    self.set_sidebar_open(false);
                }
            }
            MouseEventKind::ScrollUp => self.view.scroll_by(-WHEEL_STEP),
            MouseEventKind::ScrollDown => self.view.scroll_by(WHEEL_STEP),
            _ => {}
        }
    }

    /// Per-frame housekeeping: apply queued host requests and mirror the
    /// resulting presentation state.
    pub fn tick(&mut self) {
        self.reap_openers();
        self.display.pump();
        if self.fullscreen.sync(&self.display) {
            let message = match self.display.fullscreen_target() {
                Some(region) if self.fullscreen.is_fullscreen() => {
                    format!("Modo presentación ({})", region)
                }
                _ => "Modo normal".to_string(),
            };
            self.set_status(message);
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("Status: {}", message);
        self.status = Some(message);
    }

    /// Open the management report with the system opener.
    pub fn open_report(&mut self) -> Result<()> {
        let path = self.config.management_report_path();
        if !path.exists() {
            anyhow::bail!("Reporte no encontrado: {}", path.display());
        }
        let child = spawn_opener(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        self.openers.push(child);
        self.set_status(format!("Abriendo {}", path.display()));
        Ok(())
    }

    /// Collect opener processes that have exited.
    fn reap_openers(&mut self) {
        self.openers.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                tracing::debug!("Opener {} exited: {}", child.id(), status);
                false
            }
            Ok(None) => true,
            Err(e) => {
                tracing::warn!("Failed to poll opener {}: {}", child.id(), e);
                false
            }
        });
    }

    /// Release the display host listener.
    pub fn shutdown(self) {
        let AppCore {
            display: mut host,
            fullscreen,
            ..
        } = self;
        fullscreen.detach(&mut host);
        let listeners = host.listener_count();
        tracing::debug!("Display listeners left: {}", listeners);
    }
}

fn spawn_opener(path: &Path) -> std::io::Result<Child> {
    use std::process::{Command, Stdio};

    let mut command = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(path);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view_state::BlockSpan;

    fn core(width: u16) -> AppCore {
        let mut core = AppCore::new(Config::default());
        core.resize(width, 40);
        core
    }

    #[test]
    fn test_starts_on_default_section() {
        let core = core(120);
        assert_eq!(core.active, SectionId::Context);
        assert!(core.running);
        assert!(!core.presentation_mode().fullscreen);
    }

    #[test]
    fn test_narrow_selection_closes_sidebar_and_resets_view() {
        let mut core = core(80);
        core.set_sidebar_open(true);
        core.view.scroll = 5;

        core.select_section(SectionId::Income);

        assert_eq!(core.active, SectionId::Income);
        assert!(!core.sidebar_open);
        assert_eq!(core.view, ViewState::default());
        assert_eq!(core.active_section().id, SectionId::Income);
    }

    #[test]
    fn test_wide_selection_leaves_sidebar_flag() {
        let mut core = core(140);
        core.set_sidebar_open(true);
        core.select_section(SectionId::Debt);
        assert!(core.sidebar_open);
    }

    #[test]
    fn test_reselecting_active_section_keeps_view() {
        let mut core = core(140);
        core.select_section(SectionId::Performance);
        core.view.update_layout(200, 30, vec![BlockSpan { top: 0, height: 20 }]);
        core.view.scroll = 12;
        core.view.focus = Some(0);

        core.select_section(SectionId::Performance);

        assert_eq!(core.view.scroll, 12);
        assert_eq!(core.view.focus, Some(0));
    }

    #[test]
    fn test_reselecting_on_narrow_still_closes_sidebar() {
        let mut core = core(60);
        core.set_sidebar_open(true);
        core.select_section(SectionId::Context);
        assert!(!core.sidebar_open);
    }

    #[test]
    fn test_digit_keys_select_by_position() {
        let mut core = core(120);
        core.handle_key(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(core.active, SectionId::Income);
        core.handle_key(KeyCode::Char('0'), KeyModifiers::NONE);
        assert_eq!(core.active, SectionId::Management);
        core.select_position(42);
        assert_eq!(core.active, SectionId::Management);
    }

    #[test]
    fn test_section_cycling_wraps() {
        let mut core = core(120);
        core.previous_section();
        assert_eq!(core.active, SectionId::Management);
        core.next_section();
        assert_eq!(core.active, SectionId::Context);
    }

    #[test]
    fn test_quit_key_stops_loop() {
        let mut core = core(120);
        core.handle_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!core.running);
    }

    #[test]
    fn test_fullscreen_follows_host_after_tick() {
        let mut core = core(120);
        core.handle_key(KeyCode::F(11), KeyModifiers::NONE);
        assert!(!core.presentation_mode().fullscreen);

        core.tick();
        assert!(core.presentation_mode().fullscreen);
        assert!(!core.presentation_mode().shows_chrome());

        core.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        core.tick();
        assert!(!core.presentation_mode().fullscreen);
    }

    #[test]
    fn test_refused_fullscreen_stays_normal() {
        let mut config = Config::default();
        config.presentation.allow_fullscreen = false;
        let mut core = AppCore::new(config);
        core.handle_key(KeyCode::Char('p'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        core.tick();
        assert!(!core.presentation_mode().fullscreen);
    }

    #[test]
    fn test_focus_and_cursor_on_charts() {
        let mut core = core(120);
        core.select_section(SectionId::Plan);
        core.handle_action(Action::FocusNext);
        assert_eq!(core.view.focus, Some(0));
        // income projection spans 2026..=2036
        assert_eq!(core.view.cursor, 10);
        core.handle_action(Action::CursorPrevious);
        assert_eq!(core.view.cursor, 9);
        core.handle_action(Action::ClearFocus);
        assert!(core.focused_block().is_none());
    }

    #[test]
    fn test_mouse_hits_entries_and_overlay() {
        let mut core = core(80);
        core.hits = HitMap {
            entries: vec![(Rect::new(0, 3, 20, 1), SectionId::Debt)],
            overlay: Some(Rect::new(20, 0, 60, 40)),
            exit_presentation: None,
        };
        core.set_sidebar_open(true);
        core.handle_mouse(MouseEventKind::Down(MouseButton::Left), 5, 3);
        assert_eq!(core.active, SectionId::Debt);
        assert!(!core.sidebar_open);

        core.set_sidebar_open(true);
        core.handle_mouse(MouseEventKind::Down(MouseButton::Left), 40, 10);
        assert!(!core.sidebar_open);
        assert_eq!(core.active, SectionId::Debt);
    }

    #[test]
    fn test_missing_report_sets_status() {
        let mut config = Config::default();
        config.data_dir = std::env::temp_dir().join("fiscal-deck-missing-report");
        let mut core = AppCore::new(config);
        core.handle_action(Action::OpenReport);
        assert!(core
            .status
            .as_deref()
            .unwrap_or_default()
            .contains("Reporte no encontrado"));
    }

    #[test]
    fn test_shutdown_releases_listener() {
        let mut core = core(120);
        core.tick();
        assert_eq!(core.display.listener_count(), 1);
        core.shutdown();
    }

    #[test]
    fn test_exit_control_click_leaves_presentation() {
        let mut core = core(120);
        core.handle_action(Action::ToggleFullscreen);
        core.tick();
        assert!(core.presentation_mode().fullscreen);
        assert_eq!(core.status.as_deref(), Some("Modo presentación (presentation-root)"));

        core.hits.exit_presentation = Some(Rect::new(100, 39, 12, 1));
        core.handle_mouse(MouseEventKind::Down(MouseButton::Left), 105, 39);
        core.tick();
        assert!(!core.presentation_mode().fullscreen);
        assert_eq!(core.status.as_deref(), Some("Modo normal"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exited_openers_are_reaped() {
        let mut core = core(120);
        let child = std::process::Command::new("true").spawn().unwrap();
        core.openers.push(child);
        for _ in 0..100 {
            core.tick();
            if core.openers.is_empty() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert!(core.openers.is_empty());
    }
}
