//! View-local state of the active section
//!
//! Scroll offset, focused inspectable block and the inspect cursor. Discarded
//! whenever a different section becomes active.

/// Vertical extent of a block inside the section content, in rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockSpan {
    pub top: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// First content row shown
    pub scroll: u16,

    /// Index into the section's inspectable blocks
    pub focus: Option<usize>,

    /// Category under the inspect cursor of the focused block
    pub cursor: usize,

    /// Total content height from the last render
    pub content_height: u16,

    /// Rows available to the content pane in the last render
    pub viewport_height: u16,

    /// Position of each inspectable block from the last render
    pub focus_spans: Vec<BlockSpan>,
}

impl ViewState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.scroll = u16::try_from(next).unwrap_or(0);
    }

    pub fn page(&mut self, pages: i32) {
        let step = i32::from(self.viewport_height.saturating_sub(2).max(1));
        self.scroll_by(step * pages);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Record the layout of the last render and re-clamp the scroll.
    pub fn update_layout(&mut self, content_height: u16, viewport_height: u16, spans: Vec<BlockSpan>) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.focus_spans = spans;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Move focus through the inspectable blocks, whose cursor lengths
    /// are `lens`. The cursor starts on the latest category.
    pub fn focus_step(&mut self, lens: &[usize], forward: bool) {
        if lens.is_empty() {
            self.focus = None;
            return;
        }
        let count = lens.len();
        let next = match (self.focus, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.focus = Some(next);
        self.cursor = lens[next].saturating_sub(1);
        self.scroll_focus_into_view();
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
        self.cursor = 0;
    }

    /// Move the inspect cursor, clamped to `len` categories.
    pub fn cursor_step(&mut self, len: usize, forward: bool) {
        if self.focus.is_none() || len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1).min(len - 1)
        } else {
            self.cursor.saturating_sub(1)
        };
    }

    fn scroll_focus_into_view(&mut self) {
        let Some(span) = self.focus.and_then(|i| self.focus_spans.get(i).copied()) else {
            return;
        };
        let bottom = span.top.saturating_add(span.height);
        if span.top < self.scroll {
            self.scroll = span.top;
        } else if bottom > self.scroll.saturating_add(self.viewport_height) {
            self.scroll = bottom.saturating_sub(self.viewport_height).min(span.top);
        }
        self.scroll = self.scroll.min(self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_out() -> ViewState {
        let mut view = ViewState::default();
        view.update_layout(
            100,
            20,
            vec![
                BlockSpan { top: 2, height: 16 },
                BlockSpan { top: 60, height: 16 },
            ],
        );
        view
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut view = laid_out();
        view.scroll_by(-5);
        assert_eq!(view.scroll, 0);
        view.scroll_by(500);
        assert_eq!(view.scroll, 80);
        view.page(-1);
        assert_eq!(view.scroll, 62);
        view.scroll_to_top();
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_focus_wraps_and_scrolls_into_view() {
        let mut view = laid_out();
        view.focus_step(&[25, 4], true);
        assert_eq!(view.focus, Some(0));
        assert_eq!(view.cursor, 24);
        assert_eq!(view.scroll, 0);

        view.focus_step(&[25, 4], true);
        assert_eq!(view.focus, Some(1));
        assert_eq!(view.cursor, 3);
        assert_eq!(view.scroll, 56);

        view.focus_step(&[25, 4], true);
        assert_eq!(view.focus, Some(0));
        assert_eq!(view.scroll, 2);
    }

    #[test]
    fn test_cursor_requires_focus() {
        let mut view = laid_out();
        view.cursor_step(5, true);
        assert_eq!(view.cursor, 0);

        view.focus_step(&[5], false);
        assert_eq!(view.cursor, 4);
        view.cursor_step(5, true);
        assert_eq!(view.cursor, 4);
        view.cursor_step(5, false);
        assert_eq!(view.cursor, 3);
    }

    #[test]
    fn test_relayout_clamps_scroll() {
        let mut view = laid_out();
        view.scroll_to_bottom();
        view.update_layout(30, 20, Vec::new());
        assert_eq!(view.scroll, 10);
    }

    #[test]
    fn test_reset() {
        let mut view = laid_out();
        view.scroll_by(10);
        view.focus_step(&[3], true);
        view.reset();
        assert_eq!(view, ViewState::default());
    }
}
