//! Compact trend chart drawn with block glyphs.
//!
//! The bottom row shows the tooltip of the point under the cursor while the
//! owning card is focused, otherwise the covered label range.

use super::text::put;
use crate::theme::DeckTheme;
use crate::widgets::{SparklineState, LEVELS};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

/// Rows used by a sparkline: graph plus the tooltip line.
pub const SPARKLINE_HEIGHT: u16 = 4;

pub struct Sparkline<'a> {
    state: SparklineState<'a>,
    color: &'a str,
    show_tooltip: bool,
}

impl<'a> Sparkline<'a> {
    pub fn new(state: SparklineState<'a>, color: &'a str) -> Self {
        Self {
            state,
            color,
            show_tooltip: false,
        }
    }

    pub fn show_tooltip(mut self, show: bool) -> Self {
        self.show_tooltip = show;
        self
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) {
        if area.height < 2 || area.width == 0 || self.state.points.is_empty() {
            return;
        }
        let graph_rows = area.height - 1;
        let color = theme.series_color(self.color);
        let count = u16::try_from(self.state.points.len()).unwrap_or(u16::MAX);
        let column_width = (area.width / count).max(1);
        let bottom = area.y + graph_rows - 1;

        for (i, height) in self.state.heights(graph_rows).into_iter().enumerate() {
            let left = area.x + column_width * i as u16;
            if left >= area.right() {
                break;
            }
            let mut style = Style::default().fg(color);
            if self.show_tooltip && i == self.state.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            for dx in 0..column_width.min(area.right() - left) {
                let mut remaining = height;
                for row in 0..graph_rows {
                    if remaining == 0 {
                        break;
                    }
                    let level = remaining.min(8);
                    let glyph = LEVELS[usize::from(level) - 1];
                    buf[(left + dx, bottom - row)].set_char(glyph).set_style(style);
                    remaining -= level;
                }
            }
        }

        let caption_y = area.y + graph_rows;
        let muted = Style::default().fg(theme.text_secondary);
        if self.show_tooltip {
            if let Some(tooltip) = self.state.tooltip() {
                let x = put(buf, area, area.x, caption_y, &tooltip.label, muted);
                put(
                    buf,
                    area,
                    x + 1,
                    caption_y,
                    &tooltip.text,
                    Style::default().fg(theme.text_primary).add_modifier(Modifier::BOLD),
                );
            }
        } else if let (Some(first), Some(last)) = (self.state.points.first(), self.state.points.last()) {
            put(buf, area, area.x, caption_y, &format!("{} → {}", first.name, last.name), muted);
        }
    }
}
