//! Bordered data table with a tinted header row.
//!
//! Columns start at their natural width and the widest ones shrink until
//! the table fits. Cell text past its column is cut with `…`.

use super::cards::CardFrame;
use super::text::{fill, put, truncate};
use crate::data::{CellStyle, CellValue, TableSpec};
use crate::theme::DeckTheme;
use crate::widgets::{PlacedCell, SparklineState, TableModel};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::BorderType,
};

const MIN_COLUMN: u16 = 3;

pub struct DataTable<'a> {
    spec: &'a TableSpec,
    border_type: BorderType,
}

impl<'a> DataTable<'a> {
    pub fn new(spec: &'a TableSpec, border_type: BorderType) -> Self {
        Self { spec, border_type }
    }

    /// Border, header and one row per data row.
    pub fn height(spec: &TableSpec) -> u16 {
        3 + u16::try_from(spec.rows.len()).unwrap_or(u16::MAX - 3)
    }

    /// Fit natural column widths into `available` columns, one space
    /// between neighbours.
    pub fn fit_widths(mut widths: Vec<u16>, available: u16) -> Vec<u16> {
        if widths.is_empty() {
            return widths;
        }
        let gaps = widths.len() as u16 - 1;
        let budget = available.saturating_sub(gaps);
        while widths.iter().sum::<u16>() > budget {
            let Some((widest, width)) = widths
                .iter()
                .copied()
                .enumerate()
                .max_by_key(|(i, w)| (*w, std::cmp::Reverse(*i)))
            else {
                break;
            };
            if width <= MIN_COLUMN {
                break;
            }
            widths[widest] -= 1;
        }
        widths
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) {
        let inner = CardFrame {
            title: Some(self.spec.title.as_str()),
            border_type: self.border_type,
            focused: false,
        }
        .render(area, buf, theme);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let model = TableModel::new(self.spec);
        let widths = Self::fit_widths(model.column_widths(), inner.width);
        let starts: Vec<u16> = widths
            .iter()
            .scan(inner.x, |x, w| {
                let start = *x;
                *x = x.saturating_add(w + 1);
                Some(start)
            })
            .collect();

        let header_style = Style::default()
            .fg(theme.table_header_text)
            .bg(theme.table_header_background)
            .add_modifier(Modifier::BOLD);
        fill(buf, Rect::new(inner.x, inner.y, inner.width, 1), header_style);
        for ((header, x), width) in model.headers().iter().zip(&starts).zip(&widths) {
            put(buf, inner, *x, inner.y, &truncate(header, *width), header_style);
        }

        for (i, row) in model.rows().iter().enumerate() {
            let y = inner.y + 1 + i as u16;
            if y >= inner.bottom() {
                break;
            }
            let mut base = Style::default().fg(theme.text_primary);
            if row.highlighted {
                base = base.bg(theme.table_highlight_background);
                fill(buf, Rect::new(inner.x, y, inner.width, 1), base);
            }
            for ((cell, x), width) in row.cells.iter().zip(&starts).zip(&widths) {
                render_cell(cell, *x, y, *width, inner, base, buf, theme);
            }
        }
    }
}

fn apply_style(base: Style, style: CellStyle, theme: &DeckTheme) -> Style {
    let mut out = base;
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if let Some(color) = style.fg.and_then(|tone| theme.tone(tone)) {
        out = out.fg(color);
    }
    if let Some(color) = style.bg.and_then(|tone| theme.tone(tone)) {
        out = out.bg(color);
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn render_cell(
    cell: &PlacedCell,
    x: u16,
    y: u16,
    width: u16,
    clip: Rect,
    base: Style,
    buf: &mut Buffer,
    theme: &DeckTheme,
) {
    let area = Rect::new(x, y, width, 1).intersection(clip);
    match cell.value {
        CellValue::Text { .. } | CellValue::Number { .. } => {
            let style = apply_style(base, cell.style, theme);
            put(buf, area, x, y, &truncate(&cell.value.display(), width), style);
        }
        CellValue::Toned { text, tone, bold } => {
            let mut style = base;
            if let Some(color) = theme.tone(*tone) {
                style = style.fg(color);
            }
            if *bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            let style = apply_style(style, cell.style, theme);
            put(buf, area, x, y, &truncate(text, width), style);
        }
        CellValue::Badge { text, tone } => {
            let mut style = base.fg(theme.background).add_modifier(Modifier::BOLD);
            if let Some(color) = theme.tone(*tone) {
                style = style.bg(color);
            }
            let style = apply_style(style, cell.style, theme);
            put(buf, area, x, y, &truncate(text, width), style);
        }
        CellValue::Trend { text, direction } => {
            let style = apply_style(base, cell.style, theme);
            let label = truncate(text, width.saturating_sub(2));
            let next = put(buf, area, x, y, &label, style);
            let mut glyph_style = base;
            if let Some(color) = theme.tone(direction.tone()) {
                glyph_style = glyph_style.fg(color);
            }
            put(buf, area, next + 1, y, direction.glyph(), glyph_style);
        }
        CellValue::Spark { points } => {
            let glyphs = SparklineState::glyphs(points);
            put(buf, area, x, y, &glyphs, base.fg(theme.accent));
        }
        CellValue::Empty => {}
    }
}
