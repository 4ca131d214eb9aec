//! Card shells: stat cards, chart cards and embedded-document cards.
//!
//! Each card reports the height it needs for a given width so the section
//! view can lay out the whole page before drawing it.

use super::charts::ChartBody;
use super::sparkline::{Sparkline, SPARKLINE_HEIGHT};
use super::text::{put, wrap_text};
use crate::data::{ChartSpec, EmbeddedDocument, StatCard, StatLine};
use crate::theme::DeckTheme;
use crate::widgets::{ChartModel, SparklineState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Widget},
};
use std::path::Path;

/// Shared card frame: border, title and focus color.
pub struct CardFrame<'a> {
    pub title: Option<&'a str>,
    pub border_type: BorderType,
    pub focused: bool,
}

impl<'a> CardFrame<'a> {
    /// Draw the frame and return the inner area.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) -> Rect {
        let border_color = if self.focused {
            theme.card_border_focused
        } else {
            theme.card_border
        };
        let mut block = Block::bordered()
            .border_type(self.border_type)
            .border_style(Style::default().fg(border_color));
        if let Some(title) = self.title {
            block = block.title(Line::styled(
                format!(" {} ", title),
                Style::default().fg(theme.card_title).add_modifier(Modifier::BOLD),
            ));
        }
        let inner = block.inner(area);
        block.render(area, buf);
        inner
    }
}

/// A stat card line after wrapping to the card width.
enum Row<'a> {
    Plain(String),
    Strong(String),
    /// Bullet line whose first `bold` characters are the label
    Labeled { text: String, bold: usize },
    Figure { value: &'a str, tone: crate::data::Tone },
    Muted(String),
    Spark(&'a crate::data::SparklineSpec),
}

fn card_rows(card: &StatCard, width: u16) -> Vec<Row<'_>> {
    let mut rows = Vec::new();
    for line in &card.lines {
        match line {
            StatLine::Text(text) => rows.extend(wrap_text(text, width).into_iter().map(Row::Plain)),
            StatLine::Subheading(text) => rows.push(Row::Strong(text.clone())),
            StatLine::Bullet { label, text } => {
                let (full, bold) = match label {
                    Some(label) => {
                        let prefix = format!("• {}:", label);
                        let bold = prefix.chars().count();
                        (format!("{} {}", prefix, text), bold)
                    }
                    None => (format!("• {}", text), 0),
                };
                for (i, wrapped) in wrap_text(&full, width).into_iter().enumerate() {
                    let bold = if i == 0 { bold.min(wrapped.chars().count()) } else { 0 };
                    rows.push(Row::Labeled { text: wrapped, bold });
                }
            }
            StatLine::Figure { value, tone, caption } => {
                rows.push(Row::Figure {
                    value: value.as_str(),
                    tone: *tone,
                });
                rows.extend(wrap_text(caption, width).into_iter().map(Row::Muted));
            }
            StatLine::Sparkline(spec) => rows.push(Row::Spark(spec)),
        }
    }
    rows
}

pub struct StatCardWidget<'a> {
    card: &'a StatCard,
    border_type: BorderType,
    focused: bool,
    cursor: usize,
}

impl<'a> StatCardWidget<'a> {
    pub fn new(card: &'a StatCard, border_type: BorderType) -> Self {
        Self {
            card,
            border_type,
            focused: false,
            cursor: 0,
        }
    }

    /// Focus the card with its sparkline cursor on `cursor`.
    pub fn focus(mut self, focused: bool, cursor: usize) -> Self {
        self.focused = focused;
        self.cursor = cursor;
        self
    }

    /// Rows needed at `width` including the border.
    pub fn height(card: &StatCard, width: u16) -> u16 {
        let inner = width.saturating_sub(2);
        let rows: u16 = card_rows(card, inner)
            .iter()
            .map(|row| match row {
                Row::Spark(_) => SPARKLINE_HEIGHT,
                _ => 1,
            })
            .sum();
        rows + 2
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) {
        let inner = CardFrame {
            title: self.card.title.as_deref(),
            border_type: self.border_type,
            focused: self.focused,
        }
        .render(area, buf, theme);

        let text = Style::default().fg(theme.text_primary);
        let strong = text.add_modifier(Modifier::BOLD);
        let mut y = inner.y;
        for row in card_rows(self.card, inner.width) {
            if y >= inner.bottom() {
                break;
            }
            match row {
                Row::Plain(line) => {
                    put(buf, inner, inner.x, y, &line, text);
                }
                Row::Strong(line) => {
                    put(buf, inner, inner.x, y, &line, strong.fg(theme.heading));
                }
                Row::Labeled { text: line, bold } => {
                    let head: String = line.chars().take(bold).collect();
                    let tail: String = line.chars().skip(bold).collect();
                    let x = put(buf, inner, inner.x, y, &head, strong);
                    put(buf, inner, x, y, &tail, text);
                }
                Row::Figure { value, tone } => {
                    let color = theme.tone(tone).unwrap_or(theme.text_primary);
                    put(buf, inner, inner.x, y, value, strong.fg(color));
                }
                Row::Muted(line) => {
                    put(buf, inner, inner.x, y, &line, Style::default().fg(theme.text_secondary));
                }
                Row::Spark(spec) => {
                    let height = SPARKLINE_HEIGHT.min(inner.bottom() - y);
                    let state = SparklineState::new(&spec.title, &spec.points).with_cursor(self.cursor);
                    Sparkline::new(state, &spec.color)
                        .show_tooltip(self.focused)
                        .render(Rect::new(inner.x, y, inner.width, height), buf, theme);
                    y += SPARKLINE_HEIGHT;
                    continue;
                }
            }
            y += 1;
        }
    }
}

pub struct ChartCard<'a> {
    spec: &'a ChartSpec,
    border_type: BorderType,
    chart_height: u16,
    cursor: Option<usize>,
}

impl<'a> ChartCard<'a> {
    pub fn new(spec: &'a ChartSpec, border_type: BorderType, chart_height: u16) -> Self {
        Self {
            spec,
            border_type,
            chart_height,
            cursor: None,
        }
    }

    /// Focus the card with the inspect cursor on category `cursor`.
    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Border, optional description, chart slot, legend and tooltip line.
    pub fn height(spec: &ChartSpec, chart_height: u16) -> u16 {
        let description = u16::from(spec.description.is_some());
        2 + description + chart_height + 2
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) {
        let inner = CardFrame {
            title: Some(self.spec.title.as_str()),
            border_type: self.border_type,
            focused: self.cursor.is_some(),
        }
        .render(area, buf, theme);
        if inner.height == 0 {
            return;
        }

        let mut y = inner.y;
        if let Some(description) = &self.spec.description {
            put(buf, inner, inner.x, y, description, Style::default().fg(theme.text_secondary));
            y += 1;
        }

        let slot_height = self.chart_height.min(inner.bottom().saturating_sub(y));
        let model = ChartModel::new(self.spec).with_cursor(self.cursor);
        ChartBody::new(&model).render(Rect::new(inner.x, y, inner.width, slot_height), buf, theme);
        y += slot_height;

        if y < inner.bottom() {
            self.render_legend(Rect::new(inner.x, y, inner.width, 1), buf, theme);
            y += 1;
        }
        if y < inner.bottom() {
            let line = match model.tooltip_lines() {
                Some(lines) => lines.join("  │  "),
                None => String::new(),
            };
            put(
                buf,
                inner,
                inner.x,
                y,
                &line,
                Style::default().fg(theme.text_primary).add_modifier(Modifier::BOLD),
            );
        }
    }

    fn render_legend(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) {
        let mut x = area.x;
        let text = Style::default().fg(theme.text_secondary);
        let entries: Vec<(&str, &str)> = if self.spec.slice_colors.is_empty() {
            self.spec
                .series
                .iter()
                .map(|s| (s.name.as_str(), s.color.as_str()))
                .collect()
        } else {
            self.spec
                .categories
                .iter()
                .enumerate()
                .filter_map(|(i, name)| self.spec.category_color(i).map(|c| (name.as_str(), c)))
                .collect()
        };
        for (name, color) in entries {
            x = put(buf, area, x, area.y, "■ ", Style::default().fg(theme.series_color(color)));
            x = put(buf, area, x, area.y, name, text);
            x = put(buf, area, x, area.y, "  ", text);
        }
        for line in &self.spec.reference_lines {
            x = put(buf, area, x, area.y, "┄ ", Style::default().fg(theme.negative));
            x = put(buf, area, x, area.y, &line.label, text);
            x = put(buf, area, x, area.y, "  ", text);
        }
    }
}

pub struct EmbedCard<'a> {
    doc: &'a EmbeddedDocument,
    border_type: BorderType,
    data_dir: &'a Path,
}

impl<'a> EmbedCard<'a> {
    pub const HEIGHT: u16 = 5;

    pub fn new(doc: &'a EmbeddedDocument, border_type: BorderType, data_dir: &'a Path) -> Self {
        Self {
            doc,
            border_type,
            data_dir,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) {
        let inner = CardFrame {
            title: Some(self.doc.title.as_str()),
            border_type: self.border_type,
            focused: false,
        }
        .render(area, buf, theme);

        let path = Path::new(&self.doc.path);
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        };
        let (status, tone) = if resolved.exists() {
            ("Disponible", theme.positive)
        } else {
            ("No encontrado", theme.warning)
        };

        let muted = Style::default().fg(theme.text_secondary);
        put(buf, inner, inner.x, inner.y, "Documento externo:", muted);
        put(
            buf,
            inner,
            inner.x,
            inner.y + 1,
            &resolved.display().to_string(),
            Style::default().fg(theme.text_primary),
        );
        put(
            buf,
            inner,
            inner.x,
            inner.y + 2,
            status,
            Style::default().fg(tone).add_modifier(Modifier::BOLD),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{series_points, SparklineSpec, Tone};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_stat_card_height_counts_wrapped_lines() {
        let card = StatCard::new("Inflación")
            .figure("4,7%", Tone::Accent, "Continúa descendiendo")
            .bullet("uno dos");
        // figure, caption (wrapped to 2), bullet (1) + borders
        assert_eq!(StatCardWidget::height(&card, 14), 2 + 1 + 2 + 1);
    }

    #[test]
    fn test_stat_card_renders_title_and_label() {
        let card = StatCard::new("Deuda").labeled("Perfil", "tasa fija");
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 3));
        StatCardWidget::new(&card, BorderType::Plain).render(buf.area, &mut buf, &DeckTheme::default());
        assert!(row_text(&buf, 0).contains(" Deuda "));
        assert!(row_text(&buf, 1).contains("• Perfil: tasa fija"));
        assert!(buf[(1, 1)].modifier.contains(Modifier::BOLD));
        assert!(!buf[(12, 1)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_focused_sparkline_card_shows_tooltip() {
        let card = StatCard::new("Metrocali S.A.").sparkline(SparklineSpec::new(
            "Resultado Neto",
            "#ef4444",
            series_points(&[("2020", -150.0), ("2024", -120.0)]),
        ));
        let height = StatCardWidget::height(&card, 40);
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, height));
        StatCardWidget::new(&card, BorderType::Rounded)
            .focus(true, 1)
            .render(buf.area, &mut buf, &DeckTheme::default());
        assert!(row_text(&buf, height - 2).contains("2024 Resultado Neto: -120"));
    }

    #[test]
    fn test_chart_card_height() {
        let spec = ChartSpec::new(crate::data::ChartKind::Line, "t", &["a"]).description("d");
        assert_eq!(ChartCard::height(&spec, 14), 2 + 1 + 14 + 2);
    }

    #[test]
    fn test_embed_reports_missing_document() {
        let doc = EmbeddedDocument {
            title: "Reporte Gerencial - cali".to_string(),
            path: "reports/none.html".to_string(),
        };
        let dir = tempfile::tempdir().unwrap();
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, EmbedCard::HEIGHT));
        EmbedCard::new(&doc, BorderType::Plain, dir.path()).render(buf.area, &mut buf, &DeckTheme::default());
        assert!(row_text(&buf, 3).contains("No encontrado"));
    }
}
