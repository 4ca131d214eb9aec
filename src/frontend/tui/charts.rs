//! Chart bodies for the chart cards.
//!
//! Line and stacked area charts go through ratatui's braille `Chart`.
//! Bar and pie charts are drawn cell by cell since the built-in bar chart
//! cannot stack series.

use super::text::{put, truncate};
use crate::data::{ChartKind, ValueFormat};
use crate::format::{format_millions_tick, format_percent};
use crate::theme::DeckTheme;
use crate::widgets::ChartModel;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, Widget},
};

pub struct ChartBody<'a> {
    model: &'a ChartModel<'a>,
}

impl<'a> ChartBody<'a> {
    pub fn new(model: &'a ChartModel<'a>) -> Self {
        Self { model }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) {
        if area.width < 4 || area.height < 2 || self.model.spec.categories.is_empty() {
            return;
        }
        match self.model.spec.kind {
            ChartKind::Line | ChartKind::StackedArea => self.render_lines(area, buf, theme),
            ChartKind::StackedBar => self.render_columns(area, buf, theme),
            ChartKind::HorizontalBar => self.render_rows(area, buf, theme),
            ChartKind::Pie => self.render_shares(area, buf, theme),
        }
    }

    /// Y axis tick text. Large peso amounts collapse to whole millions.
    fn tick(&self, value: f64) -> String {
        let (_, max) = self.model.y_bounds();
        match self.model.spec.value_format {
            ValueFormat::Number | ValueFormat::Currency if max.abs() >= 1_000_000.0 => {
                format_millions_tick(value)
            }
            format => format.apply(value),
        }
    }

    fn render_lines(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) {
        let spec = self.model.spec;
        let (x_min, x_max) = self.model.x_bounds();
        let (y_min, y_max) = self.model.y_bounds();

        let series = self.model.plot_series();
        let mut guides: Vec<(Vec<(f64, f64)>, Color)> = Vec::new();
        for band in &spec.bands {
            let color = theme.series_color(&band.color);
            for edge in [band.from, band.to] {
                if edge > y_min && edge < y_max {
                    guides.push((vec![(x_min, edge), (x_max, edge)], color));
                }
            }
        }
        for line in &spec.reference_lines {
            guides.push((vec![(x_min, line.value), (x_max, line.value)], theme.negative));
        }
        if let Some(cursor) = self.model.cursor {
            let x = cursor as f64;
            guides.push((vec![(x, y_min), (x, y_max)], theme.text_secondary));
        }

        let mut datasets: Vec<Dataset> = guides
            .iter()
            .map(|(points, color)| {
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(*color))
                    .data(points)
            })
            .collect();
        for (points, meta) in series.iter().zip(&spec.series) {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(theme.series_color(&meta.color)))
                    .data(points),
            );
        }

        let label_style = Style::default().fg(theme.text_secondary);
        let first = spec.categories.first().cloned().unwrap_or_default();
        let last = spec.categories.last().cloned().unwrap_or_default();
        let x_labels = vec![Span::styled(first, label_style), Span::styled(last, label_style)];
        let y_labels = vec![
            Span::styled(self.tick(y_min), label_style),
            Span::styled(self.tick((y_min + y_max) / 2.0), label_style),
            Span::styled(self.tick(y_max), label_style),
        ];

        Chart::new(datasets)
            .legend_position(None)
            .style(Style::default().fg(theme.text_primary))
            .x_axis(
                Axis::default()
                    .bounds([x_min, x_max])
                    .labels(x_labels)
                    .style(Style::default().fg(theme.card_border)),
            )
            .y_axis(
                Axis::default()
                    .bounds([y_min, y_max])
                    .labels(y_labels)
                    .style(Style::default().fg(theme.card_border)),
            )
            .render(area, buf);
    }

    /// Vertical stacked columns, one per category, with the category
    /// label under each column.
    fn render_columns(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) {
        let spec = self.model.spec;
        let (_, y_max) = self.model.y_bounds();
        let axis_width = [self.tick(0.0), self.tick(y_max)]
            .iter()
            .map(|t| t.chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 1;
        if area.width <= axis_width + 1 {
            return;
        }
        let plot = Rect::new(
            area.x + axis_width,
            area.y,
            area.width - axis_width,
            area.height - 1,
        );
        let muted = Style::default().fg(theme.text_secondary);
        put(buf, area, area.x, plot.y, &self.tick(y_max), muted);
        put(buf, area, area.x, plot.bottom().saturating_sub(1), &self.tick(0.0), muted);

        let count = spec.categories.len() as u16;
        let slot = (plot.width / count).max(1);
        let bar = slot.saturating_sub(1).max(1);
        let scale = |value: f64| -> u16 {
            if y_max <= 0.0 {
                return 0;
            }
            let cells = (value.max(0.0) / y_max * f64::from(plot.height)).round();
            (cells as u16).min(plot.height)
        };

        for (i, category) in spec.categories.iter().enumerate() {
            let left = plot.x + slot * i as u16;
            if left >= plot.right() {
                break;
            }
            let mut running = 0.0;
            let mut drawn = 0;
            for series in &spec.series {
                running += series.values.get(i).copied().unwrap_or(0.0).max(0.0);
                let top = scale(running);
                let style = Style::default().fg(theme.series_color(&series.color));
                for row in drawn..top {
                    let y = plot.bottom() - 1 - row;
                    for dx in 0..bar.min(plot.right() - left) {
                        buf[(left + dx, y)].set_char('█').set_style(style);
                    }
                }
                drawn = drawn.max(top);
            }

            let mut label_style = muted;
            if self.model.cursor == Some(i) {
                label_style = label_style.add_modifier(Modifier::REVERSED);
            }
            let label = truncate(category, slot);
            put(buf, area, left, area.bottom() - 1, &label, label_style);
        }
    }

    /// One horizontal stacked bar per category followed by its total.
    fn render_rows(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) {
        let spec = self.model.spec;
        let totals = spec.stack_totals();
        let max = match spec.y_bounds {
            Some((_, max)) => max,
            None => totals.iter().copied().fold(0.0, f64::max),
        };
        let label_width = spec
            .categories
            .iter()
            .map(|c| c.chars().count() as u16)
            .max()
            .unwrap_or(0)
            .min(area.width / 3)
            + 1;
        let value_width = totals
            .iter()
            .map(|t| spec.value_format.apply(*t).chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 1;
        let bar_width = area.width.saturating_sub(label_width + value_width);
        let muted = Style::default().fg(theme.text_secondary);
        let text = Style::default().fg(theme.text_primary);

        for (i, category) in spec.categories.iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.bottom() {
                break;
            }
            let mut label_style = muted;
            if self.model.cursor == Some(i) {
                label_style = label_style.add_modifier(Modifier::REVERSED);
            }
            put(buf, area, area.x, y, &truncate(category, label_width - 1), label_style);

            let mut x = area.x + label_width;
            let mut running = 0.0;
            let mut drawn = 0;
            for series in &spec.series {
                running += series.values.get(i).copied().unwrap_or(0.0).max(0.0);
                let end = if max > 0.0 {
                    ((running / max * f64::from(bar_width)).round() as u16).min(bar_width)
                } else {
                    0
                };
                let style = Style::default().fg(theme.series_color(&series.color));
                for _ in drawn..end {
                    buf[(x, y)].set_char('█').set_style(style);
                    x += 1;
                }
                drawn = drawn.max(end);
            }
            let total = totals.get(i).copied().unwrap_or(0.0);
            put(buf, area, x + 1, y, &spec.value_format.apply(total), text);
        }
    }

    /// Share bar across the full width plus one legend row per slice.
    fn render_shares(&self, area: Rect, buf: &mut Buffer, theme: &DeckTheme) {
        let spec = self.model.spec;
        let shares = self.model.shares();
        let fallback = spec.series.first().map(|s| s.color.as_str()).unwrap_or("");

        let mut x = area.x;
        let mut running = 0.0;
        for (i, (_, share)) in shares.iter().enumerate() {
            running += share;
            let end = area.x + ((running / 100.0 * f64::from(area.width)).round() as u16).min(area.width);
            let color = theme.series_color(spec.category_color(i).unwrap_or(fallback));
            while x < end {
                buf[(x, area.y)].set_char('█').set_style(Style::default().fg(color));
                x += 1;
            }
        }

        let text = Style::default().fg(theme.text_primary);
        for (i, (name, share)) in shares.iter().enumerate() {
            let y = area.y + 2 + i as u16;
            if y >= area.bottom() {
                break;
            }
            let color = theme.series_color(spec.category_color(i).unwrap_or(fallback));
            let mut style = text;
            if self.model.cursor == Some(i) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let next = put(buf, area, area.x, y, "■ ", Style::default().fg(color));
            let label = format!("{} {}", name, format_percent(*share, 0));
            put(buf, area, next, y, &label, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ChartSpec;

    fn rendered(spec: &ChartSpec, cursor: Option<usize>, width: u16, height: u16) -> Buffer {
        let model = ChartModel::new(spec).with_cursor(cursor);
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        ChartBody::new(&model).render(buf.area, &mut buf, &DeckTheme::default());
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn all_text(buf: &Buffer) -> String {
        (0..buf.area.height).map(|y| row_text(buf, y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_line_chart_labels_axis_ends() {
        let spec = ChartSpec::new(ChartKind::Line, "Deuda", &["2019", "2025"])
            .series("Deuda Total", "#3b82f6", &[1_200_000.0, 7_551_545.0]);
        let text = all_text(&rendered(&spec, None, 40, 10));
        assert!(text.contains("2019"));
        assert!(text.contains("2025"));
        assert!(text.contains('M'));
    }

    #[test]
    fn test_percent_axis_uses_value_format() {
        let spec = ChartSpec::new(ChartKind::Line, "Ley 617", &["2026", "2027"])
            .series("Proyección", "#3b82f6", &[41.1, 40.9])
            .format(ValueFormat::Percent { decimals: 2 })
            .y_bounds(35.0, 55.0);
        let text = all_text(&rendered(&spec, None, 40, 10));
        assert!(text.contains("55,00%"));
        assert!(text.contains("35,00%"));
    }

    #[test]
    fn test_stacked_columns_fill_from_bottom() {
        let spec = ChartSpec::new(ChartKind::StackedBar, "Ingresos", &["A", "B"])
            .series("x", "#ff0000", &[5.0, 10.0])
            .series("y", "#00ff00", &[5.0, 0.0])
            .y_bounds(0.0, 10.0);
        let buf = rendered(&spec, Some(1), 20, 6);
        let bottom = buf.area.height - 2;
        let column_x = (0..20).find(|x| buf[(*x, bottom)].symbol() == "█").unwrap();
        assert_eq!(buf[(column_x, bottom)].fg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(column_x, 0)].fg, Color::Rgb(0, 255, 0));
        assert!(row_text(&buf, 5).contains('B'));
    }

    #[test]
    fn test_horizontal_bars_show_totals() {
        let spec = ChartSpec::new(ChartKind::HorizontalBar, "Composición", &["Banca"])
            .series("Porcentaje", "#3b82f6", &[72.5])
            .format(ValueFormat::Percent { decimals: 1 })
            .y_bounds(0.0, 100.0);
        let buf = rendered(&spec, None, 40, 2);
        assert!(row_text(&buf, 0).starts_with("Banca"));
        assert!(row_text(&buf, 0).contains("72,5%"));
    }

    #[test]
    fn test_pie_lists_shares() {
        let spec = ChartSpec::new(ChartKind::Pie, "Sentencias", &["Fallos", "Conciliaciones"])
            .series("Valor", "#3b82f6", &[75.0, 25.0])
            .slice_colors(&["#ff0000", "#00ff00"]);
        let buf = rendered(&spec, Some(0), 30, 5);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(29, 0)].fg, Color::Rgb(0, 255, 0));
        assert!(row_text(&buf, 2).contains("Fallos 75%"));
        assert!(row_text(&buf, 3).contains("Conciliaciones 25%"));
        assert!(buf[(2, 2)].modifier.contains(Modifier::REVERSED));
    }
}
