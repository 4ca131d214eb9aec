//! Table data: positional header/row cells with optional highlight rule
//! and per-cell style callback.

use super::{SeriesPoint, Tone};
use serde::Serialize;

/// Content of one table cell. Everything except `Text`/`Number` is a
/// custom inline visual that the renderer places without interpretation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellValue {
    Text { text: String },
    Number { value: f64 },
    /// Colored text, optionally bold.
    Toned { text: String, tone: Tone, bold: bool },
    /// Text on a tinted background.
    Badge { text: String, tone: Tone },
    /// Text followed by a direction glyph.
    Trend { text: String, direction: TrendDirection },
    /// Inline mini chart.
    Spark { points: Vec<SeriesPoint> },
    Empty,
}

impl CellValue {
    pub fn text(text: impl Into<String>) -> Self {
        CellValue::Text { text: text.into() }
    }

    pub fn number(value: f64) -> Self {
        CellValue::Number { value }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        CellValue::Toned {
            text: text.into(),
            tone,
            bold: false,
        }
    }

    pub fn strong(text: impl Into<String>, tone: Tone) -> Self {
        CellValue::Toned {
            text: text.into(),
            tone,
            bold: true,
        }
    }

    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        CellValue::Badge {
            text: text.into(),
            tone,
        }
    }

    /// Plain-text rendering used by text export and width calculations.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text { text }
            | CellValue::Toned { text, .. }
            | CellValue::Badge { text, .. } => text.clone(),
            CellValue::Number { value } => crate::format::format_number(*value),
            CellValue::Trend { text, direction } => format!("{} {}", text, direction.glyph()),
            CellValue::Spark { points } => crate::widgets::SparklineState::glyphs(points),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text { text: value }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::number(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    pub fn glyph(self) -> &'static str {
        match self {
            TrendDirection::Up => "▲",
            TrendDirection::Down => "▼",
            TrendDirection::Flat => "–",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            TrendDirection::Up => Tone::Positive,
            TrendDirection::Down => Tone::Negative,
            TrendDirection::Flat => Tone::Muted,
        }
    }
}

/// Highlight rows whose cell at `column` equals `value` exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightRule {
    pub column: usize,
    pub value: CellValue,
}

/// Extra styling requested for a cell. Merged over the positional style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub bold: bool,
    pub fg: Option<Tone>,
    pub bg: Option<Tone>,
}

impl CellStyle {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn with_fg(mut self, tone: Tone) -> Self {
        self.fg = Some(tone);
        self
    }

    pub fn with_bg(mut self, tone: Tone) -> Self {
        self.bg = Some(tone);
        self
    }

    /// Fields set in `other` win; `bold` accumulates.
    pub fn merge(self, other: CellStyle) -> CellStyle {
        CellStyle {
            bold: self.bold || other.bold,
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
        }
    }
}

/// `(cell, column, row) -> style`
pub type CellStyleFn = fn(&CellValue, usize, usize) -> CellStyle;

#[derive(Debug, Clone, Serialize)]
pub struct TableSpec {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightRule>,
    #[serde(skip)]
    pub cell_style: Option<CellStyleFn>,
}

impl TableSpec {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            highlight: None,
            cell_style: None,
        }
    }

    pub fn row<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn rows<R, I, C>(mut self, rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        for row in rows {
            self = self.row(row);
        }
        self
    }

    /// Rows of numeric literals written with `.` separators, reformatted
    /// in place. The first cell of each row is kept as a label when
    /// `label_first` is set.
    pub fn formatted_rows(mut self, rows: &[&[&str]], label_first: bool) -> Self {
        for row in rows {
            let cells = row
                .iter()
                .enumerate()
                .map(|(i, raw)| {
                    if label_first && i == 0 {
                        CellValue::text(*raw)
                    } else {
                        CellValue::text(crate::format::format_number_text(raw))
                    }
                })
                .collect();
            self.rows.push(cells);
        }
        self
    }

    pub fn highlight(mut self, column: usize, value: impl Into<CellValue>) -> Self {
        self.highlight = Some(HighlightRule {
            column,
            value: value.into(),
        });
        self
    }

    pub fn cell_style(mut self, f: CellStyleFn) -> Self {
        self.cell_style = Some(f);
        self
    }

    /// Whether `row_index` matches the highlight rule. Strict equality: a
    /// text cell never matches a numeric rule value and vice versa.
    pub fn is_highlighted(&self, row_index: usize) -> bool {
        match (&self.highlight, self.rows.get(row_index)) {
            (Some(rule), Some(row)) => row.get(rule.column) == Some(&rule.value),
            _ => false,
        }
    }

    /// Shape problems that render as silent misalignment.
    pub fn validate(&self) -> Vec<TableIssue> {
        let mut issues = Vec::new();
        let width = self.headers.len();

        for (index, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                issues.push(TableIssue::RowLength {
                    table: self.title.clone(),
                    row: index,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        if let Some(rule) = &self.highlight {
            if rule.column >= width {
                issues.push(TableIssue::HighlightColumnOutOfRange {
                    table: self.title.clone(),
                    column: rule.column,
                    columns: width,
                });
            } else {
                let comparable = self.rows.iter().any(|row| {
                    row.get(rule.column)
                        .map(|cell| std::mem::discriminant(cell) == std::mem::discriminant(&rule.value))
                        .unwrap_or(false)
                });
                if !comparable {
                    issues.push(TableIssue::HighlightNeverMatches {
                        table: self.title.clone(),
                        column: rule.column,
                    });
                }
            }
        }

        issues
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableIssue {
    RowLength {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    HighlightColumnOutOfRange {
        table: String,
        column: usize,
        columns: usize,
    },
    HighlightNeverMatches {
        table: String,
        column: usize,
    },
}

impl TableIssue {
    pub fn message(&self) -> String {
        match self {
            TableIssue::RowLength {
                table,
                row,
                expected,
                found,
            } => format!(
                "Table '{}': row {} has {} cells, headers define {}",
                table, row, found, expected
            ),
            TableIssue::HighlightColumnOutOfRange {
                table,
                column,
                columns,
            } => format!(
                "Table '{}': highlight column {} is outside the {} header columns",
                table, column, columns
            ),
            TableIssue::HighlightNeverMatches { table, column } => format!(
                "Table '{}': highlight value can never equal a cell in column {}",
                table, column
            ),
        }
    }
}
