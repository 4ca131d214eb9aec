//! Section content model: cards, charts, tables and embedded documents.

use super::{SectionId, SeriesPoint, TableSpec, Tone};
use serde::Serialize;

/// A full-page report view.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<String>,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(id: SectionId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            lead: None,
            blocks: Vec::new(),
        }
    }

    pub fn lead(mut self, text: impl Into<String>) -> Self {
        self.lead = Some(text.into());
        self
    }

    pub fn block(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }

    /// Side-by-side blocks (stacked on narrow viewports).
    pub fn columns(mut self, blocks: Vec<Block>) -> Self {
        self.blocks.push(Block::Columns(blocks));
        self
    }

    pub fn heading(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Heading(text.into()));
        self
    }

    /// Every table, including those nested in columns.
    pub fn tables(&self) -> Vec<&TableSpec> {
        fn collect<'a>(blocks: &'a [Block], out: &mut Vec<&'a TableSpec>) {
            for block in blocks {
                match block {
                    Block::Table(table) => out.push(table),
                    Block::Columns(children) => collect(children, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.blocks, &mut out);
        out
    }

    /// Blocks that accept an inspect cursor, in reading order.
    pub fn inspectable(&self) -> Vec<&Block> {
        fn collect<'a>(blocks: &'a [Block], out: &mut Vec<&'a Block>) {
            for block in blocks {
                match block {
                    Block::Columns(children) => collect(children, out),
                    b if b.is_inspectable() => out.push(b),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.blocks, &mut out);
        out
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Block {
    Heading(String),
    Stat(StatCard),
    Chart(ChartSpec),
    Table(TableSpec),
    Embed(EmbeddedDocument),
    Columns(Vec<Block>),
}

impl Block {
    pub fn is_inspectable(&self) -> bool {
        match self {
            Block::Chart(_) => true,
            Block::Stat(card) => card.embedded_sparkline().is_some(),
            _ => false,
        }
    }

    /// Number of categories the inspect cursor can visit.
    pub fn cursor_len(&self) -> usize {
        match self {
            Block::Chart(chart) => chart.categories.len(),
            Block::Stat(card) => card.embedded_sparkline().map(|s| s.points.len()).unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<StatCard> for Block {
    fn from(card: StatCard) -> Self {
        Block::Stat(card)
    }
}

impl From<ChartSpec> for Block {
    fn from(chart: ChartSpec) -> Self {
        Block::Chart(chart)
    }
}

impl From<TableSpec> for Block {
    fn from(table: TableSpec) -> Self {
        Block::Table(table)
    }
}

impl From<EmbeddedDocument> for Block {
    fn from(doc: EmbeddedDocument) -> Self {
        Block::Embed(doc)
    }
}

/// Bordered card with an optional title and free-form body lines.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub lines: Vec<StatLine>,
}

impl StatCard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            lines: Vec::new(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.lines.push(StatLine::Text(text.into()));
        self
    }

    pub fn bullet(mut self, text: impl Into<String>) -> Self {
        self.lines.push(StatLine::Bullet {
            label: None,
            text: text.into(),
        });
        self
    }

    pub fn labeled(mut self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.lines.push(StatLine::Bullet {
            label: Some(label.into()),
            text: text.into(),
        });
        self
    }

    pub fn figure(mut self, value: impl Into<String>, tone: Tone, caption: impl Into<String>) -> Self {
        self.lines.push(StatLine::Figure {
            value: value.into(),
            tone,
            caption: caption.into(),
        });
        self
    }

    pub fn subheading(mut self, text: impl Into<String>) -> Self {
        self.lines.push(StatLine::Subheading(text.into()));
        self
    }

    pub fn sparkline(mut self, spec: SparklineSpec) -> Self {
        self.lines.push(StatLine::Sparkline(spec));
        self
    }

    /// The card's sparkline, if it embeds one.
    pub fn embedded_sparkline(&self) -> Option<&SparklineSpec> {
        self.lines.iter().find_map(|line| match line {
            StatLine::Sparkline(spec) => Some(spec),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StatLine {
    Text(String),
    Subheading(String),
    Bullet {
        label: Option<String>,
        text: String,
    },
    /// Large highlighted value with a caption.
    Figure {
        value: String,
        tone: Tone,
        caption: String,
    },
    Sparkline(SparklineSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparklineSpec {
    pub title: String,
    /// Hex color of the line/area.
    pub color: String,
    pub points: Vec<SeriesPoint>,
}

impl SparklineSpec {
    pub fn new(title: impl Into<String>, color: &str, points: Vec<SeriesPoint>) -> Self {
        Self {
            title: title.into(),
            color: color.to_string(),
            points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    StackedArea,
    StackedBar,
    HorizontalBar,
    /// Share of a whole: categories are the slices of the first series.
    Pie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// es-CO grouped number.
    Number,
    Percent { decimals: usize },
    /// Two decimals followed by `$`.
    Currency,
}

impl ValueFormat {
    pub fn apply(self, value: f64) -> String {
        match self {
            ValueFormat::Number => crate::format::format_number(value),
            ValueFormat::Percent { decimals } => crate::format::format_percent(value, decimals),
            ValueFormat::Currency => format!("{}$", crate::format::format_fixed(value, 2)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceBand {
    pub from: f64,
    pub to: f64,
    pub label: String,
    pub color: String,
}

/// Chart card content: categories on the x axis, one or more series.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub value_format: ValueFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_bounds: Option<(f64, f64)>,
    pub reference_lines: Vec<ReferenceLine>,
    pub bands: Vec<ReferenceBand>,
    /// Per-category colors for pie slices; empty means series colors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub slice_colors: Vec<String>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>, categories: &[&str]) -> Self {
        Self {
            title: title.into(),
            description: None,
            kind,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            series: Vec::new(),
            value_format: ValueFormat::Number,
            y_bounds: None,
            reference_lines: Vec::new(),
            bands: Vec::new(),
            slice_colors: Vec::new(),
        }
    }

    /// Categories `first..=last` as year labels.
    pub fn years(kind: ChartKind, title: impl Into<String>, first: u32, last: u32) -> Self {
        let years: Vec<String> = (first..=last).map(|y| y.to_string()).collect();
        let refs: Vec<&str> = years.iter().map(String::as_str).collect();
        Self::new(kind, title, &refs)
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn series(mut self, name: impl Into<String>, color: &str, values: &[f64]) -> Self {
        self.series.push(Series {
            name: name.into(),
            color: color.to_string(),
            values: values.to_vec(),
        });
        self
    }

    pub fn slice_colors(mut self, colors: &[&str]) -> Self {
        self.slice_colors = colors.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Color of category `index`: its slice color when set, cycling, else
    /// the first series color.
    pub fn category_color(&self, index: usize) -> Option<&str> {
        if self.slice_colors.is_empty() {
            return self.series.first().map(|s| s.color.as_str());
        }
        self.slice_colors
            .get(index % self.slice_colors.len())
            .map(String::as_str)
    }

    pub fn format(mut self, format: ValueFormat) -> Self {
        self.value_format = format;
        self
    }

    pub fn y_bounds(mut self, min: f64, max: f64) -> Self {
        self.y_bounds = Some((min, max));
        self
    }

    pub fn reference_line(mut self, value: f64, label: impl Into<String>) -> Self {
        self.reference_lines.push(ReferenceLine {
            value,
            label: label.into(),
        });
        self
    }

    pub fn band(mut self, from: f64, to: f64, label: impl Into<String>, color: &str) -> Self {
        self.bands.push(ReferenceBand {
            from,
            to,
            label: label.into(),
            color: color.to_string(),
        });
        self
    }

    /// `(series name, formatted value)` for every series at `index`.
    pub fn tooltip(&self, index: usize) -> Option<(String, Vec<(String, String)>)> {
        let category = self.categories.get(index)?;
        let values = self
            .series
            .iter()
            .filter_map(|s| {
                s.values
                    .get(index)
                    .map(|v| (s.name.clone(), self.value_format.apply(*v)))
            })
            .collect();
        Some((category.clone(), values))
    }

    /// Cumulative totals per category (top of each stack).
    pub fn stack_totals(&self) -> Vec<f64> {
        (0..self.categories.len())
            .map(|i| {
                self.series
                    .iter()
                    .filter_map(|s| s.values.get(i))
                    .sum::<f64>()
            })
            .collect()
    }
}

/// External document shown by reference (path + open action).
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddedDocument {
    pub title: String,
    /// Path relative to the data directory, resolved by the frontend.
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> ChartSpec {
        ChartSpec::new(ChartKind::StackedArea, "Gastos", &["2019", "2020"])
            .series("Funcionamiento", "#3b82f6", &[923033.0, 867598.0])
            .series("Inversión", "#14b8a6", &[4553329.0, 3873913.0])
    }

    #[test]
    fn test_tooltip_lists_every_series_formatted() {
        let (label, values) = chart().tooltip(1).unwrap();
        assert_eq!(label, "2020");
        assert_eq!(
            values,
            vec![
                ("Funcionamiento".to_string(), "867.598".to_string()),
                ("Inversión".to_string(), "3.873.913".to_string()),
            ]
        );
        assert!(chart().tooltip(2).is_none());
    }

    #[test]
    fn test_stack_totals() {
        assert_eq!(chart().stack_totals(), vec![5476362.0, 4741511.0]);
    }

    #[test]
    fn test_year_categories() {
        let spec = ChartSpec::years(ChartKind::Line, "IDF", 2000, 2024);
        assert_eq!(spec.categories.len(), 25);
        assert_eq!(spec.categories[24], "2024");
    }

    #[test]
    fn test_currency_format_trails_symbol() {
        assert_eq!(ValueFormat::Currency.apply(2.58), "2,58$");
    }

    #[test]
    fn test_inspectable_blocks_include_nested_columns() {
        let section = Section::new(SectionId::Expenses, "Gastos")
            .columns(vec![chart().into(), StatCard::new("Texto").text("x").into()])
            .block(
                StatCard::new("Spark").sparkline(SparklineSpec::new(
                    "IDF",
                    "#3b82f6",
                    crate::data::series_points(&[("2020", 1.0)]),
                )),
            );
        let inspectable = section.inspectable();
        assert_eq!(inspectable.len(), 2);
        assert_eq!(inspectable[0].cursor_len(), 2);
        assert_eq!(inspectable[1].cursor_len(), 1);
    }
}
