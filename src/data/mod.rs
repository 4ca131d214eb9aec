//! Data layer - report content and navigation model
//!
//! Everything here is plain data: sections, cards, chart and table specs.
//! Values are literals compiled into the binary; the frontend reads and
//! renders them, nothing mutates them after construction.

pub mod nav;
pub mod section;
pub mod table;

use serde::Serialize;

pub use nav::{navigation_entries, SectionId};
pub use section::{
    Block, ChartKind, ChartSpec, EmbeddedDocument, Section, SparklineSpec, StatCard, StatLine, ValueFormat,
};
pub use table::{CellStyle, CellValue, TableIssue, TableSpec, TrendDirection};

/// One labeled measurement of a trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub name: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Build a series from `(label, value)` pairs.
pub fn series_points(pairs: &[(&str, f64)]) -> Vec<SeriesPoint> {
    pairs
        .iter()
        .map(|(name, value)| SeriesPoint::new(*name, *value))
        .collect()
}

/// Semantic color of a piece of content. The theme decides the actual color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Default,
    Strong,
    Muted,
    Positive,
    Negative,
    Warning,
    Info,
    Accent,
    Gold,
    Silver,
    Bronze,
}
