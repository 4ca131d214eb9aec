use crate::data::{CellStyle, CellValue, TableSpec, Tone};

/// Column that always receives emphasis styling.
pub const EMPHASIS_COLUMN: usize = 1;

/// A cell ready to draw: its content plus the merged style.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell<'a> {
    pub value: &'a CellValue,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow<'a> {
    pub cells: Vec<PlacedCell<'a>>,
    pub highlighted: bool,
}

/// Table state (rendering-agnostic)
///
/// Echoes the table's rows in order, computing the highlight flag and the
/// per-cell style. Cells past the header count are dropped and missing
/// cells are not padded, so a malformed row simply renders short.
pub struct TableModel<'a> {
    spec: &'a TableSpec,
}

impl<'a> TableModel<'a> {
    pub fn new(spec: &'a TableSpec) -> Self {
        Self { spec }
    }

    pub fn headers(&self) -> &'a [String] {
        &self.spec.headers
    }

    pub fn rows(&self) -> Vec<PlacedRow<'a>> {
        let columns = self.spec.headers.len();
        self.spec
            .rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| PlacedRow {
                highlighted: self.spec.is_highlighted(row_index),
                cells: row
                    .iter()
                    .take(columns)
                    .enumerate()
                    .map(|(col_index, value)| PlacedCell {
                        value,
                        style: self.cell_style(value, col_index, row_index),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Positional style merged with the table's callback.
    pub fn cell_style(&self, value: &CellValue, col: usize, row: usize) -> CellStyle {
        let positional = if col == EMPHASIS_COLUMN {
            CellStyle::bold().with_fg(Tone::Strong)
        } else {
            CellStyle::default()
        };
        match self.spec.cell_style {
            Some(callback) => positional.merge(callback(value, col, row)),
            None => positional,
        }
    }

    /// Display width of each column (header or widest cell, minimum 3).
    pub fn column_widths(&self) -> Vec<u16> {
        self.spec
            .headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let widest_cell = self
                    .spec
                    .rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.display().chars().count())
                    .max()
                    .unwrap_or(0);
                let width = header.chars().count().max(widest_cell).max(3);
                u16::try_from(width).unwrap_or(u16::MAX)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> TableSpec {
        TableSpec::new("Montos", &["Año", "Monto"])
            .row(["2024", "1.000"])
            .row(["2025", "2.000"])
            .highlight(0, "2025")
    }

    #[test]
    fn test_rows_echo_input_with_highlight() {
        let spec = scenario();
        let rows = TableModel::new(&spec).rows();
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].highlighted);
        assert!(rows[1].highlighted);
        assert_eq!(rows[1].cells[1].value, &CellValue::text("2.000"));
    }

    #[test]
    fn test_full_rows_expose_header_count_cells() {
        let spec = scenario();
        for row in TableModel::new(&spec).rows() {
            assert_eq!(row.cells.len(), spec.headers.len());
        }
    }

    #[test]
    fn test_second_column_is_emphasised() {
        let spec = scenario();
        let rows = TableModel::new(&spec).rows();
        assert_eq!(rows[0].cells[0].style, CellStyle::default());
        assert!(rows[0].cells[1].style.bold);
        assert_eq!(rows[0].cells[1].style.fg, Some(Tone::Strong));
    }

    #[test]
    fn test_callback_style_is_merged() {
        fn podium(cell: &CellValue, col: usize, _row: usize) -> CellStyle {
            if col == 0 && cell == &CellValue::text("1") {
                CellStyle::bold().with_bg(Tone::Gold)
            } else {
                CellStyle::default()
            }
        }
        let spec = TableSpec::new("Ranking", &["Pos", "Ciudad"])
            .row(["1", "Bogotá"])
            .row(["2", "Cali"])
            .cell_style(podium);
        let rows = TableModel::new(&spec).rows();
        assert_eq!(rows[0].cells[0].style.bg, Some(Tone::Gold));
        assert_eq!(rows[1].cells[0].style.bg, None);
        assert!(rows[1].cells[1].style.bold);
    }

    #[test]
    fn test_mismatched_rows_render_short_or_truncated() {
        let spec = TableSpec::new("Broken", &["A", "B"])
            .row(["1"])
            .row(["1", "2", "3"]);
        let rows = TableModel::new(&spec).rows();
        assert_eq!(rows[0].cells.len(), 1);
        assert_eq!(rows[1].cells.len(), 2);
    }

    #[test]
    fn test_column_widths() {
        let spec = scenario();
        assert_eq!(TableModel::new(&spec).column_widths(), vec![4, 5]);
    }
}
