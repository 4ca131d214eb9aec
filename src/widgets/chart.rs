use crate::data::{ChartKind, ChartSpec};

/// Chart state (rendering-agnostic)
///
/// Derives plot coordinates from a [`ChartSpec`]: stacked kinds are
/// accumulated bottom-up, bounds include reference lines so limits stay
/// visible, and the inspect cursor selects one category.
pub struct ChartModel<'a> {
    pub spec: &'a ChartSpec,
    pub cursor: Option<usize>,
}

impl<'a> ChartModel<'a> {
    pub fn new(spec: &'a ChartSpec) -> Self {
        Self { spec, cursor: None }
    }

    pub fn with_cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor.map(|c| c.min(self.spec.categories.len().saturating_sub(1)));
        self
    }

    /// `(x, y)` points per series. Stacked kinds return running totals so
    /// each line traces the top of its band.
    pub fn plot_series(&self) -> Vec<Vec<(f64, f64)>> {
        let stacked = matches!(self.spec.kind, ChartKind::StackedArea | ChartKind::StackedBar);
        let mut running = vec![0.0; self.spec.categories.len()];

        self.spec
            .series
            .iter()
            .map(|series| {
                series
                    .values
                    .iter()
                    .take(self.spec.categories.len())
                    .enumerate()
                    .map(|(i, value)| {
                        let y = if stacked {
                            running[i] += value;
                            running[i]
                        } else {
                            *value
                        };
                        (i as f64, y)
                    })
                    .collect()
            })
            .collect()
    }

    /// Y axis range: explicit bounds when set, else the data range padded
    /// by 5% and widened to include zero for stacked charts and every
    /// reference line.
    pub fn y_bounds(&self) -> (f64, f64) {
        if let Some(bounds) = self.spec.y_bounds {
            return bounds;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (_, y) in self.plot_series().iter().flatten() {
            min = min.min(*y);
            max = max.max(*y);
        }
        for line in &self.spec.reference_lines {
            min = min.min(line.value);
            max = max.max(line.value);
        }
        if matches!(self.spec.kind, ChartKind::StackedArea | ChartKind::StackedBar) {
            min = min.min(0.0);
        }
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        if (max - min).abs() <= f64::EPSILON {
            return (min - 1.0, max + 1.0);
        }
        let pad = (max - min) * 0.05;
        let low = if min >= 0.0 && min - pad < 0.0 { 0.0 } else { min - pad };
        (low, max + pad)
    }

    pub fn x_bounds(&self) -> (f64, f64) {
        (0.0, self.spec.categories.len().saturating_sub(1).max(1) as f64)
    }

    /// Share of each slice of the first series, in percent.
    pub fn shares(&self) -> Vec<(String, f64)> {
        let Some(series) = self.spec.series.first() else {
            return Vec::new();
        };
        let total: f64 = series.values.iter().sum();
        self.spec
            .categories
            .iter()
            .zip(&series.values)
            .map(|(name, value)| {
                let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
                (name.clone(), share)
            })
            .collect()
    }

    /// Tooltip lines for the cursor category.
    pub fn tooltip_lines(&self) -> Option<Vec<String>> {
        let (label, values) = self.spec.tooltip(self.cursor?)?;
        let mut lines = vec![label];
        lines.extend(values.into_iter().map(|(name, value)| format!("{}: {}", name, value)));
        Some(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ValueFormat;

    #[test]
    fn test_stacked_series_accumulate() {
        let spec = ChartSpec::new(ChartKind::StackedArea, "Gastos", &["2019", "2020"])
            .series("A", "#000000", &[1.0, 2.0])
            .series("B", "#000000", &[10.0, 20.0]);
        let plot = ChartModel::new(&spec).plot_series();
        assert_eq!(plot[0], vec![(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(plot[1], vec![(0.0, 11.0), (1.0, 22.0)]);
    }

    #[test]
    fn test_line_series_are_not_stacked() {
        let spec = ChartSpec::new(ChartKind::Line, "Deuda", &["2019", "2020"])
            .series("A", "#000000", &[1.0, 2.0])
            .series("B", "#000000", &[10.0, 20.0]);
        let plot = ChartModel::new(&spec).plot_series();
        assert_eq!(plot[1], vec![(0.0, 10.0), (1.0, 20.0)]);
    }

    #[test]
    fn test_bounds_include_reference_lines() {
        let spec = ChartSpec::new(ChartKind::Line, "Superávit", &["2026", "2027"])
            .series("S", "#000000", &[-240.0, -159.0])
            .reference_line(100.0, "Límite");
        let (low, high) = ChartModel::new(&spec).y_bounds();
        assert!(low < -240.0);
        assert!(high > 100.0);
    }

    #[test]
    fn test_explicit_bounds_win() {
        let spec = ChartSpec::new(ChartKind::Line, "Ley 617", &["2026"])
            .series("P", "#000000", &[41.1])
            .y_bounds(35.0, 55.0);
        assert_eq!(ChartModel::new(&spec).y_bounds(), (35.0, 55.0));
    }

    #[test]
    fn test_shares_of_pie() {
        let spec = ChartSpec::new(ChartKind::Pie, "Deuda", &["Banca", "Bonos"])
            .series("Porcentaje", "#000000", &[75.0, 25.0]);
        let shares = ChartModel::new(&spec).shares();
        assert_eq!(shares, vec![("Banca".to_string(), 75.0), ("Bonos".to_string(), 25.0)]);
    }

    #[test]
    fn test_tooltip_lines_follow_cursor() {
        let spec = ChartSpec::new(ChartKind::Line, "Ley 617", &["2026", "2027"])
            .series("Proyección", "#000000", &[41.1, 40.9])
            .format(ValueFormat::Percent { decimals: 2 });
        let model = ChartModel::new(&spec).with_cursor(Some(5));
        assert_eq!(model.cursor, Some(1));
        assert_eq!(
            model.tooltip_lines().unwrap(),
            vec!["2027".to_string(), "Proyección: 40,90%".to_string()]
        );
        assert!(ChartModel::new(&spec).tooltip_lines().is_none());
    }
}
