use crate::data::SeriesPoint;

/// Block glyphs from lowest to highest (eighths of a cell).
pub const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Sparkline state (rendering-agnostic)
///
/// Scales a short series into cell heights and tracks which point the
/// tooltip is showing. Values are never clamped: negative series are
/// scaled between their own minimum and maximum.
pub struct SparklineState<'a> {
    /// Context shown in the tooltip next to the value
    pub title: &'a str,

    /// Points in display order
    pub points: &'a [SeriesPoint],

    /// Index of the point under the tooltip
    pub cursor: usize,
}

/// Tooltip content: the raw label and `title: value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub label: String,
    pub text: String,
}

impl<'a> SparklineState<'a> {
    /// Create a sparkline state with the tooltip on the latest point
    pub fn new(title: &'a str, points: &'a [SeriesPoint]) -> Self {
        Self {
            title,
            points,
            cursor: points.len().saturating_sub(1),
        }
    }

    /// Place the tooltip on a point (clamped to the series)
    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor.min(self.points.len().saturating_sub(1));
        self
    }

    /// Tooltip for the point under the cursor
    pub fn tooltip(&self) -> Option<Tooltip> {
        self.points.get(self.cursor).map(|point| Tooltip {
            label: point.name.clone(),
            text: format!("{}: {}", self.title, point.value),
        })
    }

    /// Column heights in eighths of a cell for a sparkline `rows` tall.
    /// The minimum maps to one eighth so every point stays visible.
    pub fn heights(&self, rows: u16) -> Vec<u16> {
        let total = rows.max(1) * 8;
        let (min, max) = bounds(self.points);
        let span = max - min;

        self.points
            .iter()
            .map(|p| {
                if span <= f64::EPSILON {
                    total / 2
                } else {
                    let ratio = (p.value - min) / span;
                    1 + (ratio * f64::from(total - 1)).round() as u16
                }
            })
            .collect()
    }

    /// One glyph per point, for single-line rendering and text export.
    pub fn glyphs(points: &[SeriesPoint]) -> String {
        SparklineState::new("", points)
            .heights(1)
            .into_iter()
            .map(|h| LEVELS[usize::from(h.clamp(1, 8)) - 1])
            .collect()
    }
}

fn bounds(points: &[SeriesPoint]) -> (f64, f64) {
    let finite = points.iter().map(|p| p.value).filter(|v| v.is_finite());
    let min = finite.clone().fold(f64::INFINITY, f64::min);
    let max = finite.fold(f64::NEG_INFINITY, f64::max);
    if min.is_finite() && max.is_finite() {
        (min, max)
    } else {
        (0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::series_points;

    #[test]
    fn test_tooltip_shows_negative_value_unmodified() {
        let points = series_points(&[("2020", -150.0), ("2021", -180.0), ("2022", -120.0)]);
        let state = SparklineState::new("Resultado Neto", &points);
        assert_eq!(state.cursor, 2);
        let tooltip = state.tooltip().unwrap();
        assert_eq!(tooltip.label, "2022");
        assert_eq!(tooltip.text, "Resultado Neto: -120");
    }

    #[test]
    fn test_tooltip_keeps_decimals() {
        let points = series_points(&[("2020", 4.1), ("2024", 4.8)]);
        let state = SparklineState::new("Ingresos", &points).with_cursor(0);
        assert_eq!(state.tooltip().unwrap().text, "Ingresos: 4.1");
    }

    #[test]
    fn test_cursor_is_clamped() {
        let points = series_points(&[("a", 1.0), ("b", 2.0)]);
        assert_eq!(SparklineState::new("t", &points).with_cursor(9).cursor, 1);
    }

    #[test]
    fn test_heights_scale_between_min_and_max() {
        let points = series_points(&[("2020", -150.0), ("2021", -180.0), ("2022", -120.0)]);
        let heights = SparklineState::new("t", &points).heights(2);
        assert_eq!(heights[1], 1);
        assert_eq!(heights[2], 16);
        assert!(heights[0] > heights[1] && heights[0] < heights[2]);
    }

    #[test]
    fn test_flat_series_sits_mid_height() {
        let points = series_points(&[("a", 3.0), ("b", 3.0)]);
        assert_eq!(SparklineState::new("t", &points).heights(1), vec![4, 4]);
    }

    #[test]
    fn test_glyphs() {
        let points = series_points(&[("a", 0.0), ("b", 10.0)]);
        assert_eq!(SparklineState::glyphs(&points), "▁█");
        assert_eq!(SparklineState::glyphs(&[]), "");
    }

    #[test]
    fn test_empty_series_has_no_tooltip() {
        assert!(SparklineState::new("t", &[]).tooltip().is_none());
    }
}
