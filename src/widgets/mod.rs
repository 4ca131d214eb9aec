//! Widget state structs (rendering-agnostic)
//!
//! This module contains state-only structures for the report widgets.
//! They derive what to draw (highlighted rows, merged cell styles, plot
//! coordinates, tooltip text) from the data layer, but contain no
//! rendering logic. The TUI frontend draws them with ratatui.

pub mod chart;
pub mod sparkline;
pub mod table;

pub use chart::ChartModel;
pub use sparkline::{SparklineState, LEVELS};
pub use table::{PlacedCell, TableModel};
