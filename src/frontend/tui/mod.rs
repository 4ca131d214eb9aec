//! TUI Frontend (ratatui-based)
//!
//! This module implements the Frontend trait using ratatui for terminal rendering.
//! It wraps crossterm for event handling and terminal management. Every
//! renderer draws straight into a ratatui `Buffer`, so the same code serves
//! the live terminal and headless export.

pub mod app;
pub mod cards;
pub mod charts;
pub mod data_table;
pub mod export;
pub mod section_view;
pub mod shell;
pub mod sidebar;
pub mod sparkline;
pub mod text;

pub use app::TuiFrontend;
pub use export::{export_section, ExportFormat};
pub use section_view::ViewSettings;
