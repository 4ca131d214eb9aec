//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait implemented by the terminal
//! frontend. It provides a unified interface for event polling, rendering,
//! and cleanup so the event loop in `main.rs` never touches the terminal.

pub mod events;
pub mod tui;

use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait
///
/// Separates rendering concerns from the dashboard state in
/// [`AppCore`](crate::core::AppCore).
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events (keyboard, mouse, resize) converted to the
    /// frontend-agnostic `FrontendEvent` enum; empty when nothing arrived
    /// within the poll timeout.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state
    ///
    /// Called once per frame. Mutable access is required because rendering
    /// records the layout (content height, block positions, clickable
    /// regions) back into the core.
    fn render(&mut self, app: &mut dyn std::any::Any) -> Result<()>;

    /// Restore the terminal before the application exits
    fn cleanup(&mut self) -> Result<()>;

    /// Current terminal size in cells as `(width, height)`
    fn size(&self) -> (u16, u16);
}
