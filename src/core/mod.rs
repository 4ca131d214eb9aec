//! Core application logic layer
//!
//! Section selection, sidebar state, view-local scroll/inspect state, input
//! routing and presentation-mode plumbing.
//! NO imports from frontend/ or rendering code.
//! Core updates its state, frontends read and render.

pub mod app_core;
pub mod input_router;
pub mod view_state;

pub use app_core::{AppCore, HitMap};
pub use view_state::{BlockSpan, ViewState};
