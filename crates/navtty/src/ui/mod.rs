//! Rendering layer: the overlay components drawn by the terminal runtime.

pub mod components;
pub mod text;

use ratatui::Frame;
use ratatui::layout::Rect;

/// A trait for UI components that enforces a standard rendering interface.
pub trait Component: Sync {
    /// Renders a component in the provided frame and area.
    fn render(&self, f: &mut Frame, area: Rect);
}
