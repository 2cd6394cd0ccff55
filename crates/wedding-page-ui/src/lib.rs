//! Page surface model and Leptos SSR rendering for the wedding home page.
//!
//! [`PageDocument`] stands in for the live page: it tracks the handful of
//! elements the access gate touches, and [`render_page_document`] turns its
//! current state into HTML.

mod document;
mod render;

pub use document::*;
pub use render::*;

use wedding_navigation::NavTab;

/// Trait contract for the page mutations performed by the access gate.
pub trait PageSurface {
    /// Replaces any previously rendered tiles with one tile per tab, in order.
    fn render_tabs(&mut self, tabs: &[NavTab]);

    /// Shows `message` in the error element and hides the loading indicator.
    fn show_error(&mut self, message: &str);

    /// Fills the user name and reveals the welcome element.
    fn show_welcome(&mut self, display_name: &str);

    fn hide_loading(&mut self);
}
