//! Reusable Dioxus components and appearance state for the LMS client.

pub mod components;
pub mod theme;

pub use components::*;
pub use theme::*;
