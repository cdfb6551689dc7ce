//! Plain-text rendering of the two report views.

pub mod text;

pub use text::{render_comparison, render_summary};
