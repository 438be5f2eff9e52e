//! Rendering module for converting document models to output formats.

mod json;
mod stats;
mod text;

pub use json::{from_json, to_json, JsonFormat};
pub use stats::DocumentStats;
pub use text::{to_text, TextOptions};
