//! Provenance-colored text segments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a piece of generated text came from.
///
/// Only the attributed colors have an inline marker form
/// (`{{red:...}}`, `{{green:...}}`, `{{blue:...}}`); black is plain prose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvenanceColor {
    /// Unattributed prose
    #[default]
    Black,
    /// Derived from source/raw data
    Red,
    /// Derived from stylistic reference material
    Green,
    /// Auxiliary emphasis
    Blue,
}

impl ProvenanceColor {
    /// Colors that carry an inline marker.
    pub const MARKED: [ProvenanceColor; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Lowercase name used in markers and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }

    /// Parse a marker color name. Black has no marker, so it is not accepted.
    pub fn from_marker(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "blue" => Some(Self::Blue),
            _ => None,
        }
    }

    /// Whether this color is written as an inline marker.
    pub fn is_marked(&self) -> bool {
        !matches!(self, Self::Black)
    }
}

impl fmt::Display for ProvenanceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A run of text with a single provenance color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoredSegment {
    /// Visible text (no marker syntax)
    pub text: String,

    /// Provenance of the text
    pub color: ProvenanceColor,
}

impl ColoredSegment {
    /// Create a segment.
    pub fn new(text: impl Into<String>, color: ProvenanceColor) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }

    /// Create an unattributed segment.
    pub fn black(text: impl Into<String>) -> Self {
        Self::new(text, ProvenanceColor::Black)
    }

    /// Check if the segment has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Render back to inline marker syntax.
    ///
    /// Black segments are returned as-is.
    pub fn to_markup(&self) -> String {
        if self.color.is_marked() {
            format!("{{{{{}:{}}}}}", self.color, self.text)
        } else {
            self.text.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_names() {
        assert_eq!(ProvenanceColor::from_marker("red"), Some(ProvenanceColor::Red));
        assert_eq!(ProvenanceColor::from_marker("GREEN"), Some(ProvenanceColor::Green));
        assert_eq!(ProvenanceColor::from_marker("black"), None);
        assert_eq!(ProvenanceColor::from_marker("yellow"), None);
    }

    #[test]
    fn test_to_markup() {
        let seg = ColoredSegment::new("1,200명", ProvenanceColor::Red);
        assert_eq!(seg.to_markup(), "{{red:1,200명}}");

        let plain = ColoredSegment::black("본 사업은");
        assert_eq!(plain.to_markup(), "본 사업은");
    }

    #[test]
    fn test_color_serializes_lowercase() {
        let json = serde_json::to_string(&ProvenanceColor::Blue).unwrap();
        assert_eq!(json, "\"blue\"");
    }
}
