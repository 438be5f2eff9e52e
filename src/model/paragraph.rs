//! Paragraph items and their structural level.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ColoredSegment;

/// Structural hierarchy level of a paragraph.
///
/// Serialized as the integer the renderer expects (1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Level {
    /// Heading-like line (rendered with □)
    H1,
    /// Sub-heading or short paragraph (○)
    H2,
    /// Normal paragraph (―)
    H3,
    /// Long, detailed paragraph (※)
    H4,
}

impl Level {
    /// All levels in order.
    pub const ALL: [Level; 4] = [Self::H1, Self::H2, Self::H3, Self::H4];

    /// Numeric value (1-4).
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
        }
    }

    /// Bullet glyph used by the HWPX styles for this level.
    pub fn bullet(&self) -> char {
        match self {
            Self::H1 => '□',
            Self::H2 => '○',
            Self::H3 => '―',
            Self::H4 => '※',
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::H1),
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            4 => Ok(Self::H4),
            other => Err(format!("paragraph level must be 1-4, got {}", other)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Item color as seen by the renderer. Inline markers carry the real colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemColor {
    /// Renderer default style
    #[default]
    Default,
}

/// Origin of a paragraph item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    /// Produced by the text generator
    #[default]
    Generated,
}

/// One paragraph of a section block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphItem {
    /// Structural level
    pub level: Level,

    /// Cleaned text, inline provenance markers preserved verbatim
    pub text: String,

    /// Always `default`
    #[serde(default)]
    pub color: ItemColor,

    /// Always `generated`
    #[serde(default)]
    pub source: ItemSource,
}

impl ParagraphItem {
    /// Create a generated item.
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            color: ItemColor::Default,
            source: ItemSource::Generated,
        }
    }

    /// Split the item text into provenance segments.
    pub fn segments(&self) -> Vec<ColoredSegment> {
        crate::parser::extract_segments(&self.text)
    }

    /// Text with markers unwrapped.
    pub fn plain_text(&self) -> String {
        crate::parser::visible_text(&self.text)
    }
}
