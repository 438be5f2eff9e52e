//! Pipeline options and configuration.

/// Options for normalizing a proposal.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Whether to assemble sections in parallel
    pub parallel: bool,

    /// Paragraph level thresholds
    pub thresholds: LevelThresholds,

    /// Metadata fallbacks
    pub defaults: DocumentDefaults,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set level thresholds.
    pub fn with_thresholds(mut self, thresholds: LevelThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set metadata defaults.
    pub fn with_defaults(mut self, defaults: DocumentDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            thresholds: LevelThresholds::default(),
            defaults: DocumentDefaults::default(),
        }
    }
}

/// Length thresholds (in characters) for paragraph level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelThresholds {
    /// Headings are shorter than this
    pub heading: usize,
    /// Level 2 below this
    pub short: usize,
    /// Level 3 below this, level 4 otherwise
    pub medium: usize,
    /// Shortest bare Hangul label treated as a heading
    pub label_min: usize,
    /// Longest bare Hangul label treated as a heading
    pub label_max: usize,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            heading: 50,
            short: 150,
            medium: 400,
            label_min: 2,
            label_max: 10,
        }
    }
}

/// Fallback metadata values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDefaults {
    /// Document title when the request has none
    pub title: String,
    /// Organization name when the request has none
    pub organization: String,
    /// Generator model name when the request has none
    pub model: String,
    /// Preset name when the request has none
    pub preset: String,
    /// chrono format string for the default date
    pub date_format: String,
}

impl DocumentDefaults {
    /// Set the default organization.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    /// Set the default title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Default for DocumentDefaults {
    fn default() -> Self {
        Self {
            title: "제안서".to_string(),
            organization: "Architect PRO".to_string(),
            model: "unknown".to_string(),
            preset: "제안서".to_string(),
            date_format: "%Y. %m. %d.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_options_builder() {
        let options = PipelineOptions::new()
            .sequential()
            .with_defaults(DocumentDefaults::default().with_organization("테스트기관"));

        assert!(!options.parallel);
        assert_eq!(options.defaults.organization, "테스트기관");
        assert_eq!(options.thresholds, LevelThresholds::default());
    }

    #[test]
    fn test_default_thresholds() {
        let t = LevelThresholds::default();
        assert_eq!((t.heading, t.short, t.medium), (50, 150, 400));
        assert_eq!((t.label_min, t.label_max), (2, 10));
    }
}
