//! Orchestrator configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the analysis orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Label the image is checked for, compared case-insensitively.
    /// Only required once detections are in.
    #[serde(default)]
    pub target_label: Option<String>,

    /// Minimum label confidence in percent (0-100).
    /// Labels under this threshold are dropped by the detection service.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: u8,

    /// Language of the text found in images, for sentiment detection.
    #[serde(default = "default_language_code")]
    pub language_code: String,
}

fn default_min_confidence() -> u8 {
    70
}

fn default_language_code() -> String {
    "en".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target_label: None,
            min_confidence: default_min_confidence(),
            language_code: default_language_code(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a default config looking for `target_label`.
    pub fn with_target(target_label: impl Into<String>) -> Self {
        Self {
            target_label: Some(target_label.into()),
            ..Default::default()
        }
    }

    /// Sets the minimum confidence.
    pub fn with_min_confidence(mut self, min_confidence: u8) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Sets the sentiment language.
    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }
}
