//! Types for the analysis orchestrator.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::DetectionError;
use crate::notifier::{Notification, NotifierError, PublishReceipt};
use crate::record::{RecordError, ResultRecord};
use crate::sentiment::SentimentError;
use crate::store::StoreError;

/// Body returned when an analysis completes.
pub const SUCCESS_MESSAGE: &str = "Image analysis completed successfully!";

/// Steps of an analysis, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    LabelDetection,
    TextExtraction,
    Matching,
    Sentiment,
    Assembly,
    Write,
    Publish,
}

impl AnalysisStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LabelDetection => "label_detection",
            Self::TextExtraction => "text_extraction",
            Self::Matching => "matching",
            Self::Sentiment => "sentiment",
            Self::Assembly => "assembly",
            Self::Write => "write",
            Self::Publish => "publish",
        }
    }
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during an analysis, one kind per stage.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A setting needed by the orchestrator itself is absent.
    #[error("{setting} is not configured")]
    NotConfigured { setting: &'static str },

    #[error("label detection failed: {0}")]
    Detection(#[source] DetectionError),

    #[error("text extraction failed: {0}")]
    TextExtraction(#[source] DetectionError),

    #[error("sentiment detection failed: {0}")]
    Sentiment(#[from] SentimentError),

    #[error("record assembly failed: {0}")]
    Record(#[from] RecordError),

    #[error("record write failed: {0}")]
    Write(#[from] StoreError),

    #[error("notification publish failed: {0}")]
    Publish(#[from] NotifierError),
}

impl AnalysisError {
    /// The stage that failed.
    pub fn stage(&self) -> AnalysisStage {
        match self {
            Self::NotConfigured { .. } => AnalysisStage::Matching,
            Self::Detection(_) => AnalysisStage::LabelDetection,
            Self::TextExtraction(_) => AnalysisStage::TextExtraction,
            Self::Sentiment(_) => AnalysisStage::Sentiment,
            Self::Record(_) => AnalysisStage::Assembly,
            Self::Write(_) => AnalysisStage::Write,
            Self::Publish(_) => AnalysisStage::Publish,
        }
    }
}

/// Whether the target label was among the detections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchStatus {
    Found { label: String },
    NotFound { label: String },
}

impl MatchStatus {
    /// Exact, case-insensitive comparison of `target` against detected labels.
    pub fn evaluate<S: AsRef<str>>(target: &str, detected_labels: &[S]) -> Self {
        let needle = target.to_lowercase();
        let label = target.to_string();

        if detected_labels
            .iter()
            .any(|detected| detected.as_ref().to_lowercase() == needle)
        {
            Self::Found { label }
        } else {
            Self::NotFound { label }
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { label } => write!(f, "Success! {} found", label),
            Self::NotFound { label } => write!(f, "Failed! {} not found", label),
        }
    }
}

/// Everything a completed analysis produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub match_status: MatchStatus,
    pub record: ResultRecord,
    pub notification: Notification,
    pub receipt: PublishReceipt,
}

/// Invocation response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    /// JSON-encoded message string.
    pub body: String,
}

impl HandlerResponse {
    pub fn success() -> Self {
        Self::with_message(200, SUCCESS_MESSAGE)
    }

    pub fn failure(error: &AnalysisError) -> Self {
        Self::with_message(500, &format!("Error in image analysis: {}", error))
    }

    fn with_message(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: serde_json::Value::String(message.to_string()).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
