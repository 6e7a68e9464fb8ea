//! Mock detector for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::detection::{DetectionError, Label, LabelDetector, TextDetection, TextDetector};
use crate::event::ObjectRef;

/// A recorded label detection call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLabelCall {
    pub image: ObjectRef,
    pub min_confidence: f32,
}

/// Mock implementation of both detection traits.
///
/// Provides controllable behavior for testing:
/// - Canned labels and text detections
/// - Track calls per operation
/// - Simulate failures per operation
///
/// # Example
///
/// ```rust,ignore
/// use snapsight_core::testing::{fixtures, MockDetector};
///
/// let detector = MockDetector::new();
/// detector.set_labels(vec![fixtures::label("Cat", 91.2)]).await;
///
/// let labels = detector.detect_labels(&image, 70.0).await?;
/// assert_eq!(detector.label_calls().await.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockDetector {
    labels: Arc<RwLock<Vec<Label>>>,
    texts: Arc<RwLock<Vec<TextDetection>>>,
    label_calls: Arc<RwLock<Vec<RecordedLabelCall>>>,
    text_calls: Arc<RwLock<Vec<ObjectRef>>>,
    /// If set, the next label detection fails with this error.
    next_label_error: Arc<RwLock<Option<DetectionError>>>,
    /// If set, the next text detection fails with this error.
    next_text_error: Arc<RwLock<Option<DetectionError>>>,
}

impl MockDetector {
    /// Create a new mock detector that detects nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the labels returned by every label detection.
    pub async fn set_labels(&self, labels: Vec<Label>) {
        *self.labels.write().await = labels;
    }

    /// Set the text detections returned by every text detection.
    pub async fn set_texts(&self, texts: Vec<TextDetection>) {
        *self.texts.write().await = texts;
    }

    /// Configure the next label detection to fail.
    pub async fn set_next_label_error(&self, error: DetectionError) {
        *self.next_label_error.write().await = Some(error);
    }

    /// Configure the next text detection to fail.
    pub async fn set_next_text_error(&self, error: DetectionError) {
        *self.next_text_error.write().await = Some(error);
    }

    /// Get all recorded label detection calls.
    pub async fn label_calls(&self) -> Vec<RecordedLabelCall> {
        self.label_calls.read().await.clone()
    }

    /// Get all recorded text detection calls.
    pub async fn text_calls(&self) -> Vec<ObjectRef> {
        self.text_calls.read().await.clone()
    }
}

#[async_trait]
impl LabelDetector for MockDetector {
    fn name(&self) -> &str {
        "mock"
    }

    async fn detect_labels(
        &self,
        image: &ObjectRef,
        min_confidence: f32,
    ) -> Result<Vec<Label>, DetectionError> {
        self.label_calls.write().await.push(RecordedLabelCall {
            image: image.clone(),
            min_confidence,
        });

        if let Some(err) = self.next_label_error.write().await.take() {
            return Err(err);
        }

        Ok(self.labels.read().await.clone())
    }
}

#[async_trait]
impl TextDetector for MockDetector {
    fn name(&self) -> &str {
        "mock"
    }

    async fn detect_text(&self, image: &ObjectRef) -> Result<Vec<TextDetection>, DetectionError> {
        self.text_calls.write().await.push(image.clone());

        if let Some(err) = self.next_text_error.write().await.take() {
            return Err(err);
        }

        Ok(self.texts.read().await.clone())
    }
}
