//! Object and text detection on stored images.
//!
//! Two seams are exposed, one per analysis: [`LabelDetector`] for objects and
//! scenes, [`TextDetector`] for text. [`RekognitionDetector`] implements both.

mod rekognition;
mod types;

pub use rekognition::RekognitionDetector;
pub use types::{
    BoundingBox, DominantColor, Geometry, Label, LabelInstance, NamedRef, Point, TextDetection,
    TextType,
};

use async_trait::async_trait;
use thiserror::Error;

use crate::event::ObjectRef;

/// Errors that can occur during detection.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The service call failed.
    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },

    /// The service answered with something we could not interpret.
    #[error("Malformed {operation} response: {reason}")]
    MalformedResponse {
        operation: &'static str,
        reason: String,
    },
}

impl DetectionError {
    pub fn service(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Service {
            operation,
            message: message.into(),
        }
    }

    pub fn malformed(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation,
            reason: reason.into(),
        }
    }
}

/// A service that labels objects and scenes in an image.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Returns the name of this detector implementation.
    fn name(&self) -> &str;

    /// Detects labels with at least `min_confidence` percent confidence.
    ///
    /// Filtering by confidence is the service's job; results are returned
    /// in service order.
    async fn detect_labels(
        &self,
        image: &ObjectRef,
        min_confidence: f32,
    ) -> Result<Vec<Label>, DetectionError>;
}

/// A service that extracts text from an image.
#[async_trait]
pub trait TextDetector: Send + Sync {
    /// Returns the name of this detector implementation.
    fn name(&self) -> &str;

    /// Detects every text fragment, regardless of confidence.
    async fn detect_text(&self, image: &ObjectRef) -> Result<Vec<TextDetection>, DetectionError>;
}
