//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of all external service traits,
//! allowing the orchestrator to be exercised without AWS.
//!
//! # Example
//!
//! ```rust,ignore
//! use snapsight_core::testing::{fixtures, MockDetector, MockNotifier, MockRecordStore};
//!
//! let detector = MockDetector::new();
//! detector.set_labels(vec![fixtures::label("Cat", 91.2)]).await;
//! detector.set_texts(vec![fixtures::text("great product")]).await;
//!
//! // Wire into AnalysisOrchestrator::new(...) and assert on the recordings.
//! ```

mod mock_detector;
mod mock_notifier;
mod mock_sentiment;
mod mock_store;

pub use mock_detector::{MockDetector, RecordedLabelCall};
pub use mock_notifier::MockNotifier;
pub use mock_sentiment::{MockSentimentAnalyzer, RecordedSentimentCall};
pub use mock_store::MockRecordStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::detection::{
        BoundingBox, Geometry, Label, LabelInstance, NamedRef, Point, TextDetection, TextType,
    };
    use crate::event::S3Event;

    /// Create a label with no instances or hierarchy.
    pub fn label(name: &str, confidence: f64) -> Label {
        Label::new(name, confidence)
    }

    /// Create a label the way the service reports a boxed object.
    pub fn boxed_label(name: &str, confidence: f64, parents: &[&str]) -> Label {
        let mut label = Label::new(name, confidence);
        label.instances.push(LabelInstance {
            bounding_box: Some(BoundingBox::new(0.4521, 0.3317, 0.1274, 0.2005)),
            confidence: Some(confidence),
            dominant_colors: Vec::new(),
        });
        label.parents = parents
            .iter()
            .map(|p| NamedRef {
                name: p.to_string(),
            })
            .collect();
        label
    }

    /// Create a line text detection with a high confidence.
    pub fn text(detected_text: &str) -> TextDetection {
        TextDetection::line(detected_text, 99.2)
    }

    /// Create a word detection with geometry, belonging to line `parent_id`.
    pub fn word(detected_text: &str, id: i32, parent_id: i32) -> TextDetection {
        TextDetection {
            detected_text: detected_text.to_string(),
            text_type: Some(TextType::Word),
            id: Some(id),
            parent_id: Some(parent_id),
            confidence: Some(97.65),
            geometry: Some(Geometry {
                bounding_box: Some(BoundingBox::new(0.12, 0.05, 0.3, 0.7)),
                polygon: vec![
                    Point::new(0.3, 0.7),
                    Point::new(0.42, 0.7),
                    Point::new(0.42, 0.75),
                    Point::new(0.3, 0.75),
                ],
            }),
        }
    }

    /// Create a single-record upload event.
    pub fn upload_event(bucket: &str, key: &str) -> S3Event {
        S3Event::single(bucket, key)
    }
}
