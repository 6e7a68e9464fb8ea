//! Analysis orchestrator implementation.
//!
//! Runs the analysis stages one after another for a single uploaded image:
//! label detection, text extraction, matching, sentiment, record write and
//! notification. The first failing stage aborts the rest; nothing already
//! written is rolled back.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::detection::{LabelDetector, TextDetector};
use crate::event::{EventError, ObjectRef, S3Event};
use crate::notifier::{Notification, Notifier};
use crate::record::{normalize, Payload, ResultRecord};
use crate::sentiment::{Sentiment, SentimentAnalyzer};
use crate::store::RecordStore;

use super::config::AnalysisConfig;
use super::types::{AnalysisError, AnalysisOutcome, HandlerResponse, MatchStatus};

/// The analysis orchestrator.
///
/// Service clients are injected at construction and shared across
/// invocations; no other state outlives a call.
pub struct AnalysisOrchestrator {
    config: AnalysisConfig,
    label_detector: Arc<dyn LabelDetector>,
    text_detector: Arc<dyn TextDetector>,
    sentiment_analyzer: Arc<dyn SentimentAnalyzer>,
    record_store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
}

impl AnalysisOrchestrator {
    /// Create a new orchestrator.
    pub fn new(
        config: AnalysisConfig,
        label_detector: Arc<dyn LabelDetector>,
        text_detector: Arc<dyn TextDetector>,
        sentiment_analyzer: Arc<dyn SentimentAnalyzer>,
        record_store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            label_detector,
            text_detector,
            sentiment_analyzer,
            record_store,
            notifier,
        }
    }

    /// Handle one trigger event.
    ///
    /// Analysis failures of any stage are logged and folded into a 500
    /// response. An event that names no object is an error of the invocation
    /// itself and is returned as such.
    pub async fn handle(&self, event: &S3Event) -> Result<HandlerResponse, EventError> {
        match serde_json::to_string(event) {
            Ok(json) => info!("Event: {}", json),
            Err(e) => debug!("Event could not be rendered for logging: {}", e),
        }

        let image = event.object_ref()?;

        match self.analyze(&image).await {
            Ok(outcome) => {
                info!(
                    object_key = %image.key,
                    status = %outcome.match_status,
                    "Analysis of {} completed",
                    image
                );
                Ok(HandlerResponse::success())
            }
            Err(e) => {
                error!(
                    object_key = %image.key,
                    stage = %e.stage(),
                    "Error processing image {}: {}",
                    image.key,
                    e
                );
                Ok(HandlerResponse::failure(&e))
            }
        }
    }

    /// Run every analysis stage for one image.
    pub async fn analyze(&self, image: &ObjectRef) -> Result<AnalysisOutcome, AnalysisError> {
        let labels = self
            .label_detector
            .detect_labels(image, f32::from(self.config.min_confidence))
            .await
            .map_err(AnalysisError::Detection)?;

        debug!(
            "Detected {} labels via {}",
            labels.len(),
            self.label_detector.name()
        );

        let texts = self
            .text_detector
            .detect_text(image)
            .await
            .map_err(AnalysisError::TextExtraction)?;
        debug!(
            "Detected {} text fragments via {}",
            texts.len(),
            self.text_detector.name()
        );

        let detected_labels: Vec<String> = labels.iter().map(|l| l.name.to_lowercase()).collect();
        let detected_texts: Vec<String> = texts.iter().map(|t| t.detected_text.clone()).collect();

        info!("Detected labels: {:?}", detected_labels);
        info!("Detected texts: {:?}", detected_texts);

        let target_label =
            self.config
                .target_label
                .as_deref()
                .ok_or(AnalysisError::NotConfigured {
                    setting: "analysis.target_label",
                })?;
        let match_status = MatchStatus::evaluate(target_label, &detected_labels);

        let sentiment = self.detect_sentiment(&detected_texts.join(" ")).await?;
        info!("Detected sentiment: {:?}", sentiment);

        let record = ResultRecord {
            object_key: image.key.clone(),
            status: match_status.to_string(),
            detected_labels,
            detected_texts,
            sentiment,
            full_labels: normalize(Payload::capture(&labels)?)?,
            full_texts: normalize(Payload::capture(&texts)?)?,
            analyzed_at: Utc::now(),
        };

        self.record_store.put(&record).await?;
        debug!(
            "Stored record for {} via {}",
            record.object_key,
            self.record_store.name()
        );

        let notification = Notification::for_record(&record);
        let receipt = self.notifier.publish(&notification).await?;
        debug!(
            "Published notification for {} via {} (message_id={:?})",
            record.object_key,
            self.notifier.name(),
            receipt.message_id
        );

        Ok(AnalysisOutcome {
            match_status,
            record,
            notification,
            receipt,
        })
    }

    /// Sentiment of the joined text, or `None` without calling the service
    /// when there is no text.
    async fn detect_sentiment(&self, text: &str) -> Result<Option<Sentiment>, AnalysisError> {
        if text.is_empty() {
            return Ok(None);
        }

        let sentiment = self
            .sentiment_analyzer
            .detect_sentiment(text, &self.config.language_code)
            .await?;
        debug!(
            "Sentiment {} via {} ({})",
            sentiment,
            self.sentiment_analyzer.name(),
            self.config.language_code
        );

        Ok(Some(sentiment))
    }
}
