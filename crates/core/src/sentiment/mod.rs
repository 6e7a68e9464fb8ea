//! Sentiment analysis of text found in images.

mod comprehend;
mod types;

pub use comprehend::ComprehendAnalyzer;
pub use types::Sentiment;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while detecting sentiment.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// The service call failed.
    #[error("Sentiment service error: {0}")]
    Service(String),

    /// The service answered without a sentiment.
    #[error("Sentiment service returned no sentiment")]
    MissingSentiment,

    /// The service answered with a sentiment we do not know.
    #[error("Unknown sentiment: {0}")]
    UnknownSentiment(String),

    /// Empty text was submitted.
    #[error("Cannot detect sentiment of empty text")]
    EmptyText,
}

/// A service that classifies the sentiment of text.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Returns the name of this analyzer implementation.
    fn name(&self) -> &str;

    /// Classifies `text`, written in `language_code` (ISO 639-1, e.g. `en`).
    async fn detect_sentiment(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<Sentiment, SentimentError>;
}
