//! Mock sentiment analyzer for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::sentiment::{Sentiment, SentimentAnalyzer, SentimentError};

/// A recorded sentiment call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSentimentCall {
    pub text: String,
    pub language_code: String,
}

/// Mock implementation of the SentimentAnalyzer trait.
#[derive(Debug, Clone)]
pub struct MockSentimentAnalyzer {
    sentiment: Arc<RwLock<Sentiment>>,
    calls: Arc<RwLock<Vec<RecordedSentimentCall>>>,
    next_error: Arc<RwLock<Option<SentimentError>>>,
}

impl Default for MockSentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSentimentAnalyzer {
    /// Create a new mock analyzer answering `NEUTRAL`.
    pub fn new() -> Self {
        Self {
            sentiment: Arc::new(RwLock::new(Sentiment::Neutral)),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the sentiment returned by every call.
    pub async fn set_sentiment(&self, sentiment: Sentiment) {
        *self.sentiment.write().await = sentiment;
    }

    /// Configure the next call to fail.
    pub async fn set_next_error(&self, error: SentimentError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedSentimentCall> {
        self.calls.read().await.clone()
    }

    /// Get the number of calls made.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl SentimentAnalyzer for MockSentimentAnalyzer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn detect_sentiment(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<Sentiment, SentimentError> {
        self.calls.write().await.push(RecordedSentimentCall {
            text: text.to_string(),
            language_code: language_code.to_string(),
        });

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        if text.is_empty() {
            return Err(SentimentError::EmptyText);
        }

        Ok(*self.sentiment.read().await)
    }
}
