//! Amazon Comprehend sentiment analyzer.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_comprehend::error::DisplayErrorContext;
use aws_sdk_comprehend::types::{LanguageCode, SentimentType};
use aws_sdk_comprehend::Client;
use tracing::debug;

use super::{Sentiment, SentimentAnalyzer, SentimentError};

/// Sentiment analyzer backed by Comprehend `DetectSentiment`.
#[derive(Debug, Clone)]
pub struct ComprehendAnalyzer {
    client: Client,
}

impl ComprehendAnalyzer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl SentimentAnalyzer for ComprehendAnalyzer {
    fn name(&self) -> &str {
        "comprehend"
    }

    async fn detect_sentiment(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<Sentiment, SentimentError> {
        if text.is_empty() {
            return Err(SentimentError::EmptyText);
        }

        debug!(
            "Comprehend detect_sentiment: {} chars, language={}",
            text.len(),
            language_code
        );

        let response = self
            .client
            .detect_sentiment()
            .text(text)
            .language_code(LanguageCode::from(language_code))
            .send()
            .await
            .map_err(|e| SentimentError::Service(DisplayErrorContext(&e).to_string()))?;

        match response.sentiment() {
            Some(SentimentType::Positive) => Ok(Sentiment::Positive),
            Some(SentimentType::Negative) => Ok(Sentiment::Negative),
            Some(SentimentType::Neutral) => Ok(Sentiment::Neutral),
            Some(SentimentType::Mixed) => Ok(Sentiment::Mixed),
            Some(other) => Err(SentimentError::UnknownSentiment(other.as_str().to_string())),
            None => Err(SentimentError::MissingSentiment),
        }
    }
}
