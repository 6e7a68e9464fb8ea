//! Configuration for the notifier module.

use serde::{Deserialize, Serialize};

/// Where analysis notifications are published.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// ARN of the topic to publish to. Only checked when publishing.
    #[serde(default)]
    pub topic_arn: Option<String>,
    /// Subject line for email subscribers.
    #[serde(default)]
    pub subject: Option<String>,
}

impl NotifierConfig {
    pub fn with_topic(topic_arn: impl Into<String>) -> Self {
        Self {
            topic_arn: Some(topic_arn.into()),
            subject: None,
        }
    }
}
