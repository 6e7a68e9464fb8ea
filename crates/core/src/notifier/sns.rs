//! Amazon SNS notifier.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;
use tracing::debug;

use super::{Notification, Notifier, NotifierConfig, NotifierError, PublishReceipt};

/// Notifier publishing to an SNS topic.
#[derive(Debug, Clone)]
pub struct SnsNotifier {
    client: Client,
    config: NotifierConfig,
}

impl SnsNotifier {
    pub fn new(client: Client, config: NotifierConfig) -> Self {
        Self { client, config }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig, config: NotifierConfig) -> Self {
        Self::new(Client::new(sdk_config), config)
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    fn name(&self) -> &str {
        "sns"
    }

    async fn publish(&self, notification: &Notification) -> Result<PublishReceipt, NotifierError> {
        let topic_arn = self
            .config
            .topic_arn
            .as_deref()
            .filter(|arn| !arn.is_empty())
            .ok_or(NotifierError::NotConfigured("notifier.topic_arn"))?;

        debug!(
            "SNS publish: topic={}, {} bytes",
            topic_arn,
            notification.message.len()
        );

        let response = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .message(&notification.message)
            .set_subject(self.config.subject.clone())
            .send()
            .await
            .map_err(|e| NotifierError::Service(DisplayErrorContext(&e).to_string()))?;

        Ok(PublishReceipt {
            message_id: response.message_id().map(str::to_string),
        })
    }
}
