//! Mock notifier for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::notifier::{Notification, Notifier, NotifierError, PublishReceipt};

/// Mock implementation of the Notifier trait.
///
/// Records every published notification and hands out sequential
/// message ids (`mock-message-1`, `mock-message-2`, ...).
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    published: Arc<RwLock<Vec<Notification>>>,
    next_error: Arc<RwLock<Option<NotifierError>>>,
}

impl MockNotifier {
    /// Create a new mock notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the next publish to fail.
    pub async fn set_next_error(&self, error: NotifierError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all successfully published notifications.
    pub async fn published(&self) -> Vec<Notification> {
        self.published.read().await.clone()
    }

    /// Get the number of successful publishes.
    pub async fn publish_count(&self) -> usize {
        self.published.read().await.len()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn publish(&self, notification: &Notification) -> Result<PublishReceipt, NotifierError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let mut published = self.published.write().await;
        published.push(notification.clone());

        Ok(PublishReceipt {
            message_id: Some(format!("mock-message-{}", published.len())),
        })
    }
}
