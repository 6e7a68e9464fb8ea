//! Notifications sent once an image has been analyzed.
//!
//! Publishing is fire-and-forget: a successful publish call is the only
//! confirmation sought.

mod config;
mod sns;
mod types;

pub use config::NotifierConfig;
pub use sns::SnsNotifier;
pub use types::{Notification, PublishReceipt};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when publishing a notification.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// A required setting is absent.
    #[error("Notifier not configured: {0} is not set")]
    NotConfigured(&'static str),

    /// The service call failed.
    #[error("Notification publish failed: {0}")]
    Service(String),
}

/// A channel notifications are published to.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns the name of this notifier implementation.
    fn name(&self) -> &str;

    /// Publishes a notification.
    async fn publish(&self, notification: &Notification) -> Result<PublishReceipt, NotifierError>;
}
