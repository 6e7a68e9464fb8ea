//! Storage upload events that trigger an analysis.
//!
//! The handler is subscribed to object-created notifications on a bucket. Only
//! the first record of a notification is analyzed.

mod types;

pub use types::{ObjectRef, S3Bucket, S3Entity, S3Event, S3Object, S3Record};

use thiserror::Error;

/// Errors raised while reading the trigger event.
#[derive(Debug, Error)]
pub enum EventError {
    /// The notification carried no records.
    #[error("Event contains no records")]
    NoRecords,

    /// The object key could not be URL-decoded.
    #[error("Invalid object key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
}
