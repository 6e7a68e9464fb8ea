//! Durable storage of analysis records.
//!
//! Writes are unconditional upserts keyed by object key: analyzing the same
//! object twice leaves only the latest record.

mod config;
mod dynamodb;

pub use config::StorageConfig;
pub use dynamodb::{item_from_record, record_from_item, DynamoRecordStore};

use async_trait::async_trait;
use thiserror::Error;

use crate::record::ResultRecord;

/// Errors that can occur when reading or writing records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required setting is absent.
    #[error("Record store not configured: {0} is not set")]
    NotConfigured(&'static str),

    /// The service call failed.
    #[error("Record store error: {0}")]
    Service(String),

    /// The record could not be encoded as an item or decoded from one.
    #[error("Record encoding error: {0}")]
    Encoding(#[from] serde_dynamo::Error),
}

/// Persistence for [`ResultRecord`]s.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the name of this store implementation.
    fn name(&self) -> &str;

    /// Writes the record, replacing any record with the same object key.
    async fn put(&self, record: &ResultRecord) -> Result<(), StoreError>;

    /// Reads the record for an object key.
    async fn get(&self, object_key: &str) -> Result<Option<ResultRecord>, StoreError>;
}
