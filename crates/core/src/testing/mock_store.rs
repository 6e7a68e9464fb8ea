//! Mock record store for testing.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::record::ResultRecord;
use crate::store::{item_from_record, record_from_item, RecordStore, StoreError};

type Item = HashMap<String, AttributeValue>;

/// In-memory record store.
///
/// Records go through the same item encoding as the DynamoDB store, so a
/// record that would be refused there (e.g. one with unnormalized floats) is
/// refused here too, and `get` returns what a real read would decode.
#[derive(Debug, Clone, Default)]
pub struct MockRecordStore {
    items: Arc<RwLock<HashMap<String, Item>>>,
    write_count: Arc<RwLock<usize>>,
    /// If set, the next put fails with this error.
    next_error: Arc<RwLock<Option<StoreError>>>,
}

impl MockRecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the next put to fail.
    pub async fn set_next_error(&self, error: StoreError) {
        *self.next_error.write().await = Some(error);
    }

    /// Number of successful puts, overwrites included.
    pub async fn write_count(&self) -> usize {
        *self.write_count.read().await
    }

    /// Number of distinct keys stored.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// The raw stored item for a key.
    pub async fn item(&self, object_key: &str) -> Option<Item> {
        self.items.read().await.get(object_key).cloned()
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn put(&self, record: &ResultRecord) -> Result<(), StoreError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let item = item_from_record(record)?;
        self.items
            .write()
            .await
            .insert(record.object_key.clone(), item);
        *self.write_count.write().await += 1;
        Ok(())
    }

    async fn get(&self, object_key: &str) -> Result<Option<ResultRecord>, StoreError> {
        Ok(self
            .items
            .read()
            .await
            .get(object_key)
            .cloned()
            .map(record_from_item)
            .transpose()?)
    }
}
