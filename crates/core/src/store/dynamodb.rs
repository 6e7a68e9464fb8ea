//! DynamoDB record store.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::debug;

use crate::record::{attributes, ResultRecord};

use super::{RecordStore, StorageConfig, StoreError};

/// Record store writing one item per analyzed object.
#[derive(Debug, Clone)]
pub struct DynamoRecordStore {
    client: Client,
    config: StorageConfig,
}

impl DynamoRecordStore {
    pub fn new(client: Client, config: StorageConfig) -> Self {
        Self { client, config }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig, config: StorageConfig) -> Self {
        Self::new(Client::new(sdk_config), config)
    }

    fn table_name(&self) -> Result<&str, StoreError> {
        self.config
            .table_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(StoreError::NotConfigured("storage.table_name"))
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    fn name(&self) -> &str {
        "dynamodb"
    }

    async fn put(&self, record: &ResultRecord) -> Result<(), StoreError> {
        let table_name = self.table_name()?;
        let item = item_from_record(record)?;

        debug!(
            "DynamoDB put_item: table={}, key={}, {} attributes",
            table_name,
            record.object_key,
            item.len()
        );

        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::Service(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }

    async fn get(&self, object_key: &str) -> Result<Option<ResultRecord>, StoreError> {
        let table_name = self.table_name()?;

        debug!("DynamoDB get_item: table={}, key={}", table_name, object_key);

        let response = self
            .client
            .get_item()
            .table_name(table_name)
            .key(
                attributes::OBJECT_KEY,
                AttributeValue::S(object_key.to_string()),
            )
            .send()
            .await
            .map_err(|e| StoreError::Service(DisplayErrorContext(&e).to_string()))?;

        Ok(response.item().cloned().map(record_from_item).transpose()?)
    }
}

/// Encodes a record as a DynamoDB item.
///
/// Fails on any float leaf left in the full payloads.
pub fn item_from_record(
    record: &ResultRecord,
) -> Result<HashMap<String, AttributeValue>, serde_dynamo::Error> {
    serde_dynamo::to_item(record)
}

/// Decodes a DynamoDB item into a record. Every stored number in the full
/// payloads comes back as a decimal.
pub fn record_from_item(
    item: HashMap<String, AttributeValue>,
) -> Result<ResultRecord, serde_dynamo::Error> {
    serde_dynamo::from_item(item)
}
