//! Photo record storage module for `DynamoDB` operations
//!
//! A photo record links a generated identifier to the storage key of an uploaded
//! photo object. Records are only ever created, never updated or deleted.

mod error;

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::{operation::put_item::PutItemError, Client as DynamoDbClient};
pub use error::{PhotoRecordStorageError, PhotoRecordStorageResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_dynamo::{from_items, to_item};
use strum::Display;
use tracing::{debug, instrument};

/// `DynamoDB` item for a registered photo
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct PhotoRecord {
    /// Primary key - generated record ID (UUID v4)
    pub id: String,
    /// Storage key of the photo object this record points to
    pub key: String,
}

impl PhotoRecord {
    /// Creates a record for `key` with a freshly generated ID
    ///
    /// The ID is independent of any token embedded in the storage key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            key: key.into(),
        }
    }
}

/// `DynamoDB` attribute names for the photo record table
#[derive(Debug, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PhotoRecordAttribute {
    /// Primary key - generated record ID
    Id,
    /// Storage key of the photo object
    Key,
}

/// Read/write access to photo records
#[async_trait]
pub trait PhotoRecordStore: Send + Sync {
    /// Writes a new record
    ///
    /// # Errors
    ///
    /// Returns `PhotoRecordStorageError` if the record could not be written
    async fn put(&self, record: &PhotoRecord) -> PhotoRecordStorageResult<()>;

    /// Returns every record currently in the store, in store order
    ///
    /// # Errors
    ///
    /// Returns `PhotoRecordStorageError` if the store could not be read
    async fn scan_all(&self) -> PhotoRecordStorageResult<Vec<PhotoRecord>>;
}

/// Storage client for the photo record table
pub struct PhotoRecordStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
    /// Items per scan page, `None` for the 1 MB service default
    scan_page_size: Option<i32>,
}

impl PhotoRecordStorage {
    /// Creates a new storage instance
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured `DynamoDB` client
    /// * `table_name` - `DynamoDB` table name for photo records
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
            scan_page_size: None,
        }
    }

    /// Caps the number of items per scan page
    #[must_use]
    pub fn with_scan_page_size(mut self, page_size: i32) -> Self {
        self.scan_page_size = Some(page_size);
        self
    }
}

#[async_trait]
impl PhotoRecordStore for PhotoRecordStorage {
    /// Inserts a record, refusing to overwrite an existing ID
    #[instrument(skip(self, record), fields(record_id = %record.id))]
    async fn put(&self, record: &PhotoRecord) -> PhotoRecordStorageResult<()> {
        let item = to_item(record)?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#id)")
            .expression_attribute_names("#id", PhotoRecordAttribute::Id.to_string())
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(PutItemError::ConditionalCheckFailedException(_)) => {
                    PhotoRecordStorageError::RecordExists(record.id.clone())
                }
                _ => PhotoRecordStorageError::from(err),
            })?;

        debug!(key = %record.key, "Photo record written");
        Ok(())
    }

    /// Full table scan, following `LastEvaluatedKey` until the table is exhausted
    #[instrument(skip(self))]
    async fn scan_all(&self) -> PhotoRecordStorageResult<Vec<PhotoRecord>> {
        let mut pages = self
            .dynamodb_client
            .scan()
            .table_name(&self.table_name)
            .set_limit(self.scan_page_size)
            .into_paginator()
            .items()
            .send();

        let mut items = Vec::new();
        while let Some(item) = pages.next().await {
            items.push(item?);
        }

        debug!(count = items.len(), "Scanned photo records");
        Ok(from_items(items)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_generates_unique_ids() {
        let first = PhotoRecord::new("photos/abc-cat.png");
        let second = PhotoRecord::new("photos/abc-cat.png");

        assert_eq!(first.key, "photos/abc-cat.png");
        assert_eq!(first.key, second.key);
        assert_ne!(first.id, second.id);
        assert!(uuid::Uuid::parse_str(&first.id).is_ok());
    }

    #[test]
    fn test_record_item_has_only_id_and_key() {
        let record = PhotoRecord::new("photos/abc-cat.png");
        let item: std::collections::HashMap<String, aws_sdk_dynamodb::types::AttributeValue> =
            to_item(&record).unwrap();

        assert_eq!(item.len(), 2);
        assert!(item.contains_key(&PhotoRecordAttribute::Id.to_string()));
        assert!(item.contains_key(&PhotoRecordAttribute::Key.to_string()));
    }

    #[test]
    fn test_record_json_shape() {
        let record = PhotoRecord {
            id: "r1".to_string(),
            key: "photos/abc-cat.png".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "r1", "key": "photos/abc-cat.png" })
        );
    }
}
