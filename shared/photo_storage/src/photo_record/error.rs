//! Error types for photo record storage operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{put_item::PutItemError, scan::ScanError};
use thiserror::Error;

/// Result type alias for photo record storage operations
pub type PhotoRecordStorageResult<T> = Result<T, PhotoRecordStorageError>;

/// Storage error types for photo record operations
#[derive(Debug, Error)]
pub enum PhotoRecordStorageError {
    /// Failed to insert photo record into `DynamoDB`
    #[error("Failed to insert photo record into DynamoDB: {0:?}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Failed to scan photo records from `DynamoDB`
    #[error("Failed to scan photo records from DynamoDB: {0:?}")]
    DynamoDbScanError(#[from] SdkError<ScanError>),

    /// Failed to convert a photo record to or from a `DynamoDB` item
    #[error("Failed to parse photo record: {0}")]
    SerializationError(String),

    /// A record with this ID already exists
    #[error("Photo record already exists: {0}")]
    RecordExists(String),

    /// The table could not be reached
    #[error("Photo record table unavailable: {0}")]
    Unavailable(String),
}

impl PhotoRecordStorageError {
    /// Checks if this error represents an upstream (5xx) or availability failure
    #[must_use]
    pub fn is_upstream_error(&self) -> bool {
        match self {
            Self::DynamoDbPutError(sdk_err) => check_sdk_error_status(sdk_err),
            Self::DynamoDbScanError(sdk_err) => check_sdk_error_status(sdk_err),
            Self::Unavailable(_) => true,
            Self::SerializationError(_) | Self::RecordExists(_) => false,
        }
    }
}

fn check_sdk_error_status<E>(sdk_err: &SdkError<E>) -> bool {
    if let SdkError::ServiceError(err) = sdk_err {
        return err.raw().status().as_u16() >= 500;
    }
    false
}

impl From<serde_dynamo::Error> for PhotoRecordStorageError {
    fn from(err: serde_dynamo::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
