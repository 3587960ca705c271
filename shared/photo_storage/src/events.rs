//! S3 event notification format
//!
//! The photo bucket publishes `ObjectCreated:*` notifications to SQS. Each message body
//! is one notification document holding a batch of records. S3 also publishes a single
//! `s3:TestEvent` document (without `Records`) when the notification configuration is
//! saved; it deserializes to an empty batch.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// Prefix shared by every object-creation event name (`ObjectCreated:Put`, ...)
pub const OBJECT_CREATED_PREFIX: &str = "ObjectCreated:";

/// A batch of S3 notifications delivered together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCreatedEvent {
    /// Notification records, empty for the S3 test event
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

impl ObjectCreatedEvent {
    /// Builds a batch of `ObjectCreated:Put` records for the given raw keys
    #[must_use]
    pub fn for_keys<I, K>(bucket: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            records: keys
                .into_iter()
                .map(|key| S3EventRecord::object_created(bucket, key))
                .collect(),
        }
    }
}

/// A single S3 notification record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3EventRecord {
    /// Event name, e.g. `ObjectCreated:Put`
    pub event_name: String,
    /// Bucket and object the event refers to
    pub s3: S3Entity,
}

impl S3EventRecord {
    /// Creates an `ObjectCreated:Put` record
    #[must_use]
    pub fn object_created(bucket: &str, key: impl Into<String>) -> Self {
        Self {
            event_name: format!("{OBJECT_CREATED_PREFIX}Put"),
            s3: S3Entity {
                bucket: S3Bucket {
                    name: bucket.to_string(),
                },
                object: S3Object {
                    key: key.into(),
                    size: None,
                },
            },
        }
    }

    /// Whether this record reports a newly created object
    #[must_use]
    pub fn is_object_created(&self) -> bool {
        self.event_name.starts_with(OBJECT_CREATED_PREFIX)
    }

    /// The storage key of the object, with S3's form-urlencoding undone
    ///
    /// S3 encodes keys in notifications (`+` for space, `%XX` for reserved bytes), so
    /// `photos/a-my+cat.png` refers to the object `photos/a-my cat.png`.
    #[must_use]
    pub fn object_key(&self) -> String {
        let key = self.s3.object.key.replace('+', " ");
        percent_decode_str(&key).decode_utf8_lossy().into_owned()
    }
}

/// The `s3` section of a notification record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Entity {
    /// Bucket the object lives in
    pub bucket: S3Bucket,
    /// The object itself
    pub object: S3Object,
}

/// Bucket descriptor in a notification record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Bucket {
    /// Bucket name
    pub name: String,
}

/// Object descriptor in a notification record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Object {
    /// URL-encoded object key
    pub key: String,
    /// Object size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}
