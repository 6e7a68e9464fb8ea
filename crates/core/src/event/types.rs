//! Types for the event module.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::EventError;

/// An S3 event notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3Record>,
}

/// A single record of an S3 event notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Object {
    /// Object key, URL-encoded as delivered by S3.
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl S3Event {
    /// Build a single-record event (handy for local invocations and tests).
    pub fn single(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            records: vec![S3Record {
                event_name: Some("ObjectCreated:Put".to_string()),
                aws_region: None,
                s3: S3Entity {
                    bucket: S3Bucket {
                        name: bucket.into(),
                    },
                    object: S3Object {
                        key: key.into(),
                        size: None,
                    },
                },
            }],
        }
    }

    /// Resolve the object named by the first record.
    pub fn object_ref(&self) -> Result<ObjectRef, EventError> {
        let record = self.records.first().ok_or(EventError::NoRecords)?;

        if self.records.len() > 1 {
            warn!(
                "Event carries {} records, only the first is analyzed",
                self.records.len()
            );
        }

        ObjectRef::from_event_key(&record.s3.bucket.name, &record.s3.object.key)
    }
}

/// A decoded bucket/key pair identifying an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Decode a key as S3 writes it into event notifications.
    ///
    /// Spaces arrive as `+` and everything else non-ASCII or reserved as `%XX`.
    pub fn from_event_key(bucket: &str, raw_key: &str) -> Result<Self, EventError> {
        let plus_decoded = raw_key.replace('+', " ");
        let key = urlencoding::decode(&plus_decoded).map_err(|e| EventError::InvalidKey {
            key: raw_key.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self::new(bucket, key.into_owned()))
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_s3_notification() {
        let json = r#"{
            "Records": [{
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "bucket": { "name": "uploads", "arn": "arn:aws:s3:::uploads" },
                    "object": { "key": "photos/cat.jpg", "size": 2048, "eTag": "abc" }
                }
            }]
        }"#;

        let event: S3Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].aws_region.as_deref(), Some("us-east-1"));
        assert_eq!(event.records[0].s3.object.size, Some(2048));

        let object = event.object_ref().unwrap();
        assert_eq!(object, ObjectRef::new("uploads", "photos/cat.jpg"));
    }

    #[test]
    fn test_object_ref_decodes_key() {
        let object = ObjectRef::from_event_key("uploads", "my+photos/caf%C3%A9+1.jpg").unwrap();
        assert_eq!(object.key, "my photos/café 1.jpg");
    }

    #[test]
    fn test_object_ref_rejects_invalid_utf8() {
        let result = ObjectRef::from_event_key("uploads", "bad%FF.jpg");
        assert!(matches!(result, Err(EventError::InvalidKey { .. })));
    }

    #[test]
    fn test_empty_event_has_no_object() {
        let event: S3Event = serde_json::from_str(r#"{"Records": []}"#).unwrap();
        assert!(matches!(event.object_ref(), Err(EventError::NoRecords)));
    }

    #[test]
    fn test_missing_records_field_is_empty() {
        let event: S3Event = serde_json::from_str("{}").unwrap();
        assert!(event.records.is_empty());
    }

    #[test]
    fn test_first_record_wins() {
        let mut event = S3Event::single("uploads", "first.png");
        event
            .records
            .extend(S3Event::single("uploads", "second.png").records);

        assert_eq!(event.object_ref().unwrap().key, "first.png");
    }

    #[test]
    fn test_display() {
        let object = ObjectRef::new("uploads", "a/b.jpg");
        assert_eq!(object.to_string(), "s3://uploads/a/b.jpg");
    }
}
