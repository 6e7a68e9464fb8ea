//! Types for the record module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sentiment::Sentiment;

use super::Payload;

/// Attribute names of a stored record, as the field renames produce them.
pub mod attributes {
    /// Partition key of the results table.
    pub const OBJECT_KEY: &str = "ObjectKey";
    pub const STATUS: &str = "Status";
    pub const DETECTED_LABELS: &str = "DetectedLabels";
    pub const DETECTED_TEXTS: &str = "DetectedTexts";
    pub const SENTIMENT: &str = "Sentiment";
    pub const FULL_LABELS: &str = "FullLabels";
    pub const FULL_TEXTS: &str = "FullTexts";
    pub const ANALYZED_AT: &str = "AnalyzedAt";
}

/// The outcome of analyzing one image, as persisted.
///
/// Serializes to one top-level attribute per field. An absent sentiment is
/// written as null rather than omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultRecord {
    /// Key of the analyzed object; the record's primary key.
    pub object_key: String,
    /// Human-readable match status.
    pub status: String,
    /// Detected label names, lower-cased, in service order.
    pub detected_labels: Vec<String>,
    /// Detected text fragments, verbatim, in service order.
    pub detected_texts: Vec<String>,
    /// Sentiment of the joined text; `None` when no text was found.
    pub sentiment: Option<Sentiment>,
    /// Full label detections, normalized.
    pub full_labels: Payload,
    /// Full text detections, normalized.
    pub full_texts: Payload,
    /// When the record was assembled.
    pub analyzed_at: DateTime<Utc>,
}
