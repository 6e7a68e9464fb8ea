//! Types for the notifier module.

use serde::{Deserialize, Serialize};

use crate::record::ResultRecord;

/// A plain-text notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Summarizes an analysis record for human readers.
    pub fn for_record(record: &ResultRecord) -> Self {
        let sentiment = record
            .sentiment
            .map(|s| s.to_string())
            .unwrap_or_else(|| "None".to_string());

        Self::new(format!(
            "Analysis completed for image {}.\n\
             Status: {}\n\
             Detected labels: {}\n\
             Detected texts: {}\n\
             Sentiment: {}",
            record.object_key,
            record.status,
            record.detected_labels.join(", "),
            record.detected_texts.join(", "),
            sentiment,
        ))
    }
}

/// Acknowledgement of a publish call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Identifier assigned by the channel, when it returns one.
    pub message_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Payload;
    use crate::sentiment::Sentiment;
    use chrono::Utc;

    fn record(texts: &[&str], sentiment: Option<Sentiment>) -> ResultRecord {
        ResultRecord {
            object_key: "photos/cat.jpg".to_string(),
            status: "Success! cat found".to_string(),
            detected_labels: vec!["cat".to_string(), "pet".to_string(), "animal".to_string()],
            detected_texts: texts.iter().map(|t| t.to_string()).collect(),
            sentiment,
            full_labels: Payload::List(vec![]),
            full_texts: Payload::List(vec![]),
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn test_message_layout() {
        let notification = Notification::for_record(&record(
            &["GREAT PRODUCT", "GREAT", "PRODUCT"],
            Some(Sentiment::Positive),
        ));

        assert_eq!(
            notification.message,
            "Analysis completed for image photos/cat.jpg.\n\
             Status: Success! cat found\n\
             Detected labels: cat, pet, animal\n\
             Detected texts: GREAT PRODUCT, GREAT, PRODUCT\n\
             Sentiment: POSITIVE"
        );
    }

    #[test]
    fn test_message_without_text() {
        let notification = Notification::for_record(&record(&[], None));

        assert!(notification.message.contains("Detected texts: \n"));
        assert!(notification.message.ends_with("Sentiment: None"));
    }
}
