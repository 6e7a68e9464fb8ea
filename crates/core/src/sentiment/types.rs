//! Types for the sentiment module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SentimentError;

/// Overall sentiment of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl Sentiment {
    /// Wire name, as the sentiment service spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
            Self::Mixed => "MIXED",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = SentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "POSITIVE" => Ok(Self::Positive),
            "NEGATIVE" => Ok(Self::Negative),
            "NEUTRAL" => Ok(Self::Neutral),
            "MIXED" => Ok(Self::Mixed),
            _ => Err(SentimentError::UnknownSentiment(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        assert_eq!("POSITIVE".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert_eq!("mixed".parse::<Sentiment>().unwrap(), Sentiment::Mixed);
        assert!(matches!(
            "ECSTATIC".parse::<Sentiment>(),
            Err(SentimentError::UnknownSentiment(_))
        ));
    }

    #[test]
    fn test_display_matches_serde() {
        for sentiment in [
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Neutral,
            Sentiment::Mixed,
        ] {
            let json = serde_json::to_string(&sentiment).unwrap();
            assert_eq!(json, format!("\"{}\"", sentiment));
        }
    }
}
