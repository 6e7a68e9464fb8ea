//! The persisted analysis record.
//!
//! Service payloads are captured as [`Payload`] trees and normalized so that
//! every floating-point leaf becomes a [`Decimal`] before anything reaches
//! the durable store, which has no native float type.

mod capture;
mod decimal;
mod payload;
mod types;

pub use decimal::Decimal;
pub use payload::{normalize, Payload};
pub use types::{attributes, ResultRecord};

use thiserror::Error;

/// Errors that can occur while building or decoding a record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A float has no decimal representation (NaN or infinite).
    #[error("Non-finite number cannot be stored: {value}")]
    NonFinite { value: f64 },

    /// A number falls outside the store's supported range.
    #[error("Number out of storable range: {value}")]
    OutOfRange { value: String },

    /// A decimal string could not be parsed.
    #[error("Invalid decimal '{value}'")]
    InvalidDecimal { value: String },

    /// A payload could not be captured from a typed value.
    #[error("Failed to capture payload: {0}")]
    Capture(String),

    /// A float reached the store without being normalized.
    #[error("Unnormalized float in record: {value}")]
    UnnormalizedFloat { value: f64 },
}

impl serde::ser::Error for RecordError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self::Capture(msg.to_string())
    }
}
