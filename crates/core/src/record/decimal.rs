//! Decimal numbers in the form the durable store accepts.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

use super::RecordError;

/// Most significant digits a stored number may carry.
const MAX_SIGNIFICANT_DIGITS: usize = 38;

/// Largest decimal exponent of the leading digit (magnitude below 1e126).
const MAX_EXPONENT: i64 = 125;

/// Smallest decimal exponent of the leading digit (magnitude at least 1e-130).
const MIN_EXPONENT: i64 = -130;

/// A finite decimal number held in canonical plain notation.
///
/// Canonical means: optional leading `-`, no exponent, no leading zeros in the
/// integer part, no trailing zeros in the fraction, and `0` for zero.
/// Floats are converted through their shortest round-trip representation, so
/// `91.2_f64` becomes `91.2` rather than its binary expansion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(String);

impl Decimal {
    /// Converts a float, rejecting NaN, infinities and out-of-range magnitudes.
    pub fn from_f64(value: f64) -> Result<Self, RecordError> {
        if !value.is_finite() {
            return Err(RecordError::NonFinite { value });
        }
        if value == 0.0 {
            return Ok(Self("0".to_string()));
        }
        Self::parse(&value.to_string())
    }

    /// Parses a decimal string in plain or exponent notation.
    pub fn parse(text: &str) -> Result<Self, RecordError> {
        let invalid = || RecordError::InvalidDecimal {
            value: text.to_string(),
        };

        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent) = match unsigned.find(|c| c == 'e' || c == 'E') {
            Some(pos) => {
                let exponent = unsigned[pos + 1..]
                    .parse::<i32>()
                    .map_err(|_| invalid())?;
                (&unsigned[..pos], i64::from(exponent))
            }
            None => (unsigned, 0),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        // value = digits * 10^scale
        let all_digits = format!("{}{}", int_part, frac_part);
        let mut scale = exponent - frac_part.len() as i64;

        let digits = all_digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self("0".to_string()));
        }
        let significant = digits.trim_end_matches('0');
        scale += (digits.len() - significant.len()) as i64;

        let leading_exponent = significant.len() as i64 - 1 + scale;
        if significant.len() > MAX_SIGNIFICANT_DIGITS
            || !(MIN_EXPONENT..=MAX_EXPONENT).contains(&leading_exponent)
        {
            return Err(RecordError::OutOfRange {
                value: text.to_string(),
            });
        }

        let mut out = String::with_capacity(significant.len() + 4);
        if negative {
            out.push('-');
        }
        if scale >= 0 {
            out.push_str(significant);
            out.extend(std::iter::repeat('0').take(scale as usize));
        } else {
            let frac_len = (-scale) as usize;
            if significant.len() > frac_len {
                let (int_digits, frac_digits) = significant.split_at(significant.len() - frac_len);
                out.push_str(int_digits);
                out.push('.');
                out.push_str(frac_digits);
            } else {
                out.push_str("0.");
                out.extend(std::iter::repeat('0').take(frac_len - significant.len()));
                out.push_str(significant);
            }
        }

        Ok(Self(out))
    }

    /// The canonical text form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The nearest float to this decimal.
    pub fn to_f64(&self) -> f64 {
        // Canonical plain notation always parses.
        self.0.parse().unwrap_or(f64::NAN)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Decimal {
    /// Serializes as a number, so item encoders write an `N` attribute.
    ///
    /// Integers go out exactly; fractions go out as the nearest float, whose
    /// shortest text is this decimal for any value built by `from_f64`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Ok(i) = self.0.parse::<i64>() {
            serializer.serialize_i64(i)
        } else if let Ok(u) = self.0.parse::<u64>() {
            serializer.serialize_u64(u)
        } else {
            serializer.serialize_f64(self.to_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or a decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        Decimal::from_f64(v).map_err(de::Error::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        Decimal::parse(v).map_err(de::Error::custom)
    }
}
