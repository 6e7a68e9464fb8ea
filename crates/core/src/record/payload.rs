//! Untyped service payloads and the float-to-decimal normalization walk.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};

use super::capture::PayloadSerializer;
use super::{Decimal, RecordError};

/// A nested value captured from a service response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    String(String),
    List(Vec<Payload>),
    Map(BTreeMap<String, Payload>),
}

impl Payload {
    /// Captures any serializable value as a payload tree.
    pub fn capture<T: Serialize>(value: &T) -> Result<Self, RecordError> {
        value.serialize(PayloadSerializer)
    }

    /// Rebuilds the tree, passing every leaf through `f`.
    ///
    /// Lists and maps keep their length, order and keys; only leaves change.
    pub fn try_map_leaves<F, E>(self, f: &mut F) -> Result<Self, E>
    where
        F: FnMut(Payload) -> Result<Payload, E>,
    {
        match self {
            Self::List(items) => items
                .into_iter()
                .map(|item| item.try_map_leaves(f))
                .collect::<Result<Vec<_>, E>>()
                .map(Self::List),
            Self::Map(entries) => entries
                .into_iter()
                .map(|(key, value)| value.try_map_leaves(f).map(|value| (key, value)))
                .collect::<Result<BTreeMap<_, _>, E>>()
                .map(Self::Map),
            leaf => f(leaf),
        }
    }

    /// Whether any float leaf remains anywhere in the tree.
    pub fn contains_float(&self) -> bool {
        match self {
            Self::Float(_) => true,
            Self::List(items) => items.iter().any(Self::contains_float),
            Self::Map(entries) => entries.values().any(Self::contains_float),
            _ => false,
        }
    }

    /// Looks up a key when this payload is a map.
    pub fn get(&self, key: &str) -> Option<&Payload> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Payload]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric value of an integer, float or decimal leaf.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Decimal(d) => Some(d.to_f64()),
            _ => None,
        }
    }
}

impl Serialize for Payload {
    /// Writes the tree as-is. A remaining `Float` leaf is an error: only
    /// normalized payloads may be persisted.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(value) => Err(ser::Error::custom(RecordError::UnnormalizedFloat {
                value: *value,
            })),
            Self::Decimal(d) => d.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => serializer.collect_seq(items),
            Self::Map(entries) => serializer.collect_map(entries),
        }
    }
}

impl<'de> Deserialize<'de> for Payload {
    /// Every number comes back as a [`Decimal`], whatever its stored form.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PayloadVisitor)
    }
}

struct PayloadVisitor;

impl<'de> Visitor<'de> for PayloadVisitor {
    type Value = Payload;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a null, boolean, number, string, list or map")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Payload, E> {
        Ok(Payload::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Payload, E> {
        Ok(Payload::Decimal(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Payload, E> {
        Ok(Payload::Decimal(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Payload, E> {
        Decimal::from_f64(v)
            .map(Payload::Decimal)
            .map_err(de::Error::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Payload, E> {
        Ok(Payload::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Payload, E> {
        Ok(Payload::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Payload, E> {
        Ok(Payload::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Payload, E> {
        Ok(Payload::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Payload, D::Error> {
        Payload::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Payload, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Payload::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Payload, A::Error> {
        let mut entries = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, Payload>()? {
            entries.insert(key, value);
        }
        Ok(Payload::Map(entries))
    }
}

/// Converts every float leaf into a [`Decimal`], leaving all else untouched.
///
/// Applying it to its own output is a no-op.
pub fn normalize(payload: Payload) -> Result<Payload, RecordError> {
    payload.try_map_leaves(&mut |leaf| match leaf {
        Payload::Float(value) => Decimal::from_f64(value).map(Payload::Decimal),
        other => Ok(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Payload {
        Payload::capture(&json!([
            {
                "Name": "Cat",
                "Confidence": 91.2,
                "Instances": [
                    { "BoundingBox": { "Width": 0.25, "Height": 0.5, "Left": 0.1, "Top": 0.0 }, "Confidence": 91.2 }
                ],
                "Parents": [{ "Name": "Animal" }],
                "Id": 3,
                "Visible": true,
                "Extra": null
            },
            "trailing",
            1.5
        ]))
        .unwrap()
    }

    #[test]
    fn test_normalize_converts_every_float() {
        let normalized = normalize(sample()).unwrap();
        assert!(!normalized.contains_float());

        let first = &normalized.as_list().unwrap()[0];
        assert_eq!(
            first.get("Confidence"),
            Some(&Payload::Decimal(Decimal::parse("91.2").unwrap()))
        );
        let bbox = first.get("Instances").unwrap().as_list().unwrap()[0]
            .get("BoundingBox")
            .unwrap();
        assert_eq!(
            bbox.get("Top"),
            Some(&Payload::Decimal(Decimal::parse("0").unwrap()))
        );
    }

    #[test]
    fn test_normalize_leaves_other_leaves_alone() {
        let normalized = normalize(sample()).unwrap();
        let first = &normalized.as_list().unwrap()[0];

        assert_eq!(first.get("Name"), Some(&Payload::String("Cat".to_string())));
        assert_eq!(first.get("Id"), Some(&Payload::Integer(3)));
        assert_eq!(first.get("Visible"), Some(&Payload::Bool(true)));
        assert_eq!(first.get("Extra"), Some(&Payload::Null));
        assert_eq!(
            normalized.as_list().unwrap()[1],
            Payload::String("trailing".to_string())
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(sample()).unwrap();
        let twice = normalize(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_preserves_shape() {
        fn shape(payload: &Payload) -> String {
            match payload {
                Payload::List(items) => {
                    format!("[{}]", items.iter().map(shape).collect::<Vec<_>>().join(","))
                }
                Payload::Map(entries) => format!(
                    "{{{}}}",
                    entries
                        .iter()
                        .map(|(k, v)| format!("{}:{}", k, shape(v)))
                        .collect::<Vec<_>>()
                        .join(",")
                ),
                _ => "_".to_string(),
            }
        }

        let original = sample();
        let normalized = normalize(original.clone()).unwrap();
        assert_eq!(shape(&original), shape(&normalized));
    }

    #[test]
    fn test_normalize_rejects_non_finite() {
        let payload = Payload::List(vec![Payload::Float(f64::NAN)]);
        assert!(matches!(
            normalize(payload),
            Err(RecordError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_capture_typed_value() {
        #[derive(Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct Detection {
            detected_text: String,
            confidence: f64,
        }

        let payload = Payload::capture(&vec![Detection {
            detected_text: "SALE".to_string(),
            confidence: 99.5,
        }])
        .unwrap();

        let first = &payload.as_list().unwrap()[0];
        assert_eq!(first.get("DetectedText").and_then(Payload::as_str), Some("SALE"));
        assert_eq!(first.get("Confidence"), Some(&Payload::Float(99.5)));
    }

    #[test]
    fn test_large_unsigned_becomes_decimal() {
        let payload = Payload::capture(&u64::MAX).unwrap();
        assert_eq!(payload, Payload::Decimal(Decimal::from(u64::MAX)));
    }

    #[test]
    fn test_normalize_rejects_captured_nan() {
        let payload = Payload::capture(&json!({ "Confidence": 1.0 })).unwrap();
        assert!(normalize(payload).is_ok());

        let payload = Payload::capture(&vec![f64::NAN]).unwrap();
        assert!(matches!(
            normalize(payload),
            Err(RecordError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_serialize_refuses_float_leaf() {
        let payload = Payload::List(vec![Payload::Float(0.5)]);
        let err = serde_json::to_string(&payload).unwrap_err();
        assert!(err.to_string().contains("Unnormalized float"));

        let normalized = normalize(payload).unwrap();
        assert_eq!(serde_json::to_string(&normalized).unwrap(), "[0.5]");
    }

    #[test]
    fn test_deserialized_numbers_are_decimals() {
        let payload: Payload =
            serde_json::from_str(r#"{"Id": 3, "Confidence": 91.2, "Name": "Cat", "Extra": null}"#)
                .unwrap();

        assert_eq!(payload.get("Id"), Some(&Payload::Decimal(Decimal::from(3_i64))));
        assert_eq!(
            payload.get("Confidence"),
            Some(&Payload::Decimal(Decimal::parse("91.2").unwrap()))
        );
        assert_eq!(payload.get("Name").and_then(Payload::as_str), Some("Cat"));
        assert_eq!(payload.get("Extra"), Some(&Payload::Null));
    }
}
