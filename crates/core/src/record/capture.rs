//! A serde serializer that builds [`Payload`] trees.
//!
//! Numbers keep their exact value: floats stay `Float` (NaN and infinities
//! included) so that normalization, not capture, decides what is storable.

use std::collections::BTreeMap;

use serde::ser::{self, Serialize};

use super::{Decimal, Payload, RecordError};

pub(super) struct PayloadSerializer;

impl ser::Serializer for PayloadSerializer {
    type Ok = Payload;
    type Error = RecordError;

    type SerializeSeq = SeqCapture;
    type SerializeTuple = SeqCapture;
    type SerializeTupleStruct = SeqCapture;
    type SerializeTupleVariant = TupleVariantCapture;
    type SerializeMap = MapCapture;
    type SerializeStruct = MapCapture;
    type SerializeStructVariant = StructVariantCapture;

    fn serialize_bool(self, v: bool) -> Result<Payload, RecordError> {
        Ok(Payload::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Payload, RecordError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Payload, RecordError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Payload, RecordError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Payload, RecordError> {
        Ok(Payload::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Payload, RecordError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Payload, RecordError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Payload, RecordError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Payload, RecordError> {
        Ok(match i64::try_from(v) {
            Ok(i) => Payload::Integer(i),
            Err(_) => Payload::Decimal(Decimal::from(v)),
        })
    }

    fn serialize_f32(self, v: f32) -> Result<Payload, RecordError> {
        // Through the shortest text form, so 91.2_f32 is captured as 91.2.
        let widened = if v.is_finite() {
            v.to_string().parse().unwrap_or_else(|_| f64::from(v))
        } else {
            f64::from(v)
        };
        self.serialize_f64(widened)
    }

    fn serialize_f64(self, v: f64) -> Result<Payload, RecordError> {
        Ok(Payload::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Payload, RecordError> {
        Ok(Payload::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Payload, RecordError> {
        Ok(Payload::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Payload, RecordError> {
        Ok(Payload::List(
            v.iter().map(|b| Payload::Integer(i64::from(*b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Payload, RecordError> {
        Ok(Payload::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Payload, RecordError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Payload, RecordError> {
        Ok(Payload::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Payload, RecordError> {
        Ok(Payload::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Payload, RecordError> {
        Ok(Payload::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Payload, RecordError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Payload, RecordError>
    where
        T: ?Sized + Serialize,
    {
        let mut entries = BTreeMap::new();
        entries.insert(variant.to_string(), value.serialize(PayloadSerializer)?);
        Ok(Payload::Map(entries))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqCapture, RecordError> {
        Ok(SeqCapture {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCapture, RecordError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqCapture, RecordError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TupleVariantCapture, RecordError> {
        Ok(TupleVariantCapture {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapCapture, RecordError> {
        Ok(MapCapture::default())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<MapCapture, RecordError> {
        Ok(MapCapture::default())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<StructVariantCapture, RecordError> {
        Ok(StructVariantCapture {
            variant,
            entries: BTreeMap::new(),
        })
    }
}

pub(super) struct SeqCapture {
    items: Vec<Payload>,
}

impl ser::SerializeSeq for SeqCapture {
    type Ok = Payload;
    type Error = RecordError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), RecordError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(PayloadSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Payload, RecordError> {
        Ok(Payload::List(self.items))
    }
}

impl ser::SerializeTuple for SeqCapture {
    type Ok = Payload;
    type Error = RecordError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), RecordError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Payload, RecordError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqCapture {
    type Ok = Payload;
    type Error = RecordError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), RecordError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Payload, RecordError> {
        ser::SerializeSeq::end(self)
    }
}

pub(super) struct TupleVariantCapture {
    variant: &'static str,
    items: Vec<Payload>,
}

impl ser::SerializeTupleVariant for TupleVariantCapture {
    type Ok = Payload;
    type Error = RecordError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), RecordError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(PayloadSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Payload, RecordError> {
        let mut entries = BTreeMap::new();
        entries.insert(self.variant.to_string(), Payload::List(self.items));
        Ok(Payload::Map(entries))
    }
}

#[derive(Default)]
pub(super) struct MapCapture {
    entries: BTreeMap<String, Payload>,
    next_key: Option<String>,
}

impl ser::SerializeMap for MapCapture {
    type Ok = Payload;
    type Error = RecordError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), RecordError>
    where
        T: ?Sized + Serialize,
    {
        let key = match key.serialize(PayloadSerializer)? {
            Payload::String(s) => s,
            Payload::Integer(i) => i.to_string(),
            Payload::Bool(b) => b.to_string(),
            Payload::Decimal(d) => d.to_string(),
            other => {
                return Err(RecordError::Capture(format!(
                    "map key must be a string, got {:?}",
                    other
                )))
            }
        };
        self.next_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), RecordError>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| RecordError::Capture("map value without a key".to_string()))?;
        self.entries.insert(key, value.serialize(PayloadSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Payload, RecordError> {
        Ok(Payload::Map(self.entries))
    }
}

impl ser::SerializeStruct for MapCapture {
    type Ok = Payload;
    type Error = RecordError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), RecordError>
    where
        T: ?Sized + Serialize,
    {
        self.entries
            .insert(key.to_string(), value.serialize(PayloadSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Payload, RecordError> {
        Ok(Payload::Map(self.entries))
    }
}

pub(super) struct StructVariantCapture {
    variant: &'static str,
    entries: BTreeMap<String, Payload>,
}

impl ser::SerializeStructVariant for StructVariantCapture {
    type Ok = Payload;
    type Error = RecordError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), RecordError>
    where
        T: ?Sized + Serialize,
    {
        self.entries
            .insert(key.to_string(), value.serialize(PayloadSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Payload, RecordError> {
        let mut entries = BTreeMap::new();
        entries.insert(self.variant.to_string(), Payload::Map(self.entries));
        Ok(Payload::Map(entries))
    }
}
