//! value representation
//!
//! The document model shared by input documents and override sources
//! contains the following data types
//! - null (absent value, rendered as the literal `null`)
//! - boolean (true/false)
//! - integer (signed, currently: i64 - may change)
//! - decimal (currently: f64 - may change)
//! - string (utf-8)
//! - sequence ("list" of values)
//! - mapping (order-preserving "map"/"dictionary", where the key is of type string)
//!
//! Additionally:
//! - mapping keys must be strings; a document with non-string keys does not decode
//! - the only valid **implicit** conversion: every `integer` is also a `decimal`
//! - numeric type ranges (min/max) for `integer` or `decimal` are currently not defined and are subject to change
//!
use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
    Deserializer, Serializer,
};
use std::fmt;

/// All possible value types
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(indexmap::IndexMap<String, Value>),
}

impl Value {
    /// An empty mapping, the decoded form of an empty document
    pub fn empty_mapping() -> Self {
        Value::Mapping(Default::default())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<K: ToString, V: Into<Value>> From<indexmap::IndexMap<K, V>> for Value {
    fn from(value: indexmap::IndexMap<K, V>) -> Self {
        Value::Mapping(
            value
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

impl serde::ser::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(value) => serializer.serialize_bool(*value),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Decimal(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Sequence(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Value::Mapping(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
        }
    }
}

impl<'de> serde::de::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a configuration document value")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Value::Boolean(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Value::Integer(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        i64::try_from(value)
            .map(Value::Integer)
            .map_err(|_| E::custom(format!("integer out of range: {value}")))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Value::Decimal(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Value::String(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
        Ok(Value::String(value))
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut elements = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(element) = access.next_element()? {
            elements.push(element);
        }

        Ok(Value::Sequence(elements))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = indexmap::IndexMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            entries.insert(key, value);
        }

        Ok(Value::Mapping(entries))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mapping_round_trip_preserves_insertion_order() {
        let decoded: Value = serde_yaml::from_str("zulu: 1\nalpha: 2\nmike: 3\n").unwrap();
        let encoded = serde_yaml::to_string(&decoded).unwrap();

        assert_eq!(encoded, "zulu: 1\nalpha: 2\nmike: 3\n");
    }

    #[test]
    fn null_encodes_as_literal() {
        let decoded: Value = serde_yaml::from_str("a:").unwrap();
        let encoded = serde_yaml::to_string(&decoded).unwrap();

        assert_eq!(encoded, "a: null\n");
    }

    #[test]
    fn scalar_kinds_decode() {
        let decoded: Value =
            serde_yaml::from_str("bool: true\nint: -3\ndec: 1.5\nstr: hello\n").unwrap();

        let Value::Mapping(entries) = decoded else {
            panic!("expected mapping");
        };
        assert_eq!(entries["bool"], Value::Boolean(true));
        assert_eq!(entries["int"], Value::Integer(-3));
        assert_eq!(entries["dec"], Value::Decimal(1.5));
        assert_eq!(entries["str"], Value::String("hello".into()));
    }

    #[test]
    fn non_string_mapping_keys_are_rejected() {
        let result: Result<Value, _> = serde_yaml::from_str("1: one\n");
        assert!(result.is_err());
    }
}
