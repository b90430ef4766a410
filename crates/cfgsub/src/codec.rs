//! document text decoding and encoding
//!
//! A [DocumentCodec] turns raw text into a [Value] tree and back. The
//! resolution engine never touches text itself, it only works on decoded
//! trees, so swapping the wire format is a matter of picking a codec.
//!
//! A completely empty input decodes to an empty mapping rather than an
//! error, so an absent overrides file behaves like an empty one.
use crate::value::Value;

pub trait DocumentCodec {
    fn decode(&self, text: &str) -> Result<Value, DecodeError>;
    fn encode(&self, value: &Value) -> Result<String, EncodeError>;
}

/// YAML wire format, the default
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlCodec;

impl DocumentCodec for YamlCodec {
    fn decode(&self, text: &str) -> Result<Value, DecodeError> {
        if text.trim().is_empty() {
            return Ok(Value::empty_mapping());
        }

        let value: Value = serde_yaml::from_str(text)?;

        // A document holding a single `~` or `null` scalar decodes to Null.
        // Treat it like the empty document.
        if value == Value::Null {
            return Ok(Value::empty_mapping());
        }

        Ok(value)
    }

    fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        Ok(serde_yaml::to_string(value)?)
    }
}

/// Strict JSON wire format
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl DocumentCodec for JsonCodec {
    fn decode(&self, text: &str) -> Result<Value, DecodeError> {
        if text.trim().is_empty() {
            return Ok(Value::empty_mapping());
        }

        let value: Value = serde_json::from_str(text)?;

        if value == Value::Null {
            return Ok(Value::empty_mapping());
        }

        Ok(value)
    }

    fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        let mut text = serde_json::to_string_pretty(value)?;
        text.push('\n');
        Ok(text)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("malformed yaml document")]
    Yaml(#[from] serde_yaml::Error),
    #[error("malformed json document")]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum EncodeError {
    #[error("unable to encode document as yaml")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unable to encode document as json")]
    Json(#[from] serde_json::Error),
}
