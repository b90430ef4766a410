//! override-source merging
//!
//! Builds the lookup table consulted during substitution from a decoded
//! overrides document plus any ad-hoc `key=value` fields. Ad-hoc fields are
//! applied after the document, in the order given, and win on key collision.
//!
//! Once built the store is read-only for the remainder of the run. Keys
//! referenced by the input document are not validated here; a missing key
//! only surfaces when the substitutor actually looks it up.
use crate::value::Value;
use indexmap::IndexMap;

/// The merged lookup table of keys to replacement values
#[derive(derive_new::new, Debug, Default)]
pub struct OverrideStore {
    entries: IndexMap<String, Value>,
}

impl OverrideStore {
    /// Merge a base overrides document with ad-hoc fields
    ///
    /// `base` must be a mapping or null (the decoded form of an absent or
    /// empty overrides source).
    pub fn build(base: Value, fields: &[String]) -> Result<Self, OverrideError> {
        let mut entries = match base {
            Value::Mapping(entries) => entries,
            Value::Null => IndexMap::default(),
            _ => return Err(OverrideError::BaseNotMapping),
        };

        for field in fields {
            let (key, value) = parse_field(field)?;
            entries.insert(key.to_string(), Value::from(value));
        }

        tracing::debug!(
            entries = entries.len(),
            adhoc = fields.len(),
            "override store built"
        );

        Ok(Self::new(entries))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split an ad-hoc field on its first `=` only, so values containing `=`
/// stay intact.
fn parse_field(field: &str) -> Result<(&str, &str), OverrideError> {
    field
        .split_once('=')
        .ok_or_else(|| OverrideError::AdhocFormat {
            field: field.to_string(),
        })
}

#[derive(thiserror::Error, Debug)]
pub enum OverrideError {
    #[error("override source must be a mapping at the top level")]
    BaseNotMapping,
    #[error("ad-hoc fields must be in the format key=value, got {field:?}")]
    AdhocFormat { field: String },
}
