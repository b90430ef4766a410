//! the placeholder resolution walk
//!
//! Walks a decoded document depth-first and replaces every placeholder
//! scalar with the value stored under its lookup key. Replacement is
//! single-pass: a substituted value is taken as-is and never re-scanned for
//! further placeholders, so a placeholder may widen an entry from a scalar
//! to a whole sequence or mapping.
//!
//! The walk consumes its input and builds a fresh tree, so a failed run
//! never leaves a half-substituted document behind. The first error aborts
//! the whole walk.
use crate::overrides::OverrideStore;
use crate::pattern::PlaceholderPattern;
use crate::value::Value;
use indexmap::IndexMap;

/// Maximum mapping nesting the walk will follow
///
/// The document model is a tree so cycles are impossible, but decoded input
/// can still be pathologically deep.
pub const MAX_DEPTH: usize = 128;

/// Resolve all placeholders in `doc` against `store`
///
/// The top level of a document is expected to be a mapping; any other root
/// has nothing to substitute into and is returned unchanged.
pub fn resolve(
    doc: Value,
    store: &OverrideStore,
    pattern: &PlaceholderPattern,
) -> Result<Value, ResolveError> {
    match doc {
        Value::Mapping(entries) => Ok(Value::Mapping(resolve_mapping(entries, store, pattern, 0)?)),
        other => Ok(other),
    }
}

fn resolve_mapping(
    entries: IndexMap<String, Value>,
    store: &OverrideStore,
    pattern: &PlaceholderPattern,
    depth: usize,
) -> Result<IndexMap<String, Value>, ResolveError> {
    if depth > MAX_DEPTH {
        return Err(ResolveError::DepthExceeded);
    }

    entries
        .into_iter()
        .map(|(key, value)| Ok((key, resolve_value(value, store, pattern, depth)?)))
        .collect()
}

fn resolve_value(
    value: Value,
    store: &OverrideStore,
    pattern: &PlaceholderPattern,
    depth: usize,
) -> Result<Value, ResolveError> {
    match value {
        // A null entry can never be a placeholder itself. It may still be
        // the resolved result of one, see resolve_scalar.
        Value::Null => Ok(Value::Null),
        Value::Mapping(entries) => Ok(Value::Mapping(resolve_mapping(
            entries,
            store,
            pattern,
            depth + 1,
        )?)),
        Value::Sequence(elements) => resolve_sequence(elements, store, pattern, depth),
        scalar => resolve_scalar(scalar, store, pattern),
    }
}

/// Substitute each sequence element on its own
///
/// Mappings recurse, string elements are replaced in place, other scalars
/// pass through untouched. Sequences of sequences are rejected.
fn resolve_sequence(
    elements: Vec<Value>,
    store: &OverrideStore,
    pattern: &PlaceholderPattern,
    depth: usize,
) -> Result<Value, ResolveError> {
    let elements = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::Sequence(_) => Err(ResolveError::NestedSequence { index }),
            Value::Mapping(entries) => Ok(Value::Mapping(resolve_mapping(
                entries,
                store,
                pattern,
                depth + 1,
            )?)),
            Value::String(element) => resolve_scalar(Value::String(element), store, pattern),
            other => Ok(other),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Value::Sequence(elements))
}

/// The substitution step for a single scalar
///
/// The looked-up value replaces the scalar as-is, whatever its shape.
fn resolve_scalar(
    value: Value,
    store: &OverrideStore,
    pattern: &PlaceholderPattern,
) -> Result<Value, ResolveError> {
    let Some(key) = pattern.key_for(&value) else {
        return Ok(value);
    };

    match store.get(key) {
        Some(replacement) => {
            tracing::trace!(key, "placeholder resolved");
            Ok(replacement.clone())
        }
        None => Err(ResolveError::MissingOverride {
            key: key.to_string(),
            placeholder: value.as_str().unwrap_or_default().to_string(),
        }),
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ResolveError {
    #[error("missing override for {placeholder:?} (key {key:?})")]
    MissingOverride { key: String, placeholder: String },
    #[error("sequences of sequences are not supported (element {index})")]
    NestedSequence { index: usize },
    #[error("document nesting exceeds {MAX_DEPTH} levels")]
    DepthExceeded,
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).expect("document must parse")
    }

    fn store(yaml: &str) -> OverrideStore {
        OverrideStore::build(doc(yaml), &[]).expect("store must build")
    }

    fn resolve_str(input: &str, parts: &str) -> Result<Value, ResolveError> {
        resolve(doc(input), &store(parts), &PlaceholderPattern::default())
    }

    #[test]
    fn identity_without_placeholders() {
        let resolved = resolve_str("a: b\nn: 42\nflag: true", "hello: hi").unwrap();
        assert_eq!(resolved, doc("a: b\nn: 42\nflag: true"));
    }

    #[test]
    fn scalar_substitution() {
        let resolved = resolve_str("a: ~hello~", "hello: hi").unwrap();
        assert_eq!(resolved, doc("a: hi"));
    }

    #[test]
    fn null_resolution() {
        let resolved = resolve_str("a: ~hello~", "hello:").unwrap();
        assert_eq!(resolved, doc("a: null"));
    }

    #[test]
    fn null_entries_are_left_alone() {
        let resolved = resolve_str("a:", "hello: hi").unwrap();
        assert_eq!(resolved, doc("a: null"));
    }

    #[test]
    fn widening_to_sequence() {
        let resolved = resolve_str("a: ~hello~", "hello:\n- 1\n- 2").unwrap();
        assert_eq!(resolved, doc("a:\n- 1\n- 2"));
    }

    #[test]
    fn widening_to_mapping() {
        let resolved = resolve_str("a: ~hello~", "hello:\n  one: 1\n  two: 2").unwrap();
        assert_eq!(resolved, doc("a:\n  one: 1\n  two: 2"));
    }

    #[test]
    fn substitution_is_single_pass() {
        // the substituted value itself looks like a placeholder but is not
        // re-resolved
        let resolved = resolve_str("a: ~hello~", "hello: ~other~\nother: nope").unwrap();
        assert_eq!(resolved, doc("a: ~other~"));
    }

    #[test]
    fn missing_key_fails_fast() {
        let err = resolve_str("a: ~hello~", "").unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingOverride {
                key: "hello".to_string(),
                placeholder: "~hello~".to_string(),
            }
        );
    }

    #[test]
    fn nested_mappings() {
        let resolved = resolve_str("a:\n  b:\n    c: ~c~", "c:\n  one: 1\n  two: 2").unwrap();
        assert_eq!(resolved, doc("a:\n  b:\n    c:\n      one: 1\n      two: 2"));
    }

    #[test]
    fn mappings_inside_sequences() {
        let resolved = resolve_str("a:\n  b:\n  - c: ~c~\n  - d: ~d~", "c: c\nd: d").unwrap();
        assert_eq!(resolved, doc("a:\n  b:\n  - c: c\n  - d: d"));
    }

    #[test]
    fn string_elements_inside_sequences() {
        let resolved = resolve_str("a:\n- ~one~\n- keep\n- 3", "one: 1").unwrap();
        assert_eq!(resolved, doc("a:\n- 1\n- keep\n- 3"));
    }

    #[test]
    fn sequence_element_substitution_may_widen() {
        let resolved = resolve_str("a:\n- ~hello~", "hello:\n  one: 1").unwrap();
        assert_eq!(resolved, doc("a:\n- one: 1"));
    }

    #[test]
    fn nested_sequences_are_rejected() {
        let err = resolve_str("a:\n- - 1\n  - 2", "").unwrap_err();
        assert_eq!(err, ResolveError::NestedSequence { index: 0 });
    }

    #[test]
    fn scalar_root_passes_through() {
        let resolved = resolve(
            Value::from("~hello~"),
            &store("hello: hi"),
            &PlaceholderPattern::default(),
        )
        .unwrap();
        assert_eq!(resolved, Value::from("~hello~"));
    }

    #[test]
    fn pathological_nesting_is_rejected() {
        let mut nested = Value::from("leaf");
        for _ in 0..(MAX_DEPTH + 2) {
            let mut wrapper = indexmap::IndexMap::new();
            wrapper.insert("a".to_string(), nested);
            nested = Value::Mapping(wrapper);
        }

        let err = resolve(nested, &store(""), &PlaceholderPattern::default()).unwrap_err();
        assert_eq!(err, ResolveError::DepthExceeded);
    }
}
