//! multi-document handling
//!
//! Input text may hold several documents separated by a `---` line. Each
//! segment is decoded, resolved against the same override store and encoded
//! independently, then the encoded segments are rejoined with the separator
//! in their original order. The first failing segment aborts the whole run
//! and is reported by index.
use crate::codec::{DecodeError, DocumentCodec, EncodeError};
use crate::overrides::OverrideStore;
use crate::pattern::PlaceholderPattern;
use crate::substitute::{self, ResolveError};

/// The literal line separating documents
pub const DOCUMENT_SEPARATOR: &str = "---";

/// Resolve every document in `text`
pub fn resolve_all(
    text: &str,
    store: &OverrideStore,
    pattern: &PlaceholderPattern,
    codec: &dyn DocumentCodec,
) -> Result<String, MultiDocError> {
    let segments = split_documents(text, DOCUMENT_SEPARATOR);
    let count = segments.len();
    tracing::debug!(documents = count, "resolving input");

    let mut encoded = Vec::with_capacity(count);
    for (index, segment) in segments.iter().enumerate() {
        let fail = |source: SegmentError| MultiDocError::new(index, count, source);

        let doc = codec.decode(segment).map_err(|e| fail(e.into()))?;
        let resolved = substitute::resolve(doc, store, pattern).map_err(|e| fail(e.into()))?;
        encoded.push(codec.encode(&resolved).map_err(|e| fail(e.into()))?);
    }

    Ok(encoded.join(&format!("{DOCUMENT_SEPARATOR}\n")))
}

/// Split on separator lines, keeping segment count and order
///
/// N separator lines always yield N+1 segments, so empty documents survive
/// the round trip.
fn split_documents(text: &str, separator: &str) -> Vec<String> {
    let mut segments = vec![String::new()];

    for line in text.lines() {
        if line == separator {
            segments.push(String::new());
            continue;
        }

        let segment = segments.last_mut().expect("segments is never empty");
        segment.push_str(line);
        segment.push('\n');
    }

    segments
}

#[derive(thiserror::Error, derive_new::new, Debug)]
#[error("failed to resolve document {index} of {count}")]
pub struct MultiDocError {
    pub index: usize,
    pub count: usize,
    #[source]
    pub source: SegmentError,
}

#[derive(thiserror::Error, Debug)]
pub enum SegmentError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::YamlCodec;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn store(yaml: &str) -> OverrideStore {
        let base: Value = serde_yaml::from_str(yaml).expect("base must parse");
        OverrideStore::build(base, &[]).expect("store must build")
    }

    fn resolve_all_yaml(text: &str, parts: &str) -> Result<String, MultiDocError> {
        resolve_all(
            text,
            &store(parts),
            &PlaceholderPattern::default(),
            &YamlCodec,
        )
    }

    #[test]
    fn single_document() {
        let output = resolve_all_yaml("a: ~hello~", "hello: hi").unwrap();
        assert_eq!(output, "a: hi\n");
    }

    #[test]
    fn multiple_documents_share_the_store() {
        let output = resolve_all_yaml("a: ~a~\n---\nb: ~b~\n---\nc: ~c~", "a: 1\nb: 2\nc: 3").unwrap();
        assert_eq!(output, "a: 1\n---\nb: 2\n---\nc: 3\n");
    }

    #[test]
    fn segment_order_is_preserved() {
        let output = resolve_all_yaml("b: ~b~\n---\na: ~a~", "a: 1\nb: 2").unwrap();
        assert_eq!(output, "b: 2\n---\na: 1\n");
    }

    #[test]
    fn failing_segment_is_reported_by_index() {
        let err = resolve_all_yaml("a: ~a~\n---\nb: ~missing~", "a: 1").unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.count, 2);
        assert!(matches!(
            err.source,
            SegmentError::Resolve(ResolveError::MissingOverride { .. })
        ));
    }

    #[test]
    fn split_keeps_empty_segments() {
        let segments = split_documents("a: 1\n---\n---\nb: 2", DOCUMENT_SEPARATOR);
        assert_eq!(segments, vec!["a: 1\n", "", "b: 2\n"]);
    }

    #[test]
    fn separator_must_be_the_whole_line() {
        let segments = split_documents("a: --- not a separator\nb: 2", DOCUMENT_SEPARATOR);
        assert_eq!(segments.len(), 1);
    }
}
