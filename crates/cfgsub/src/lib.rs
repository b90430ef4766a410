//! # cfgsub - placeholder substitution for configuration documents
//!
//! `cfgsub` templates deployment configuration across environments: it takes
//! a structured input document containing placeholder scalars and replaces
//! each one with a value drawn from override sources, producing a fully
//! resolved document ready to ship.
//!
//! ## Introduction for developers
//!
//! Read this to understand how `cfgsub` works internally.
//!
//! ### Terms
//!
//! - a `placeholder` is a string scalar matching the configured pattern
//!   (default: a key wrapped in tildes, `~hello~`); the pattern's single
//!   capture group yields the `lookup key`
//! - the `override store` is the lookup table of keys to replacement values,
//!   merged from an overrides document and ad-hoc `key=value` fields
//! - a `document` is the generic value tree shared by input and override
//!   sources, see [value::Value]
//!
//! ### Decoding
//!
//! Raw text is turned into a [value::Value] tree by a [codec::DocumentCodec]
//! ([codec::YamlCodec] by default, [codec::JsonCodec] on request). An empty
//! input decodes to an empty mapping so absent override files just behave
//! like empty ones.
//!
//! ### Building the store
//!
//! [overrides::OverrideStore::build] starts from the overrides document's
//! top-level mapping and applies ad-hoc fields in order on top, so ad-hoc
//! fields win on collision. The store is immutable afterwards. Whether every
//! key referenced by the input actually exists is only checked lazily when
//! the walk looks it up.
//!
//! ### Resolution
//!
//! see [substitute::resolve]
//!
//! The walk is depth-first over mapping entries. String scalars (and string
//! elements of sequences) that match the pattern are replaced with the
//! stored value **as-is** - substitution is single-pass and may widen an
//! entry from a scalar to a sequence or mapping. A placeholder whose key is
//! missing from the store aborts the walk with
//! [substitute::ResolveError::MissingOverride]; nothing partial is returned.
//!
//! ### Multiple documents
//!
//! see [multidoc::resolve_all]
//!
//! Input text may contain several documents separated by a literal `---`
//! line. Each segment is resolved independently against the same store and
//! the encoded results are rejoined in their original order. The first
//! failing segment aborts the run, reported by index.
pub mod codec;
pub mod multidoc;
pub mod overrides;
pub mod pattern;
pub mod substitute;
pub mod value;
