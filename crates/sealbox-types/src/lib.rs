//! Foundation types for Sealbox.
//!
//! This crate provides the data model of the document bucket: table schema
//! configuration, document identifiers, context-tag canonicalization, and the
//! record types mapping one logical document to its pointer row, its
//! secondary-index rows, and its blob object. Every other Sealbox crate
//! depends on `sealbox-types`.
//!
//! # Key Types
//!
//! - [`TableSchema`] — Immutable field-name and sentinel configuration
//! - [`DocumentId`] — UUID document identifier, doubles as the blob storage key
//! - [`PointerRecord`] — The primary record identifying one stored document
//! - [`ContextIndexRecord`] — Secondary-index row for tag-based lookup
//! - [`ContextQuery`] — Canonicalized tag query over the index
//! - [`DocumentBundle`] — A document payload paired with its pointer

pub mod bundle;
pub mod config;
pub mod context;
pub mod error;
pub mod id;
pub mod index;
pub mod pointer;
pub mod query;
pub mod record;

pub use bundle::DocumentBundle;
pub use config::TableSchema;
pub use context::{canonicalize_tag, is_context_key_format, validate_no_reserved_keys, Context};
pub use error::{ModelError, ModelResult};
pub use id::DocumentId;
pub use index::ContextIndexRecord;
pub use pointer::PointerRecord;
pub use query::{ContextQuery, QueryExpression};
pub use record::{RecordAttributes, RecordKey};
