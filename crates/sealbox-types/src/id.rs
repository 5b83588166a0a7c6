use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ModelError, ModelResult};

/// Identifier of one logical document.
///
/// A `DocumentId` is a UUID; its canonical lowercase-hyphenated rendering is
/// both the pointer record's partition key and the blob-store object key.
/// Fresh identifiers are random (v4); caller-supplied identifiers must parse
/// as a valid UUID and are reformatted into the canonical rendering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a caller-supplied identifier, normalizing to canonical form.
    ///
    /// Any string that does not parse as a UUID is rejected with
    /// [`ModelError::InvalidIdentifier`].
    pub fn parse(raw: &str) -> ModelResult<Self> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| ModelError::InvalidIdentifier(raw.to_string()))
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Uuid renders lowercase hyphenated, which is the canonical form.
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(DocumentId::generate(), DocumentId::generate());
    }

    #[test]
    fn parse_canonical_form() {
        let id = DocumentId::parse("c9a9e7f0-1111-4a5b-8c2d-3e4f5a6b7c8d").unwrap();
        assert_eq!(id.to_string(), "c9a9e7f0-1111-4a5b-8c2d-3e4f5a6b7c8d");
    }

    #[test]
    fn parse_normalizes_case() {
        let id = DocumentId::parse("C9A9E7F0-1111-4A5B-8C2D-3E4F5A6B7C8D").unwrap();
        assert_eq!(id.to_string(), "c9a9e7f0-1111-4a5b-8c2d-3e4f5a6b7c8d");
    }

    #[test]
    fn reject_non_uuid() {
        let err = DocumentId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err, ModelError::InvalidIdentifier("not-a-uuid".to_string()));
    }

    #[test]
    fn reject_empty() {
        assert!(DocumentId::parse("").is_err());
    }

    #[test]
    fn from_str_matches_parse() {
        let id: DocumentId = "c9a9e7f0-1111-4a5b-8c2d-3e4f5a6b7c8d".parse().unwrap();
        assert_eq!(id.to_string(), "c9a9e7f0-1111-4a5b-8c2d-3e4f5a6b7c8d");
    }

    #[test]
    fn serde_roundtrip() {
        let id = DocumentId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    proptest! {
        #[test]
        fn display_roundtrips_through_parse(bytes in any::<[u8; 16]>()) {
            let id = DocumentId(Uuid::from_bytes(bytes));
            let rendered = id.to_string();
            let parsed = DocumentId::parse(&rendered).unwrap();
            prop_assert_eq!(id, parsed);
            prop_assert_eq!(rendered.clone(), parsed.to_string());
        }

        #[test]
        fn arbitrary_garbage_is_rejected(s in "[^0-9a-fA-F-]{1,40}") {
            prop_assert!(DocumentId::parse(&s).is_err());
        }
    }
}
