//! Per-document-type field weights.
//!
//! Every type uses the same tiers, so a title hit always outranks a body hit:
//! - Title: 3
//! - Classification tags: 2
//! - Free-text body or message content: 1
//!
//! Fields not listed for a type contribute nothing.

use crate::core::{DocumentType, TITLE_FIELD};

/// Weight of the primary title/summary field.
pub const TITLE_WEIGHT: u32 = 3;
/// Weight of classification tag fields.
pub const TAGS_WEIGHT: u32 = 2;
/// Weight of free-text body fields.
pub const BODY_WEIGHT: u32 = 1;

/// Name of the tag list field shared by all document types.
pub const TAGS_FIELD: &str = "tags";

const SESSION_FIELDS: &[(&str, u32)] = &[
    (TITLE_FIELD, TITLE_WEIGHT),
    (TAGS_FIELD, TAGS_WEIGHT),
    ("summary", BODY_WEIGHT),
    ("messages", BODY_WEIGHT),
];

const DECISION_FIELDS: &[(&str, u32)] = &[
    (TITLE_FIELD, TITLE_WEIGHT),
    (TAGS_FIELD, TAGS_WEIGHT),
    ("context", BODY_WEIGHT),
    ("reasoning", BODY_WEIGHT),
];

const PATTERN_FIELDS: &[(&str, u32)] = &[
    (TITLE_FIELD, TITLE_WEIGHT),
    (TAGS_FIELD, TAGS_WEIGHT),
    ("description", BODY_WEIGHT),
    ("example", BODY_WEIGHT),
];

const RULE_FIELDS: &[(&str, u32)] = &[
    (TITLE_FIELD, TITLE_WEIGHT),
    (TAGS_FIELD, TAGS_WEIGHT),
    ("content", BODY_WEIGHT),
];

/// Searchable fields of a document type with their weights, in scoring order.
pub fn field_weights(doc_type: DocumentType) -> &'static [(&'static str, u32)] {
    match doc_type {
        DocumentType::Session => SESSION_FIELDS,
        DocumentType::Decision => DECISION_FIELDS,
        DocumentType::Pattern => PATTERN_FIELDS,
        DocumentType::Rule => RULE_FIELDS,
    }
}

/// Weight of one field for a document type; 0 when unmapped.
pub fn field_weight(doc_type: DocumentType, field: &str) -> u32 {
    field_weights(doc_type)
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, weight)| *weight)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_title_first() {
        for doc_type in DocumentType::all() {
            let fields = field_weights(*doc_type);
            assert_eq!(fields[0], (TITLE_FIELD, TITLE_WEIGHT));
        }
    }

    #[test]
    fn test_tier_ordering_is_shared() {
        for doc_type in DocumentType::all() {
            assert_eq!(field_weight(*doc_type, TAGS_FIELD), TAGS_WEIGHT);
            for (name, weight) in field_weights(*doc_type) {
                assert!(*weight <= TITLE_WEIGHT, "{name} outweighs title");
            }
        }
        assert!(TITLE_WEIGHT > TAGS_WEIGHT);
        assert!(TAGS_WEIGHT > BODY_WEIGHT);
    }

    #[test]
    fn test_body_fields() {
        assert_eq!(field_weight(DocumentType::Session, "messages"), BODY_WEIGHT);
        assert_eq!(field_weight(DocumentType::Decision, "reasoning"), BODY_WEIGHT);
        assert_eq!(field_weight(DocumentType::Pattern, "example"), BODY_WEIGHT);
        assert_eq!(field_weight(DocumentType::Rule, "content"), BODY_WEIGHT);
    }

    #[test]
    fn test_unmapped_field_weighs_zero() {
        assert_eq!(field_weight(DocumentType::Rule, "reasoning"), 0);
        assert_eq!(field_weight(DocumentType::Session, "author"), 0);
    }

    #[test]
    fn test_no_duplicate_fields() {
        for doc_type in DocumentType::all() {
            let fields = field_weights(*doc_type);
            for (i, (name, _)) in fields.iter().enumerate() {
                assert!(fields[i + 1..].iter().all(|(other, _)| other != name));
            }
        }
    }
}
