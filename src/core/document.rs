//! Knowledge base document types for Thicket.
//!
//! A document is one entry of the knowledge base: a past work session, a
//! design decision, a coding pattern or a style rule. Documents are owned by
//! the storage layer; the search engine only reads them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name under which a document's title is addressable as a field.
pub const TITLE_FIELD: &str = "title";

/// Kind of a knowledge base document.
///
/// This is a closed set; field weights are looked up with an exhaustive
/// `match` over it (see `search::weights`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// A recorded work session (summary and message log).
    Session,
    /// A design decision with its context and reasoning.
    Decision,
    /// A reusable coding pattern.
    Pattern,
    /// A style or convention rule.
    Rule,
}

impl DocumentType {
    /// Get all document type variants.
    pub fn all() -> &'static [DocumentType] {
        &[
            DocumentType::Session,
            DocumentType::Decision,
            DocumentType::Pattern,
            DocumentType::Rule,
        ]
    }

    /// Lower-case name used in serialized forms and rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Session => "session",
            DocumentType::Decision => "decision",
            DocumentType::Pattern => "pattern",
            DocumentType::Rule => "rule",
        }
    }

    /// Directory name under which documents of this type are stored.
    pub fn dir_name(&self) -> &'static str {
        match self {
            DocumentType::Session => "sessions",
            DocumentType::Decision => "decisions",
            DocumentType::Pattern => "patterns",
            DocumentType::Rule => "rules",
        }
    }

    /// Parse a type name, accepting singular or plural forms in any case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "session" | "sessions" => Some(Self::Session),
            "decision" | "decisions" => Some(Self::Decision),
            "pattern" | "patterns" => Some(Self::Pattern),
            "rule" | "rules" => Some(Self::Rule),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of one document field.
///
/// Most fields hold a single text. Repeated fields (session messages, tag
/// lists) hold a list; each item is scored separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A single text.
    Text(String),
    /// A repeated field.
    List(Vec<String>),
}

impl FieldValue {
    /// Iterate over the texts held by this value.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            FieldValue::Text(text) => std::slice::from_ref(text),
            FieldValue::List(items) => items,
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// Reason a document was rejected by [`Document::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The document id is empty or whitespace.
    EmptyId,
    /// A field has an empty name.
    EmptyFieldName,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyId => f.write_str("document id is empty"),
            ValidationError::EmptyFieldName => f.write_str("document has a field with no name"),
        }
    }
}

/// One knowledge base entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Kind of document.
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Identifier, unique within the corpus.
    pub id: String,
    /// Primary title or summary line.
    #[serde(default)]
    pub title: String,
    /// Named content fields.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
    /// Last time the document was written; newer wins ties.
    pub recency: DateTime<Utc>,
}

impl Document {
    /// Create a document with no fields, stamped with the current time.
    pub fn new(doc_type: DocumentType, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            doc_type,
            id: id.into(),
            title: title.into(),
            fields: BTreeMap::new(),
            recency: Utc::now(),
        }
    }

    /// Set a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set the recency timestamp.
    pub fn with_recency(mut self, recency: DateTime<Utc>) -> Self {
        self.recency = recency;
        self
    }

    /// Iterate the texts of a field without cloning. Unknown fields yield nothing.
    ///
    /// `title` always resolves to the document title; a `title` key inside
    /// `fields` is never read.
    pub fn field_texts<'a>(&'a self, name: &str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        if name == TITLE_FIELD {
            return Box::new(std::iter::once(self.title.as_str()));
        }
        match self.fields.get(name) {
            Some(value) => Box::new(value.texts()),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Check structural validity.
    ///
    /// Invalid documents are skipped by the search engine rather than
    /// aborting a search.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.fields.keys().any(|k| k.trim().is_empty()) {
            return Err(ValidationError::EmptyFieldName);
        }
        Ok(())
    }
}
