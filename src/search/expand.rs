//! Query expansion through the alias dictionary.
//!
//! A query that names a tag (by id, label or any alias) expands to every name
//! of that tag, so `auth`, `login` and `認証` all find the same documents.
//! Expansion is exact: no fuzzy matching happens at this layer.

use serde::Serialize;

use crate::core::AliasDictionary;

/// Ordered set of equivalent search terms.
///
/// Never empty. Membership is case-insensitive; stored terms keep the casing
/// they were declared with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExpansionSet {
    terms: Vec<String>,
}

impl ExpansionSet {
    /// Create a set holding only the given query.
    pub fn single(query: impl Into<String>) -> Self {
        Self {
            terms: vec![query.into()],
        }
    }

    /// Insert a term unless an equal term (ignoring case) is present.
    ///
    /// Returns whether the term was added.
    fn insert(&mut self, term: &str) -> bool {
        if term.trim().is_empty() || self.contains(term) {
            return false;
        }
        self.terms.push(term.to_string());
        true
    }

    /// Check membership, ignoring case.
    pub fn contains(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        self.terms
            .iter()
            .any(|t| t.trim().to_lowercase() == needle)
    }

    /// Iterate over the terms in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// The terms as a slice.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of terms (always at least one).
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Expand a raw query into its set of equivalent terms.
///
/// Every tag whose id, label or alias equals the query (ignoring case and
/// surrounding whitespace) contributes all of its names. When no tag
/// matches, the set holds exactly the original query.
pub fn expand_aliases(query: &str, dictionary: &AliasDictionary) -> ExpansionSet {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        return ExpansionSet::single(query);
    }

    let mut expansion: Option<ExpansionSet> = None;
    let mut matched_tags = 0usize;

    for tag in dictionary.iter().filter(|t| t.matches_normalized(&normalized)) {
        matched_tags += 1;
        let set = expansion.get_or_insert_with(|| ExpansionSet { terms: Vec::new() });
        for name in tag.names() {
            set.insert(name);
        }
    }

    match expansion {
        Some(set) if !set.is_empty() => {
            tracing::debug!(
                query,
                matched_tags,
                terms = set.len(),
                "expanded query through alias dictionary"
            );
            set
        }
        _ => ExpansionSet::single(query),
    }
}
