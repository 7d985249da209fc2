//! Relevance ranking across a heterogeneous corpus.
//!
//! The query is expanded once. Every document is then scored field by field:
//! each `(field, weight)` of its type is compared against every term of the
//! expansion set, and `weight x similarity` is summed into the document total.
//!
//! Ordering is fully deterministic: score descending, then most recent first,
//! then id ascending.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::{AliasDictionary, Document, DocumentType};
use crate::search::expand::{expand_aliases, ExpansionSet};
use crate::search::similarity::calculate_similarity;
use crate::search::weights::field_weights;

/// A document with its relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch {
    /// Kind of document.
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Document id.
    pub id: String,
    /// Document title.
    pub title: String,
    /// Total weighted score (always > 0 in ranked output).
    pub score: u32,
    /// Labels of the fields that matched, first match first.
    pub matched_fields: Vec<String>,
    /// Document recency, used only as a tie-breaker.
    #[serde(skip)]
    pub recency: DateTime<Utc>,
}

impl ScoredMatch {
    /// Deterministic ranking order: score desc, recency desc, id asc.
    pub fn rank_order(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.recency.cmp(&self.recency))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Score one document against an expansion set.
///
/// For list fields the best-scoring item counts for each term.
pub fn score_document(document: &Document, expansion: &ExpansionSet) -> ScoredMatch {
    let mut score = 0u32;
    let mut matched_fields: Vec<String> = Vec::new();

    for (field, weight) in field_weights(document.doc_type) {
        let mut field_matched = false;

        for term in expansion.iter() {
            let best = document
                .field_texts(field)
                .map(|text| calculate_similarity(text, term))
                .max()
                .unwrap_or(0);

            if best > 0 {
                field_matched = true;
                score = score.saturating_add(weight.saturating_mul(best));
            }
        }

        if field_matched && !matched_fields.iter().any(|f| f == field) {
            matched_fields.push((*field).to_string());
        }
    }

    ScoredMatch {
        doc_type: document.doc_type,
        id: document.id.clone(),
        title: document.title.clone(),
        score,
        matched_fields,
        recency: document.recency,
    }
}

/// Rank a corpus against an already expanded query.
///
/// Invalid documents are skipped, zero scores dropped, and the result is
/// truncated to `limit` after sorting.
pub fn rank_expanded(
    corpus: &[Document],
    expansion: &ExpansionSet,
    limit: usize,
) -> Vec<ScoredMatch> {
    let mut skipped = 0usize;

    let mut matches: Vec<ScoredMatch> = corpus
        .iter()
        .filter(|doc| match doc.validate() {
            Ok(()) => true,
            Err(reason) => {
                skipped += 1;
                tracing::debug!(id = %doc.id, %reason, "skipping invalid document");
                false
            }
        })
        .map(|doc| score_document(doc, expansion))
        .filter(|m| m.score > 0)
        .collect();

    matches.sort_by(ScoredMatch::rank_order);
    matches.truncate(limit);

    tracing::debug!(
        documents = corpus.len(),
        skipped,
        matches = matches.len(),
        "ranked corpus"
    );

    matches
}

/// Rank a corpus against a raw query.
///
/// Blank queries and empty corpora produce no matches.
pub fn rank(
    corpus: &[Document],
    query: &str,
    dictionary: &AliasDictionary,
    limit: usize,
) -> Vec<ScoredMatch> {
    if query.trim().is_empty() || corpus.is_empty() || limit == 0 {
        return Vec::new();
    }

    let expansion = expand_aliases(query, dictionary);
    rank_expanded(corpus, &expansion, limit)
}
