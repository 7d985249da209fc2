//! Automatic context injection.
//!
//! Runs on every new user prompt. The prompt (bounded in length) is used as
//! the query; only strong matches of allowed types survive, and at most a few
//! are rendered into a short background block. When nothing qualifies the
//! result is `None`, which callers treat as the normal, silent case.

use crate::config::InjectionConfig;
use crate::core::{AliasDictionary, Document, DocumentType};
use crate::search::rank::{rank, ScoredMatch};

/// Opening line of a rendered context block.
pub const CONTEXT_HEADER: &str = "Related prior material (background only, may be outdated):";

/// Threshold and type filter for automatic context injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionPolicy {
    /// Prompts shorter than this (in chars, after trimming) are ignored.
    pub min_input_chars: usize,
    /// Prompts are cut to this many chars before searching.
    pub max_input_chars: usize,
    /// Matches scoring below this are dropped.
    pub relevance_floor: u32,
    /// At most this many matches are rendered.
    pub max_matches: usize,
    /// Document types eligible for injection.
    pub allowed_types: Vec<DocumentType>,
}

impl Default for InjectionPolicy {
    fn default() -> Self {
        Self::from_config(&InjectionConfig::default())
    }
}

impl InjectionPolicy {
    /// Build a policy from configuration.
    pub fn from_config(config: &InjectionConfig) -> Self {
        Self {
            min_input_chars: config.min_input_chars,
            max_input_chars: config.max_input_chars,
            relevance_floor: config.relevance_floor,
            max_matches: config.max_matches,
            allowed_types: config.allowed_types.clone(),
        }
    }

    /// Turn raw user input into a bounded query.
    ///
    /// Returns `None` for input too short to search on.
    pub fn prepare_query(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.chars().count() < self.min_input_chars.max(1) {
            return None;
        }
        Some(trimmed.chars().take(self.max_input_chars).collect())
    }

    /// Keep qualifying matches, best first, up to `max_matches`.
    ///
    /// Input must already be in rank order.
    pub fn select(&self, matches: Vec<ScoredMatch>) -> Vec<ScoredMatch> {
        matches
            .into_iter()
            .filter(|m| m.score >= self.relevance_floor)
            .filter(|m| self.allowed_types.contains(&m.doc_type))
            .take(self.max_matches)
            .collect()
    }

    /// Render matches into a context block, or `None` when there are none.
    pub fn render(&self, matches: &[ScoredMatch]) -> Option<String> {
        if matches.is_empty() {
            return None;
        }

        let mut lines = Vec::with_capacity(matches.len() + 1);
        lines.push(CONTEXT_HEADER.to_string());
        for m in matches {
            lines.push(format!(
                "- [{}] {}: {} (matched: {})",
                m.doc_type,
                m.id,
                m.title,
                m.matched_fields.join(", ")
            ));
        }

        Some(lines.join("\n"))
    }

    /// Run the whole policy against a corpus.
    ///
    /// The bounded prompt is one query term, not a bag of words. It matches a
    /// document only when it is close to a title, tag or field text (or names a
    /// tag), so a full sentence that merely mentions a topic injects nothing.
    pub fn inject(
        &self,
        input: &str,
        corpus: &[Document],
        dictionary: &AliasDictionary,
    ) -> Option<String> {
        if self.max_matches == 0 || self.allowed_types.is_empty() {
            return None;
        }

        let query = self.prepare_query(input)?;

        // Filter before truncating so a strong match of an allowed type is not
        // pushed out by a disallowed one.
        let ranked = rank(corpus, &query, dictionary, usize::MAX);
        let selected = self.select(ranked);

        tracing::debug!(selected = selected.len(), "context injection");

        self.render(&selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn scored(doc_type: DocumentType, id: &str, score: u32) -> ScoredMatch {
        ScoredMatch {
            doc_type,
            id: id.to_string(),
            title: format!("Title of {id}"),
            score,
            matched_fields: vec!["title".to_string()],
            recency: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn policy(floor: u32) -> InjectionPolicy {
        InjectionPolicy {
            min_input_chars: 3,
            max_input_chars: 50,
            relevance_floor: floor,
            max_matches: 3,
            allowed_types: DocumentType::all().to_vec(),
        }
    }

    #[test]
    fn test_select_applies_floor() {
        let matches = vec![
            scored(DocumentType::Decision, "strong", 5),
            scored(DocumentType::Decision, "weak", 1),
        ];

        let selected = policy(3).select(matches);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "strong");
    }

    #[test]
    fn test_render_single_qualifying_match() {
        let policy = policy(3);
        let matches = vec![
            scored(DocumentType::Decision, "strong", 5),
            scored(DocumentType::Decision, "weak", 1),
        ];

        let block = policy.render(&policy.select(matches)).unwrap();

        assert!(block.contains("strong"));
        assert!(!block.contains("weak"));
    }

    #[test]
    fn test_no_qualifying_matches_renders_nothing() {
        let policy = policy(3);
        let matches = vec![scored(DocumentType::Decision, "weak", 1)];

        assert_eq!(policy.render(&policy.select(matches)), None);
    }

    #[test]
    fn test_select_filters_types() {
        let mut policy = policy(0);
        policy.allowed_types = vec![DocumentType::Decision];
        let matches = vec![
            scored(DocumentType::Session, "s-1", 50),
            scored(DocumentType::Decision, "d-1", 10),
        ];

        let selected = policy.select(matches);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "d-1");
    }

    #[test]
    fn test_select_caps_count() {
        let matches = (0..6)
            .map(|i| scored(DocumentType::Rule, &format!("r-{i}"), 20 - i))
            .collect();

        let selected = policy(1).select(matches);

        let ids: Vec<&str> = selected.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["r-0", "r-1", "r-2"]);
    }

    #[test]
    fn test_render_format() {
        let mut m = scored(DocumentType::Pattern, "p-7", 30);
        m.matched_fields = vec!["title".to_string(), "tags".to_string()];

        let block = policy(1).render(&[m]).unwrap();

        assert_eq!(
            block,
            format!("{CONTEXT_HEADER}\n- [pattern] p-7: Title of p-7 (matched: title, tags)")
        );
    }

    #[test]
    fn test_prepare_query_min_length() {
        let policy = policy(1);
        assert_eq!(policy.prepare_query("  ok "), None);
        assert_eq!(policy.prepare_query("cache"), Some("cache".to_string()));
    }

    #[test]
    fn test_prepare_query_caps_length_in_chars() {
        let mut policy = policy(1);
        policy.max_input_chars = 4;

        assert_eq!(policy.prepare_query("認証フロー設計"), Some("認証フロ".to_string()));
    }

    #[test]
    fn test_inject_end_to_end() {
        let corpus = vec![
            Document::new(DocumentType::Decision, "d-1", "cache invalidation")
                .with_recency(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()),
            Document::new(DocumentType::Session, "s-1", "cache invalidation")
                .with_recency(Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap()),
        ];
        let mut policy = policy(10);
        policy.allowed_types = vec![DocumentType::Decision];

        let block = policy
            .inject("cache invalidation", &corpus, &AliasDictionary::empty())
            .unwrap();

        assert!(block.contains("[decision] d-1"));
        assert!(!block.contains("s-1"));
    }

    #[test]
    fn test_inject_matches_whole_prompt_not_words() {
        let corpus = vec![Document::new(DocumentType::Decision, "d-1", "cache invalidation")];
        let policy = InjectionPolicy::default();

        assert!(policy
            .inject("cache invalidation", &corpus, &AliasDictionary::empty())
            .is_some());
        assert_eq!(
            policy.inject(
                "how do we handle cache invalidation here?",
                &corpus,
                &AliasDictionary::empty()
            ),
            None
        );
    }

    #[test]
    fn test_inject_short_input_is_silent() {
        let corpus = vec![Document::new(DocumentType::Decision, "d-1", "ok")];
        assert_eq!(
            policy(1).inject("ok", &corpus, &AliasDictionary::empty()),
            None
        );
    }

    #[test]
    fn test_inject_without_matches_is_silent() {
        let corpus = vec![Document::new(DocumentType::Decision, "d-1", "Build pipeline")];
        assert_eq!(
            policy(1).inject("kubernetes", &corpus, &AliasDictionary::empty()),
            None
        );
    }

    #[test]
    fn test_default_policy_matches_config_defaults() {
        let policy = InjectionPolicy::default();
        let config = InjectionConfig::default();
        assert_eq!(policy.relevance_floor, config.relevance_floor);
        assert_eq!(policy.max_matches, 3);
        assert!(!policy.allowed_types.contains(&DocumentType::Session));
    }
}
