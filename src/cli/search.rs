//! Search command for Thicket.
//!
//! Ranks every document in the project corpus against a query.

use serde::Serialize;

use crate::config::Config;
use crate::core::AliasDictionary;
use crate::search::{expand_aliases, rank_expanded, ScoredMatch};
use crate::storage::CorpusSource;

/// Options for the search command.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

/// Output format for the search command.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutput {
    /// Whether the search was successful.
    pub success: bool,
    /// The search query used.
    pub query: String,
    /// Terms the query expanded to.
    pub terms: Vec<String>,
    /// Number of results found.
    pub count: usize,
    /// The ranked results.
    pub results: Vec<ScoredMatch>,
    /// Error message if search failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchOutput {
    /// Create a successful output.
    pub fn success(
        query: impl Into<String>,
        terms: Vec<String>,
        results: Vec<ScoredMatch>,
    ) -> Self {
        let count = results.len();
        Self {
            success: true,
            query: query.into(),
            terms,
            count,
            results,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            query: query.into(),
            terms: Vec::new(),
            count: 0,
            results: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The search command implementation.
pub struct SearchCommand<S: CorpusSource> {
    corpus: S,
    config: Config,
    dictionary: AliasDictionary,
}

impl<S: CorpusSource> SearchCommand<S> {
    /// Create a new search command.
    pub fn new(corpus: S, config: Config, dictionary: AliasDictionary) -> Self {
        Self {
            corpus,
            config,
            dictionary,
        }
    }

    /// Run the search command with the given query.
    pub fn run(&self, query: &str, options: &SearchOptions) -> SearchOutput {
        let trimmed_query = query.trim();
        if trimmed_query.is_empty() {
            return SearchOutput::failure("", "Search query cannot be empty");
        }

        let documents = match self.corpus.load() {
            Ok(documents) => documents,
            Err(e) => return SearchOutput::failure(trimmed_query, e.to_string()),
        };

        let limit = options.limit.unwrap_or(self.config.search.default_limit);
        let expansion = expand_aliases(trimmed_query, &self.dictionary);
        let results = rank_expanded(&documents, &expansion, limit);

        SearchOutput::success(trimmed_query, expansion.terms().to_vec(), results)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &SearchOutput, options: &SearchOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    /// Format output as human-readable text.
    fn format_human_readable(&self, output: &SearchOutput) -> String {
        if !output.success {
            return format!(
                "Search failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        if output.results.is_empty() {
            return format!("No matches found for query: \"{}\"\n", output.query);
        }

        let mut lines = Vec::new();
        lines.push(format!(
            "Found {} match(es) for query: \"{}\"",
            output.count, output.query
        ));
        if output.terms.len() > 1 {
            lines.push(format!("Expanded to: {}", output.terms.join(", ")));
        }
        lines.push(String::new());

        for (i, result) in output.results.iter().enumerate() {
            lines.push(format!(
                "{}. [{}] {} (score: {})",
                i + 1,
                result.doc_type,
                result.title,
                result.score
            ));
            lines.push(format!("   Matched: {}", result.matched_fields.join(", ")));
            lines.push(format!("   ID: {}", result.id));
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Document, DocumentType, Tag};
    use crate::error::{Result, ThicketError};
    use crate::storage::MemoryCorpus;
    use chrono::{TimeZone, Utc};

    struct BrokenCorpus;

    impl CorpusSource for BrokenCorpus {
        fn load(&self) -> Result<Vec<Document>> {
            Err(ThicketError::corpus("unreadable corpus"))
        }
    }

    fn corpus() -> MemoryCorpus {
        let day = |d| Utc.with_ymd_and_hms(2026, 2, d, 12, 0, 0).unwrap();
        MemoryCorpus::with_documents(vec![
            Document::new(DocumentType::Decision, "d-1", "Use JWT for authentication")
                .with_field("tags", vec!["auth".to_string()])
                .with_recency(day(1)),
            Document::new(DocumentType::Pattern, "p-1", "Login retry with backoff")
                .with_field("description", "Retry failed logins with exponential backoff")
                .with_recency(day(2)),
            Document::new(DocumentType::Rule, "r-1", "Run migrations in CI")
                .with_recency(day(3)),
        ])
    }

    fn dictionary() -> AliasDictionary {
        AliasDictionary::new(vec![Tag::new(
            "auth",
            "Authentication",
            vec!["login", "jwt"],
        )])
    }

    fn command() -> SearchCommand<MemoryCorpus> {
        SearchCommand::new(corpus(), Config::default(), dictionary())
    }

    #[test]
    fn test_search_output_failure() {
        let output = SearchOutput::failure("query", "corpus error");

        assert!(!output.success);
        assert_eq!(output.count, 0);
        assert!(output.results.is_empty());
        assert_eq!(output.error, Some("corpus error".to_string()));
    }

    #[test]
    fn test_search_expands_aliases() {
        let output = command().run("auth", &SearchOptions::default());

        assert!(output.success);
        assert!(output.terms.contains(&"login".to_string()));
        let ids: Vec<&str> = output.results.iter().map(|r| r.id.as_str()).collect();
        assert!(ids.contains(&"d-1"));
        assert!(ids.contains(&"p-1"));
        assert!(!ids.contains(&"r-1"));
    }

    #[test]
    fn test_search_tolerates_typos() {
        let output = command().run("migratons", &SearchOptions::default());

        assert!(output.success);
        assert_eq!(output.results.first().map(|r| r.id.as_str()), Some("r-1"));
    }

    #[test]
    fn test_search_respects_limit() {
        let options = SearchOptions {
            limit: Some(1),
            ..Default::default()
        };

        let output = command().run("auth", &options);

        assert_eq!(output.count, 1);
        assert_eq!(output.results.len(), 1);
    }

    #[test]
    fn test_search_empty_query_fails() {
        let output = command().run("   ", &SearchOptions::default());

        assert!(!output.success);
        assert!(output.error.unwrap().contains("empty"));
    }

    #[test]
    fn test_search_broken_corpus_fails() {
        let cmd = SearchCommand::new(BrokenCorpus, Config::default(), dictionary());

        let output = cmd.run("auth", &SearchOptions::default());

        assert!(!output.success);
        assert!(output.error.unwrap().contains("unreadable corpus"));
    }

    #[test]
    fn test_format_output_quiet() {
        let cmd = command();
        let options = SearchOptions {
            quiet: true,
            ..Default::default()
        };

        let output = cmd.run("auth", &options);

        assert!(cmd.format_output(&output, &options).is_empty());
    }

    #[test]
    fn test_format_output_json() {
        let cmd = command();
        let options = SearchOptions {
            json: true,
            ..Default::default()
        };

        let output = cmd.run("migrations", &options);
        let formatted = cmd.format_output(&output, &options);

        let parsed: serde_json::Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["results"][0]["type"], "rule");
        assert_eq!(parsed["results"][0]["matchedFields"][0], "title");
    }

    #[test]
    fn test_format_output_human_readable() {
        let cmd = command();
        let options = SearchOptions::default();

        let output = cmd.run("auth", &options);
        let formatted = cmd.format_output(&output, &options);

        assert!(formatted.contains("match(es) for query: \"auth\""));
        assert!(formatted.contains("Expanded to: auth"));
        assert!(formatted.contains("ID: d-1"));
    }

    #[test]
    fn test_format_output_no_results() {
        let cmd = command();
        let options = SearchOptions::default();

        let output = cmd.run("kubernetes", &options);

        assert!(cmd
            .format_output(&output, &options)
            .contains("No matches found"));
    }
}
