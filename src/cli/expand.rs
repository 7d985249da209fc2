//! Expand command for Thicket.
//!
//! Shows which tags a query hits and the terms it expands to, which is the
//! quickest way to debug an alias dictionary.

use serde::Serialize;

use crate::core::AliasDictionary;
use crate::search::expand_aliases;

/// Options for the expand command.
#[derive(Debug, Clone, Default)]
pub struct ExpandOptions {
    /// Output as JSON.
    pub json: bool,
}

/// Output format for the expand command.
#[derive(Debug, Clone, Serialize)]
pub struct ExpandOutput {
    /// The query as given.
    pub query: String,
    /// Ids of the tags the query matched.
    pub tags: Vec<String>,
    /// Terms the query expands to.
    pub terms: Vec<String>,
}

/// The expand command implementation.
pub struct ExpandCommand {
    dictionary: AliasDictionary,
}

impl ExpandCommand {
    /// Create a new expand command.
    pub fn new(dictionary: AliasDictionary) -> Self {
        Self { dictionary }
    }

    /// Run the expand command with the given query.
    pub fn run(&self, query: &str) -> ExpandOutput {
        let normalized = query.trim().to_lowercase();
        let tags = self
            .dictionary
            .iter()
            .filter(|t| !normalized.is_empty() && t.matches_normalized(&normalized))
            .map(|t| t.id.clone())
            .collect();

        ExpandOutput {
            query: query.to_string(),
            tags,
            terms: expand_aliases(query, &self.dictionary).terms().to_vec(),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ExpandOutput, options: &ExpandOptions) -> String {
        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        let mut lines = Vec::new();
        if output.tags.is_empty() {
            lines.push(format!("No tag matches \"{}\"", output.query));
        } else {
            lines.push(format!("Matched tags: {}", output.tags.join(", ")));
        }
        lines.push("Terms:".to_string());
        for term in &output.terms {
            lines.push(format!("  {}", term));
        }
        lines.push(String::new());

        lines.join("\n")
    }
}
