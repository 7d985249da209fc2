//! Alias dictionary types.
//!
//! A tag names one concept (`auth`) with a human label (`認証`) and a list of
//! synonyms in any script. The dictionary is loaded once per process and is
//! read-only afterwards; callers pass it explicitly into query expansion.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThicketError};

/// One canonical concept and its synonyms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Canonical identifier.
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Synonyms, in declaration order.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Tag {
    /// Create a new tag.
    pub fn new(id: impl Into<String>, label: impl Into<String>, aliases: Vec<&str>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            aliases: aliases.into_iter().map(str::to_string).collect(),
        }
    }

    /// All names of this tag in declaration order: id, label, aliases.
    ///
    /// Blank entries (such as a missing label) are skipped.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str())
            .chain(std::iter::once(self.label.as_str()))
            .chain(self.aliases.iter().map(String::as_str))
            .filter(|name| !name.trim().is_empty())
    }

    /// Check whether an already lower-cased, trimmed query names this tag.
    pub fn matches_normalized(&self, normalized_query: &str) -> bool {
        self.names()
            .any(|name| name.trim().to_lowercase() == normalized_query)
    }
}

/// The read-only set of tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDictionary {
    /// Tags in declaration order.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl AliasDictionary {
    /// Create a dictionary from tags.
    pub fn new(tags: Vec<Tag>) -> Self {
        Self { tags }
    }

    /// Create an empty dictionary. Every query expands to itself.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check whether the dictionary has no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate over the tags.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// Parse a dictionary from TOML (`[[tags]]` tables).
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        let dictionary: AliasDictionary = toml::from_str(content)
            .map_err(|e| ThicketError::alias_dictionary(origin, e.to_string()))?;

        if let Some(position) = dictionary.tags.iter().position(|t| t.id.trim().is_empty()) {
            return Err(ThicketError::alias_dictionary(
                origin,
                format!("tag #{} has an empty id", position + 1),
            ));
        }

        Ok(dictionary)
    }

    /// Load a dictionary from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ThicketError::alias_dictionary(path, e.to_string()))?;
        Self::from_toml_str(&content, path)
    }

    /// Load a dictionary, treating a missing file as an empty dictionary.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_empty(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no alias dictionary, using empty");
            return Ok(Self::empty());
        }
        Self::load(path)
    }
}

impl FromIterator<Tag> for AliasDictionary {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn auth_tag() -> Tag {
        Tag::new(
            "auth",
            "認証",
            vec!["authentication", "login", "認証", "jwt"],
        )
    }

    #[test]
    fn test_names_in_declaration_order() {
        let tag = auth_tag();
        let names: Vec<&str> = tag.names().collect();
        assert_eq!(
            names,
            vec!["auth", "認証", "authentication", "login", "認証", "jwt"]
        );
    }

    #[test]
    fn test_names_skip_blank_label() {
        let tag = Tag::new("db", "", vec!["database"]);
        let names: Vec<&str> = tag.names().collect();
        assert_eq!(names, vec!["db", "database"]);
    }

    #[test]
    fn test_matches_normalized() {
        let tag = Tag::new("API", "Web API", vec!["Endpoint"]);
        assert!(tag.matches_normalized("api"));
        assert!(tag.matches_normalized("web api"));
        assert!(tag.matches_normalized("endpoint"));
        assert!(!tag.matches_normalized("end"));
    }

    #[test]
    fn test_from_toml_str() {
        let content = r#"
[[tags]]
id = "auth"
label = "認証"
aliases = ["authentication", "login", "jwt"]

[[tags]]
id = "db"
aliases = ["database"]
"#;

        let dictionary = AliasDictionary::from_toml_str(content, Path::new("tags.toml")).unwrap();

        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.tags[0].label, "認証");
        assert_eq!(dictionary.tags[1].label, "");
        assert_eq!(dictionary.tags[1].aliases, vec!["database"]);
    }

    #[test]
    fn test_from_toml_str_rejects_empty_id() {
        let content = r#"
[[tags]]
id = ""
aliases = ["x"]
"#;
        let err = AliasDictionary::from_toml_str(content, Path::new("tags.toml")).unwrap_err();
        assert!(err.to_string().contains("empty id"));
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = AliasDictionary::from_toml_str("[[tags]\nid =", Path::new("tags.toml"));
        assert!(matches!(result, Err(ThicketError::AliasDictionary { .. })));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = AliasDictionary::load(&dir.path().join("tags.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_empty_missing_file() {
        let dir = TempDir::new().unwrap();
        let dictionary = AliasDictionary::load_or_empty(&dir.path().join("tags.toml")).unwrap();
        assert!(dictionary.is_empty());
    }

    #[test]
    fn test_load_or_empty_reads_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tags.toml");
        fs::write(&path, "[[tags]]\nid = \"auth\"\naliases = [\"login\"]\n").unwrap();

        let dictionary = AliasDictionary::load_or_empty(&path).unwrap();

        assert_eq!(dictionary.tags, vec![Tag::new("auth", "", vec!["login"])]);
    }

    #[test]
    fn test_from_iterator() {
        let dictionary: AliasDictionary = vec![auth_tag()].into_iter().collect();
        assert_eq!(dictionary.len(), 1);
        assert!(!dictionary.is_empty());
    }
}
