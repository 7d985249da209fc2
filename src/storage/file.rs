//! File-based corpus for Thicket.
//!
//! Documents are stored one per JSON file, grouped by type:
//!
//! ```text
//! .thicket/
//!   sessions/*.json
//!   decisions/*.json
//!   patterns/*.json
//!   rules/*.json
//! ```
//!
//! Files that cannot be read or parsed are skipped with a warning; a missing
//! type directory simply contributes no documents.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::project_thicket_dir;
use crate::core::{Document, DocumentType};
use crate::error::{Result, ThicketError};
use crate::storage::CorpusSource;
use crate::util::read_to_string_limited;

/// Outcome of loading a corpus directory.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Documents that parsed and matched their directory's type.
    pub documents: Vec<Document>,
    /// Files that were skipped.
    pub skipped: Vec<PathBuf>,
}

/// File-based corpus rooted at a `.thicket/` directory.
#[derive(Debug, Clone)]
pub struct FileCorpus {
    root: PathBuf,
}

impl FileCorpus {
    /// Create a corpus for the project containing `cwd`.
    pub fn for_project(cwd: &Path) -> Self {
        Self::with_root(project_thicket_dir(cwd))
    }

    /// Create a corpus with a custom root directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this corpus.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding documents of one type.
    pub fn type_dir(&self, doc_type: DocumentType) -> PathBuf {
        self.root.join(doc_type.dir_name())
    }

    /// Load every document, recording which files were skipped.
    pub fn load_with_report(&self) -> Result<LoadReport> {
        let mut report = LoadReport::default();

        for doc_type in DocumentType::all() {
            let dir = self.type_dir(*doc_type);
            if !dir.is_dir() {
                continue;
            }

            for path in json_files(&dir)? {
                match read_document(&path, *doc_type) {
                    Ok(document) => report.documents.push(document),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping document");
                        report.skipped.push(path);
                    }
                }
            }
        }

        tracing::debug!(
            root = %self.root.display(),
            loaded = report.documents.len(),
            skipped = report.skipped.len(),
            "loaded corpus"
        );

        Ok(report)
    }
}

impl CorpusSource for FileCorpus {
    fn load(&self) -> Result<Vec<Document>> {
        Ok(self.load_with_report()?.documents)
    }
}

/// List visible `*.json` files in a directory, sorted by path.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| ThicketError::storage(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ThicketError::storage(dir, e))?;
        let path = entry.path();

        // Skip non-JSON files and dotfiles
        if path.extension().map(|e| e != "json").unwrap_or(true) {
            continue;
        }
        if path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(true)
        {
            continue;
        }
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Read one document file and check it belongs in its directory.
fn read_document(path: &Path, expected: DocumentType) -> Result<Document> {
    let content = read_to_string_limited(path)?;
    let document: Document = serde_json::from_str(&content)?;

    if document.doc_type != expected {
        return Err(ThicketError::corpus(format!(
            "document type '{}' does not match directory '{}'",
            document.doc_type,
            expected.dir_name()
        )));
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::tests::assert_loads_ids;
    use tempfile::TempDir;

    fn write_doc(root: &Path, dir: &str, name: &str, content: &str) {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    fn doc_json(doc_type: &str, id: &str, title: &str) -> String {
        format!(
            r#"{{"type":"{doc_type}","id":"{id}","title":"{title}","recency":"2026-01-01T00:00:00Z"}}"#
        )
    }

    #[test]
    fn test_loads_documents_of_every_type() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "sessions", "s1.json", &doc_json("session", "s-1", "Sync"));
        write_doc(dir.path(), "decisions", "d1.json", &doc_json("decision", "d-1", "JWT"));
        write_doc(dir.path(), "patterns", "p1.json", &doc_json("pattern", "p-1", "Builder"));
        write_doc(dir.path(), "rules", "r1.json", &doc_json("rule", "r-1", "Tabs"));

        let corpus = FileCorpus::with_root(dir.path());

        assert_loads_ids(&corpus, &["s-1", "d-1", "p-1", "r-1"]);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let corpus = FileCorpus::with_root(dir.path().join("absent"));

        assert!(corpus.load().unwrap().is_empty());
    }

    #[test]
    fn test_skips_malformed_documents() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "decisions", "good.json", &doc_json("decision", "d-1", "JWT"));
        write_doc(dir.path(), "decisions", "broken.json", "{ not json");
        write_doc(
            dir.path(),
            "decisions",
            "unknown-type.json",
            &doc_json("ticket", "t-1", "Nope"),
        );

        let report = FileCorpus::with_root(dir.path()).load_with_report().unwrap();

        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.documents[0].id, "d-1");
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn test_skips_type_directory_mismatch() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "rules", "r1.json", &doc_json("decision", "d-1", "JWT"));

        let report = FileCorpus::with_root(dir.path()).load_with_report().unwrap();

        assert!(report.documents.is_empty());
        assert_eq!(report.skipped, vec![dir.path().join("rules").join("r1.json")]);
    }

    #[test]
    fn test_ignores_non_json_and_dotfiles() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "rules", "r1.json", &doc_json("rule", "r-1", "Tabs"));
        write_doc(dir.path(), "rules", "notes.md", "# not a document");
        write_doc(dir.path(), "rules", ".r2.json", &doc_json("rule", "r-2", "Hidden"));

        let report = FileCorpus::with_root(dir.path()).load_with_report().unwrap();

        assert_eq!(report.documents.len(), 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_for_project_uses_thicket_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".thicket")).unwrap();

        let corpus = FileCorpus::for_project(dir.path());

        assert_eq!(corpus.root(), dir.path().join(".thicket").as_path());
        assert_eq!(
            corpus.type_dir(DocumentType::Pattern),
            dir.path().join(".thicket").join("patterns")
        );
    }
}
