//! In-memory corpus for testing and embedding.

use std::sync::RwLock;

use crate::core::Document;
use crate::error::Result;
use crate::storage::CorpusSource;

/// In-memory corpus.
///
/// Thread-safe implementation using `RwLock<Vec>`. Each `load` returns a
/// snapshot, so later inserts never affect a search already in progress.
#[derive(Debug, Default)]
pub struct MemoryCorpus {
    documents: RwLock<Vec<Document>>,
}

impl MemoryCorpus {
    /// Create a new empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a corpus holding the given documents.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Add a document, replacing any document with the same type and id.
    pub fn insert(&self, document: Document) {
        let mut documents = self.documents.write().unwrap();
        documents.retain(|d| !(d.doc_type == document.doc_type && d.id == document.id));
        documents.push(document);
    }

    /// Get the number of documents.
    pub fn len(&self) -> usize {
        self.documents.read().unwrap().len()
    }

    /// Check if the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.read().unwrap().is_empty()
    }
}

impl CorpusSource for MemoryCorpus {
    fn load(&self) -> Result<Vec<Document>> {
        Ok(self.documents.read().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DocumentType;
    use crate::storage::traits::tests::assert_loads_ids;

    #[test]
    fn test_memory_corpus_loads_documents() {
        let corpus = MemoryCorpus::with_documents(vec![
            Document::new(DocumentType::Rule, "r-1", "Tabs"),
            Document::new(DocumentType::Decision, "d-1", "Postgres"),
        ]);

        assert_loads_ids(&corpus, &["r-1", "d-1"]);
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let corpus = MemoryCorpus::new();
        assert!(corpus.is_empty());

        corpus.insert(Document::new(DocumentType::Rule, "r-1", "Tabs"));
        corpus.insert(Document::new(DocumentType::Rule, "r-1", "Spaces"));
        corpus.insert(Document::new(DocumentType::Pattern, "r-1", "Same id, other type"));

        assert_eq!(corpus.len(), 2);
        let titles: Vec<String> = corpus.load().unwrap().into_iter().map(|d| d.title).collect();
        assert!(titles.contains(&"Spaces".to_string()));
        assert!(!titles.contains(&"Tabs".to_string()));
    }

    #[test]
    fn test_load_is_a_snapshot() {
        let corpus = MemoryCorpus::new();
        corpus.insert(Document::new(DocumentType::Rule, "r-1", "Tabs"));

        let snapshot = corpus.load().unwrap();
        corpus.insert(Document::new(DocumentType::Rule, "r-2", "Line width"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(corpus.len(), 2);
    }
}
