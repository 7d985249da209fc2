//! Corpus source trait.
//!
//! The search engine never touches storage. A `CorpusSource` materializes the
//! documents visible to one search so the engine can run over a snapshot.

use std::sync::Arc;

use crate::core::Document;
use crate::error::Result;

/// Trait for read-only document sources.
///
/// Implementations skip documents they cannot read or parse rather than
/// failing the whole load; an `Err` means the source itself is unusable.
pub trait CorpusSource: Send + Sync {
    /// Load every readable document.
    fn load(&self) -> Result<Vec<Document>>;

    /// Count readable documents.
    fn count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }
}

/// Blanket implementation of CorpusSource for Arc-wrapped sources.
impl<T: CorpusSource + ?Sized> CorpusSource for Arc<T> {
    fn load(&self) -> Result<Vec<Document>> {
        (**self).load()
    }
}
