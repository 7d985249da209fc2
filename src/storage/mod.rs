//! Read-only corpus storage for Thicket.
//!
//! This module materializes the documents a search runs over,
//! supporting file-based and in-memory sources.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::{FileCorpus, LoadReport};
pub use memory::MemoryCorpus;
pub use traits::CorpusSource;
