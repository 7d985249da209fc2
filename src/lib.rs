//! Thicket - fuzzy, alias-aware recall for Claude Code
//!
//! Thicket searches a project's prior sessions, decisions, patterns and
//! rules. Queries are expanded through a tag dictionary, matched with exact,
//! substring and edit-distance similarity, and ranked with per-field weights.
//! The same engine feeds a user-prompt-submit hook that injects a short block
//! of related material into the conversation.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod hooks;
pub mod search;
pub mod storage;
pub mod util;

pub use config::Config;
pub use core::{AliasDictionary, Document, DocumentType, FieldValue, Tag};
pub use error::{Result, ThicketError};
pub use search::{
    calculate_similarity, expand_aliases, levenshtein, rank, ExpansionSet, InjectionPolicy,
    ScoredMatch,
};
pub use storage::{CorpusSource, FileCorpus, MemoryCorpus};

// CLI commands
pub use cli::{ExpandCommand, SearchCommand};
