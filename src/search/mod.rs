//! Fuzzy, alias-aware search.
//!
//! The pipeline is small and pure:
//!
//! - **Expansion**: a query becomes the union of names of every tag it
//!   matches, or just itself when none match.
//! - **Similarity**: each term is scored against each weighted field with an
//!   exact, substring or edit-distance match.
//! - **Ranking**: weighted scores are summed per document and sorted
//!   deterministically.
//! - **Injection**: a policy layer that turns a user prompt into at most a
//!   few strong matches rendered as background context.
//!
//! # Usage
//!
//! ```ignore
//! use thicket::search::rank;
//!
//! let matches = rank(&documents, "authentcation", &dictionary, 10);
//! ```

pub mod distance;
pub mod expand;
pub mod injection;
pub mod rank;
pub mod similarity;
pub mod weights;

pub use distance::levenshtein;
pub use expand::{expand_aliases, ExpansionSet};
pub use injection::{InjectionPolicy, CONTEXT_HEADER};
pub use rank::{rank, rank_expanded, score_document, ScoredMatch};
pub use similarity::{calculate_similarity, fuzzy_tolerance};
pub use weights::{field_weight, field_weights};
