//! Core types for Thicket.
//!
//! This module contains the searchable document model and the tag
//! dictionary used for alias expansion.

pub mod document;
pub mod tag;

pub use document::{Document, DocumentType, FieldValue, ValidationError, TITLE_FIELD};
pub use tag::{AliasDictionary, Tag};
