//! Hook input types for Claude Code integration.
//!
//! These types represent the JSON input that Claude Code passes to thicket hooks.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThicketError};

/// Common input fields shared by all hooks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HookInput {
    /// Unique session identifier.
    pub session_id: String,
    /// Path to the conversation transcript.
    pub transcript_path: PathBuf,
    /// Current working directory.
    pub cwd: PathBuf,
    /// Name of the event that fired the hook.
    #[serde(default)]
    pub hook_event_name: Option<String>,
}

/// Input for the user-prompt-submit hook.
///
/// Contains common fields plus the prompt the user just submitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPromptSubmitInput {
    /// Common hook input fields.
    #[serde(flatten)]
    pub common: HookInput,
    /// The submitted prompt.
    #[serde(default)]
    pub prompt: String,
}

/// Parse hook input from JSON.
pub fn parse_input<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    serde_json::from_str(json)
        .map_err(|e| ThicketError::serde(format!("Failed to parse hook input: {}", e)))
}
