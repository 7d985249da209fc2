//! Hook output types for Claude Code integration.
//!
//! These types represent the JSON output that thicket returns to Claude Code hooks.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThicketError};

/// Event name echoed back in user-prompt-submit output.
pub const USER_PROMPT_SUBMIT_EVENT: &str = "UserPromptSubmit";

/// Event-specific payload of a hook response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    /// Event this output answers.
    pub hook_event_name: String,
    /// Context to add to the conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

/// Output for the user-prompt-submit hook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPromptSubmitOutput {
    /// Event-specific payload.
    pub hook_specific_output: HookSpecificOutput,
}

impl UserPromptSubmitOutput {
    /// Create an output carrying a context block.
    pub fn with_context(context: impl Into<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: USER_PROMPT_SUBMIT_EVENT.to_string(),
                additional_context: Some(context.into()),
            },
        }
    }

    /// The injected context, if any.
    pub fn additional_context(&self) -> Option<&str> {
        self.hook_specific_output.additional_context.as_deref()
    }
}

/// Serialize output to JSON.
pub fn to_json<T: Serialize>(output: &T) -> Result<String> {
    serde_json::to_string(output)
        .map_err(|e| ThicketError::serde(format!("Failed to serialize output: {}", e)))
}
