//! Hook integration for Claude Code.
//!
//! Thicket listens to a single hook:
//!
//! - **user-prompt-submit**: search the corpus with the new prompt and inject
//!   a short block of related prior material

pub mod input;
pub mod output;
pub mod runner;

pub use input::{parse_input, HookInput, UserPromptSubmitInput};
pub use output::{to_json, HookSpecificOutput, UserPromptSubmitOutput, USER_PROMPT_SUBMIT_EVENT};
pub use runner::{read_stdin, HookRunner, HookType};
