//! Hook runner for Thicket.
//!
//! This module implements hook dispatch and the individual hook handlers.
//! Every handler is fail-open: a broken corpus or an unparseable payload
//! results in no output, never in a blocked prompt.

use std::io::{self, Read};

use crate::config::Config;
use crate::core::AliasDictionary;
use crate::error::{FailOpen, Result, ThicketError};
use crate::hooks::input::{parse_input, UserPromptSubmitInput};
use crate::hooks::output::{to_json, UserPromptSubmitOutput};
use crate::search::InjectionPolicy;
use crate::storage::CorpusSource;

/// Hook type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookType {
    /// User prompt submitted.
    UserPromptSubmit,
}

impl HookType {
    /// Parse hook type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user-prompt-submit" | "userpromptsubmit" | "user_prompt_submit" => {
                Some(Self::UserPromptSubmit)
            }
            _ => None,
        }
    }
}

/// Hook runner context.
pub struct HookRunner<S: CorpusSource> {
    /// Documents searched by the hooks.
    corpus: S,
    /// Configuration.
    config: Config,
    /// Tags used to expand prompts.
    dictionary: AliasDictionary,
}

impl<S: CorpusSource> HookRunner<S> {
    /// Create a new hook runner.
    pub fn new(corpus: S, config: Config, dictionary: AliasDictionary) -> Self {
        Self {
            corpus,
            config,
            dictionary,
        }
    }

    /// Run a hook with the raw JSON payload.
    ///
    /// Returns the JSON to print, or `None` when the hook has nothing to say.
    pub fn run_with_input(&self, hook_type: HookType, input: &str) -> Result<Option<String>> {
        match hook_type {
            HookType::UserPromptSubmit => self.handle_user_prompt_submit(input),
        }
    }

    /// Handle the user-prompt-submit hook.
    ///
    /// 1. Parse input and bail out early when injection is disabled
    /// 2. Load the corpus (fail-open to empty)
    /// 3. Apply the injection policy to the prompt
    /// 4. Wrap any context block in hook output
    fn handle_user_prompt_submit(&self, input: &str) -> Result<Option<String>> {
        let hook_input: UserPromptSubmitInput = parse_input(input)?;

        if !self.config.injection.enabled {
            tracing::debug!("context injection disabled");
            return Ok(None);
        }

        let policy = InjectionPolicy::from_config(&self.config.injection);
        if policy.prepare_query(&hook_input.prompt).is_none() {
            return Ok(None);
        }

        let documents = self.corpus.load().fail_open_default("loading corpus");

        let Some(context) = policy.inject(&hook_input.prompt, &documents, &self.dictionary)
        else {
            return Ok(None);
        };

        tracing::info!(
            session_id = %hook_input.common.session_id,
            "injecting related context"
        );

        to_json(&UserPromptSubmitOutput::with_context(context)).map(Some)
    }
}

/// Read all of stdin.
///
/// The caller reads the payload itself so it can resolve the project from the
/// payload's `cwd` before building a runner.
pub fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| ThicketError::storage("stdin", e))?;
    Ok(input)
}
