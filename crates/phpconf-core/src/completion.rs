//! Shell completion candidates

use crate::error::ConfigResult;
use crate::fs::FragmentFs;
use crate::manager::ConfigManager;

/// Top-level verbs offered when no command has been typed yet
pub const VERBS: [&str; 6] = ["add", "rm", "enable", "disable", "ls", "version"];

/// Which kind of words the next argument takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionContext {
    /// Every available fragment (`rm`, `disable`)
    Available,
    /// Fragments that are not enabled yet (`enable`)
    Disabled,
    /// Command names
    Verbs,
}

impl CompletionContext {
    /// Pick the context from the words typed so far
    #[must_use]
    pub fn from_words(words: &[String]) -> Self {
        match words.first().map(String::as_str) {
            Some("rm" | "remove" | "disable" | "dis") => Self::Available,
            Some("enable" | "en") => Self::Disabled,
            _ => Self::Verbs,
        }
    }
}

/// Candidate words for the given context
///
/// # Errors
/// Fails if the fragment directories cannot be read.
pub fn candidates<F: FragmentFs>(
    manager: &ConfigManager<F>,
    context: CompletionContext,
) -> ConfigResult<Vec<String>> {
    Ok(match context {
        CompletionContext::Available => manager.available_names()?.into_iter().collect(),
        CompletionContext::Disabled => manager.list()?.available,
        CompletionContext::Verbs => VERBS.iter().map(|v| (*v).to_string()).collect(),
    })
}
