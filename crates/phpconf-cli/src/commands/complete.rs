//! Shell completion hook: `phpenv-config [--root DIR] [--php-version V] --complete [words...]`
//!
//! Completion only reads: missing fragment directories yield no candidates
//! and are never created.

use phpconf_core::completion::{candidates, CompletionContext, VERBS};
use phpconf_core::{ConfigManager, PhpenvEnv};
use std::path::PathBuf;
use tracing::debug;

/// Print one completion candidate per line
pub fn execute(words: &[String], root: Option<PathBuf>, php_version: Option<String>) {
    let context = CompletionContext::from_words(words);

    let found = PhpenvEnv::from_env_with(root, php_version)
        .and_then(|env| ConfigManager::existing(&env))
        .and_then(|manager| candidates(&manager, context));

    match found {
        Ok(words) => {
            for word in words {
                println!("{word}");
            }
        }
        Err(e) => {
            debug!(error = %e, "no fragment candidates");
            if context == CompletionContext::Verbs {
                for verb in VERBS {
                    println!("{verb}");
                }
            }
        }
    }
}
