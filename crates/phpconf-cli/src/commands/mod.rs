//! CLI command handlers
//!
//! `fragment` handles the add/rm/enable/disable/ls actions; `complete`
//! answers shell completion requests.

pub mod complete;
pub mod fragment;
