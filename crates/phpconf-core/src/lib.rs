//! phpenv-config core - PHP `.ini` fragment management
//!
//! This crate manages the enable/disable state of configuration fragments
//! for a single phpenv-managed PHP version: the available store, the active
//! `conf.d` links, listing and shell completion candidates.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod completion;
pub mod env;
pub mod error;
pub mod fs;
pub mod listing;
pub mod manager;
pub mod name;

pub use env::PhpenvEnv;
pub use error::{ConfigError, ConfigResult};
pub use fs::{DiskFs, FragmentFs};
#[cfg(any(test, feature = "test-util"))]
pub use fs::MemoryFs;
pub use listing::{partition, Listing};
pub use manager::{ConfigManager, Outcome};
pub use name::fragment_name;
