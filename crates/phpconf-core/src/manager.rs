//! Config manager: add, remove, enable, disable and list fragments
//!
//! Every operation checks existence and then mutates, without locking.
//! Two concurrent `enable` calls may both pass the "not yet enabled" check;
//! the loser then fails creating the link and reports an I/O error.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::env::PhpenvEnv;
use crate::error::{ConfigError, ConfigResult};
use crate::fs::{DiskFs, FragmentFs};
use crate::listing::{partition, Listing};
use crate::name::{file_name, fragment_name, strip_ini};

/// Successful result of a mutating operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(String),
    Removed(String),
    Enabled(String),
    AlreadyEnabled(String),
    Disabled(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(name) => write!(f, "Config {name} added"),
            Self::Removed(name) => write!(f, "Config {name} removed"),
            Self::Enabled(name) => write!(f, "Config {name} enabled"),
            Self::AlreadyEnabled(name) => write!(f, "Config {name} already enabled"),
            Self::Disabled(name) => write!(f, "Config {name} disabled"),
        }
    }
}

/// Manages the fragments of one PHP version
#[derive(Debug)]
pub struct ConfigManager<F: FragmentFs = DiskFs> {
    fs: F,
    available_dir: PathBuf,
    enabled_dir: PathBuf,
}

impl ConfigManager<DiskFs> {
    /// Open the manager on the real filesystem
    ///
    /// # Errors
    /// See [`ConfigManager::with_fs`].
    pub fn open(env: &PhpenvEnv) -> ConfigResult<Self> {
        Self::with_fs(env, DiskFs)
    }

    /// Open the manager on the real filesystem without creating directories
    ///
    /// # Errors
    /// See [`ConfigManager::attach`].
    pub fn existing(env: &PhpenvEnv) -> ConfigResult<Self> {
        Self::attach(env, DiskFs)
    }
}

impl<F: FragmentFs> ConfigManager<F> {
    /// Create a manager, creating both directories if they are missing
    ///
    /// # Errors
    /// Fails for the `system` version or if a directory cannot be created.
    pub fn with_fs(env: &PhpenvEnv, fs: F) -> ConfigResult<Self> {
        let manager = Self::attach(env, fs)?;
        manager.fs.ensure_dir(&manager.available_dir)?;
        manager.fs.ensure_dir(&manager.enabled_dir)?;
        Ok(manager)
    }

    /// Create a manager over whatever directories exist; read-only callers
    /// such as completion use this
    ///
    /// # Errors
    /// Fails for the `system` version.
    pub fn attach(env: &PhpenvEnv, fs: F) -> ConfigResult<Self> {
        if env.is_system() {
            return Err(ConfigError::SystemVersion);
        }
        Ok(Self {
            fs,
            available_dir: env.available_dir(),
            enabled_dir: env.enabled_dir(),
        })
    }

    #[must_use]
    pub fn fs(&self) -> &F {
        &self.fs
    }

    #[must_use]
    pub fn available_dir(&self) -> &Path {
        &self.available_dir
    }

    #[must_use]
    pub fn enabled_dir(&self) -> &Path {
        &self.enabled_dir
    }

    /// Path of a fragment in the available store
    #[must_use]
    pub fn available_path(&self, name: &str) -> PathBuf {
        self.available_dir.join(file_name(name))
    }

    /// Path of a fragment's link in the enabled directory
    #[must_use]
    pub fn enabled_path(&self, name: &str) -> PathBuf {
        self.enabled_dir.join(file_name(name))
    }

    /// Copy `source` into the available store, replacing any previous copy
    ///
    /// # Errors
    /// [`ConfigError::InvalidFilePath`] unless `source` is a regular file.
    pub fn add(&self, source: &Path) -> ConfigResult<Outcome> {
        if !self.fs.is_file(source) {
            return Err(ConfigError::InvalidFilePath(source.to_path_buf()));
        }
        let name = fragment_name(source)
            .ok_or_else(|| ConfigError::InvalidFilePath(source.to_path_buf()))?;

        self.fs.copy(source, &self.available_path(&name))?;
        info!(%name, source = %source.display(), "fragment added");
        Ok(Outcome::Added(name))
    }

    /// Delete a fragment and its link, if any
    ///
    /// # Errors
    /// [`ConfigError::InvalidConfig`] if the fragment is not available.
    pub fn remove(&self, name: &str) -> ConfigResult<Outcome> {
        let available = self.require_available(name)?;

        let enabled = self.enabled_path(name);
        if self.fs.entry_exists(&enabled) {
            self.fs.remove(&enabled)?;
        }
        self.fs.remove(&available)?;
        info!(%name, "fragment removed");
        Ok(Outcome::Removed(name.to_string()))
    }

    /// Link an available fragment into the enabled directory
    ///
    /// # Errors
    /// [`ConfigError::InvalidConfig`] if the fragment is not available.
    pub fn enable(&self, name: &str) -> ConfigResult<Outcome> {
        let available = self.require_available(name)?;

        let enabled = self.enabled_path(name);
        if self.fs.entry_exists(&enabled) {
            return Ok(Outcome::AlreadyEnabled(name.to_string()));
        }
        self.fs.link(&available, &enabled)?;
        info!(%name, "fragment enabled");
        Ok(Outcome::Enabled(name.to_string()))
    }

    /// Remove a fragment's link, keeping the available copy
    ///
    /// # Errors
    /// [`ConfigError::InvalidConfig`] if the fragment is not enabled.
    pub fn disable(&self, name: &str) -> ConfigResult<Outcome> {
        validate_name(name)?;
        let enabled = self.enabled_path(name);
        if !self.fs.entry_exists(&enabled) {
            return Err(ConfigError::InvalidConfig(name.to_string()));
        }
        self.fs.remove(&enabled)?;
        info!(%name, "fragment disabled");
        Ok(Outcome::Disabled(name.to_string()))
    }

    /// Partition the available fragments into enabled and available-only
    ///
    /// # Errors
    /// Fails if either directory cannot be read.
    pub fn list(&self) -> ConfigResult<Listing> {
        let available = self.available_names()?;
        let enabled = self.fragment_names(&self.enabled_dir)?;
        Ok(partition(&available, &enabled))
    }

    /// Names of all fragments in the available store
    ///
    /// # Errors
    /// Fails if the available directory cannot be read.
    pub fn available_names(&self) -> ConfigResult<BTreeSet<String>> {
        self.fragment_names(&self.available_dir)
    }

    fn fragment_names(&self, dir: &Path) -> ConfigResult<BTreeSet<String>> {
        Ok(self
            .fs
            .list_names(dir)?
            .iter()
            .filter_map(|file| strip_ini(file))
            .map(str::to_string)
            .collect())
    }

    fn require_available(&self, name: &str) -> ConfigResult<PathBuf> {
        validate_name(name)?;
        let path = self.available_path(name);
        if self.fs.entry_exists(&path) {
            Ok(path)
        } else {
            Err(ConfigError::InvalidConfig(name.to_string()))
        }
    }
}

/// Fragment names must stay inside their directory
fn validate_name(name: &str) -> ConfigResult<()> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(ConfigError::InvalidConfig(name.to_string()));
    }
    Ok(())
}
