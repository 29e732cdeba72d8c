//! phpenv environment: root directory and selected PHP version
//!
//! Resolution order for the version:
//! 1. `PHPENV_VERSION`
//! 2. nearest `.php-version` file from the current directory upwards
//! 3. `<root>/version`
//! 4. `system`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Version name meaning "the PHP installed by the OS"
pub const SYSTEM_VERSION: &str = "system";

const ROOT_VAR: &str = "PHPENV_ROOT";
const VERSION_VAR: &str = "PHPENV_VERSION";
const VERSION_FILE: &str = ".php-version";

/// Root and version a manager operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpenvEnv {
    pub root: PathBuf,
    pub version: String,
}

impl PhpenvEnv {
    pub fn new(root: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            version: version.into(),
        }
    }

    /// Resolve from the process environment and current directory
    ///
    /// # Errors
    /// Returns [`ConfigError::NoRoot`] when neither `PHPENV_ROOT` nor a home
    /// directory is available.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_env_with(None, None)
    }

    /// Like [`PhpenvEnv::from_env`], with explicit values taking precedence
    /// over `PHPENV_ROOT` and `PHPENV_VERSION`
    ///
    /// # Errors
    /// Returns [`ConfigError::NoRoot`] if no root can be determined.
    pub fn from_env_with(root: Option<PathBuf>, version: Option<String>) -> ConfigResult<Self> {
        let cwd = std::env::current_dir().ok();
        let root = root.map(|r| r.to_string_lossy().into_owned());
        let lookup = |key: &str| match key {
            ROOT_VAR if root.is_some() => root.clone(),
            VERSION_VAR if version.is_some() => version.clone(),
            _ => std::env::var(key).ok(),
        };
        Self::resolve(lookup, cwd.as_deref(), dirs::home_dir())
    }

    /// Resolve from an explicit variable lookup
    ///
    /// # Errors
    /// Returns [`ConfigError::NoRoot`] if no root can be determined.
    pub fn resolve<F>(lookup: F, cwd: Option<&Path>, home: Option<PathBuf>) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = match non_blank(lookup(ROOT_VAR)) {
            Some(root) => PathBuf::from(root),
            None => home.ok_or(ConfigError::NoRoot)?.join(".phpenv"),
        };

        let version = non_blank(lookup(VERSION_VAR))
            .or_else(|| cwd.and_then(find_local_version))
            .or_else(|| read_version_file(&root.join("version")))
            .unwrap_or_else(|| SYSTEM_VERSION.to_string());

        debug!(root = %root.display(), %version, "resolved phpenv environment");
        Ok(Self { root, version })
    }

    /// Whether the selected version is the `system` sentinel
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.version == SYSTEM_VERSION
    }

    /// `<root>/versions/<version>/etc`
    #[must_use]
    pub fn etc_dir(&self) -> PathBuf {
        self.root.join("versions").join(&self.version).join("etc")
    }

    /// Canonical store of fragments
    #[must_use]
    pub fn available_dir(&self) -> PathBuf {
        self.etc_dir().join("conf.d-available")
    }

    /// Directory scanned by PHP for active fragments
    #[must_use]
    pub fn enabled_dir(&self) -> PathBuf {
        self.etc_dir().join("conf.d")
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn find_local_version(cwd: &Path) -> Option<String> {
    cwd.ancestors()
        .map(|dir| dir.join(VERSION_FILE))
        .find(|file| file.is_file())
        .and_then(|file| read_version_file(&file))
}

/// First non-empty line of a version file
fn read_version_file(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
