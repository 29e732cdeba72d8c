//! Error types for fragment operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fragment operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while managing config fragments
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Source for `add` is missing or not a regular file
    #[error("invalid file path: {}", .0.display())]
    InvalidFilePath(PathBuf),

    /// Fragment is not present where the operation needs it
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Required command argument was not given
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// The selected PHP version is the `system` sentinel
    #[error("cannot manage config of the system PHP version")]
    SystemVersion,

    /// Root directory could not be determined
    #[error("cannot determine phpenv root: set PHPENV_ROOT")]
    NoRoot,

    /// File I/O error
    #[error("I/O error for {path}: {message}")]
    IoError { path: PathBuf, message: String },
}

impl ConfigError {
    /// Wrap an I/O error together with the path it concerns
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Process exit code for this error.
    ///
    /// State conflicts and missing arguments are reported but exit 0.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig(_) | Self::MissingArgument(_) => 0,
            Self::InvalidFilePath(_)
            | Self::SystemVersion
            | Self::NoRoot
            | Self::IoError { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ConfigError::InvalidConfig("x".into()).exit_code(), 0);
        assert_eq!(ConfigError::MissingArgument("name").exit_code(), 0);
        assert_eq!(ConfigError::InvalidFilePath("/nope".into()).exit_code(), 1);
        assert_eq!(ConfigError::SystemVersion.exit_code(), 1);
    }

    #[test]
    fn test_messages_keep_keywords() {
        let err = ConfigError::InvalidFilePath("/tmp/missing.ini".into());
        assert_eq!(err.to_string(), "invalid file path: /tmp/missing.ini");
        let err = ConfigError::InvalidConfig("xdebug".into());
        assert_eq!(err.to_string(), "invalid config: xdebug");
    }
}
