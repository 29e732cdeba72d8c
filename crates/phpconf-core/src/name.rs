//! Fragment name derivation

use std::path::Path;

/// File extension of config fragments
pub const INI_SUFFIX: &str = ".ini";

/// Derive a fragment name from a source file path.
///
/// Takes the base name and strips one trailing `.ini`. Any other extension
/// stays part of the name, so `foo.txt` becomes `foo.txt`.
#[must_use]
pub fn fragment_name(path: &Path) -> Option<String> {
    let base = path.file_name()?.to_string_lossy();
    let name = base.strip_suffix(INI_SUFFIX).unwrap_or(&base);
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

/// File name backing a fragment (`<name>.ini`)
#[must_use]
pub fn file_name(name: &str) -> String {
    format!("{name}{INI_SUFFIX}")
}

/// Inverse of [`file_name`]; `None` for entries that are not fragments
#[must_use]
pub fn strip_ini(file: &str) -> Option<&str> {
    file.strip_suffix(INI_SUFFIX).filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_ini_suffix() {
        assert_eq!(fragment_name(Path::new("/tmp/xdebug.ini")).as_deref(), Some("xdebug"));
        assert_eq!(fragment_name(Path::new("opcache.ini")).as_deref(), Some("opcache"));
    }

    #[test]
    fn test_keeps_other_extensions() {
        assert_eq!(fragment_name(Path::new("/tmp/foo.txt")).as_deref(), Some("foo.txt"));
        assert_eq!(fragment_name(Path::new("/tmp/apcu")).as_deref(), Some("apcu"));
    }

    #[test]
    fn test_strips_only_one_suffix() {
        assert_eq!(fragment_name(Path::new("a.ini.ini")).as_deref(), Some("a.ini"));
    }

    #[test]
    fn test_rejects_bare_suffix() {
        assert_eq!(fragment_name(Path::new("/tmp/.ini")), None);
        assert_eq!(fragment_name(Path::new("/")), None);
    }

    #[test]
    fn test_strip_ini() {
        assert_eq!(strip_ini("xdebug.ini"), Some("xdebug"));
        assert_eq!(strip_ini("README"), None);
        assert_eq!(strip_ini(".ini"), None);
    }
}
