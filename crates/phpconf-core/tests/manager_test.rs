//! Manager tests against a real directory tree
//!
//! Each test builds a throwaway phpenv root and drives the manager through
//! the add/enable/disable/remove lifecycle on disk.

use phpconf_core::{ConfigError, ConfigManager, Outcome, PhpenvEnv};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create an `.ini` source file outside the phpenv root
fn write_source(dir: &Path, file: &str, contents: &str) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, contents).expect("Failed to write source file");
    path
}

fn open(root: &Path) -> ConfigManager {
    ConfigManager::open(&PhpenvEnv::new(root, "8.3.1")).expect("Failed to open manager")
}

#[test]
fn test_open_creates_directories() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let mgr = open(root.path());

    let etc = root.path().join("versions/8.3.1/etc");
    assert!(etc.join("conf.d").is_dir());
    assert!(etc.join("conf.d-available").is_dir());
    assert_eq!(mgr.enabled_dir(), etc.join("conf.d"));

    // Opening again over existing directories is fine
    open(root.path());
}

#[test]
fn test_system_version_refused() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let result = ConfigManager::open(&PhpenvEnv::new(root.path(), "system"));
    assert!(matches!(result, Err(ConfigError::SystemVersion)));
    assert!(!root.path().join("versions").exists());
}

#[test]
fn test_full_lifecycle() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let src = TempDir::new().expect("Failed to create source dir");
    let mgr = open(root.path());
    let source = write_source(src.path(), "xdebug.ini", "zend_extension=xdebug.so\n");

    assert_eq!(mgr.add(&source).unwrap(), Outcome::Added("xdebug".into()));
    assert_eq!(
        fs::read_to_string(mgr.available_path("xdebug")).unwrap(),
        "zend_extension=xdebug.so\n"
    );

    assert_eq!(mgr.enable("xdebug").unwrap(), Outcome::Enabled("xdebug".into()));
    let listing = mgr.list().unwrap();
    assert_eq!(listing.enabled, vec!["xdebug"]);
    assert!(listing.available.is_empty());

    // PHP reads the enabled entry and sees the available contents
    assert_eq!(
        fs::read_to_string(mgr.enabled_path("xdebug")).unwrap(),
        "zend_extension=xdebug.so\n"
    );

    assert_eq!(mgr.enable("xdebug").unwrap(), Outcome::AlreadyEnabled("xdebug".into()));

    mgr.disable("xdebug").unwrap();
    let listing = mgr.list().unwrap();
    assert!(listing.enabled.is_empty());
    assert_eq!(listing.available, vec!["xdebug"]);
    assert!(mgr.available_path("xdebug").is_file());

    mgr.enable("xdebug").unwrap();
    mgr.remove("xdebug").unwrap();
    assert!(fs::symlink_metadata(mgr.enabled_path("xdebug")).is_err());
    assert!(!mgr.available_path("xdebug").exists());
    assert!(matches!(mgr.remove("xdebug"), Err(ConfigError::InvalidConfig(_))));
}

#[cfg(unix)]
#[test]
fn test_enable_creates_symlink() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let src = TempDir::new().expect("Failed to create source dir");
    let mgr = open(root.path());
    mgr.add(&write_source(src.path(), "opcache.ini", "opcache.enable=1\n"))
        .unwrap();
    mgr.enable("opcache").unwrap();

    let link = mgr.enabled_path("opcache");
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&link).unwrap(), mgr.available_path("opcache"));
}

#[test]
fn test_add_keeps_non_ini_extension_in_name() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let src = TempDir::new().expect("Failed to create source dir");
    let mgr = open(root.path());

    let outcome = mgr.add(&write_source(src.path(), "foo.txt", "a=1\n")).unwrap();
    assert_eq!(outcome, Outcome::Added("foo.txt".into()));
    assert!(mgr.available_dir().join("foo.txt.ini").is_file());
    assert_eq!(mgr.list().unwrap().available, vec!["foo.txt"]);
}

#[test]
fn test_add_same_file_twice_lists_once() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let src = TempDir::new().expect("Failed to create source dir");
    let mgr = open(root.path());
    let source = write_source(src.path(), "apcu.ini", "extension=apcu.so\n");

    mgr.add(&source).unwrap();
    mgr.add(&source).unwrap();

    let listing = mgr.list().unwrap();
    assert_eq!(listing.available, vec!["apcu"]);
    assert_eq!(listing.total(), 1);
}

#[test]
fn test_add_from_available_store_itself() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let src = TempDir::new().expect("Failed to create source dir");
    let mgr = open(root.path());
    mgr.add(&write_source(src.path(), "apcu.ini", "extension=apcu.so\n"))
        .unwrap();

    mgr.add(&mgr.available_path("apcu")).unwrap();
    assert_eq!(
        fs::read_to_string(mgr.available_path("apcu")).unwrap(),
        "extension=apcu.so\n"
    );
}

#[test]
fn test_add_rejects_directory() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let src = TempDir::new().expect("Failed to create source dir");
    let mgr = open(root.path());

    let err = mgr.add(src.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidFilePath(_)));
    assert_eq!(err.exit_code(), 1);
}

#[cfg(unix)]
#[test]
fn test_disable_cleans_dangling_link() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let src = TempDir::new().expect("Failed to create source dir");
    let mgr = open(root.path());
    mgr.add(&write_source(src.path(), "xdebug.ini", "")).unwrap();
    mgr.enable("xdebug").unwrap();

    // Available copy deleted behind the manager's back
    fs::remove_file(mgr.available_path("xdebug")).unwrap();

    assert_eq!(mgr.disable("xdebug").unwrap(), Outcome::Disabled("xdebug".into()));
    assert!(fs::symlink_metadata(mgr.enabled_path("xdebug")).is_err());
}
