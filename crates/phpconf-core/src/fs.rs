//! Filesystem access for fragment stores
//!
//! [`FragmentFs`] is the seam between the manager and the disk. [`DiskFs`]
//! performs real I/O. `MemoryFs` (tests and the `test-util` feature) keeps
//! everything in a map so the manager logic can be exercised without
//! touching the filesystem.

#[cfg(any(test, feature = "test-util"))]
use std::cell::RefCell;
#[cfg(any(test, feature = "test-util"))]
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
#[cfg(any(test, feature = "test-util"))]
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Filesystem operations needed by the config manager
pub trait FragmentFs {
    /// Create a directory and its parents if missing
    fn ensure_dir(&self, dir: &Path) -> ConfigResult<()>;

    /// Whether `path` is a regular file (links are followed)
    fn is_file(&self, path: &Path) -> bool;

    /// Whether a directory entry exists at `path`, without following links
    fn entry_exists(&self, path: &Path) -> bool;

    /// Copy a file, overwriting the destination
    fn copy(&self, from: &Path, to: &Path) -> ConfigResult<()>;

    /// Create `link` referring to `target`
    fn link(&self, target: &Path, link: &Path) -> ConfigResult<()>;

    /// Remove a file or link
    fn remove(&self, path: &Path) -> ConfigResult<()>;

    /// Names of the non-directory entries in `dir`; empty if `dir` is missing
    fn list_names(&self, dir: &Path) -> ConfigResult<BTreeSet<String>>;
}

/// Real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFs;

impl FragmentFs for DiskFs {
    fn ensure_dir(&self, dir: &Path) -> ConfigResult<()> {
        fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, &e))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn entry_exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn copy(&self, from: &Path, to: &Path) -> ConfigResult<()> {
        // Copying a file onto itself would truncate it
        if let (Ok(a), Ok(b)) = (from.canonicalize(), to.canonicalize()) {
            if a == b {
                debug!(path = %to.display(), "source is already in place");
                return Ok(());
            }
        }
        debug!(from = %from.display(), to = %to.display(), "copy");
        fs::copy(from, to).map_err(|e| ConfigError::io(to, &e))?;
        Ok(())
    }

    fn link(&self, target: &Path, link: &Path) -> ConfigResult<()> {
        debug!(target = %target.display(), link = %link.display(), "link");
        create_link(target, link).map_err(|e| ConfigError::io(link, &e))
    }

    fn remove(&self, path: &Path) -> ConfigResult<()> {
        debug!(path = %path.display(), "remove");
        fs::remove_file(path).map_err(|e| ConfigError::io(path, &e))
    }

    fn list_names(&self, dir: &Path) -> ConfigResult<BTreeSet<String>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(ConfigError::io(dir, &e)),
        };

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::io(dir, &e))?;
            let file_type = entry.file_type().map_err(|e| ConfigError::io(entry.path(), &e))?;
            if file_type.is_dir() {
                continue;
            }
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

#[cfg(unix)]
fn create_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Without symlinks an enabled fragment is a copy of the available one
#[cfg(not(unix))]
fn create_link(target: &Path, link: &Path) -> io::Result<()> {
    if link.exists() {
        return Err(io::Error::new(io::ErrorKind::AlreadyExists, "entry already exists"));
    }
    fs::copy(target, link).map(|_| ())
}

#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, PartialEq, Eq)]
enum MemEntry {
    Dir,
    File(Vec<u8>),
    Link(PathBuf),
}

/// In-memory filesystem
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct MemoryFs {
    entries: RefCell<BTreeMap<PathBuf, MemEntry>>,
}

#[cfg(any(test, feature = "test-util"))]
impl MemoryFs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a regular file
    pub fn put_file(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.entries
            .borrow_mut()
            .insert(path.into(), MemEntry::File(contents.into()));
    }

    /// Contents of a file, following one level of link
    #[must_use]
    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        let entries = self.entries.borrow();
        match entries.get(path)? {
            MemEntry::File(data) => Some(data.clone()),
            MemEntry::Link(target) => match entries.get(target)? {
                MemEntry::File(data) => Some(data.clone()),
                _ => None,
            },
            MemEntry::Dir => None,
        }
    }

    /// Target of a link entry
    #[must_use]
    pub fn link_target(&self, path: &Path) -> Option<PathBuf> {
        match self.entries.borrow().get(path)? {
            MemEntry::Link(target) => Some(target.clone()),
            _ => None,
        }
    }

    fn not_found(path: &Path) -> ConfigError {
        ConfigError::io(path, &io::Error::from(io::ErrorKind::NotFound))
    }

    fn require_parent(&self, path: &Path) -> ConfigResult<()> {
        match path.parent() {
            Some(parent) if self.entries.borrow().get(parent) == Some(&MemEntry::Dir) => Ok(()),
            _ => Err(Self::not_found(path)),
        }
    }
}

#[cfg(any(test, feature = "test-util"))]
impl FragmentFs for MemoryFs {
    fn ensure_dir(&self, dir: &Path) -> ConfigResult<()> {
        let mut entries = self.entries.borrow_mut();
        for ancestor in dir.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            match entries.get(ancestor) {
                Some(MemEntry::Dir) => {}
                Some(_) => {
                    let err = io::Error::new(io::ErrorKind::AlreadyExists, "not a directory");
                    return Err(ConfigError::io(ancestor, &err));
                }
                None => {
                    entries.insert(ancestor.to_path_buf(), MemEntry::Dir);
                }
            }
        }
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        self.read(path).is_some()
    }

    fn entry_exists(&self, path: &Path) -> bool {
        self.entries.borrow().contains_key(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> ConfigResult<()> {
        let data = self.read(from).ok_or_else(|| Self::not_found(from))?;
        self.require_parent(to)?;
        self.entries
            .borrow_mut()
            .insert(to.to_path_buf(), MemEntry::File(data));
        Ok(())
    }

    fn link(&self, target: &Path, link: &Path) -> ConfigResult<()> {
        self.require_parent(link)?;
        if self.entry_exists(link) {
            let err = io::Error::from(io::ErrorKind::AlreadyExists);
            return Err(ConfigError::io(link, &err));
        }
        self.entries
            .borrow_mut()
            .insert(link.to_path_buf(), MemEntry::Link(target.to_path_buf()));
        Ok(())
    }

    fn remove(&self, path: &Path) -> ConfigResult<()> {
        let mut entries = self.entries.borrow_mut();
        if matches!(entries.get(path), Some(MemEntry::File(_) | MemEntry::Link(_))) {
            entries.remove(path);
            Ok(())
        } else {
            Err(Self::not_found(path))
        }
    }

    fn list_names(&self, dir: &Path) -> ConfigResult<BTreeSet<String>> {
        Ok(self
            .entries
            .borrow()
            .iter()
            .filter(|(path, entry)| path.parent() == Some(dir) && **entry != MemEntry::Dir)
            .filter_map(|(path, _)| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }
}
