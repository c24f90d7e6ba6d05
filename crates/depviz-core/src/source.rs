//! File source capability consumed by the scanner.
//!
//! The scanner never touches the filesystem directly. [`FsFileSource`] backs
//! real runs; [`MemoryFileSource`] serves tests and embedders that already
//! hold file contents.

use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use walkdir::WalkDir;

/// Read-only view of a file tree.
///
/// `list` must return entries in a stable order: the scanner's fact order,
/// and therefore every node id, follows it.
pub trait FileSource: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// True for directories, following symlinks.
    fn is_directory(&self, path: &Path) -> bool;

    /// True if `path` itself is a symbolic link.
    fn is_symlink(&self, _path: &Path) -> bool {
        false
    }

    /// Entry names (not full paths) directly under `path`.
    fn list(&self, path: &Path) -> io::Result<Vec<String>>;

    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Size in bytes, when cheaply known. Used for the file size limit.
    fn file_size(&self, _path: &Path) -> Option<u64> {
        None
    }
}

/// [`FileSource`] over the local filesystem.
///
/// Listings are sorted by file name so traversal order does not depend on
/// the platform's directory ordering. A symlinked root is followed; the
/// scanner skips symlinked directories below it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileSource;

impl FsFileSource {
    pub fn new() -> Self {
        Self
    }
}

impl FileSource for FsFileSource {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.is_symlink()
    }

    fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            match entry {
                Ok(e) => names.push(e.file_name().to_string_lossy().into_owned()),
                // The directory itself could not be opened
                Err(e) if e.depth() == 0 => {
                    return Err(e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("directory walk failed")));
                }
                Err(e) => {
                    log::debug!("skipping unlistable entry under {}: {e}", path.display());
                }
            }
        }
        Ok(names)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn file_size(&self, path: &Path) -> Option<u64> {
        std::fs::metadata(path).ok().map(|m| m.len())
    }
}

/// In-memory [`FileSource`].
///
/// Directories are implied by file paths and listed in the order their
/// first file was added.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSource {
    /// path → content; `None` marks a file that fails to read.
    files: IndexMap<PathBuf, Option<String>>,
}

impl MemoryFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), Some(content.into()));
    }

    /// Register a file that exists but whose content cannot be read.
    pub fn add_unreadable(&mut self, path: impl Into<PathBuf>) {
        self.files.insert(path.into(), None);
    }

}

impl FileSource for MemoryFileSource {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.is_directory(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|p| p.as_path() != path && p.starts_with(path))
    }

    fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        if !self.is_directory(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            ));
        }

        let mut names: Vec<String> = Vec::new();
        for file in self.files.keys() {
            let Ok(rest) = file.strip_prefix(path) else {
                continue;
            };
            if let Some(first) = rest.components().next() {
                let name = first.as_os_str().to_string_lossy().into_owned();
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        match self.files.get(path) {
            Some(Some(content)) => Ok(content.clone()),
            Some(None) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )),
        }
    }

    fn file_size(&self, path: &Path) -> Option<u64> {
        self.files
            .get(path)
            .and_then(|c| c.as_ref())
            .map(|c| c.len() as u64)
    }
}
