//! Filesystem access behind a small trait so builds can run against an
//! in-memory tree in tests.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use sitesearch_shared::{Result, SearchIndexError};

/// Read-only access to the content tree.
///
/// "Not found" is a value (`Ok(None)`), not an error: callers decide whether a
/// missing directory or file matters. Every other I/O failure is an `Err`.
pub trait ContentRepository: Send + Sync {
    /// Names of the regular files directly inside `dir`, sorted.
    /// `Ok(None)` when `dir` does not exist.
    fn list_files(&self, dir: &Path) -> impl Future<Output = Result<Option<Vec<String>>>> + Send;

    /// Contents of `path`. `Ok(None)` when the file does not exist.
    fn read_to_string(&self, path: &Path) -> impl Future<Output = Result<Option<String>>> + Send;
}

// ---------------------------------------------------------------------------
// FsRepository
// ---------------------------------------------------------------------------

/// [`ContentRepository`] backed by the real filesystem (`tokio::fs`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRepository;

impl ContentRepository for FsRepository {
    async fn list_files(&self, dir: &Path) -> Result<Option<Vec<String>>> {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(dir = %dir.display(), "directory not found");
                return Ok(None);
            }
            Err(e) => return Err(SearchIndexError::io(dir, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SearchIndexError::io(dir, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| SearchIndexError::io(entry.path(), e))?;
            let is_file = if file_type.is_symlink() {
                match tokio::fs::metadata(entry.path()).await {
                    Ok(meta) => meta.is_file(),
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        debug!(path = %entry.path().display(), "dangling symlink skipped");
                        false
                    }
                    Err(e) => return Err(SearchIndexError::io(entry.path(), e)),
                }
            } else {
                file_type.is_file()
            };
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(Some(names))
    }

    async fn read_to_string(&self, path: &Path) -> Result<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SearchIndexError::io(path, e)),
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryRepository
// ---------------------------------------------------------------------------

/// In-memory [`ContentRepository`]. Directories exist once a file is added
/// under them (or they are added explicitly).
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    failures: BTreeMap<PathBuf, ErrorKind>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, registering every ancestor directory.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Register an empty directory.
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.register_ancestors(&path);
        self.dirs.insert(path);
        self
    }

    /// Make every access to `path` fail with `PermissionDenied`.
    pub fn with_denied(self, path: impl Into<PathBuf>) -> Self {
        self.with_error(path, ErrorKind::PermissionDenied)
    }

    /// Make every access to `path` fail with an I/O error of `kind`.
    pub fn with_error(mut self, path: impl Into<PathBuf>, kind: ErrorKind) -> Self {
        self.failures.insert(path.into(), kind);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        self.register_ancestors(&path);
        self.files.insert(path, content.into());
    }

    fn register_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn check_access(&self, path: &Path) -> Result<()> {
        if let Some(&kind) = self.failures.get(path) {
            return Err(SearchIndexError::io(path, std::io::Error::from(kind)));
        }
        Ok(())
    }
}

impl ContentRepository for MemoryRepository {
    async fn list_files(&self, dir: &Path) -> Result<Option<Vec<String>>> {
        self.check_access(dir)?;
        if !self.dirs.contains(dir) {
            return Ok(None);
        }

        let names = self
            .files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .filter_map(|path| path.file_name()?.to_str().map(String::from))
            .collect();
        Ok(Some(names))
    }

    async fn read_to_string(&self, path: &Path) -> Result<Option<String>> {
        self.check_access(path)?;
        Ok(self.files.get(path).cloned())
    }
}
