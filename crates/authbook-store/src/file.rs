use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use authbook_types::Document;
use fs2::FileExt;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::codec;
use crate::error::{StoreError, StoreResult};
use crate::traits::DocumentStore;

/// YAML file-backed document store.
///
/// The whole document lives in one file that is fully re-read on every load
/// and fully replaced on every save:
///
/// - Saves write a temporary file in the destination directory, flush and
///   fsync it, then rename it over the destination, so readers see either
///   the old or the new document and never a partial one.
/// - With locking enabled, each load-modify-save cycle holds an exclusive
///   advisory lock on a sidecar `<file>.lock`. The data file itself cannot
///   carry the lock because every save swaps its inode.
#[derive(Clone, Debug)]
pub struct YamlFileStore {
    path: PathBuf,
    locking: bool,
}

impl YamlFileStore {
    /// Open a store backed by `path`, with writer locking enabled.
    ///
    /// Nothing is created until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            locking: true,
        }
    }

    /// Enable or disable the exclusive writer lock.
    ///
    /// Without it, concurrent writers from several processes can lose
    /// updates: the last save wins.
    pub fn with_locking(mut self, locking: bool) -> Self {
        self.locking = locking;
        self
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the sidecar lock file.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn directory(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn acquire_lock(&self) -> StoreResult<WriterLock> {
        let path = self.lock_path();
        let lock_err = |source: io::Error| StoreError::Lock {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(self.directory()).map_err(lock_err)?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(lock_err)?;
        FileExt::lock_exclusive(&file).map_err(lock_err)?;
        debug!(path = %path.display(), "writer lock acquired");
        Ok(WriterLock { file })
    }
}

/// Exclusive writer lock, released when dropped.
struct WriterLock {
    file: File,
}

impl Drop for WriterLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl DocumentStore for YamlFileStore {
    fn load(&self) -> StoreResult<Document> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "backing file missing; empty document");
                return Ok(Document::new());
            }
            Err(e) => return Err(e.into()),
        };
        let document = codec::decode(&text)?;
        debug!(
            path = %self.path.display(),
            projects = document.projects().count(),
            "document loaded"
        );
        Ok(document)
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        let text = codec::encode(document)?;
        let directory = self.directory();
        fs::create_dir_all(&directory)?;

        let mut staged = NamedTempFile::new_in(&directory)?;
        staged.write_all(text.as_bytes())?;
        staged.flush()?;
        // The staged file is created owner-only; carry over the mode of the
        // file it replaces.
        match fs::metadata(&self.path) {
            Ok(existing) => staged.as_file().set_permissions(existing.permissions())?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %self.path.display(), bytes = text.len(), "document saved");
        Ok(())
    }

    fn update(&self, mutate: &mut dyn FnMut(&mut Document)) -> StoreResult<()> {
        let _lock = if self.locking {
            Some(self.acquire_lock()?)
        } else {
            None
        };
        let mut document = self.load()?;
        mutate(&mut document);
        self.save(&document)
    }
}
