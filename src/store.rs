//! The adventure log on disk: one JSON array holding every entry, oldest
//! first.
//!
//! Every mutation rewrites the whole file. Writers serialize through a
//! `<file>.lock` sidecar and replace the file with a rename, so readers see
//! either the old or the new collection and concurrent writers fail instead of
//! dropping each other's updates.

use crate::{
    entries::{Entry, EntryId},
    error::{StorageError, StorageResult},
};
use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

pub const DEFAULT_STORE_FILE: &str = "adventures.json";

/// What [`EntryStore::list`] does with a log it can't parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Report corrupt data as an error.
    #[default]
    Strict,
    /// Treat corrupt data as an empty log. The next write replaces it.
    RecoverEmpty,
}

#[derive(Debug, Clone)]
pub struct EntryStore {
    path: PathBuf,
    read_policy: ReadPolicy,
}

impl EntryStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_policy: ReadPolicy::default(),
        }
    }

    pub fn with_read_policy(mut self, read_policy: ReadPolicy) -> Self {
        self.read_policy = read_policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored entry, in insertion order. A log that doesn't exist yet is
    /// empty.
    pub fn list(&self) -> StorageResult<Vec<Entry>> {
        match self.read() {
            Err(StorageError::Corrupt { path, source })
                if self.read_policy == ReadPolicy::RecoverEmpty =>
            {
                tracing::warn!(
                    path = %path.display(),
                    error = %source,
                    "Adventure log is corrupt, treating it as empty"
                );
                Ok(Vec::new())
            }
            result => result,
        }
    }

    pub fn append(&self, entry: Entry) -> StorageResult<()> {
        self.update(|entries| {
            if entries.iter().any(|e| e.id == entry.id) {
                return Err(StorageError::DuplicateId(entry.id));
            }

            tracing::info!(id = %entry.id, day = %entry.day, "Appending entry");
            entries.push(entry);

            Ok(())
        })
    }

    /// Removes the entry with `id`, returning it. Removing an id that isn't
    /// stored leaves the log untouched.
    pub fn remove(&self, id: &EntryId) -> StorageResult<Option<Entry>> {
        self.update(|entries| {
            let removed = entries
                .iter()
                .position(|e| &e.id == id)
                .map(|index| entries.remove(index));

            match &removed {
                Some(_) => tracing::info!(%id, "Removed entry"),
                None => tracing::debug!(%id, "No entry to remove"),
            }

            Ok(removed)
        })
    }

    fn read(&self) -> StorageResult<Vec<Entry>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No adventure log yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if raw.trim_ascii().is_empty() {
            return Ok(Vec::new());
        }

        // Bytes that aren't UTF-8 surface as `Corrupt`, like any other bad JSON.
        let entries: Vec<Entry> =
            serde_json::from_slice(&raw).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(count = entries.len(), "Loaded adventure log");

        Ok(entries)
    }

    /// Read-modify-write under the writer lock. Nothing is written when `f`
    /// fails.
    fn update<T>(
        &self,
        f: impl FnOnce(&mut Vec<Entry>) -> StorageResult<T>,
    ) -> StorageResult<T> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let _lock = WriterLock::acquire(&self.path)?;

        let mut entries = self.list()?;
        let out = f(&mut entries)?;
        self.persist(&entries)?;

        Ok(out)
    }

    /// Writes `<file>.new` and renames it over the log. The staging file is
    /// removed again if any step fails.
    fn persist(&self, entries: &[Entry]) -> StorageResult<()> {
        let staging = sidecar(&self.path, "new");

        let result = write_staging(&staging, entries).and_then(|()| {
            fs::rename(&staging, &self.path).map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })
        });

        if result.is_err() {
            if let Err(err) = fs::remove_file(&staging) {
                if err.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %staging.display(),
                        error = %err,
                        "Failed to remove staged adventure log"
                    );
                }
            }
        }

        result
    }
}

fn write_staging(staging: &Path, entries: &[Entry]) -> StorageResult<()> {
    let write_err = |source: io::Error| StorageError::Write {
        path: staging.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(staging).map_err(write_err)?);
    serde_json::to_writer(&mut writer, entries).map_err(StorageError::Serialize)?;
    writer.flush().map_err(write_err)
}

/// Exclusive right to rewrite the log, held for as long as the value lives.
struct WriterLock {
    path: PathBuf,
}

impl WriterLock {
    fn acquire(store: &Path) -> StorageResult<Self> {
        let path = sidecar(store, "lock");

        match File::create_new(&path) {
            Ok(_) => Ok(Self { path }),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                Err(StorageError::Locked(path))
            }
            Err(source) => Err(StorageError::Write { path, source }),
        }
    }
}

impl Drop for WriterLock {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "Failed to release adventure log lock"
            );
        }
    }
}

/// `adventures.json` + `lock` -> `adventures.json.lock`
fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(DEFAULT_STORE_FILE));
    name.push(".");
    name.push(suffix);

    path.with_file_name(name)
}
