use crate::entries::EntryId;
use std::{io, path::PathBuf};

/// Failure to read or write the adventure log.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read adventure log {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write adventure log {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Adventure log {} is corrupt", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize adventure log")]
    Serialize(#[source] serde_json::Error),

    #[error("Adventure log is locked by another writer ({})", .0.display())]
    Locked(PathBuf),

    #[error("An entry with id {0} already exists")]
    DuplicateId(EntryId),
}

pub type StorageResult<T> = Result<T, StorageError>;
