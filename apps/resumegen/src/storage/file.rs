use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::debug;

use super::{KeyValueStorage, StorageError};

/// Slot storage backed by one JSON file per key under a data directory.
///
/// Writes go to a temp file in the same directory and are renamed into place,
/// so a crash mid-write never leaves a truncated slot behind. Callers hold the
/// store lock across these calls, so on a multi-thread runtime the file work
/// runs under `block_in_place` and other tasks move off this worker.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (and creates, if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match blocking_io(|| fs::read_to_string(self.slot_path(key))) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            key: key.to_string(),
            source,
        };

        blocking_io(|| {
            let mut tmp = NamedTempFile::new_in(&self.dir)?;
            tmp.write_all(value.as_bytes())?;
            tmp.persist(self.slot_path(key)).map_err(|e| e.error)?;
            Ok::<(), std::io::Error>(())
        })
        .map_err(io_err)?;

        debug!("Persisted slot {key} ({} bytes)", value.len());
        Ok(())
    }
}

/// Runs blocking file work, handing the worker thread over first when inside
/// a multi-thread runtime. `block_in_place` is not available on the
/// current-thread runtime, so there (and outside any runtime) `f` runs inline.
fn blocking_io<R>(f: impl FnOnce() -> R) -> R {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}
