use crate::store::KeyValueStore;
use crate::{StoreError, StoreResult};

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use log::{debug, info};

/// File-backed store: one file per key under a data directory.
///
/// Writes use the atomic pattern:
/// 1. Write to temp file
/// 2. Sync to disk (fsync)
/// 3. Atomic rename to final location
///
/// This prevents corruption if the process crashes mid-write; a crash
/// loses at most the in-flight value, never leaves a torn file.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::dir_creation(dir.clone(), e))?;

        info!("File store opened at {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            debug!("No value for key '{key}' at {}", path.display());
            return Ok(None);
        }

        let contents =
            fs::read_to_string(&path).map_err(|e| StoreError::file_read(path.clone(), e))?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let final_path = self.path_for(key);
        let temp_path = self
            .dir
            .join(format!("{key}.json.tmp.{}", std::process::id()));

        // Write to temp file with explicit sync
        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;

            file.write_all(value.as_bytes())
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;
        }

        // Atomic rename
        fs::rename(&temp_path, &final_path).map_err(|e| {
            // Clean up temp file on failure
            let _ = fs::remove_file(&temp_path);
            StoreError::atomic_rename(temp_path, final_path.clone(), e)
        })?;

        debug!("Stored key '{key}'");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key);

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed key '{key}'");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::file_remove(path, e)),
        }
    }
}
