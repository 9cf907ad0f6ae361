//! File Storage Module
//!
//! Stores each entry as a file under a root directory.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use super::StorageBackend;
use crate::error::StorageError;

const TEMP_SUFFIX: &str = ".tmp";

// == File Storage ==
/// Filesystem backend rooted at a single directory.
///
/// Keys are relative `/`-separated paths below the root.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    // == Constructor ==
    /// Opens storage at `root`, creating the directory when it is missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            key: root.display().to_string(),
            source,
        })?;
        info!(root = %root.display(), "storage root ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Removes the root directory and everything below it.
    pub async fn clean_up(&self) -> Result<(), StorageError> {
        match fs::remove_dir_all(&self.root).await {
            Ok(()) => {
                debug!(root = %self.root.display(), "storage root removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from_io(&self.root.display().to_string(), e)),
        }
    }

    // == Key Mapping ==
    /// Maps a key onto its file, one segment per path component.
    ///
    /// Empty, `.` and `..` segments are refused so that distinct keys never
    /// share a file. Segments shaped like write temp files are refused so
    /// that no write can clobber another key's entry.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let invalid = || StorageError::InvalidKey(key.to_string());

        let bad_segment = |part: &str| {
            part.is_empty() || part == "." || part == ".." || Self::is_temp_name(part)
        };
        if key.is_empty() || key.split('/').any(bad_segment) {
            return Err(invalid());
        }

        let mut path = self.root.clone();
        for component in Path::new(key).components() {
            match component {
                Component::Normal(part) => path.push(part),
                _ => return Err(invalid()),
            }
        }

        if path == self.root {
            return Err(invalid());
        }
        Ok(path)
    }

    fn temp_path_for(path: &Path) -> PathBuf {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        path.with_file_name(format!(".{}{}", name, TEMP_SUFFIX))
    }

    fn is_temp_name(name: &str) -> bool {
        name.starts_with('.') && name.ends_with(TEMP_SUFFIX)
    }

    fn is_temp_file(name: &OsStr) -> bool {
        Self::is_temp_name(&name.to_string_lossy())
    }

    fn key_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

#[async_trait]
impl StorageBackend for FileStorage {
    async fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(key)?;
        fs::read(&path)
            .await
            .map_err(|e| StorageError::from_io(key, e))
    }

    async fn write(&self, data: &[u8], key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::from_io(key, e))?;
        }

        // Readers only ever see a complete file.
        let temp_path = Self::temp_path_for(&path);
        fs::write(&temp_path, data)
            .await
            .map_err(|e| StorageError::from_io(key, e))?;

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::from_io(key, e));
        }

        debug!(key, bytes = data.len(), "entry written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| StorageError::from_io(key, e))
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let root_key = self.root.display().to_string();
        let mut keys = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(StorageError::from_io(&root_key, e)),
            };

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| StorageError::from_io(&root_key, e))?
            {
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| StorageError::from_io(&root_key, e))?;
                let path = entry.path();

                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() && !Self::is_temp_file(&entry.file_name()) {
                    if let Some(key) = self.key_for(&path) {
                        keys.push(key);
                    }
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}
