//! Filesystem cache provider
//!
//! Stores one JSON document per key under `<path>/<namespace>/`. File names
//! are the SHA-256 of the key, so arbitrary keys are safe on disk. Entries
//! are written to a temporary file and renamed into place, so a reader sees
//! either the old document or the new one.

use crate::constants::FILE_CACHE_EXTENSION;
use dorm_application::ports::registry::{CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry};
use dorm_domain::error::{Error, Result};
use dorm_domain::ports::cache::{CacheEntryConfig, CacheProvider, CacheStats};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::NamedTempFile;

#[derive(Debug, Serialize, Deserialize)]
struct FileEntry {
    key: String,
    value: String,
    expires_at: Option<u64>,
}

impl FileEntry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= now_secs())
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Filesystem cache provider
#[derive(Debug)]
pub struct FileCacheProvider {
    directory: PathBuf,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FileCacheProvider {
    /// Create a file cache rooted at `path`, isolated by `namespace`
    pub fn new(path: impl AsRef<Path>, namespace: &str) -> Result<Self> {
        let directory = path.as_ref().join(namespace.trim_end_matches('_'));
        fs::create_dir_all(&directory).map_err(|e| {
            Error::io_with_source(
                format!("Failed to create cache directory {}", directory.display()),
                e,
            )
        })?;

        Ok(Self {
            directory,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Directory holding the cache entries
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(key.as_bytes()));
        self.directory
            .join(format!("{digest}.{FILE_CACHE_EXTENSION}"))
    }

    fn read_entry(&self, path: &Path) -> Result<Option<FileEntry>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::io_with_source(
                    format!("Failed to read cache entry {}", path.display()),
                    e,
                ));
            }
        };

        let entry: FileEntry = serde_json::from_str(&content)?;
        if entry.is_expired() {
            remove_file(path)?;
            return Ok(None);
        }
        Ok(Some(entry))
    }

    fn entry_paths(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.directory).map_err(|e| {
            Error::io_with_source(
                format!("Failed to list cache directory {}", self.directory.display()),
                e,
            )
        })?;

        Ok(entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == FILE_CACHE_EXTENSION)
            })
            .collect())
    }

    fn live_entries(&self) -> Result<usize> {
        let mut count = 0;
        for path in self.entry_paths()? {
            if self.read_entry(&path)?.is_some() {
                count += 1;
            }
        }
        Ok(count)
    }
}

fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io_with_source(
            format!("Failed to remove cache entry {}", path.display()),
            e,
        )),
    }
}

impl CacheProvider for FileCacheProvider {
    fn get_json(&self, key: &str) -> Result<Option<String>> {
        let entry = self.read_entry(&self.entry_path(key))?;
        let counter = if entry.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(entry.map(|e| e.value))
    }

    fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let entry = FileEntry {
            key: key.to_string(),
            value: value.to_string(),
            expires_at: config.ttl.map(|ttl| now_secs() + ttl.as_secs()),
        };
        let path = self.entry_path(key);
        let write_error = |e: std::io::Error| {
            Error::io_with_source(
                format!("Failed to write cache entry {}", path.display()),
                e,
            )
        };

        let mut file = NamedTempFile::new_in(&self.directory).map_err(write_error)?;
        file.write_all(&serde_json::to_vec(&entry)?)
            .map_err(write_error)?;
        file.persist(&path).map_err(|e| write_error(e.error))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let path = self.entry_path(key);
        let existed = self.read_entry(&path)?.is_some();
        remove_file(&path)?;
        Ok(existed)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.read_entry(&self.entry_path(key))?.is_some())
    }

    fn clear(&self) -> Result<()> {
        for path in self.entry_paths()? {
            remove_file(&path)?;
        }
        Ok(())
    }

    fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.live_entries()? as u64,
        })
    }

    fn size(&self) -> Result<usize> {
        self.live_entries()
    }

    fn provider_name(&self) -> &str {
        "file"
    }
}

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static FILE_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "file",
    description: "JSON files in a cache directory",
    factory: |config: &CacheProviderConfig| {
        let path = config
            .path
            .as_ref()
            .ok_or_else(|| "File cache requires a path".to_string())?;
        let provider = FileCacheProvider::new(path, &config.namespace).map_err(|e| e.to_string())?;
        Ok(Arc::new(provider))
    },
};
