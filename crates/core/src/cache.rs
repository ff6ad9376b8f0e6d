//! Content-addressed cache for rendered page content.
//!
//! Rendered HTML is expensive to produce (a full headless-browser session),
//! so the fetcher stores each rendered blob under a deterministic hash of the
//! requested URL and reuses it verbatim on subsequent requests. Entries are
//! never expired; staleness handling is out of scope.
//!
//! The store is an injected collaborator: [`FileCache`] is the production
//! implementation, [`MemoryCache`] backs tests and embedded use.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use crate::Result;

/// Computes the cache key for a URL string.
///
/// The key is the SHA-256 digest of the URL text, rendered as lowercase hex.
/// Identical URL strings always map to the same key; the hash is over the
/// raw text, so `https://example.com` and `https://example.com/` are
/// distinct entries.
///
/// # Example
///
/// ```rust
/// use sitelens_core::cache::content_key;
///
/// let key = content_key("https://example.com");
/// assert_eq!(key.len(), 64);
/// assert_eq!(key, content_key("https://example.com"));
/// ```
pub fn content_key(url: &str) -> String {
    format!("{:x}", Sha256::digest(url.as_bytes()))
}

/// Key-value store for rendered page content.
///
/// Keys are fixed-width hex digests produced by [`content_key`]. A store
/// only needs existence-based reuse: `get` returning `Some` means the entry
/// is served as-is, with no TTL or validation.
pub trait CacheStore: Send + Sync {
    /// Looks up a cached blob by key.
    ///
    /// Returns `Ok(None)` when no entry exists. I/O failures are errors;
    /// a missing entry is not.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores a blob under the given key, overwriting any previous entry.
    fn put(&self, key: &str, content: &[u8]) -> Result<()>;
}

/// File-backed cache store, one file per key.
///
/// Entries live directly under the cache directory, named by their hex key.
/// The directory is created lazily on first write.
///
/// # Example
///
/// ```rust,no_run
/// use sitelens_core::cache::{CacheStore, FileCache, content_key};
///
/// let cache = FileCache::new("/tmp/sitelens-cache");
/// let key = content_key("https://example.com");
/// cache.put(&key, b"<html></html>").unwrap();
/// assert!(cache.get(&key).unwrap().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Creates a file cache rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a file cache under the platform cache directory.
    ///
    /// Falls back to a relative `cache/` directory when the platform
    /// directory cannot be determined.
    pub fn default_location() -> Self {
        let dir = dirs::cache_dir()
            .map(|d| d.join("sitelens"))
            .unwrap_or_else(|| PathBuf::from("cache"));
        Self { dir }
    }

    /// The directory entries are stored under.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl CacheStore for FileCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(&path)?))
    }

    fn put(&self, key: &str, content: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.entry_path(key), content)?;
        Ok(())
    }
}

/// In-memory cache store.
///
/// Used by tests and by callers that want render reuse within a single
/// process without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, content: &[u8]) -> Result<()> {
        self.entries.lock().unwrap().insert(key.to_string(), content.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_key_is_stable() {
        let a = content_key("https://example.com");
        let b = content_key("https://example.com");
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_key_distinguishes_urls() {
        assert_ne!(content_key("https://example.com"), content_key("https://example.com/"));
    }

    #[test]
    fn test_content_key_is_hex() {
        let key = content_key("https://example.com/page");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_memory_cache_roundtrip() {
        let cache = MemoryCache::new();
        let key = content_key("https://example.com");

        assert!(cache.get(&key).unwrap().is_none());
        cache.put(&key, b"<html></html>").unwrap();
        assert_eq!(cache.get(&key).unwrap().unwrap(), b"<html></html>");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_memory_cache_overwrites() {
        let cache = MemoryCache::new();
        cache.put("k", b"first").unwrap();
        cache.put("k", b"second").unwrap();
        assert_eq!(cache.get("k").unwrap().unwrap(), b"second");
    }

    #[test]
    fn test_file_cache_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        let key = content_key("https://example.com");

        assert!(cache.get(&key).unwrap().is_none());
        cache.put(&key, b"<!DOCTYPE html>\n<html></html>").unwrap();
        assert_eq!(cache.get(&key).unwrap().unwrap(), b"<!DOCTYPE html>\n<html></html>");
    }

    #[test]
    fn test_file_cache_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let cache = FileCache::new(&nested);

        cache.put("key", b"content").unwrap();
        assert!(nested.join("key").exists());
    }
}
