//! File-backed response cache with mtime-based staleness
//!
//! Bodies live as plain files under the cache root; a file's modification
//! time is its staleness clock. Cache IO never fails the surrounding
//! operation: every failure is logged as a warning and treated as a miss.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::client::session::SessionTokens;

/// Browser-session token pair, persisted as a sibling of the `bc-api` tree
const TOKEN_FILE: &str = "bc-api-browser-tokens.json";

/// File cache rooted at `<config-dir>/cache`
pub struct CacheStorage {
    root: PathBuf,
}

impl CacheStorage {
    pub fn open_at(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map hierarchical key segments to a path under the root. Segments are
    /// sanitized path components: empty parts vanish and dot traversals are
    /// neutralized, so endpoint content cannot escape the cache tree.
    pub fn path_for(&self, segments: &[String]) -> PathBuf {
        let mut path = self.root.clone();
        for segment in segments {
            if let Some(name) = sanitize_segment(segment) {
                path.push(name);
            }
        }
        path
    }

    /// Return the cached body only when the entry exists and is younger than
    /// `ttl`. Read failures are warnings, reported as a miss.
    pub fn get(&self, segments: &[String], ttl: Duration) -> Option<String> {
        let path = self.path_for(segments);
        self.read_fresh(&path, ttl)
    }

    /// Write a body under the given key, creating intermediate directories.
    /// Write failures are warnings; the fetched data stays usable either way.
    pub fn put(&self, segments: &[String], body: &str) {
        let path = self.path_for(segments);
        self.write_entry(&path, body);
    }

    /// Load the persisted browser-session token pair if it is still fresh
    pub fn load_tokens(&self, ttl: Duration) -> Option<SessionTokens> {
        let path = self.root.join(TOKEN_FILE);
        let raw = self.read_fresh(&path, ttl)?;
        match serde_json::from_str(&raw) {
            Ok(tokens) => Some(tokens),
            Err(e) => {
                log::warn!("Failed to parse token file ({}): {e}", path.display());
                None
            }
        }
    }

    /// Persist the browser-session token pair, pretty-printed
    pub fn store_tokens(&self, tokens: &SessionTokens) {
        let path = self.root.join(TOKEN_FILE);
        match serde_json::to_string_pretty(tokens) {
            Ok(mut json) => {
                json.push('\n');
                self.write_entry(&path, &json);
            }
            Err(e) => log::warn!("Failed to serialize session tokens: {e}"),
        }
    }

    /// Remove every cached entry (response bodies and session tokens).
    /// Returns the number of files removed.
    pub fn clear(&self) -> std::io::Result<usize> {
        let mut removed = 0;

        let api_dir = self.root.join("bc-api");
        if api_dir.exists() {
            removed += count_files(&api_dir)?;
            std::fs::remove_dir_all(&api_dir)?;
        }

        let token_path = self.root.join(TOKEN_FILE);
        if token_path.exists() {
            std::fs::remove_file(&token_path)?;
            removed += 1;
        }

        Ok(removed)
    }

    fn read_fresh(&self, path: &Path, ttl: Duration) -> Option<String> {
        let meta = match std::fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!(
                    "Failed to stat cache file ({}) - possible permissions issue: {e}",
                    path.display()
                );
                return None;
            }
        };

        let modified = match meta.modified() {
            Ok(modified) => modified,
            Err(e) => {
                log::warn!("No modification time for cache file ({}): {e}", path.display());
                return None;
            }
        };

        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default();
        if age >= ttl {
            log::debug!("Cache entry expired ({})", path.display());
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(body) => {
                log::debug!("Cache hit ({})", path.display());
                Some(body)
            }
            Err(e) => {
                log::warn!(
                    "Failed to read cache file ({}) - possible permissions issue: {e}",
                    path.display()
                );
                None
            }
        }
    }

    fn write_entry(&self, path: &Path, body: &str) {
        if let Some(parent) = path.parent() {
            if let Err(e) = create_cache_dir(parent) {
                log::warn!("Failed to create cache dir ({}): {e}", parent.display());
                return;
            }
        }

        if let Err(e) = std::fs::write(path, body) {
            log::warn!(
                "Failed to write to cache file ({}) - possible permissions issue: {e}",
                path.display()
            );
        }
    }
}

fn sanitize_segment(segment: &str) -> Option<String> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed == "." || trimmed == ".." {
        return Some("_".to_string());
    }
    Some(trimmed.replace(['/', '\\', ':'], "_"))
}

#[cfg(unix)]
fn create_cache_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o750)
        .create(path)
}

#[cfg(not(unix))]
fn create_cache_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}

fn count_files(dir: &Path) -> std::io::Result<usize> {
    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            count += count_files(&path)?;
        } else {
            count += 1;
        }
    }
    Ok(count)
}
