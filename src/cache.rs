//! Size-addressed cache for downloaded release assets
//!
//! Entries live at `<root>/<tag>/<asset name>`. The declared size from the
//! release API is the sole validity oracle: a matching on-disk size is a
//! hit, a mismatch invalidates the entry. No content digest is used because
//! the release API exposes none for assets; the hosting service is trusted.
//! Entries are never pruned automatically, the cache directory is
//! user-owned.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// Validity of a cache entry against an asset's declared size
#[derive(Debug, PartialEq, Eq)]
pub enum CacheStatus {
    /// Present with the expected byte size
    Hit(PathBuf),
    /// Present but wrong size, must be deleted and re-downloaded
    Stale(PathBuf),
    /// Not present
    Miss,
}

/// Filesystem cache keyed by release tag and asset name
#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path an entry would occupy, whether or not it exists
    pub fn entry_path(&self, tag: &str, asset_name: &str) -> PathBuf {
        self.root.join(tag).join(asset_name)
    }

    /// Check an entry against the declared size
    pub fn status(&self, tag: &str, asset_name: &str, declared_size: u64) -> Result<CacheStatus> {
        let path = self.entry_path(tag, asset_name);
        if !path.is_file() {
            return Ok(CacheStatus::Miss);
        }

        let size = fs::metadata(&path)?.len();
        if size == declared_size {
            debug!(path = %path.display(), "cached asset exists, using the cache");
            Ok(CacheStatus::Hit(path))
        } else {
            debug!(
                path = %path.display(),
                expected = declared_size,
                actual = size,
                "cached asset is invalid, deleting the cache"
            );
            Ok(CacheStatus::Stale(path))
        }
    }

    /// Remove a stale entry so it can be re-downloaded
    pub fn invalidate(&self, tag: &str, asset_name: &str) -> Result<()> {
        let path = self.entry_path(tag, asset_name);
        if path.is_file() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Stream an asset body into the cache
    ///
    /// The body is copied to a temporary file in the entry's directory and
    /// renamed into place, so a failed download never leaves a partial
    /// entry behind. Executable bits are set unconditionally afterward.
    pub fn store(&self, tag: &str, asset_name: &str, body: &mut impl Read) -> Result<PathBuf> {
        let path = self.entry_path(tag, asset_name);
        let dir = path.parent().expect("cache entry has a parent directory");
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        std::io::copy(body, &mut tmp)?;
        tmp.persist(&path).map_err(|e| e.error)?;

        set_executable(&path)?;
        Ok(path)
    }
}

/// Force executable permission bits on a cached binary
pub fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}
