//! File-backed token store.
//!
//! The native analogue of the browser cookie jar: a small TOML file holding
//! the access/refresh pair, rewritten atomically under an exclusive lock so
//! concurrent plaza processes never observe a torn credential file.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use plaza_core::error::{PlazaError, Result};
use plaza_core::token::{TokenPair, TokenStore};

use crate::paths::PlazaPaths;

/// A [`TokenStore`] persisted as `credentials.toml`.
///
/// Reads tolerate a missing file (a valid logged-out state). Writes go
/// through a temp file plus rename, guarded by a `.lock` file, and the
/// credential file is created with owner-only permissions on Unix.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default credential path
    /// (`~/.config/plaza/credentials.toml`).
    pub fn new() -> Result<Self> {
        let path = PlazaPaths::credentials_file()
            .map_err(|e| PlazaError::config(format!("Failed to resolve credential path: {}", e)))?;
        Ok(Self::with_path(path))
    }

    /// Creates a store at a custom path. Used by tests.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_pair(&self) -> Result<Option<TokenPair>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let pair: TokenPair = toml::from_str(&content)?;
        Ok(Some(pair))
    }

    fn write_pair(&self, pair: &TokenPair) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let _lock = FileLock::acquire(&self.path)?;

        let tmp_path = self.tmp_path()?;
        let content = toml::to_string_pretty(pair)?;
        fs::write(&tmp_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, &self.path)?;
        tracing::debug!("Stored credential pair at {:?}", self.path);
        Ok(())
    }

    fn remove_file(&self) -> Result<()> {
        if self.path.exists() {
            let _lock = FileLock::acquire(&self.path)?;
            fs::remove_file(&self.path)?;
            tracing::debug!("Removed credential file at {:?}", self.path);
        }
        Ok(())
    }

    fn tmp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| PlazaError::config("Credential path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| PlazaError::config("Credential path has no file name"))?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

#[async_trait::async_trait]
impl TokenStore for FileTokenStore {
    async fn access_token(&self) -> Option<String> {
        self.read_pair().ok().flatten().map(|p| p.access_token)
    }

    async fn refresh_token(&self) -> Option<String> {
        self.read_pair().ok().flatten().map(|p| p.refresh_token)
    }

    async fn store(&self, pair: TokenPair) -> Result<()> {
        self.write_pair(&pair)
    }

    async fn clear(&self) -> Result<()> {
        self.remove_file()
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    /// Acquires an exclusive lock next to the given path.
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| PlazaError::data_access(format!("Failed to acquire lock: {}", e)))?;
        }

        #[cfg(not(unix))]
        {
            // No file locking on non-Unix systems; acceptable for a
            // single-user client.
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pair() -> TokenPair {
        TokenPair {
            access_token: "atk-1".to_string(),
            refresh_token: "rtk-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_logged_out() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_path(temp_dir.path().join("credentials.toml"));
        assert!(store.access_token().await.is_none());
        assert!(store.refresh_token().await.is_none());
    }

    #[tokio::test]
    async fn test_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_path(temp_dir.path().join("credentials.toml"));

        store.store(pair()).await.unwrap();
        assert_eq!(store.access_token().await.as_deref(), Some("atk-1"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("rtk-1"));
    }

    #[tokio::test]
    async fn test_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.toml");
        let store = FileTokenStore::with_path(&path);

        store.store(pair()).await.unwrap();
        assert!(path.exists());

        store.clear().await.unwrap();
        assert!(!path.exists());
        assert!(store.access_token().await.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_credential_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.toml");
        let store = FileTokenStore::with_path(&path);

        store.store(pair()).await.unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
