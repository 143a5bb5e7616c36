use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Persists the bearer token in the user's home directory.
///
/// The token is stored in `~/.inspira/token` with 0600 permissions so only
/// the owner can read it. Corrupt content is treated the same as "no token":
/// logged, reported as `None`, never surfaced as an error to the UI layer.
#[derive(Debug, Clone)]
pub struct TokenStore {
    file_path: PathBuf,
}

impl TokenStore {
    /// Creates a store at the default path `~/.inspira/token`.
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        let file_path = home_dir.join(".inspira").join("token");
        Ok(Self { file_path })
    }

    /// Creates a store at an explicit path (used by tests).
    pub fn with_path(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    /// Loads the persisted token.
    ///
    /// - `Ok(Some(token))` if the file holds something token-shaped
    /// - `Ok(None)` if the file is missing, empty or corrupted
    /// - `Err(_)` only for filesystem failures
    pub fn load(&self) -> Result<Option<String>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file_path).context("Failed to read token file")?;
        let token = content.trim();

        if token.is_empty() {
            log::warn!("Token file is empty, treating as no session");
            return Ok(None);
        }

        // A compact JWT is three dot-separated base64url segments; anything
        // without exactly two dots cannot be decoded and is dropped here.
        if token.split('.').count() != 3 {
            log::warn!("Stored token is not a compact three-part token, treating as corrupted");
            return Ok(None);
        }

        if token.chars().any(|c| c.is_control()) {
            log::warn!("Token file contains control characters, treating as corrupted");
            return Ok(None);
        }

        log::debug!("Loaded bearer token from {}", self.file_path.display());
        Ok(Some(token.to_string()))
    }

    /// Saves the token with an atomic write and 0600 permissions.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).context("Failed to create .inspira directory")?;
        }

        self.cleanup_stale_files()?;

        // Write to a temporary file, then rename over the real one
        let temp_path = self.file_path.with_extension("tmp");
        let mut file =
            fs::File::create(&temp_path).context("Failed to create temporary token file")?;
        file.write_all(token.as_bytes())
            .context("Failed to write bearer token")?;
        file.sync_all().context("Failed to sync token file to disk")?;
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&temp_path, permissions)
                .context("Failed to set token file permissions")?;
        }

        fs::rename(&temp_path, &self.file_path).context("Failed to rename temporary token file")?;

        log::info!("Saved bearer token to {}", self.file_path.display());
        Ok(())
    }

    /// Deletes the token file. Succeeds even when the file is already gone.
    pub fn delete(&self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path).context("Failed to delete token file")?;
            log::info!("Deleted token file at {}", self.file_path.display());
        } else {
            log::debug!("Token file does not exist, nothing to delete");
        }
        Ok(())
    }

    /// Removes leftover temporary or backup token files so only one token
    /// file exists per user.
    fn cleanup_stale_files(&self) -> Result<()> {
        let Some(parent) = self.file_path.parent() else {
            return Ok(());
        };
        if !parent.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(parent).context("Failed to read .inspira directory")? {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if path == self.file_path {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                if file_name.starts_with("token") {
                    log::debug!("Removing stale token file: {}", path.display());
                    if let Err(e) = fs::remove_file(&path) {
                        log::warn!("Failed to remove stale token file {}: {}", path.display(), e);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.file_path
    }
}
