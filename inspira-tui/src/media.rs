use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Coarse media classification derived from the MIME type. Anything that is
/// not video or audio renders as an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    /// Classifies from a MIME type like "video/mp4". A missing or unknown
    /// type falls back to `Image`.
    pub fn from_mime(mime: Option<&str>) -> Self {
        let Some(mime) = mime else {
            return MediaKind::Image;
        };
        match mime.split('/').next().unwrap_or("").to_ascii_lowercase().as_str() {
            "video" => MediaKind::Video,
            "audio" => MediaKind::Audio,
            _ => MediaKind::Image,
        }
    }
}

/// Normalized descriptor handed to an external player. Images have no player
/// source; video and audio carry the URL plus the original MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSource {
    pub src: String,
    pub mime: Option<String>,
}

impl PlayerSource {
    /// Builds the player source for an artwork, or `None` for images and
    /// artworks whose media URL is not available yet.
    pub fn for_media(url: Option<&str>, kind: MediaKind, mime: Option<&str>) -> Option<Self> {
        let url = url?;
        if kind == MediaKind::Image {
            return None;
        }
        Some(Self {
            src: url.to_string(),
            mime: mime.map(str::to_string),
        })
    }
}

/// Local preview of a media file selected for upload.
///
/// The bytes are copied into a temp file so an external viewer can open them.
/// Writing a new preview over an old one, or dropping the value, removes the
/// file — previews must not accumulate across repeated file selections.
#[derive(Debug)]
pub struct MediaPreview {
    path: PathBuf,
}

impl MediaPreview {
    /// Writes `bytes` to `<dir>/<file_name>` and takes ownership of the file.
    pub fn write(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<Self> {
        fs::create_dir_all(dir).context("Failed to create preview directory")?;
        let path = dir.join(file_name);
        fs::write(&path, bytes).context("Failed to write media preview")?;
        log::debug!("Wrote media preview to {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for MediaPreview {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if self.path.exists() {
                log::warn!("Failed to remove media preview {}: {}", self.path.display(), e);
            }
        } else {
            log::debug!("Removed media preview {}", self.path.display());
        }
    }
}
