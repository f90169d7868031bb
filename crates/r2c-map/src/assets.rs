//! Image assets embedded into the exported page as data URIs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported image format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    mime: String,
    bytes: Vec<u8>,
}

impl ImageAsset {
    pub fn from_bytes(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Read an image from disk, inferring its MIME type from the extension.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let mime = mime_for_path(path).ok_or_else(|| AssetError::UnsupportedFormat(path.to_path_buf()))?;
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded {} bytes of {} from {}", bytes.len(), mime, path.display());
        Ok(Self::from_bytes(bytes, mime))
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// `data:<mime>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
