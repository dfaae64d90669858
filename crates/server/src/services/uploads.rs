//! Image storage for products and the shop logo.
//!
//! Files land under the configured uploads directory with a random name and
//! come back as a stable `/uploads/...` URL, served by the static file
//! route. Size caps and the extension allowlist differ per kind.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// What the uploaded image is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Product photos: 5 MB cap.
    Product,
    /// Shop logo: 1 MB cap, SVG allowed.
    Logo,
}

impl ImageKind {
    const fn max_bytes(self) -> usize {
        match self {
            Self::Product => 5_000_000,
            Self::Logo => 1_000_000,
        }
    }

    const fn max_megabytes(self) -> u32 {
        match self {
            Self::Product => 5,
            Self::Logo => 1,
        }
    }

    fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Product => &["jpg", "jpeg", "png", "gif"],
            Self::Logo => &["jpg", "jpeg", "png", "gif", "svg"],
        }
    }
}

/// Errors from storing an uploaded image.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The file exceeds the per-kind size cap.
    #[error("file too large. Maximum size is {limit_mb}MB")]
    TooLarge { limit_mb: u32 },

    /// The file extension is not in the allowlist.
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    /// Writing the file failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem-backed image store.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the uploads directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Persist an uploaded image, returning its public URL path.
    ///
    /// # Errors
    ///
    /// Returns `TooLarge` / `UnsupportedType` before anything is written;
    /// `Io` if the write itself fails.
    pub async fn store(
        &self,
        kind: ImageKind,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        if bytes.len() > kind.max_bytes() {
            return Err(UploadError::TooLarge {
                limit_mb: kind.max_megabytes(),
            });
        }

        let extension = validate_extension(kind, original_name)?;
        let filename = format!("{}.{extension}", Uuid::new_v4());
        tokio::fs::write(self.dir.join(&filename), bytes).await?;

        Ok(format!("/uploads/{filename}"))
    }
}

fn validate_extension(kind: ImageKind, original_name: &str) -> Result<String, UploadError> {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| UploadError::UnsupportedType(original_name.to_owned()))?;

    if kind.allowed_extensions().contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(UploadError::UnsupportedType(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_allowlist_per_kind() {
        assert!(validate_extension(ImageKind::Product, "photo.JPG").is_ok());
        assert!(validate_extension(ImageKind::Logo, "mark.svg").is_ok());
        assert!(matches!(
            validate_extension(ImageKind::Product, "mark.svg"),
            Err(UploadError::UnsupportedType(_))
        ));
        assert!(matches!(
            validate_extension(ImageKind::Product, "archive.zip"),
            Err(UploadError::UnsupportedType(_))
        ));
        assert!(validate_extension(ImageKind::Product, "no-extension").is_err());
    }

    #[tokio::test]
    async fn test_store_rejects_oversize_before_writing() {
        let dir = std::env::temp_dir().join(format!("pw-uploads-{}", Uuid::new_v4()));
        let store = UploadStore::new(&dir);
        store.ensure_dir().await.expect("dir created");

        let oversized = vec![0_u8; ImageKind::Logo.max_bytes() + 1];
        let result = store.store(ImageKind::Logo, "logo.png", &oversized).await;
        assert!(matches!(result, Err(UploadError::TooLarge { limit_mb: 1 })));

        let mut entries = tokio::fs::read_dir(&dir).await.expect("readable");
        assert!(entries.next_entry().await.expect("readable").is_none());

        tokio::fs::remove_dir_all(&dir).await.expect("cleanup");
    }
}
