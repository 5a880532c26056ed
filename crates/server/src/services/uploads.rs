//! Image uploads for beers and the taproom logo.
//!
//! Uploads are validated against an allow-list of extensions and content
//! types, read with a size cap while streaming, and written through an
//! [`ImageStore`]. Only the resulting URL path is persisted in the database.
//!
//! A rejected upload never fails the surrounding form submission; callers log
//! the [`UploadError`] and carry on without an image.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use axum::extract::multipart::{Field, MultipartError};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Largest accepted image, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// URL prefix the upload directory is served under.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

const BEER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
const LOGO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];

const BEER_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/pjpeg",
    "image/png",
    "image/gif",
    "image/webp",
];
const LOGO_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/pjpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Errors from validating or storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// File type or content is not acceptable.
    #[error("upload rejected: {0}")]
    Rejected(String),

    /// File exceeds [`MAX_UPLOAD_BYTES`].
    #[error("upload exceeds 10 MiB")]
    TooLarge,

    /// The multipart stream broke while reading the file.
    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// Writing the file failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// What an uploaded image is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    BeerImage,
    Logo,
}

impl UploadKind {
    /// Multipart field carrying the file.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::BeerImage => "image",
            Self::Logo => "logo",
        }
    }

    const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::BeerImage => BEER_EXTENSIONS,
            Self::Logo => LOGO_EXTENSIONS,
        }
    }

    const fn content_types(self) -> &'static [&'static str] {
        match self {
            Self::BeerImage => BEER_CONTENT_TYPES,
            Self::Logo => LOGO_CONTENT_TYPES,
        }
    }

    /// Check a submitted file name and content type.
    ///
    /// Returns the lowercased extension on success.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Rejected` if either is outside the allow-list.
    pub fn validate(self, file_name: &str, content_type: Option<&str>) -> Result<String, UploadError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|ext| self.extensions().contains(&ext.as_str()))
            .ok_or_else(|| UploadError::Rejected(format!("extension of {file_name:?}")))?;

        let content_type = content_type
            .map(|ct| ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
            .unwrap_or_default();
        if !self.content_types().contains(&content_type.as_str()) {
            return Err(UploadError::Rejected(format!(
                "content type {content_type:?}"
            )));
        }

        Ok(extension)
    }

    /// Stored file name, relative to the upload directory.
    #[must_use]
    pub fn relative_path(self, extension: &str, now: DateTime<Utc>) -> String {
        match self {
            Self::BeerImage => format!("beers/beer-{}.{extension}", now.timestamp_millis()),
            Self::Logo => format!("logo.{extension}"),
        }
    }
}

/// An upload that passed validation, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedImage {
    pub kind: UploadKind,
    pub extension: String,
    pub bytes: Vec<u8>,
}

/// Read a multipart file field, enforcing the allow-list and size cap.
///
/// Returns `Ok(None)` when the form was submitted without choosing a file.
///
/// # Errors
///
/// Returns `UploadError` if the file is rejected, too large, or the stream fails.
pub async fn read_image(
    mut field: Field<'_>,
    kind: UploadKind,
) -> Result<Option<AcceptedImage>, UploadError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    if file_name.is_empty() {
        while field.chunk().await?.is_some() {}
        return Ok(None);
    }

    let extension = kind.validate(&file_name, field.content_type())?;

    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    if bytes.is_empty() {
        return Err(UploadError::Rejected(format!("{file_name:?} is empty")));
    }

    Ok(Some(AcceptedImage {
        kind,
        extension,
        bytes,
    }))
}

/// Backing storage for uploaded images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `bytes` at `relative_path`, replacing any existing file.
    async fn put(&self, relative_path: &str, bytes: &[u8]) -> Result<(), UploadError>;
}

/// Store an accepted image and return the URL path to persist.
///
/// # Errors
///
/// Returns `UploadError::Io` if the store cannot write the file.
pub async fn save_image(
    store: &dyn ImageStore,
    image: &AcceptedImage,
    now: DateTime<Utc>,
) -> Result<String, UploadError> {
    let relative = image.kind.relative_path(&image.extension, now);
    store.put(&relative, &image.bytes).await?;
    tracing::info!(path = %relative, bytes = image.bytes.len(), "Image stored");
    Ok(format!("{UPLOADS_URL_PREFIX}/{relative}"))
}

/// Image store writing under a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    /// Create a store rooted at `root`. Directories are created on write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn put(&self, relative_path: &str, bytes: &[u8]) -> Result<(), UploadError> {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }
}
