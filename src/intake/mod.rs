// SPDX-License-Identifier: MPL-2.0
//! Image intake: validation of candidate images and ownership of the single
//! selected image and its preview.
//!
//! Candidates come from the file dialog, from a file dropped onto the window
//! or from a downloaded gallery example. Every accepted candidate becomes the
//! new [`ImageReference`] with a fresh id, even when the bytes are identical
//! to the previous one.

pub mod mime;
pub mod preview;

pub use preview::{PreviewRegistry, PreviewResource};

use crate::client::{FetchedImage, Upload};
use bytes::Bytes;
use iced::widget::image::Handle;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Identifier of an accepted image. Strictly increasing within a session.
pub type ImageId = u64;

/// Why a candidate was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// The declared MIME type is not `image/*`.
    InvalidFileType,
    /// The payload exceeds the upload limit.
    FileTooLarge { size: usize, limit: usize },
    /// The file or download could not be read, or is not a decodable image.
    LoadFailed(String),
}

impl IntakeError {
    pub fn i18n_key(&self) -> &'static str {
        match self {
            IntakeError::InvalidFileType => "error_invalid_file_type",
            IntakeError::FileTooLarge { .. } => "error_file_too_large",
            IntakeError::LoadFailed(_) => "error_load_failed",
        }
    }
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeError::InvalidFileType => write!(f, "File must be an image"),
            IntakeError::FileTooLarge { size, limit } => {
                write!(f, "File is {} bytes, limit is {} bytes", size, limit)
            }
            IntakeError::LoadFailed(e) => write!(f, "Failed to load image: {}", e),
        }
    }
}

impl std::error::Error for IntakeError {}

/// An image offered to [`ImageIntake::submit`].
#[derive(Debug, Clone)]
pub struct Candidate {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub filename: String,
    pub source: Option<PathBuf>,
}

impl Candidate {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
            filename: filename.into(),
            source: None,
        }
    }

    /// Builds a candidate from file contents already read from `path`.
    pub fn from_file(path: &Path, bytes: Vec<u8>) -> Self {
        let mime = mime::detect(path, &bytes);
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Self {
            bytes,
            mime,
            filename,
            source: Some(path.to_path_buf()),
        }
    }

    /// Reads `path` and builds a candidate from it.
    ///
    /// Files larger than `max_bytes` are refused from their metadata, before
    /// any content is read. The read itself is capped at `max_bytes + 1` in
    /// case the file grows in between.
    pub async fn load(path: PathBuf, max_bytes: usize) -> Result<Self, IntakeError> {
        let load_failed = |e: std::io::Error| IntakeError::LoadFailed(e.to_string());

        let metadata = tokio::fs::metadata(&path).await.map_err(load_failed)?;
        let too_large = |size: u64| IntakeError::FileTooLarge {
            size: usize::try_from(size).unwrap_or(usize::MAX),
            limit: max_bytes,
        };
        if metadata.len() > max_bytes as u64 {
            tracing::debug!(path = %path.display(), size = metadata.len(), "file over the upload limit");
            return Err(too_large(metadata.len()));
        }

        let file = tokio::fs::File::open(&path).await.map_err(load_failed)?;
        let mut bytes = Vec::with_capacity(metadata.len() as usize);
        file.take(max_bytes as u64 + 1)
            .read_to_end(&mut bytes)
            .await
            .map_err(load_failed)?;
        if bytes.len() > max_bytes {
            return Err(too_large(bytes.len() as u64));
        }

        Ok(Self::from_file(&path, bytes))
    }

    /// Wraps a downloaded example as `<label>.jpg`.
    ///
    /// The bytes must decode as an image; the MIME type comes from the
    /// response when it is an image type and defaults to JPEG otherwise.
    pub fn from_download(fetched: FetchedImage, label: &str) -> Result<Self, IntakeError> {
        if mime::header_dimensions(&fetched.bytes).is_none() {
            return Err(IntakeError::LoadFailed(
                "downloaded content is not an image".to_string(),
            ));
        }
        let mime = fetched
            .content_type
            .filter(|content_type| mime::is_image(content_type))
            .unwrap_or_else(|| mime::DEFAULT_DOWNLOAD_MIME.to_string());
        Ok(Self::new(fetched.bytes, mime, format!("{}.jpg", label)))
    }
}

/// The currently selected image.
#[derive(Debug, Clone)]
pub struct ImageReference {
    pub id: ImageId,
    /// Encoded image, shared with the preview and the upload.
    pub bytes: Bytes,
    pub mime: String,
    pub filename: String,
    pub dimensions: Option<(u32, u32)>,
    pub source: Option<PathBuf>,
}

impl ImageReference {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Request payload for this image, sharing its buffer.
    pub fn upload(&self) -> Upload {
        Upload {
            bytes: self.bytes.clone(),
            filename: self.filename.clone(),
            mime: self.mime.clone(),
        }
    }
}

/// Owner of the selected image and its preview.
#[derive(Debug)]
pub struct ImageIntake {
    current: Option<Selected>,
    last_id: ImageId,
    max_bytes: usize,
    registry: PreviewRegistry,
}

#[derive(Debug)]
struct Selected {
    image: ImageReference,
    preview: PreviewResource,
}

impl ImageIntake {
    pub fn new(max_bytes: usize) -> Self {
        Self::with_registry(max_bytes, PreviewRegistry::new())
    }

    pub fn with_registry(max_bytes: usize, registry: PreviewRegistry) -> Self {
        Self {
            current: None,
            last_id: 0,
            max_bytes,
            registry,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validates and accepts a candidate.
    ///
    /// On rejection nothing changes. On acceptance the previous preview is
    /// released before the new one is created.
    pub fn submit(&mut self, candidate: Candidate) -> Result<&ImageReference, IntakeError> {
        if !mime::is_image(&candidate.mime) {
            return Err(IntakeError::InvalidFileType);
        }
        if candidate.bytes.len() > self.max_bytes {
            return Err(IntakeError::FileTooLarge {
                size: candidate.bytes.len(),
                limit: self.max_bytes,
            });
        }

        if let Some(previous) = self.current.take() {
            previous.preview.release();
        }

        self.last_id += 1;
        let bytes = Bytes::from(candidate.bytes);
        let dimensions = mime::header_dimensions(&bytes);
        let preview = self.registry.create(bytes.clone());
        let image = ImageReference {
            id: self.last_id,
            bytes,
            mime: candidate.mime,
            filename: candidate.filename,
            dimensions,
            source: candidate.source,
        };
        tracing::debug!(id = image.id, mime = %image.mime, size = image.size(), "image accepted");

        let selected = self.current.insert(Selected { image, preview });
        Ok(&selected.image)
    }

    /// Drops the selected image and releases its preview.
    ///
    /// Returns the id of the removed image, or `None` when nothing was selected.
    pub fn remove(&mut self) -> Option<ImageId> {
        let selected = self.current.take()?;
        let id = selected.image.id;
        selected.preview.release();
        Some(id)
    }

    pub fn current(&self) -> Option<&ImageReference> {
        self.current.as_ref().map(|selected| &selected.image)
    }

    pub fn current_id(&self) -> Option<ImageId> {
        self.current().map(|image| image.id)
    }

    pub fn preview(&self) -> Option<&Handle> {
        self.current
            .as_ref()
            .map(|selected| selected.preview.handle())
    }

    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1024;

    fn png_candidate(name: &str) -> Candidate {
        Candidate::new(vec![1, 2, 3], "image/png", name)
    }

    #[test]
    fn accepts_images_and_creates_preview() {
        let mut intake = ImageIntake::new(LIMIT);
        let image = intake.submit(png_candidate("a.png")).expect("accepted");
        assert_eq!(image.id, 1);
        assert_eq!(image.filename, "a.png");
        assert!(intake.preview().is_some());
        assert_eq!(intake.registry().live(), 1);
    }

    #[test]
    fn rejects_non_images_without_changes() {
        let mut intake = ImageIntake::new(LIMIT);
        intake.submit(png_candidate("a.png")).expect("accepted");

        let result = intake.submit(Candidate::new(vec![0], "text/plain", "notes.txt"));
        assert_eq!(result.err(), Some(IntakeError::InvalidFileType));
        assert_eq!(intake.current_id(), Some(1));
        assert_eq!(intake.registry().created(), 1);
        assert_eq!(intake.registry().live(), 1);
    }

    #[test]
    fn rejects_oversize_without_changes() {
        let mut intake = ImageIntake::new(LIMIT);
        let big = Candidate::new(vec![0; LIMIT + 1], "image/jpeg", "big.jpg");
        let result = intake.submit(big);
        assert_eq!(
            result.err(),
            Some(IntakeError::FileTooLarge {
                size: LIMIT + 1,
                limit: LIMIT
            })
        );
        assert!(intake.current().is_none());
        assert_eq!(intake.registry().created(), 0);
    }

    #[test]
    fn replacing_releases_previous_preview() {
        let mut intake = ImageIntake::new(LIMIT);
        intake.submit(png_candidate("a.png")).expect("accepted");
        intake.submit(png_candidate("b.png")).expect("accepted");

        assert_eq!(intake.registry().created(), 2);
        assert_eq!(intake.registry().released(), 1);
        assert_eq!(intake.registry().live(), 1);
        assert_eq!(intake.current().map(|i| i.filename.as_str()), Some("b.png"));
    }

    #[test]
    fn remove_then_same_file_gets_new_id() {
        let mut intake = ImageIntake::new(LIMIT);
        let first = intake.submit(png_candidate("a.png")).expect("accepted").id;
        assert_eq!(intake.remove(), Some(first));
        assert_eq!(intake.registry().live(), 0);
        assert!(intake.preview().is_none());

        let second = intake.submit(png_candidate("a.png")).expect("accepted").id;
        assert!(second > first);
    }

    #[test]
    fn remove_without_image_is_noop() {
        let mut intake = ImageIntake::new(LIMIT);
        assert_eq!(intake.remove(), None);
        assert_eq!(intake.registry().released(), 0);
    }

    #[test]
    fn download_requires_decodable_bytes() {
        let fetched = FetchedImage {
            bytes: b"<html>not found</html>".to_vec(),
            content_type: Some("text/html".to_string()),
        };
        assert!(matches!(
            Candidate::from_download(fetched, "acne"),
            Err(IntakeError::LoadFailed(_))
        ));
    }

    #[test]
    fn download_is_named_after_label() {
        let mut bytes = Vec::new();
        image_rs::RgbImage::new(2, 2)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image_rs::ImageFormat::Png)
            .expect("encode png");

        let png = Candidate::from_download(
            FetchedImage {
                bytes: bytes.clone(),
                content_type: Some("image/png".to_string()),
            },
            "eksim",
        )
        .expect("decodable");
        assert_eq!(png.filename, "eksim.jpg");
        assert_eq!(png.mime, "image/png");

        let untyped = Candidate::from_download(
            FetchedImage {
                bytes,
                content_type: Some("application/octet-stream".to_string()),
            },
            "panu",
        )
        .expect("decodable");
        assert_eq!(untyped.mime, "image/jpeg");
    }

    #[test]
    fn preview_shares_the_stored_bytes() {
        let mut intake = ImageIntake::new(LIMIT);
        let image = intake.submit(png_candidate("a.png")).expect("accepted");
        let stored = image.bytes.as_ptr();

        match intake.preview() {
            Some(Handle::Bytes(_, shared)) => assert_eq!(shared.as_ptr(), stored),
            other => panic!("unexpected preview handle {:?}", other),
        }
    }

    #[test]
    fn upload_shares_the_stored_bytes() {
        let mut intake = ImageIntake::new(LIMIT);
        let image = intake.submit(png_candidate("a.png")).expect("accepted");

        let upload = image.upload();
        assert_eq!(upload.bytes.as_ptr(), image.bytes.as_ptr());
        assert_eq!(upload.filename, "a.png");
        assert_eq!(upload.mime, "image/png");
    }

    #[test]
    fn non_image_errors_come_from_the_intake() {
        assert_eq!(
            IntakeError::InvalidFileType.i18n_key(),
            "error_invalid_file_type"
        );
    }

    #[tokio::test]
    async fn load_refuses_oversize_file_from_metadata() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("clip.mp4");
        // Sparse file: its length is set without writing any content.
        std::fs::File::create(&path)
            .and_then(|file| file.set_len(64 * 1024 * 1024))
            .expect("create sparse file");

        let result = Candidate::load(path, LIMIT).await;
        assert_eq!(
            result.err(),
            Some(IntakeError::FileTooLarge {
                size: 64 * 1024 * 1024,
                limit: LIMIT
            })
        );
    }

    #[tokio::test]
    async fn load_refuses_file_one_byte_over_limit() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("photo.png");
        std::fs::write(&path, vec![0u8; LIMIT + 1]).expect("write file");

        let result = Candidate::load(path, LIMIT).await;
        assert!(matches!(
            result,
            Err(IntakeError::FileTooLarge { size, limit: LIMIT }) if size == LIMIT + 1
        ));
    }

    #[tokio::test]
    async fn load_reads_file_within_limit() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("photo.png");
        std::fs::write(&path, vec![7u8; LIMIT]).expect("write file");

        let candidate = Candidate::load(path.clone(), LIMIT).await.expect("loaded");
        assert_eq!(candidate.bytes.len(), LIMIT);
        assert_eq!(candidate.mime, "image/png");
        assert_eq!(candidate.source.as_deref(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn load_missing_file_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = Candidate::load(dir.path().join("absent.png"), LIMIT).await;
        assert!(matches!(result, Err(IntakeError::LoadFailed(_))));
    }

    #[test]
    fn file_candidate_uses_extension() {
        let candidate = Candidate::from_file(Path::new("/tmp/skin.jpeg"), vec![0]);
        assert_eq!(candidate.mime, "image/jpeg");
        assert_eq!(candidate.filename, "skin.jpeg");
    }
}
