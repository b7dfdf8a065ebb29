//! Media persistence: decodes base64 data-URI payloads (images and PDFs),
//! writes them under the public storage root with UUID filenames, and maps
//! public URLs back to relative paths for deletion.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

const IMAGE_PREFIX: &str = "data:image/";
const PDF_PREFIX: &str = "data:application/pdf;base64,";

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Unrecognized media format: expected a base64 data URI or an http(s) URL")]
    UnrecognizedFormat,

    #[error("Unsupported extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Failed to decode base64 payload")]
    DecodeError,

    #[error("Failed to download media from {url}: {reason}")]
    DownloadError { url: String, reason: String },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Disk-backed store for uploaded media. The mapping between a public URL
/// and its on-disk relative path is a pure prefix strip in both directions,
/// so deletion needs only the URL string an owning row carries.
pub struct MediaStore {
    root: PathBuf,
    public_base: String,
}

impl MediaStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, public_base: &str) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Stores an image given either a base64 data URI or a remote URL.
    /// Empty input is a no-op and returns `None`.
    pub async fn save_image(
        &self,
        input: &str,
        folder: &str,
    ) -> Result<Option<String>, MediaError> {
        if input.is_empty() {
            return Ok(None);
        }
        if input.starts_with("http://") || input.starts_with("https://") {
            return self.save_image_from_url(input, folder).await.map(Some);
        }
        if input.starts_with(IMAGE_PREFIX) {
            return self.save_image_base64(input, folder).await;
        }
        Err(MediaError::UnrecognizedFormat)
    }

    /// Decodes an image data URI and writes it under `<folder>/<uuid>.<ext>`.
    pub async fn save_image_base64(
        &self,
        payload: &str,
        folder: &str,
    ) -> Result<Option<String>, MediaError> {
        if payload.is_empty() {
            return Ok(None);
        }

        let extension = image_extension(payload)?;
        let bytes = decode_body(payload)?;
        let filename = format!("{}.{extension}", Uuid::new_v4());

        self.write(folder, &filename, &bytes).await?;
        Ok(Some(self.public_url(folder, &filename)))
    }

    /// Decodes a PDF data URI and writes it under `<folder>/<uuid>.pdf`.
    pub async fn save_pdf_base64(
        &self,
        payload: &str,
        folder: &str,
    ) -> Result<Option<String>, MediaError> {
        if payload.is_empty() {
            return Ok(None);
        }

        if !payload.starts_with(PDF_PREFIX) {
            return Err(MediaError::UnrecognizedFormat);
        }
        let bytes = decode_body(payload)?;
        let filename = format!("{}.pdf", Uuid::new_v4());

        self.write(folder, &filename, &bytes).await?;
        Ok(Some(self.public_url(folder, &filename)))
    }

    /// Fetches an image from a remote URL. The extension is inferred from
    /// the URL path, defaulting to `jpg`.
    pub async fn save_image_from_url(
        &self,
        source_url: &str,
        folder: &str,
    ) -> Result<String, MediaError> {
        let download_err = |reason: String| MediaError::DownloadError {
            url: source_url.to_string(),
            reason,
        };

        let parsed = url::Url::parse(source_url).map_err(|e| download_err(e.to_string()))?;
        let extension = Path::new(parsed.path())
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg")
            .to_lowercase();

        if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(MediaError::UnsupportedExtension(extension));
        }

        let response = reqwest::get(source_url)
            .await
            .map_err(|e| download_err(e.to_string()))?;
        if !response.status().is_success() {
            return Err(download_err(format!("HTTP {}", response.status())));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| download_err(e.to_string()))?;
        if bytes.is_empty() {
            return Err(download_err("empty response body".to_string()));
        }

        let filename = format!("{}.{extension}", Uuid::new_v4());
        self.write(folder, &filename, &bytes).await?;
        Ok(self.public_url(folder, &filename))
    }

    /// Removes the file a public URL points at. Returns `false` for empty
    /// input, foreign URLs, and files that are already gone; never errors.
    pub async fn delete(&self, stored_url: &str) -> bool {
        let Some(relative) = self.relative_path(stored_url) else {
            return false;
        };

        let path = self.root.join(&relative);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return false;
        }

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Deleted stored media");
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to delete stored media");
                false
            }
        }
    }

    /// Recovers the storage-relative path from a public URL. Inverse of
    /// [`Self::public_url`].
    #[must_use]
    pub fn relative_path(&self, stored_url: &str) -> Option<String> {
        if stored_url.is_empty() {
            return None;
        }

        if let Some(rest) = stored_url.strip_prefix(&self.public_base) {
            let rest = rest.trim_start_matches('/');
            if is_safe_relative(rest) {
                return Some(rest.to_string());
            }
        }

        // Tolerate URLs built against an older public base: take the URL
        // path and strip the /storage/ mount point.
        let parsed = url::Url::parse(stored_url).ok()?;
        let rest = parsed.path().strip_prefix("/storage/")?;
        is_safe_relative(rest).then(|| rest.to_string())
    }

    fn public_url(&self, folder: &str, filename: &str) -> String {
        format!("{}/{folder}/{filename}", self.public_base)
    }

    async fn write(&self, folder: &str, filename: &str, bytes: &[u8]) -> Result<(), MediaError> {
        let dir = self.root.join(folder);
        fs::create_dir_all(&dir).await?;
        fs::write(dir.join(filename), bytes).await?;
        Ok(())
    }
}

/// A recovered path must stay inside the storage root: non-empty, relative
/// and free of parent-directory components.
fn is_safe_relative(rest: &str) -> bool {
    !rest.is_empty()
        && Path::new(rest)
            .components()
            .all(|c| matches!(c, std::path::Component::Normal(_)))
}

/// Extracts and validates the image subtype of a `data:image/<sub>;base64,`
/// prefix.
fn image_extension(payload: &str) -> Result<&str, MediaError> {
    let rest = payload
        .strip_prefix(IMAGE_PREFIX)
        .ok_or(MediaError::UnrecognizedFormat)?;
    let subtype = rest
        .split_once(";base64,")
        .map(|(subtype, _)| subtype)
        .ok_or(MediaError::UnrecognizedFormat)?;

    if ALLOWED_IMAGE_EXTENSIONS.contains(&subtype) {
        Ok(subtype)
    } else {
        Err(MediaError::UnsupportedExtension(subtype.to_string()))
    }
}

/// Decodes the base64 body after the data URI comma.
fn decode_body(payload: &str) -> Result<Vec<u8>, MediaError> {
    let (_, body) = payload
        .split_once(',')
        .ok_or(MediaError::UnrecognizedFormat)?;
    let bytes = BASE64.decode(body).map_err(|_| MediaError::DecodeError)?;
    if bytes.is_empty() {
        return Err(MediaError::DecodeError);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HELLO: &str = "data:image/png;base64,aGVsbG8=";

    fn store(dir: &tempfile::TempDir) -> MediaStore {
        MediaStore::new(dir.path(), "http://127.0.0.1:8080/storage")
    }

    #[test]
    fn extension_parsing() {
        assert_eq!(image_extension(PNG_HELLO).unwrap(), "png");
        assert_eq!(
            image_extension("data:image/webp;base64,aGVsbG8=").unwrap(),
            "webp"
        );
        assert!(matches!(
            image_extension("data:image/bmp;base64,aGVsbG8="),
            Err(MediaError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            image_extension("not-a-data-uri"),
            Err(MediaError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn body_decoding() {
        assert_eq!(decode_body(PNG_HELLO).unwrap(), b"hello");
        assert!(matches!(
            decode_body("data:image/png;base64,!!!"),
            Err(MediaError::DecodeError)
        ));
        assert!(matches!(
            decode_body("data:image/png;base64,"),
            Err(MediaError::DecodeError)
        ));
    }

    #[tokio::test]
    async fn save_writes_decoded_bytes_and_returns_mapped_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let stored_url = store
            .save_image(PNG_HELLO, "products")
            .await
            .unwrap()
            .unwrap();

        assert!(stored_url.starts_with("http://127.0.0.1:8080/storage/products/"));
        assert!(stored_url.ends_with(".png"));

        let relative = store.relative_path(&stored_url).unwrap();
        let bytes = std::fs::read(dir.path().join(relative)).unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn relative_path_rejects_parent_components() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        assert!(
            store
                .relative_path("http://127.0.0.1:8080/storage/../secrets.txt")
                .is_none()
        );
        assert!(
            store
                .relative_path("http://127.0.0.1:8080/storage/products/../../etc/passwd")
                .is_none()
        );
        assert!(
            store
                .relative_path("http://other.example/storage/../outside")
                .is_none()
        );
        assert_eq!(
            store
                .relative_path("http://127.0.0.1:8080/storage/products/a.png")
                .as_deref(),
            Some("products/a.png")
        );
    }

    #[tokio::test]
    async fn save_then_delete_round_trip_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        for subtype in ["jpg", "jpeg", "png", "webp", "gif"] {
            let payload = format!("data:image/{subtype};base64,aGVsbG8=");
            let stored_url = store
                .save_image(&payload, "products")
                .await
                .unwrap()
                .unwrap();
            let relative = store.relative_path(&stored_url).unwrap();

            assert!(store.delete(&stored_url).await);
            assert!(!dir.path().join(relative).exists());
        }
    }

    #[tokio::test]
    async fn empty_input_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        assert!(store.save_image("", "products").await.unwrap().is_none());
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn malformed_payload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        assert!(store.save_image("garbage", "products").await.is_err());
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn delete_of_missing_or_foreign_url_is_false() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        assert!(!store.delete("").await);
        assert!(
            !store
                .delete("http://127.0.0.1:8080/storage/products/gone.png")
                .await
        );
        assert!(!store.delete("https://elsewhere.example/cat.png").await);
    }

    #[tokio::test]
    async fn pdf_save_uses_pdf_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let stored_url = store
            .save_pdf_base64("data:application/pdf;base64,aGVsbG8=", "pdf")
            .await
            .unwrap()
            .unwrap();
        assert!(stored_url.ends_with(".pdf"));

        assert!(matches!(
            store.save_pdf_base64(PNG_HELLO, "pdf").await,
            Err(MediaError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn relative_path_tolerates_older_public_base() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        assert_eq!(
            store
                .relative_path("http://old-host:9999/storage/products/a.png")
                .as_deref(),
            Some("products/a.png")
        );
        assert!(store.relative_path("http://old-host:9999/other/a.png").is_none());
    }
}
