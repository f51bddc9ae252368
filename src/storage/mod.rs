use bytes::Bytes;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::ApiError;
use crate::utils::unique_upload_name;

pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
    max_bytes: usize,
}

impl Storage {
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {

        let dir = config.uploads.dir.clone();

        tokio::fs::create_dir_all(&dir).await?;

        tracing::info!("Uploads directory ready at {}", dir.display());

        Ok(Self {
            dir,
            max_bytes: config.uploads.max_upload_bytes,
        })
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn accepts(content_type: &str) -> bool {
        ALLOWED_IMAGE_TYPES.contains(&content_type)
    }

    /// Writes the upload under a collision-resistant generated name and
    /// returns that name. The size check runs before anything touches disk.
    pub async fn store(
        &self,
        original_name: &str,
        object: Bytes,
    ) -> Result<String, ApiError> {

        if object.len() > self.max_bytes {
            return Err(ApiError::TooLarge(self.max_bytes));
        }

        let name = unique_upload_name(original_name);

        tokio::fs::write(self.dir.join(&name), &object)
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;

        tracing::info!("Stored upload {} ({} bytes)", name, object.len());

        Ok(name)
    }

    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, ApiError> {

        if !is_plain_filename(filename) {
            return Err(ApiError::NotFound("File not found".to_string()));
        }

        match tokio::fs::read(self.dir.join(filename)).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ApiError::NotFound("File not found".to_string()))
            }
            Err(e) => Err(ApiError::Internal(e.into())),
        }
    }
}

// Served filenames are generated by us, so anything that is not a single
// plain path component is rejected outright.
fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}


#[cfg(test)]
mod tests {
    use super::*;

    fn test_storage(max_bytes: usize) -> Storage {
        let dir = std::env::temp_dir().join(format!("mailsmith-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        Storage { dir, max_bytes }
    }

    #[test]
    fn test_accepts_allowed_types_only() {
        assert!(Storage::accepts("image/jpeg"));
        assert!(Storage::accepts("image/png"));
        assert!(Storage::accepts("image/gif"));

        assert!(!Storage::accepts("application/pdf"));
        assert!(!Storage::accepts("image/svg+xml"));
        assert!(!Storage::accepts(""));
    }

    #[test]
    fn test_plain_filenames() {
        assert!(is_plain_filename("1736467200000-42.png"));
        assert!(!is_plain_filename(""));
        assert!(!is_plain_filename(".."));
        assert!(!is_plain_filename("../secret"));
        assert!(!is_plain_filename("a/b.png"));
        assert!(!is_plain_filename("a\\b.png"));
    }

    #[tokio::test]
    async fn test_store_and_read_round_trip() {
        let storage = test_storage(1024);

        let name = storage
            .store("photo.png", Bytes::from_static(b"fake png"))
            .await
            .unwrap();

        assert!(name.ends_with(".png"));
        assert_eq!(storage.read(&name).await.unwrap(), b"fake png");
    }

    #[tokio::test]
    async fn test_store_rejects_oversized() {
        let storage = test_storage(4);

        let err = storage
            .store("big.gif", Bytes::from_static(b"too big"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::TooLarge(4)));

        // Nothing was written.
        assert_eq!(std::fs::read_dir(&storage.dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let storage = test_storage(1024);

        let err = storage.read("nope.png").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = storage.read("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
