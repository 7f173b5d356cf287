use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub filename: String,
    pub public_path: String,
}

/// File storage for uploaded post images. Delivery of the files themselves
/// (static serving) is wired at the HTTP layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStorage {
    /// Persists an uploaded file and returns the stored filename plus the
    /// public reference path used in `image_url`.
    async fn store(&self, original_filename: &str, content: Bytes) -> Result<StoredImage>;

    /// Removes a stored file. Missing files are not an error.
    async fn delete(&self, filename: &str) -> Result<()>;
}
