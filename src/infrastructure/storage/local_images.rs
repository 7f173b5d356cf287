use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::fs;
use tracing::debug;

use crate::domain::repositories::image_storage::{ImageStorage, StoredImage};

/// Disk-backed image storage. Files land in the uploads directory under a
/// timestamped, sanitized name and are served back under `/api/images`.
pub struct LocalImageStorage {
    upload_dir: PathBuf,
}

impl LocalImageStorage {
    pub fn new(upload_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&upload_dir)
            .with_context(|| format!("failed to create upload dir {}", upload_dir.display()))?;
        Ok(Self { upload_dir })
    }

    fn resolve(&self, filename: &str) -> Result<PathBuf> {
        // a stored filename is always a single path segment
        if Path::new(filename).file_name().map(|name| name.to_str()) != Some(Some(filename)) {
            bail!("invalid stored filename: {}", filename);
        }
        Ok(self.upload_dir.join(filename))
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(&self, original_filename: &str, content: Bytes) -> Result<StoredImage> {
        let filename = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_filename(original_filename)
        );
        let path = self.resolve(&filename)?;

        fs::write(&path, content)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;

        debug!(filename = %filename, "image_storage: stored upload");
        Ok(StoredImage {
            public_path: format!("/api/images/{}", filename),
            filename,
        })
    }

    async fn delete(&self, filename: &str) -> Result<()> {
        let path = self.resolve(filename)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(filename = %filename, "image_storage: deleted file");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("failed to delete {}", path.display())),
        }
    }
}

fn sanitize_filename(original: &str) -> String {
    original
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
