use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
};
use serde::Serialize;
use tower_http::services::ServeDir;

use crate::{
    domain::repositories::image_storage::ImageStorage,
    infrastructure::{
        axum_http::error_responses::AppError, storage::local_images::LocalImageStorage,
    },
};

#[derive(Debug, Serialize)]
pub struct UploadImageDto {
    pub path: String,
    pub filename: String,
}

/// Upload endpoint plus static serving of previously stored files under the
/// same prefix.
pub fn routes(image_storage: Arc<LocalImageStorage>, upload_dir: &str) -> Router {
    Router::new()
        .route("/", post(upload_image))
        .fallback_service(ServeDir::new(upload_dir))
        .with_state(image_storage)
}

pub async fn upload_image<S>(
    State(image_storage): State<Arc<S>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadImageDto>), AppError>
where
    S: ImageStorage + Send + Sync + 'static,
{
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let original_filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "upload".to_string());
        let content = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(err.to_string()))?;

        let stored = image_storage
            .store(&original_filename, content)
            .await
            .map_err(AppError::Internal)?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadImageDto {
                path: stored.public_path,
                filename: stored.filename,
            }),
        ));
    }

    Err(AppError::BadRequest(
        "multipart field 'image' is required".to_string(),
    ))
}
