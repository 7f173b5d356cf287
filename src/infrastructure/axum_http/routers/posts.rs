use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post, put},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    application::usecases::posts::{PostDefaults, PostDto, PostsUseCase},
    config::config_model::DotEnvyConfig,
    domain::{
        repositories::{image_storage::ImageStorage, posts::PostRepository},
        value_objects::{
            enums::post_statuses::PostStatus,
            posts::{CreatePostModel, ListPostsFilter, StatusReportModel, UpdatePostModel},
        },
    },
    infrastructure::{
        axum_http::error_responses::AppError,
        postgres::{postgres_connection::PgPoolSquad, repositories::posts::PostPostgres},
        storage::local_images::LocalImageStorage,
    },
};

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    status: Option<String>,
}

pub fn routes(
    db_pool: Arc<PgPoolSquad>,
    image_storage: Arc<LocalImageStorage>,
    config: Arc<DotEnvyConfig>,
) -> Router {
    let post_repository = PostPostgres::new(Arc::clone(&db_pool));
    let posts_usecase = PostsUseCase::new(
        Arc::new(post_repository),
        image_storage,
        PostDefaults {
            timezone: config.posts.default_timezone.clone(),
        },
    );

    Router::new()
        .route("/", post(create_post).get(list_posts))
        .route("/ready/list", get(list_ready_posts))
        .route(
            "/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/:id/status", put(report_post_status))
        .route("/:id/retry", post(retry_post))
        .with_state(Arc::new(posts_usecase))
}

pub async fn create_post<R, S>(
    State(posts_usecase): State<Arc<PostsUseCase<R, S>>>,
    payload: Result<Json<CreatePostModel>, JsonRejection>,
) -> Result<(StatusCode, Json<PostDto>), AppError>
where
    R: PostRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let created = posts_usecase.create(payload).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_posts<R, S>(
    State(posts_usecase): State<Arc<PostsUseCase<R, S>>>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostDto>>, AppError>
where
    R: PostRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let status = query
        .status
        .as_deref()
        .map(PostStatus::try_from)
        .transpose()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let posts = posts_usecase.list(ListPostsFilter { status }).await?;
    Ok(Json(posts))
}

pub async fn list_ready_posts<R, S>(
    State(posts_usecase): State<Arc<PostsUseCase<R, S>>>,
) -> Result<Json<Vec<PostDto>>, AppError>
where
    R: PostRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let posts = posts_usecase.list_ready().await?;
    Ok(Json(posts))
}

pub async fn get_post<R, S>(
    State(posts_usecase): State<Arc<PostsUseCase<R, S>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostDto>, AppError>
where
    R: PostRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let post = posts_usecase.get(id).await?;
    Ok(Json(post))
}

pub async fn update_post<R, S>(
    State(posts_usecase): State<Arc<PostsUseCase<R, S>>>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdatePostModel>, JsonRejection>,
) -> Result<Json<PostDto>, AppError>
where
    R: PostRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let updated = posts_usecase.update(id, payload).await?;

    Ok(Json(updated))
}

/// Status reports from the external dispatcher/provider. Accepts only
/// QUEUED, SENT and FAILED.
pub async fn report_post_status<R, S>(
    State(posts_usecase): State<Arc<PostsUseCase<R, S>>>,
    Path(id): Path<Uuid>,
    payload: Result<Json<StatusReportModel>, JsonRejection>,
) -> Result<Json<PostDto>, AppError>
where
    R: PostRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let updated = posts_usecase.report_status(id, payload).await?;

    Ok(Json(updated))
}

pub async fn retry_post<R, S>(
    State(posts_usecase): State<Arc<PostsUseCase<R, S>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostDto>, AppError>
where
    R: PostRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let updated = posts_usecase.retry(id).await?;
    Ok(Json(updated))
}

pub async fn delete_post<R, S>(
    State(posts_usecase): State<Arc<PostsUseCase<R, S>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostDto>, AppError>
where
    R: PostRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let deleted = posts_usecase.soft_delete(id).await?;
    Ok(Json(deleted))
}
