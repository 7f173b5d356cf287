use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::posts::{InsertPostEntity, PostEntity, UpdatePostEntity},
    repositories::{image_storage::ImageStorage, posts::PostRepository},
    value_objects::{
        enums::post_statuses::{DispatchStatus, PostStatus},
        image_url::extract_image_filename,
        post_lifecycle,
        posts::{
            CreatePostModel, DEFAULT_CHANNEL, ListPostsFilter, StatusReportModel, UpdatePostModel,
        },
    },
};

#[derive(Debug, Error)]
pub enum PostError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("post not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDto {
    pub id: Uuid,
    pub title: Option<String>,
    pub text: String,
    pub image_url: Option<String>,
    pub channels: Vec<String>,
    pub timezone: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: String,
    pub queued_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub failed_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub provider_message_id: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostEntity> for PostDto {
    fn from(value: PostEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            text: value.text,
            image_url: value.image_url,
            channels: value.channels,
            timezone: value.timezone,
            scheduled_at: value.scheduled_at,
            status: value.status,
            queued_at: value.queued_at,
            sent_at: value.sent_at,
            failed_at: value.failed_at,
            last_error: value.last_error,
            provider_message_id: value.provider_message_id,
            is_deleted: value.is_deleted,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostDefaults {
    pub timezone: String,
}

pub struct PostsUseCase<R, S>
where
    R: PostRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    post_repo: Arc<R>,
    image_storage: Arc<S>,
    defaults: PostDefaults,
}

impl<R, S> PostsUseCase<R, S>
where
    R: PostRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    pub fn new(post_repo: Arc<R>, image_storage: Arc<S>, defaults: PostDefaults) -> Self {
        Self {
            post_repo,
            image_storage,
            defaults,
        }
    }

    pub async fn create(&self, input: CreatePostModel) -> Result<PostDto, PostError> {
        input
            .validate()
            .map_err(|err| PostError::InvalidInput(err.to_string()))?;

        let now = Utc::now();
        let status = post_lifecycle::creation_status(input.status, input.scheduled_at);

        let insert_post_entity = InsertPostEntity {
            title: input.title,
            text: input.text,
            image_url: input.image_url,
            channels: input
                .channels
                .unwrap_or_else(|| vec![DEFAULT_CHANNEL.to_string()]),
            timezone: input
                .timezone
                .unwrap_or_else(|| self.defaults.timezone.clone()),
            scheduled_at: input.scheduled_at,
            status: status.to_string(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };

        let created = self.post_repo.create(insert_post_entity).await?;
        info!(post_id = %created.id, status = %created.status, "posts: created");

        Ok(PostDto::from(created))
    }

    pub async fn list(&self, filter: ListPostsFilter) -> Result<Vec<PostDto>, PostError> {
        let posts = self.post_repo.list(filter).await?;
        Ok(posts.into_iter().map(PostDto::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<PostDto, PostError> {
        let post = self.find_live(id).await?;
        Ok(PostDto::from(post))
    }

    pub async fn update(&self, id: Uuid, input: UpdatePostModel) -> Result<PostDto, PostError> {
        input
            .validate()
            .map_err(|err| PostError::InvalidInput(err.to_string()))?;

        let existing = self.find_live(id).await?;
        let current = PostStatus::try_from(existing.status.as_str())?;

        let now = Utc::now();
        let mut changes = UpdatePostEntity::unchanged(now);
        changes.title = input.title.map(Some);
        changes.text = input.text;
        changes.image_url = input.image_url;
        changes.scheduled_at = input.scheduled_at;
        changes.timezone = input.timezone;
        changes.channels = input.channels;

        let changes = post_lifecycle::apply_author_status(changes, current, input.status);

        let updated = self
            .post_repo
            .update(id, changes)
            .await?
            .ok_or(PostError::NotFound)?;

        Ok(PostDto::from(updated))
    }

    /// Provider-report path. A QUEUED report is a dispatch claim and only
    /// lands while the post is still SCHEDULED.
    pub async fn report_status(
        &self,
        id: Uuid,
        report: StatusReportModel,
    ) -> Result<PostDto, PostError> {
        self.find_live(id).await?;

        let now = Utc::now();
        let reported = report.status;
        let changes = post_lifecycle::dispatch_report_changes(report, now);

        let updated = match reported {
            DispatchStatus::Queued => {
                let claimed = self.post_repo.claim_scheduled(id, changes).await?;
                claimed.ok_or_else(|| {
                    warn!(post_id = %id, "posts: dispatch claim rejected, post is no longer SCHEDULED");
                    PostError::InvalidInput("post is not awaiting dispatch".to_string())
                })?
            }
            DispatchStatus::Sent | DispatchStatus::Failed => self
                .post_repo
                .update(id, changes)
                .await?
                .ok_or(PostError::NotFound)?,
        };

        info!(post_id = %id, status = %updated.status, "posts: provider reported status");
        Ok(PostDto::from(updated))
    }

    pub async fn retry(&self, id: Uuid) -> Result<PostDto, PostError> {
        self.find_live(id).await?;

        let changes = post_lifecycle::retry_changes(Utc::now());
        let updated = self
            .post_repo
            .update(id, changes)
            .await?
            .ok_or(PostError::NotFound)?;

        info!(post_id = %id, "posts: rescheduled for retry");
        Ok(PostDto::from(updated))
    }

    /// Soft-deletes a post and then makes a best-effort attempt to remove its
    /// uploaded image. Cleanup failures never fail the delete.
    pub async fn soft_delete(&self, id: Uuid) -> Result<PostDto, PostError> {
        let deleted = self
            .post_repo
            .soft_delete(id, Utc::now())
            .await?
            .ok_or(PostError::NotFound)?;

        if let Some(image_url) = deleted.image_url.as_deref() {
            match extract_image_filename(image_url) {
                Some(filename) => {
                    if let Err(err) = self.image_storage.delete(filename).await {
                        error!(
                            post_id = %id,
                            filename = %filename,
                            error = ?err,
                            "posts: failed to delete image for soft-deleted post"
                        );
                    }
                }
                None => {
                    warn!(post_id = %id, image_url = %image_url, "posts: image url has no stored filename, skipping cleanup");
                }
            }
        }

        info!(post_id = %id, "posts: soft-deleted");
        Ok(PostDto::from(deleted))
    }

    pub async fn list_ready(&self) -> Result<Vec<PostDto>, PostError> {
        let posts = self.post_repo.list_ready(Utc::now()).await?;
        Ok(posts.into_iter().map(PostDto::from).collect())
    }

    async fn find_live(&self, id: Uuid) -> Result<PostEntity, PostError> {
        let post = self.post_repo.find_by_id(id).await?;
        post.filter(|post| !post.is_deleted)
            .ok_or(PostError::NotFound)
    }
}
