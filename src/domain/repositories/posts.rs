use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    entities::posts::{InsertPostEntity, PostEntity, UpdatePostEntity},
    value_objects::posts::ListPostsFilter,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository {
    async fn create(&self, insert_post_entity: InsertPostEntity) -> Result<PostEntity>;

    /// Loads a post by id, deleted or not. Callers decide how a soft-deleted
    /// row surfaces.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostEntity>>;

    /// Non-deleted posts, optionally narrowed by status, ordered by
    /// `scheduled_at` ascending with unscheduled posts first and `created_at`
    /// as the tie-break.
    async fn list(&self, filter: ListPostsFilter) -> Result<Vec<PostEntity>>;

    /// Applies a changeset to a live post. `None` means the post is absent or
    /// soft-deleted.
    async fn update(&self, id: Uuid, changes: UpdatePostEntity) -> Result<Option<PostEntity>>;

    /// Applies a changeset only while the post is still SCHEDULED, so exactly
    /// one dispatcher can claim it. `None` means the post was not claimable.
    async fn claim_scheduled(
        &self,
        id: Uuid,
        changes: UpdatePostEntity,
    ) -> Result<Option<PostEntity>>;

    /// Flips the soft-delete flag on a live post. `None` means the post is
    /// absent or already deleted.
    async fn soft_delete(&self, id: Uuid, now: DateTime<Utc>) -> Result<Option<PostEntity>>;

    /// Posts due for dispatch: SCHEDULED, not deleted, with no schedule or a
    /// schedule at or before `now`.
    async fn list_ready(&self, now: DateTime<Utc>) -> Result<Vec<PostEntity>>;
}
