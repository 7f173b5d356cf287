use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::{
    domain::{
        entities::posts::{InsertPostEntity, PostEntity, UpdatePostEntity},
        repositories::posts::PostRepository,
        value_objects::{enums::post_statuses::PostStatus, posts::ListPostsFilter},
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::posts},
};

pub struct PostPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PostPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

// Diesel is synchronous; every query runs on the blocking threadpool so the
// Tokio workers are never stalled.
#[async_trait]
impl PostRepository for PostPostgres {
    async fn create(&self, insert_post_entity: InsertPostEntity) -> Result<PostEntity> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<PostEntity> {
            let mut conn = db_pool.get()?;

            let result = insert_into(posts::table)
                .values(&insert_post_entity)
                .returning(PostEntity::as_returning())
                .get_result::<PostEntity>(&mut conn)?;

            Ok(result)
        })
        .await??)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Option<PostEntity>> {
            let mut conn = db_pool.get()?;

            let result = posts::table
                .find(id)
                .select(PostEntity::as_select())
                .first::<PostEntity>(&mut conn)
                .optional()?;

            Ok(result)
        })
        .await??)
    }

    async fn list(&self, filter: ListPostsFilter) -> Result<Vec<PostEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Vec<PostEntity>> {
            let mut conn = db_pool.get()?;

            let mut query = posts::table
                .select(PostEntity::as_select())
                .filter(posts::is_deleted.eq(false))
                .into_boxed();

            if let Some(status) = filter.status {
                query = query.filter(posts::status.eq(status.to_string()));
            }

            // unscheduled posts sort first, creation order breaks ties
            let result = query
                .order((
                    posts::scheduled_at.asc().nulls_first(),
                    posts::created_at.asc(),
                ))
                .load::<PostEntity>(&mut conn)?;

            Ok(result)
        })
        .await??)
    }

    async fn update(&self, id: Uuid, changes: UpdatePostEntity) -> Result<Option<PostEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Option<PostEntity>> {
            let mut conn = db_pool.get()?;

            let result = update(
                posts::table
                    .filter(posts::id.eq(id))
                    .filter(posts::is_deleted.eq(false)),
            )
            .set(&changes)
            .returning(PostEntity::as_returning())
            .get_result::<PostEntity>(&mut conn)
            .optional()?;

            Ok(result)
        })
        .await??)
    }

    async fn claim_scheduled(
        &self,
        id: Uuid,
        changes: UpdatePostEntity,
    ) -> Result<Option<PostEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Option<PostEntity>> {
            let mut conn = db_pool.get()?;

            let result = update(
                posts::table
                    .filter(posts::id.eq(id))
                    .filter(posts::is_deleted.eq(false))
                    .filter(posts::status.eq(PostStatus::Scheduled.to_string())),
            )
            .set(&changes)
            .returning(PostEntity::as_returning())
            .get_result::<PostEntity>(&mut conn)
            .optional()?;

            Ok(result)
        })
        .await??)
    }

    async fn soft_delete(&self, id: Uuid, now: DateTime<Utc>) -> Result<Option<PostEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Option<PostEntity>> {
            let mut conn = db_pool.get()?;

            let result = update(
                posts::table
                    .filter(posts::id.eq(id))
                    .filter(posts::is_deleted.eq(false)),
            )
            .set((posts::is_deleted.eq(true), posts::updated_at.eq(now)))
            .returning(PostEntity::as_returning())
            .get_result::<PostEntity>(&mut conn)
            .optional()?;

            Ok(result)
        })
        .await??)
    }

    async fn list_ready(&self, now: DateTime<Utc>) -> Result<Vec<PostEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Vec<PostEntity>> {
            let mut conn = db_pool.get()?;

            let result = posts::table
                .select(PostEntity::as_select())
                .filter(posts::is_deleted.eq(false))
                .filter(posts::status.eq(PostStatus::Scheduled.to_string()))
                .filter(
                    posts::scheduled_at
                        .is_null()
                        .or(posts::scheduled_at.le(now)),
                )
                .order((
                    posts::scheduled_at.asc().nulls_first(),
                    posts::created_at.asc(),
                ))
                .load::<PostEntity>(&mut conn)?;

            Ok(result)
        })
        .await??)
    }
}
