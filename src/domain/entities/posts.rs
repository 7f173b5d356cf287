use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::posts;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = posts)]
pub struct PostEntity {
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

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub struct InsertPostEntity {
    pub title: Option<String>,
    pub text: String,
    pub image_url: Option<String>,
    pub channels: Vec<String>,
    pub timezone: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field-level changeset. `None` leaves a column untouched; for nullable
/// columns `Some(None)` writes NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub struct UpdatePostEntity {
    pub title: Option<Option<String>>,
    pub text: Option<String>,
    pub image_url: Option<Option<String>>,
    pub channels: Option<Vec<String>>,
    pub timezone: Option<String>,
    pub scheduled_at: Option<Option<DateTime<Utc>>>,
    pub status: Option<String>,
    pub queued_at: Option<Option<DateTime<Utc>>>,
    pub sent_at: Option<Option<DateTime<Utc>>>,
    pub failed_at: Option<Option<DateTime<Utc>>>,
    pub last_error: Option<Option<String>>,
    pub provider_message_id: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

impl UpdatePostEntity {
    /// Changeset that only bumps `updated_at`.
    pub fn unchanged(updated_at: DateTime<Utc>) -> Self {
        Self {
            title: None,
            text: None,
            image_url: None,
            channels: None,
            timezone: None,
            scheduled_at: None,
            status: None,
            queued_at: None,
            sent_at: None,
            failed_at: None,
            last_error: None,
            provider_message_id: None,
            updated_at,
        }
    }
}
