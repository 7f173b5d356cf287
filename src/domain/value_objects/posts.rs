use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::domain::value_objects::enums::post_statuses::{
    AuthorStatus, CreateStatus, DispatchStatus, PostStatus,
};

pub const DEFAULT_CHANNEL: &str = "WHATSAPP";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostModel {
    pub title: Option<String>,
    pub text: String,
    pub image_url: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub timezone: Option<String>,
    #[serde(default)]
    pub status: CreateStatus,
    pub channels: Option<Vec<String>>,
}

impl CreatePostModel {
    pub fn validate(&self) -> Result<()> {
        if self.text.is_empty() {
            bail!("text must not be empty");
        }
        if matches!(self.title.as_deref(), Some("")) {
            bail!("title must not be empty");
        }
        if let Some(timezone) = &self.timezone {
            if timezone.is_empty() {
                bail!("timezone must not be empty");
            }
        }
        if let Some(image_url) = &self.image_url {
            validate_image_url(image_url)?;
        }
        if let Some(channels) = &self.channels {
            validate_channels(channels)?;
        }
        Ok(())
    }
}

/// Direct update from the authoring client. Absent fields stay as stored;
/// `image_url` and `scheduled_at` accept an explicit null to clear.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostModel {
    pub title: Option<String>,
    pub text: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub scheduled_at: Option<Option<DateTime<Utc>>>,
    pub timezone: Option<String>,
    pub status: Option<AuthorStatus>,
    pub channels: Option<Vec<String>>,
}

impl UpdatePostModel {
    pub fn validate(&self) -> Result<()> {
        if matches!(self.text.as_deref(), Some("")) {
            bail!("text must not be empty");
        }
        if matches!(self.title.as_deref(), Some("")) {
            bail!("title must not be empty");
        }
        if matches!(self.timezone.as_deref(), Some("")) {
            bail!("timezone must not be empty");
        }
        if let Some(Some(image_url)) = &self.image_url {
            validate_image_url(image_url)?;
        }
        if let Some(channels) = &self.channels {
            validate_channels(channels)?;
        }
        Ok(())
    }
}

/// Outcome report from the delivery provider.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusReportModel {
    pub status: DispatchStatus,
    pub provider_message_id: Option<String>,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListPostsFilter {
    pub status: Option<PostStatus>,
}

fn validate_image_url(raw: &str) -> Result<()> {
    if Url::parse(raw).is_err() {
        bail!("image_url must be a valid URL");
    }
    Ok(())
}

fn validate_channels(channels: &[String]) -> Result<()> {
    if channels.is_empty() {
        bail!("channels must not be empty");
    }
    if channels.iter().any(|channel| channel.is_empty()) {
        bail!("channels must not contain empty entries");
    }
    Ok(())
}

/// Maps a field that is present in the payload (even as `null`) to an outer
/// `Some`, so null-to-clear can be told apart from absent-to-keep.
fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
