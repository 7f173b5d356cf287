use std::fmt::Display;

use anyhow::bail;
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Queued,
    Sent,
    Failed,
    Canceled,
}

impl Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let post_status = match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::Scheduled => "SCHEDULED",
            PostStatus::Queued => "QUEUED",
            PostStatus::Sent => "SENT",
            PostStatus::Failed => "FAILED",
            PostStatus::Canceled => "CANCELED",
        };
        write!(f, "{}", post_status)
    }
}

impl TryFrom<&str> for PostStatus {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "DRAFT" => Ok(PostStatus::Draft),
            "SCHEDULED" => Ok(PostStatus::Scheduled),
            "QUEUED" => Ok(PostStatus::Queued),
            "SENT" => Ok(PostStatus::Sent),
            "FAILED" => Ok(PostStatus::Failed),
            "CANCELED" => Ok(PostStatus::Canceled),
            _ => bail!("Invalid status: {}", value),
        }
    }
}

/// Statuses a client may request when creating a post. Anything further along
/// the lifecycle is owned by the dispatch path.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreateStatus {
    #[default]
    Draft,
    Scheduled,
}

impl From<CreateStatus> for PostStatus {
    fn from(value: CreateStatus) -> Self {
        match value {
            CreateStatus::Draft => PostStatus::Draft,
            CreateStatus::Scheduled => PostStatus::Scheduled,
        }
    }
}

/// Statuses the authoring client may set through the direct update path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorStatus {
    Draft,
    Scheduled,
    Canceled,
}

impl From<AuthorStatus> for PostStatus {
    fn from(value: AuthorStatus) -> Self {
        match value {
            AuthorStatus::Draft => PostStatus::Draft,
            AuthorStatus::Scheduled => PostStatus::Scheduled,
            AuthorStatus::Canceled => PostStatus::Canceled,
        }
    }
}

/// Statuses the delivery provider may report back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchStatus {
    Queued,
    Sent,
    Failed,
}

impl From<DispatchStatus> for PostStatus {
    fn from(value: DispatchStatus) -> Self {
        match value {
            DispatchStatus::Queued => PostStatus::Queued,
            DispatchStatus::Sent => PostStatus::Sent,
            DispatchStatus::Failed => PostStatus::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_value() {
        for (raw, expected) in [
            ("DRAFT", PostStatus::Draft),
            ("SCHEDULED", PostStatus::Scheduled),
            ("QUEUED", PostStatus::Queued),
            ("SENT", PostStatus::Sent),
            ("FAILED", PostStatus::Failed),
            ("CANCELED", PostStatus::Canceled),
        ] {
            assert_eq!(PostStatus::try_from(raw).unwrap(), expected);
            assert_eq!(expected.to_string(), raw);
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(PostStatus::try_from("BOGUS").is_err());
        assert!(PostStatus::try_from("draft").is_err());
    }

    #[test]
    fn dispatch_statuses_exclude_author_values() {
        assert!(serde_json::from_str::<DispatchStatus>("\"SCHEDULED\"").is_err());
        assert!(serde_json::from_str::<AuthorStatus>("\"SENT\"").is_err());
        assert_eq!(
            serde_json::from_str::<DispatchStatus>("\"QUEUED\"").unwrap(),
            DispatchStatus::Queued
        );
    }
}
