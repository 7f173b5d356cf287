//! Pure post lifecycle decisions: given the current status and a requested
//! transition, compute the new status and which timestamp fields to set or
//! clear. No I/O; the current instant is supplied by the caller so a single
//! logical operation stays internally consistent.

use chrono::{DateTime, Utc};

use crate::domain::{
    entities::posts::UpdatePostEntity,
    value_objects::{
        enums::post_statuses::{AuthorStatus, CreateStatus, DispatchStatus, PostStatus},
        posts::StatusReportModel,
    },
};

/// Status a post is born with. A draft that already carries a schedule is
/// promoted to SCHEDULED.
pub fn creation_status(requested: CreateStatus, scheduled_at: Option<DateTime<Utc>>) -> PostStatus {
    match (requested, scheduled_at) {
        (CreateStatus::Draft, Some(_)) => PostStatus::Scheduled,
        (CreateStatus::Draft, None) => PostStatus::Draft,
        (CreateStatus::Scheduled, _) => PostStatus::Scheduled,
    }
}

/// Applies the status portion of a direct (authoring-client) update onto a
/// field changeset.
///
/// An explicit move to SCHEDULED wipes the dispatch history so the post reads
/// as freshly scheduled. Without an explicit status, a DRAFT that gains a
/// schedule is promoted to SCHEDULED with no further side effects.
pub fn apply_author_status(
    mut changes: UpdatePostEntity,
    current: PostStatus,
    requested: Option<AuthorStatus>,
) -> UpdatePostEntity {
    let Some(requested) = requested else {
        if current == PostStatus::Draft && matches!(changes.scheduled_at, Some(Some(_))) {
            changes.status = Some(PostStatus::Scheduled.to_string());
        }
        return changes;
    };

    changes.status = Some(PostStatus::from(requested).to_string());
    if requested == AuthorStatus::Scheduled {
        clear_dispatch_progress(&mut changes);
    }
    changes
}

/// Changeset for a provider outcome report. Each dispatch status stamps its
/// own timestamp; the other two are left as they are.
pub fn dispatch_report_changes(report: StatusReportModel, now: DateTime<Utc>) -> UpdatePostEntity {
    let mut changes = UpdatePostEntity::unchanged(now);
    changes.status = Some(PostStatus::from(report.status).to_string());

    match report.status {
        DispatchStatus::Queued => changes.queued_at = Some(Some(now)),
        DispatchStatus::Sent => changes.sent_at = Some(Some(now)),
        DispatchStatus::Failed => {
            changes.failed_at = Some(Some(now));
            if let Some(last_error) = report.last_error {
                changes.last_error = Some(Some(last_error));
            }
        }
    }

    if let Some(provider_message_id) = report.provider_message_id {
        changes.provider_message_id = Some(Some(provider_message_id));
    }

    changes
}

/// Changeset for retrying a failed post: back to SCHEDULED with a clean
/// dispatch history.
pub fn retry_changes(now: DateTime<Utc>) -> UpdatePostEntity {
    let mut changes = UpdatePostEntity::unchanged(now);
    changes.status = Some(PostStatus::Scheduled.to_string());
    clear_dispatch_progress(&mut changes);
    changes
}

fn clear_dispatch_progress(changes: &mut UpdatePostEntity) {
    changes.queued_at = Some(None);
    changes.sent_at = Some(None);
    changes.failed_at = Some(None);
    changes.last_error = Some(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn creation_promotes_draft_with_schedule() {
        assert_eq!(
            creation_status(CreateStatus::Draft, Some(fixed_now())),
            PostStatus::Scheduled
        );
        assert_eq!(creation_status(CreateStatus::Draft, None), PostStatus::Draft);
        assert_eq!(
            creation_status(CreateStatus::Scheduled, None),
            PostStatus::Scheduled
        );
    }

    #[test]
    fn explicit_schedule_clears_dispatch_history() {
        let changes = apply_author_status(
            UpdatePostEntity::unchanged(fixed_now()),
            PostStatus::Failed,
            Some(AuthorStatus::Scheduled),
        );

        assert_eq!(changes.status, Some("SCHEDULED".to_string()));
        assert_eq!(changes.queued_at, Some(None));
        assert_eq!(changes.sent_at, Some(None));
        assert_eq!(changes.failed_at, Some(None));
        assert_eq!(changes.last_error, Some(None));
    }

    #[test]
    fn cancel_keeps_dispatch_history() {
        let changes = apply_author_status(
            UpdatePostEntity::unchanged(fixed_now()),
            PostStatus::Queued,
            Some(AuthorStatus::Canceled),
        );

        assert_eq!(changes.status, Some("CANCELED".to_string()));
        assert_eq!(changes.queued_at, None);
        assert_eq!(changes.failed_at, None);
    }

    #[test]
    fn draft_gaining_schedule_is_promoted() {
        let mut base = UpdatePostEntity::unchanged(fixed_now());
        base.scheduled_at = Some(Some(fixed_now()));

        let changes = apply_author_status(base, PostStatus::Draft, None);
        assert_eq!(changes.status, Some("SCHEDULED".to_string()));
        // promotion alone does not touch the timestamps
        assert_eq!(changes.queued_at, None);
    }

    #[test]
    fn non_draft_gaining_schedule_keeps_status() {
        let mut base = UpdatePostEntity::unchanged(fixed_now());
        base.scheduled_at = Some(Some(fixed_now()));

        let changes = apply_author_status(base, PostStatus::Sent, None);
        assert_eq!(changes.status, None);
    }

    #[test]
    fn clearing_schedule_does_not_promote_draft() {
        let mut base = UpdatePostEntity::unchanged(fixed_now());
        base.scheduled_at = Some(None);

        let changes = apply_author_status(base, PostStatus::Draft, None);
        assert_eq!(changes.status, None);
    }

    #[test]
    fn queued_report_stamps_queued_at_only() {
        let report = StatusReportModel {
            status: DispatchStatus::Queued,
            provider_message_id: None,
            last_error: None,
        };

        let changes = dispatch_report_changes(report, fixed_now());
        assert_eq!(changes.status, Some("QUEUED".to_string()));
        assert_eq!(changes.queued_at, Some(Some(fixed_now())));
        assert_eq!(changes.sent_at, None);
        assert_eq!(changes.failed_at, None);
        assert_eq!(changes.last_error, None);
    }

    #[test]
    fn failed_report_stamps_failure_and_error() {
        let report = StatusReportModel {
            status: DispatchStatus::Failed,
            provider_message_id: Some("msg-42".to_string()),
            last_error: Some("timeout".to_string()),
        };

        let changes = dispatch_report_changes(report, fixed_now());
        assert_eq!(changes.status, Some("FAILED".to_string()));
        assert_eq!(changes.failed_at, Some(Some(fixed_now())));
        assert_eq!(changes.last_error, Some(Some("timeout".to_string())));
        assert_eq!(
            changes.provider_message_id,
            Some(Some("msg-42".to_string()))
        );
        // a failure report must not erase the earlier queued stamp
        assert_eq!(changes.queued_at, None);
    }

    #[test]
    fn failed_report_without_error_keeps_stored_value() {
        let report = StatusReportModel {
            status: DispatchStatus::Failed,
            provider_message_id: None,
            last_error: None,
        };

        let changes = dispatch_report_changes(report, fixed_now());
        assert_eq!(changes.last_error, None);
    }

    #[test]
    fn retry_reschedules_and_clears_everything() {
        let changes = retry_changes(fixed_now());
        assert_eq!(changes.status, Some("SCHEDULED".to_string()));
        assert_eq!(changes.queued_at, Some(None));
        assert_eq!(changes.sent_at, Some(None));
        assert_eq!(changes.failed_at, Some(None));
        assert_eq!(changes.last_error, Some(None));
        assert_eq!(changes.scheduled_at, None);
    }
}
