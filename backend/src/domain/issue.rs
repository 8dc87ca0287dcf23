//! Issue aggregate: a persisted civic-complaint record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::EmailAddress;

/// Issue lifecycle status. Transitions are driven outside this core; every
/// submission starts at [`IssueStatus::Pending`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Newly reported, awaiting triage.
    #[default]
    Pending,
    /// Picked up by the responsible authority.
    InProgress,
    /// Closed as resolved.
    Resolved,
}

impl IssueStatus {
    /// Stable storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }
}

/// Free-form fields of an incoming submission, validated by the inbound
/// adapter before they reach the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    /// Short complaint title, e.g. "Pothole".
    pub title: String,
    /// Detailed description of the problem.
    pub description: String,
    /// Free-form location text, e.g. "Main St".
    pub location: String,
    /// Complaint category, e.g. "road", "water", "electricity".
    pub type_of_issue: String,
    /// Opaque image reference (filename or URL), if one was attached.
    pub image: Option<String>,
}

/// Persisted civic-complaint record.
///
/// `reported_by` is immutable once created and references a user that existed
/// at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Stable identifier assigned at creation.
    pub id: Uuid,
    /// Short complaint title.
    pub title: String,
    /// Detailed description of the problem.
    pub description: String,
    /// Free-form location text.
    pub location: String,
    /// Complaint category.
    pub type_of_issue: String,
    /// Opaque image reference, if any.
    pub image: Option<String>,
    /// Lifecycle status, `pending` at creation.
    pub status: IssueStatus,
    /// Email of the reporting user. Immutable after creation.
    pub reported_by: EmailAddress,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Build a new pending issue from a validated draft.
    #[must_use]
    pub fn new(draft: IssueDraft, reported_by: EmailAddress, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            location: draft.location,
            type_of_issue: draft.type_of_issue,
            image: draft.image,
            status: IssueStatus::Pending,
            reported_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> IssueDraft {
        IssueDraft {
            title: "Pothole".into(),
            description: "Large pothole".into(),
            location: "Main St".into(),
            type_of_issue: "road".into(),
            image: None,
        }
    }

    #[test]
    fn new_issue_starts_pending() {
        let reporter = EmailAddress::new("asha@example.org").expect("valid email");
        let now = Utc::now();
        let issue = Issue::new(draft(), reporter.clone(), now);

        assert_eq!(issue.status, IssueStatus::Pending);
        assert_eq!(issue.reported_by, reporter);
        assert_eq!(issue.created_at, now);
        assert_eq!(issue.updated_at, now);
    }

    #[test]
    fn status_serialises_snake_case() {
        let value = serde_json::to_value(IssueStatus::InProgress).expect("serialise");
        assert_eq!(value, "in_progress");
        assert_eq!(IssueStatus::InProgress.as_str(), "in_progress");
    }

    #[test]
    fn issue_serialises_camel_case() {
        let reporter = EmailAddress::new("asha@example.org").expect("valid email");
        let issue = Issue::new(draft(), reporter, Utc::now());
        let value = serde_json::to_value(&issue).expect("serialise");

        assert_eq!(value["typeOfIssue"], "road");
        assert_eq!(value["reportedBy"], "asha@example.org");
        assert_eq!(value["status"], "pending");
        assert!(value.get("createdAt").is_some());
    }
}
