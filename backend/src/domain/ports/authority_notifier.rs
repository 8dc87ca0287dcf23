//! Port for best-effort authority forwarding.
//!
//! After a submission is durably written, a summary is forwarded to the
//! downstream authority portal. The call is strictly best-effort: failures
//! are logged by the caller and never surface to the reporting citizen.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{EmailAddress, Issue};

use super::define_port_error;

define_port_error! {
    /// Failures raised by authority notifier adapters.
    pub enum AuthorityNotifierError {
        /// The endpoint could not be reached or the request timed out.
        Transport { message: String } => "authority endpoint unreachable: {message}",
        /// The endpoint answered with a non-success status.
        Status { code: u16 } => "authority endpoint returned status {code}",
    }
}

/// Summary of a new issue forwarded to the authority portal.
///
/// Carries only the fields the portal consumes; the portal's response is
/// never surfaced to the original caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSummary {
    /// Short complaint title.
    pub title: String,
    /// Detailed description of the problem.
    pub description: String,
    /// Free-form location text.
    pub location: String,
    /// Complaint category.
    pub type_of_issue: String,
    /// Email of the reporting user.
    pub reported_by: EmailAddress,
}

impl From<&Issue> for IssueSummary {
    fn from(issue: &Issue) -> Self {
        Self {
            title: issue.title.clone(),
            description: issue.description.clone(),
            location: issue.location.clone(),
            type_of_issue: issue.type_of_issue.clone(),
            reported_by: issue.reported_by.clone(),
        }
    }
}

/// Port for the outbound authority notification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorityNotifier: Send + Sync {
    /// Deliver the summary to the authority endpoint.
    async fn notify(&self, summary: &IssueSummary) -> Result<(), AuthorityNotifierError>;
}

/// Fixture notifier that accepts every summary without delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthorityNotifier;

#[async_trait]
impl AuthorityNotifier for FixtureAuthorityNotifier {
    async fn notify(&self, _summary: &IssueSummary) -> Result<(), AuthorityNotifierError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IssueDraft;
    use chrono::Utc;

    fn summary() -> IssueSummary {
        let reporter = EmailAddress::new("asha@example.org").expect("valid email");
        let issue = Issue::new(
            IssueDraft {
                title: "Pothole".into(),
                description: "Large pothole".into(),
                location: "Main St".into(),
                type_of_issue: "road".into(),
                image: Some("pothole.jpg".into()),
            },
            reporter,
            Utc::now(),
        );
        IssueSummary::from(&issue)
    }

    #[test]
    fn summary_drops_non_forwarded_fields() {
        let value = serde_json::to_value(summary()).expect("serialise");
        assert_eq!(value["title"], "Pothole");
        assert_eq!(value["typeOfIssue"], "road");
        assert_eq!(value["reportedBy"], "asha@example.org");
        assert!(value.get("image").is_none());
        assert!(value.get("status").is_none());
    }

    #[tokio::test]
    async fn fixture_notifier_accepts_summaries() {
        FixtureAuthorityNotifier
            .notify(&summary())
            .await
            .expect("notify succeeds");
    }

    #[test]
    fn status_error_formats_code() {
        let err = AuthorityNotifierError::status(500_u16);
        assert_eq!(err.to_string(), "authority endpoint returned status 500");
    }
}
