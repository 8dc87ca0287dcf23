//! Driving port for the rate-limited issue submission use-case.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, Issue, IssueDraft};

/// Validation failures for a submission request.
///
/// The original schema marks title, location, and category as required;
/// description and image stay free-form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitValidationError {
    EmptyTitle,
    EmptyLocation,
    EmptyTypeOfIssue,
}

impl fmt::Display for SubmitValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyLocation => write!(f, "location must not be empty"),
            Self::EmptyTypeOfIssue => write!(f, "typeOfIssue must not be empty"),
        }
    }
}

impl std::error::Error for SubmitValidationError {}

/// A validated submission: the complaint draft plus the caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitIssueRequest {
    draft: IssueDraft,
    reported_by: EmailAddress,
}

impl SubmitIssueRequest {
    /// Validate and construct a submission request.
    pub fn new(
        draft: IssueDraft,
        reported_by: EmailAddress,
    ) -> Result<Self, SubmitValidationError> {
        if draft.title.trim().is_empty() {
            return Err(SubmitValidationError::EmptyTitle);
        }
        if draft.location.trim().is_empty() {
            return Err(SubmitValidationError::EmptyLocation);
        }
        if draft.type_of_issue.trim().is_empty() {
            return Err(SubmitValidationError::EmptyTypeOfIssue);
        }
        Ok(Self { draft, reported_by })
    }

    /// The complaint fields.
    #[must_use]
    pub fn draft(&self) -> &IssueDraft {
        &self.draft
    }

    /// The caller identity.
    #[must_use]
    pub fn reported_by(&self) -> &EmailAddress {
        &self.reported_by
    }

    /// Split the request into its parts.
    #[must_use]
    pub fn into_parts(self) -> (IssueDraft, EmailAddress) {
        (self.draft, self.reported_by)
    }
}

/// Driving port: submit a civic complaint on behalf of a registered user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueSubmission: Send + Sync {
    /// Run the reset-then-check-then-increment submission flow.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::ErrorCode::NotFound`] when no user is registered
    ///   under the caller's email.
    /// - [`crate::domain::ErrorCode::RateLimited`] when the daily cap has
    ///   been reached for the current calendar day.
    /// - [`crate::domain::ErrorCode::ServiceUnavailable`] or
    ///   [`crate::domain::ErrorCode::InternalError`] on persistence failure.
    async fn submit(&self, request: SubmitIssueRequest) -> Result<Issue, Error>;
}

/// Fixture implementation that rejects every submission as unknown.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIssueSubmission;

#[async_trait]
impl IssueSubmission for FixtureIssueSubmission {
    async fn submit(&self, request: SubmitIssueRequest) -> Result<Issue, Error> {
        Err(Error::not_found(format!(
            "no registered user for {}",
            request.reported_by()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn draft() -> IssueDraft {
        IssueDraft {
            title: "Pothole".into(),
            description: "Large pothole".into(),
            location: "Main St".into(),
            type_of_issue: "road".into(),
            image: None,
        }
    }

    fn reporter() -> EmailAddress {
        EmailAddress::new("asha@example.org").expect("valid email")
    }

    #[test]
    fn accepts_complete_draft() {
        let request = SubmitIssueRequest::new(draft(), reporter()).expect("valid request");
        assert_eq!(request.draft().title, "Pothole");
        assert_eq!(request.reported_by().as_str(), "asha@example.org");
    }

    #[rstest]
    #[case("", "Main St", "road", SubmitValidationError::EmptyTitle)]
    #[case("Pothole", "  ", "road", SubmitValidationError::EmptyLocation)]
    #[case("Pothole", "Main St", "", SubmitValidationError::EmptyTypeOfIssue)]
    fn rejects_missing_required_fields(
        #[case] title: &str,
        #[case] location: &str,
        #[case] type_of_issue: &str,
        #[case] expected: SubmitValidationError,
    ) {
        let candidate = IssueDraft {
            title: title.into(),
            location: location.into(),
            type_of_issue: type_of_issue.into(),
            ..draft()
        };
        let err = SubmitIssueRequest::new(candidate, reporter()).expect_err("rejected");
        assert_eq!(err, expected);
    }

    #[tokio::test]
    async fn fixture_submission_reports_unknown_user() {
        let request = SubmitIssueRequest::new(draft(), reporter()).expect("valid request");
        let err = FixtureIssueSubmission
            .submit(request)
            .await
            .expect_err("fixture rejects");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
