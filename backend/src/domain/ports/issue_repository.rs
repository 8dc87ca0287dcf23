//! Port for issue record persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Issue};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by issue repository adapters.
    pub enum IssueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "issue repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "issue repository query failed: {message}",
    }
}

/// Port for issue storage and the reporter query.
///
/// Issues are immutable after creation within this core; the store has no
/// shared mutable state across submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Persist a newly created issue exactly once.
    async fn create(&self, issue: &Issue) -> Result<(), IssueRepositoryError>;

    /// List issues filed by the given reporter, ordered by creation time
    /// ascending. Exact-match filter, no pagination.
    async fn list_by_reporter(
        &self,
        reporter: &EmailAddress,
    ) -> Result<Vec<Issue>, IssueRepositoryError>;
}

/// Fixture implementation that discards writes and returns no issues.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIssueRepository;

#[async_trait]
impl IssueRepository for FixtureIssueRepository {
    async fn create(&self, _issue: &Issue) -> Result<(), IssueRepositoryError> {
        Ok(())
    }

    async fn list_by_reporter(
        &self,
        _reporter: &EmailAddress,
    ) -> Result<Vec<Issue>, IssueRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IssueDraft;
    use chrono::Utc;

    #[tokio::test]
    async fn fixture_repository_accepts_creates_and_lists_nothing() {
        let repo = FixtureIssueRepository;
        let reporter = EmailAddress::new("asha@example.org").expect("valid email");
        let issue = Issue::new(
            IssueDraft {
                title: "Pothole".into(),
                description: "Large pothole".into(),
                location: "Main St".into(),
                type_of_issue: "road".into(),
                image: None,
            },
            reporter.clone(),
            Utc::now(),
        );

        repo.create(&issue).await.expect("create succeeds");
        let listed = repo.list_by_reporter(&reporter).await.expect("list succeeds");
        assert!(listed.is_empty());
    }

    #[test]
    fn query_error_formats_message() {
        let err = IssueRepositoryError::query("bad statement");
        assert_eq!(err.to_string(), "issue repository query failed: bad statement");
    }
}
