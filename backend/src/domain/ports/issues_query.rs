//! Driving port for reading issues back out.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, Issue};

/// Driving port: list issues filed by a reporter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssuesQuery: Send + Sync {
    /// Fetch all issues for the reporter, ordered by creation time ascending.
    async fn list_by_reporter(&self, reporter: &EmailAddress) -> Result<Vec<Issue>, Error>;
}

/// Fixture implementation that returns an empty listing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIssuesQuery;

#[async_trait]
impl IssuesQuery for FixtureIssuesQuery {
    async fn list_by_reporter(&self, _reporter: &EmailAddress) -> Result<Vec<Issue>, Error> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_query_lists_nothing() {
        let reporter = EmailAddress::new("asha@example.org").expect("valid email");
        let listed = FixtureIssuesQuery
            .list_by_reporter(&reporter)
            .await
            .expect("query succeeds");
        assert!(listed.is_empty());
    }
}
