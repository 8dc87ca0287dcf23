//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FixtureIssueSubmission, FixtureIssuesQuery, IssueSubmission, IssuesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Submission use-case behind the POST endpoint.
    pub submission: Arc<dyn IssueSubmission>,
    /// Reporter listing behind the GET endpoint.
    pub issues: Arc<dyn IssuesQuery>,
}

impl HttpState {
    /// Construct state from port implementations.
    #[must_use]
    pub fn new(submission: Arc<dyn IssueSubmission>, issues: Arc<dyn IssuesQuery>) -> Self {
        Self { submission, issues }
    }
}

impl Default for HttpState {
    /// Fixture-backed state for tests and wiring without a database.
    fn default() -> Self {
        Self {
            submission: Arc::new(FixtureIssueSubmission),
            issues: Arc::new(FixtureIssuesQuery),
        }
    }
}
