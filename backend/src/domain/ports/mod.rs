//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod authority_notifier;
mod issue_repository;
mod issue_submission;
mod issues_query;
mod user_repository;

#[cfg(test)]
pub use authority_notifier::MockAuthorityNotifier;
pub use authority_notifier::{
    AuthorityNotifier, AuthorityNotifierError, FixtureAuthorityNotifier, IssueSummary,
};
#[cfg(test)]
pub use issue_repository::MockIssueRepository;
pub use issue_repository::{FixtureIssueRepository, IssueRepository, IssueRepositoryError};
#[cfg(test)]
pub use issue_submission::MockIssueSubmission;
pub use issue_submission::{
    FixtureIssueSubmission, IssueSubmission, SubmitIssueRequest, SubmitValidationError,
};
#[cfg(test)]
pub use issues_query::MockIssuesQuery;
pub use issues_query::{FixtureIssuesQuery, IssuesQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
