//! PostgreSQL-backed `IssueRepository` implementation using Diesel ORM.
//!
//! This adapter implements the domain's `IssueRepository` port. Issues are
//! append-only from this crate's perspective; status transitions happen in
//! back-office tooling outside this service.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{IssueRepository, IssueRepositoryError};
use crate::domain::{EmailAddress, Issue, IssueStatus};

use super::models::{IssueRow, NewIssueRow};
use super::pool::{DbPool, PoolError};
use super::schema::issues;

/// Diesel-backed implementation of the `IssueRepository` port.
#[derive(Clone)]
pub struct DieselIssueRepository {
    pool: DbPool,
}

impl DieselIssueRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain issue repository errors.
fn map_pool_error(error: PoolError) -> IssueRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            IssueRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain issue repository errors.
fn map_diesel_error(error: diesel::result::Error) -> IssueRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => IssueRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => IssueRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            IssueRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => IssueRepositoryError::query("database error"),
        _ => IssueRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain Issue.
fn row_to_issue(row: IssueRow) -> Result<Issue, IssueRepositoryError> {
    let reported_by = EmailAddress::new(&row.reported_by)
        .map_err(|err| IssueRepositoryError::query(format!("stored email rejected: {err}")))?;

    let status = match row.status.as_str() {
        "pending" => IssueStatus::Pending,
        "in_progress" => IssueStatus::InProgress,
        "resolved" => IssueStatus::Resolved,
        other => {
            tracing::warn!(
                value = other,
                issue_id = %row.id,
                "unrecognised status value, defaulting to Pending"
            );
            IssueStatus::Pending
        }
    };

    Ok(Issue {
        id: row.id,
        title: row.title,
        description: row.description,
        location: row.location,
        type_of_issue: row.type_of_issue,
        image: row.image,
        status,
        reported_by,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl IssueRepository for DieselIssueRepository {
    async fn create(&self, issue: &Issue) -> Result<(), IssueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewIssueRow {
            id: issue.id,
            title: &issue.title,
            description: &issue.description,
            location: &issue.location,
            type_of_issue: &issue.type_of_issue,
            image: issue.image.as_deref(),
            status: issue.status.as_str(),
            reported_by: issue.reported_by.as_str(),
            created_at: issue.created_at,
            updated_at: issue.updated_at,
        };

        diesel::insert_into(issues::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_by_reporter(
        &self,
        reporter: &EmailAddress,
    ) -> Result<Vec<Issue>, IssueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IssueRow> = issues::table
            .filter(issues::reported_by.eq(reporter.as_str()))
            .order(issues::created_at.asc())
            .select(IssueRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_issue).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row_with_status(status: &str) -> IssueRow {
        IssueRow {
            id: Uuid::new_v4(),
            title: "Pothole".to_string(),
            description: "Large pothole".to_string(),
            location: "Main St".to_string(),
            type_of_issue: "road".to_string(),
            image: None,
            status: status.to_string(),
            reported_by: "asha@example.org".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(repo_err, IssueRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let diesel_err = diesel::result::Error::NotFound;
        let repo_err = map_diesel_error(diesel_err);

        assert!(matches!(repo_err, IssueRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case("pending", IssueStatus::Pending)]
    #[case("in_progress", IssueStatus::InProgress)]
    #[case("resolved", IssueStatus::Resolved)]
    fn row_to_issue_parses_status(#[case] raw: &str, #[case] expected: IssueStatus) {
        let issue = row_to_issue(row_with_status(raw)).expect("valid row");
        assert_eq!(issue.status, expected);
    }

    #[rstest]
    fn unknown_status_defaults_to_pending() {
        let issue = row_to_issue(row_with_status("archived")).expect("valid row");
        assert_eq!(issue.status, IssueStatus::Pending);
    }

    #[rstest]
    fn row_with_malformed_email_is_a_query_error() {
        let mut row = row_with_status("pending");
        row.reported_by = "not-an-email".to_string();

        let err = row_to_issue(row).expect_err("rejected");
        assert!(matches!(err, IssueRepositoryError::Query { .. }));
    }
}
