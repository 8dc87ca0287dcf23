//! Port for user record persistence.
//!
//! The user record store exclusively owns the daily counter state. The
//! submission service re-reads the record on every attempt and writes it back
//! after counting; it never caches records across requests.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Port for user record storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by email identity.
    ///
    /// Returns `None` when no user is registered under the address.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<User>, UserRepositoryError>;

    /// Write back a mutated user record, keyed by `user.id`.
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError>;
}

/// Fixture implementation for wiring without a real database.
///
/// Lookups always miss and saves are discarded. Use it where user records are
/// not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn save(&self, _user: &User) -> Result<(), UserRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn fixture_repository_lookup_misses() {
        let repo = FixtureUserRepository;
        let email = EmailAddress::new("asha@example.org").expect("valid email");

        let found = repo.find_by_email(&email).await.expect("lookup succeeds");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fixture_repository_accepts_saves() {
        let repo = FixtureUserRepository;
        let user = User {
            id: Uuid::new_v4(),
            name: "Asha".into(),
            email: EmailAddress::new("asha@example.org").expect("valid email"),
            reports_today: 0,
            last_report_date: None,
        };

        repo.save(&user).await.expect("save succeeds");
    }

    #[test]
    fn connection_error_formats_message() {
        let err = UserRepositoryError::connection("refused");
        assert_eq!(
            err.to_string(),
            "user repository connection failed: refused"
        );
    }
}
