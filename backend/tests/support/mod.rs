//! Shared in-memory adapters for HTTP integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use civicwatch_backend::domain::ports::{
    AuthorityNotifier, AuthorityNotifierError, IssueRepository, IssueRepositoryError,
    IssueSummary, UserRepository, UserRepositoryError,
};
use civicwatch_backend::domain::{EmailAddress, Issue, User};

/// In-memory user store keyed by email address.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<EmailAddress, User>>>,
}

impl InMemoryUserRepository {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users
            .into_iter()
            .map(|user| (user.email.clone(), user))
            .collect();
        Self {
            users: Arc::new(Mutex::new(map)),
        }
    }

    pub fn get(&self, email: &EmailAddress) -> Option<User> {
        self.users.lock().expect("user store poisoned").get(email).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users.lock().expect("user store poisoned").get(email).cloned())
    }

    async fn save(&self, user: &User) -> Result<(), UserRepositoryError> {
        self.users
            .lock()
            .expect("user store poisoned")
            .insert(user.email.clone(), user.clone());
        Ok(())
    }
}

/// In-memory append-only issue store.
#[derive(Clone, Default)]
pub struct InMemoryIssueRepository {
    issues: Arc<Mutex<Vec<Issue>>>,
}

impl InMemoryIssueRepository {
    pub fn all(&self) -> Vec<Issue> {
        self.issues.lock().expect("issue store poisoned").clone()
    }
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn create(&self, issue: &Issue) -> Result<(), IssueRepositoryError> {
        self.issues
            .lock()
            .expect("issue store poisoned")
            .push(issue.clone());
        Ok(())
    }

    async fn list_by_reporter(
        &self,
        reporter: &EmailAddress,
    ) -> Result<Vec<Issue>, IssueRepositoryError> {
        let mut issues: Vec<Issue> = self
            .issues
            .lock()
            .expect("issue store poisoned")
            .iter()
            .filter(|issue| &issue.reported_by == reporter)
            .cloned()
            .collect();
        issues.sort_by_key(|issue| issue.created_at);
        Ok(issues)
    }
}

/// Notifier that records every delivered summary on a channel.
pub struct RecordingNotifier {
    sender: mpsc::UnboundedSender<IssueSummary>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<IssueSummary>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl AuthorityNotifier for RecordingNotifier {
    async fn notify(&self, summary: &IssueSummary) -> Result<(), AuthorityNotifierError> {
        self.sender
            .send(summary.clone())
            .map_err(|err| AuthorityNotifierError::transport(err.to_string()))
    }
}

/// Notifier that fails every delivery.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingNotifier;

#[async_trait]
impl AuthorityNotifier for FailingNotifier {
    async fn notify(&self, _summary: &IssueSummary) -> Result<(), AuthorityNotifierError> {
        Err(AuthorityNotifierError::transport("portal unreachable"))
    }
}
