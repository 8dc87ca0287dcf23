//! Issue submission domain service.
//!
//! Implements the reset-then-check-then-increment daily limit policy around
//! issue creation, plus the best-effort authority forwarding that follows a
//! durable submission.
//!
//! # Concurrency
//!
//! The user's daily counter is the only contended resource. A naive
//! read-then-write pair would let two simultaneous submissions both observe a
//! count below the cap and both proceed, overshooting the daily cap. This
//! service closes that race: a per-reporter async mutex is held from the user
//! read through the counter write, so submissions by the same reporter
//! serialise within the process. Cross-process deployments need an external
//! primitive instead.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as SyncMutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::domain::ports::{
    AuthorityNotifier, IssueRepository, IssueRepositoryError, IssueSubmission, IssueSummary,
    IssuesQuery, SubmitIssueRequest, UserRepository, UserRepositoryError,
};
use crate::domain::user::DAILY_REPORT_CAP;
use crate::domain::{EmailAddress, Error, Issue};

/// Per-reporter mutual exclusion for the counter read-modify-write sequence.
///
/// A slot is created on first use and removed again once the last holder or
/// waiter releases it, so the map never retains an entry per address ever
/// submitted.
#[derive(Clone, Default)]
struct ReporterLocks {
    inner: Arc<SyncMutex<HashMap<EmailAddress, Arc<Mutex<()>>>>>,
}

impl ReporterLocks {
    /// Acquire the lock for one reporter, creating its slot on first use.
    async fn acquire(&self, reporter: &EmailAddress) -> ReporterGuard {
        let slot = {
            let mut map = self.lock_map();
            Arc::clone(map.entry(reporter.clone()).or_default())
        };
        let guard = slot.lock_owned().await;
        ReporterGuard {
            locks: self.clone(),
            reporter: reporter.clone(),
            guard: Some(guard),
        }
    }

    fn lock_map(&self) -> MutexGuard<'_, HashMap<EmailAddress, Arc<Mutex<()>>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        self.lock_map().len()
    }
}

/// Guard over one reporter's slot, released on drop.
struct ReporterGuard {
    locks: ReporterLocks,
    reporter: EmailAddress,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ReporterGuard {
    fn drop(&mut self) {
        // The mutex must be released before the strong count is read; a sole
        // holder otherwise still contributes the guard's own reference.
        drop(self.guard.take());
        let mut map = self.locks.lock_map();
        // Waiters hold a clone of the slot via their pending lock futures, so
        // a count of one means the map is the only remaining reference.
        if map
            .get(&self.reporter)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            map.remove(&self.reporter);
        }
    }
}

/// Domain service implementing the submission and query driving ports.
#[derive(Clone)]
pub struct IssueSubmissionService<U, I> {
    users: Arc<U>,
    issues: Arc<I>,
    notifier: Arc<dyn AuthorityNotifier>,
    clock: Arc<dyn Clock>,
    locks: ReporterLocks,
}

impl<U, I> IssueSubmissionService<U, I> {
    /// Create a new service over the given adapters.
    pub fn new(
        users: Arc<U>,
        issues: Arc<I>,
        notifier: Arc<dyn AuthorityNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            issues,
            notifier,
            clock,
            locks: ReporterLocks::default(),
        }
    }
}

impl<U, I> IssueSubmissionService<U, I>
where
    U: UserRepository,
    I: IssueRepository,
{
    fn map_user_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    fn map_issue_error(error: IssueRepositoryError) -> Error {
        match error {
            IssueRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("issue repository unavailable: {message}"))
            }
            IssueRepositoryError::Query { message } => {
                Error::internal(format!("issue repository error: {message}"))
            }
        }
    }

    /// Fire the authority notification on a detached task.
    ///
    /// Runs strictly after both durable writes. Failures are logged for
    /// operator visibility and never reach the caller.
    fn dispatch_forwarding(&self, summary: IssueSummary) {
        let notifier = Arc::clone(&self.notifier);
        drop(tokio::spawn(async move {
            match notifier.notify(&summary).await {
                Ok(()) => {
                    debug!(reporter = %summary.reported_by, "report forwarded to authority portal");
                }
                Err(error) => {
                    warn!(
                        %error,
                        reporter = %summary.reported_by,
                        "failed to forward report to authority portal"
                    );
                }
            }
        }));
    }
}

#[async_trait]
impl<U, I> IssueSubmission for IssueSubmissionService<U, I>
where
    U: UserRepository + 'static,
    I: IssueRepository + 'static,
{
    async fn submit(&self, request: SubmitIssueRequest) -> Result<Issue, Error> {
        let (draft, reporter) = request.into_parts();

        // Held across read, limit check, and both writes.
        let _guard = self.locks.acquire(&reporter).await;

        let mut user = self
            .users
            .find_by_email(&reporter)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(format!("no registered user for {reporter}")))?;

        let now = self.clock.utc();
        if user.roll_over_if_new_day(now) {
            debug!(reporter = %reporter, "daily counter reset for new calendar day");
        }

        if user.has_reached_daily_cap() {
            return Err(Error::rate_limited(format!(
                "daily report limit ({DAILY_REPORT_CAP}) reached"
            ))
            .with_details(json!({ "dailyCap": DAILY_REPORT_CAP })));
        }

        let issue = Issue::new(draft, reporter, now);
        self.issues
            .create(&issue)
            .await
            .map_err(Self::map_issue_error)?;

        user.record_submission(now);
        self.users.save(&user).await.map_err(Self::map_user_error)?;

        self.dispatch_forwarding(IssueSummary::from(&issue));
        Ok(issue)
    }
}

#[async_trait]
impl<U, I> IssuesQuery for IssueSubmissionService<U, I>
where
    U: UserRepository + 'static,
    I: IssueRepository + 'static,
{
    async fn list_by_reporter(&self, reporter: &EmailAddress) -> Result<Vec<Issue>, Error> {
        self.issues
            .list_by_reporter(reporter)
            .await
            .map_err(Self::map_issue_error)
    }
}
