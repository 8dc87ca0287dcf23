//! Reqwest-backed authority portal notifier.
//!
//! This adapter owns transport details only: JSON serialisation of the
//! forwarded summary, the request timeout, and HTTP error mapping. Whether a
//! delivery failure matters is decided by the caller, not here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::domain::ports::{AuthorityNotifier, AuthorityNotifierError, IssueSummary};

const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(3);

/// Authority notifier that performs HTTP POST requests against one endpoint.
pub struct AuthorityHttpNotifier {
    client: Client,
    endpoint: Url,
}

impl AuthorityHttpNotifier {
    /// Build a notifier with the default delivery timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoint, DEFAULT_NOTIFY_TIMEOUT)
    }

    /// Build a notifier using a reqwest client with an explicit request timeout.
    ///
    /// The timeout is deliberately short: delivery happens on a detached task
    /// after the submission is durable, and a slow portal must not pile up
    /// hung tasks.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl AuthorityNotifier for AuthorityHttpNotifier {
    async fn notify(&self, summary: &IssueSummary) -> Result<(), AuthorityNotifierError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(summary)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        Ok(())
    }
}

fn map_transport_error(error: reqwest::Error) -> AuthorityNotifierError {
    AuthorityNotifierError::transport(error.to_string())
}

fn map_status_error(status: StatusCode) -> AuthorityNotifierError {
    AuthorityNotifierError::status(status.as_u16())
}
