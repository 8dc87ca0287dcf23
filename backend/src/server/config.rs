//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use civicwatch_backend::outbound::persistence::DbPool;
use url::Url;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) authority_url: Option<Url>,
    pub(crate) authority_timeout: Duration,
}

impl ServerConfig {
    /// Construct a server configuration for the given bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            authority_url: None,
            authority_timeout: Duration::from_secs(3),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses database-backed implementations for
    /// the submission and query ports; without it, fixtures answer instead.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach the authority portal endpoint for forwarded summaries.
    #[must_use]
    pub fn with_authority_url(mut self, url: Url) -> Self {
        self.authority_url = Some(url);
        self
    }

    /// Set the delivery timeout for authority notifications.
    #[must_use]
    pub fn with_authority_timeout(mut self, timeout: Duration) -> Self {
        self.authority_timeout = timeout;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(
            dead_code,
            reason = "Exercised by integration tests; retained for fixture access"
        )
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
