//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use ticketing::domain::tickets::PolicyTable;
use ticketing::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) policies: PolicyTable,
}

impl ServerConfig {
    /// Construct a configuration bound to `bind_addr` with the standard
    /// ticket policies and no database.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            policies: PolicyTable::standard(),
        }
    }

    /// Attach a database connection pool for the Diesel adapters.
    ///
    /// Without one the server falls back to the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Replace the dispatch table.
    #[must_use]
    pub fn with_policies(mut self, policies: PolicyTable) -> Self {
        self.policies = policies;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
