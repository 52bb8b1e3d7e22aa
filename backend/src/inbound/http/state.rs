//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{TicketCommand, TicketQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Ticket creation use-case.
    pub tickets: Arc<dyn TicketCommand>,
    /// Ticket read use-case.
    pub tickets_query: Arc<dyn TicketQuery>,
}

impl HttpState {
    /// Construct state from the ticket ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use ticketing::domain::ports::{FixtureTicketCommand, FixtureTicketQuery};
    /// use ticketing::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureTicketCommand), Arc::new(FixtureTicketQuery));
    /// let _tickets = state.tickets.clone();
    /// ```
    #[must_use]
    pub const fn new(tickets: Arc<dyn TicketCommand>, tickets_query: Arc<dyn TicketQuery>) -> Self {
        Self {
            tickets,
            tickets_query,
        }
    }

    /// Share one service as both the command and the query port.
    #[must_use]
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: TicketCommand + TicketQuery + 'static,
    {
        Self {
            tickets: service.clone(),
            tickets_query: service,
        }
    }
}
