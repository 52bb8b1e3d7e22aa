//! Driving port for reading tickets.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, TicketDetails};

/// Response listing tickets with their company and assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTicketsResponse {
    /// Tickets, oldest first.
    pub tickets: Vec<TicketDetails>,
}

/// Driving port for ticket read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketQuery: Send + Sync {
    /// Every ticket joined with its company and assignee.
    async fn list_tickets(&self) -> Result<ListTicketsResponse, DomainError>;
}

/// Fixture query returning no tickets.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTicketQuery;

#[async_trait]
impl TicketQuery for FixtureTicketQuery {
    async fn list_tickets(&self) -> Result<ListTicketsResponse, DomainError> {
        Ok(ListTicketsResponse {
            tickets: Vec::new(),
        })
    }
}
