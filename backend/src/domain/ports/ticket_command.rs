//! Driving port for ticket creation.
//!
//! The request carries the ticket type as the caller sent it; validating the
//! spelling against the known types is part of the command.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{CompanyId, DomainError, NewTicket, Ticket, TicketId, TicketType, UserId};

/// Request to open a ticket for a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    /// Ticket type as submitted, not yet validated.
    pub ticket_type: String,
    /// Company the ticket belongs to.
    pub company_id: CompanyId,
}

impl CreateTicketRequest {
    /// Build a request from raw parts.
    #[must_use]
    pub fn new(ticket_type: impl Into<String>, company_id: CompanyId) -> Self {
        Self {
            ticket_type: ticket_type.into(),
            company_id,
        }
    }
}

/// Response from opening a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketResponse {
    /// The persisted ticket.
    pub ticket: Ticket,
}

/// Driving port for ticket write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketCommand: Send + Sync {
    /// Open a ticket, resolving its assignee from the company roster.
    ///
    /// Rejections (unknown or unsupported type, duplicate, no or ambiguous
    /// assignee) surface as [`DomainError`] with `details.code` naming the kind.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use ticketing::domain::CompanyId;
    /// # use ticketing::domain::ports::{CreateTicketRequest, FixtureTicketCommand, TicketCommand};
    /// # async fn example() -> Result<(), ticketing::domain::DomainError> {
    /// let command = FixtureTicketCommand;
    /// let response = command
    ///     .create_ticket(CreateTicketRequest::new("managementReport", CompanyId::new(1)))
    ///     .await?;
    /// assert_eq!(response.ticket.company_id, CompanyId::new(1));
    /// # Ok(())
    /// # }
    /// ```
    async fn create_ticket(&self, request: CreateTicketRequest)
    -> Result<CreateTicketResponse, DomainError>;
}

/// Fixture command that assigns every valid request to roster entry 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTicketCommand;

#[async_trait]
impl TicketCommand for FixtureTicketCommand {
    async fn create_ticket(
        &self,
        request: CreateTicketRequest,
    ) -> Result<CreateTicketResponse, DomainError> {
        let ticket_type = request
            .ticket_type
            .parse::<TicketType>()
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;
        let ticket = NewTicket::new(ticket_type, request.company_id, UserId::new(1))
            .into_ticket(TicketId::new(1));
        Ok(CreateTicketResponse { ticket })
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[tokio::test]
    async fn fixture_rejects_unknown_type() {
        let err = FixtureTicketCommand
            .create_ticket(CreateTicketRequest::new("payroll", CompanyId::new(1)))
            .await
            .expect_err("unknown type");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_echoes_company() {
        let response = FixtureTicketCommand
            .create_ticket(CreateTicketRequest::new("strikeOff", CompanyId::new(8)))
            .await
            .expect("fixture create");
        assert_eq!(response.ticket.company_id, CompanyId::new(8));
    }
}
