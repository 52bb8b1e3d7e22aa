//! Port for ticket persistence and the joined read view.

use async_trait::async_trait;

use crate::domain::{CompanyId, NewTicket, Ticket, TicketDetails, TicketType};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ticket repository adapters.
    pub enum TicketRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "ticket repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "ticket repository query failed: {message}",
        /// A ticket of a uniqueness-constrained type already exists.
        Duplicate { company_id: CompanyId, ticket_type: TicketType } =>
            "ticket {ticket_type} already exists for company {company_id}",
    }
}

/// Port for writing tickets and reading them back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Whether any ticket of `ticket_type` exists for `company_id`,
    /// regardless of status.
    async fn exists(
        &self,
        company_id: CompanyId,
        ticket_type: TicketType,
    ) -> Result<bool, TicketRepositoryError>;

    /// Persist a ticket and return it with its assigned identifier.
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket, TicketRepositoryError>;

    /// Persist a ticket unless one of the same type already exists for the
    /// company.
    ///
    /// The existence check and the insert are atomic with respect to other
    /// `insert_unique` calls for the same company. A conflict is reported
    /// as [`TicketRepositoryError::Duplicate`].
    async fn insert_unique(&self, ticket: NewTicket) -> Result<Ticket, TicketRepositoryError>;

    /// Every ticket joined with its company and assignee, oldest first.
    async fn list_all(&self) -> Result<Vec<TicketDetails>, TicketRepositoryError>;
}

/// Fixture implementation that accepts every write and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTicketRepository;

#[async_trait]
impl TicketRepository for FixtureTicketRepository {
    async fn exists(
        &self,
        _company_id: CompanyId,
        _ticket_type: TicketType,
    ) -> Result<bool, TicketRepositoryError> {
        Ok(false)
    }

    async fn insert(&self, ticket: NewTicket) -> Result<Ticket, TicketRepositoryError> {
        Ok(ticket.into_ticket(crate::domain::TicketId::new(1)))
    }

    async fn insert_unique(&self, ticket: NewTicket) -> Result<Ticket, TicketRepositoryError> {
        self.insert(ticket).await
    }

    async fn list_all(&self) -> Result<Vec<TicketDetails>, TicketRepositoryError> {
        Ok(Vec::new())
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
    use crate::domain::{TicketStatus, UserId};

    #[rstest]
    #[tokio::test]
    async fn fixture_assigns_identifier_and_open_status() {
        let repo = FixtureTicketRepository;
        let ticket = repo
            .insert_unique(NewTicket::new(
                TicketType::RegistrationAddressChange,
                CompanyId::new(1),
                UserId::new(2),
            ))
            .await
            .expect("fixture insert");

        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.assignee_id, UserId::new(2));
    }

    #[rstest]
    fn duplicate_message_names_type_and_company() {
        let err = TicketRepositoryError::duplicate(CompanyId::new(5), TicketType::StrikeOff);
        assert_eq!(
            err.to_string(),
            "ticket strikeOff already exists for company 5"
        );
    }
}
