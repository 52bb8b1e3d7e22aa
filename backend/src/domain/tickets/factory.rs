//! Persists resolved tickets.

use std::sync::Arc;

use crate::domain::ports::{TicketRepository, TicketRepositoryError};
use crate::domain::{CompanyId, NewTicket, Ticket, UserId};

use super::{DispatchError, TicketCreationError, TicketPolicy};

/// Writes an open ticket for a resolved assignee.
pub struct TicketFactory<T> {
    ticket_repo: Arc<T>,
}

impl<T> Clone for TicketFactory<T> {
    fn clone(&self) -> Self {
        Self {
            ticket_repo: Arc::clone(&self.ticket_repo),
        }
    }
}

impl<T> TicketFactory<T>
where
    T: TicketRepository,
{
    /// Wrap a ticket repository.
    #[must_use]
    pub const fn new(ticket_repo: Arc<T>) -> Self {
        Self { ticket_repo }
    }

    /// Persist an open ticket of the policy's type and category.
    ///
    /// Uniqueness-constrained types go through `insert_unique`, so a ticket
    /// created concurrently after the pre-check still blocks this one.
    ///
    /// # Errors
    /// [`TicketCreationError::DuplicateTicket`] when the store reports a
    /// uniqueness conflict; other store failures as [`DispatchError::Store`].
    pub async fn create(
        &self,
        policy: &TicketPolicy,
        company_id: CompanyId,
        assignee_id: UserId,
    ) -> Result<Ticket, DispatchError> {
        let ticket = NewTicket::new(policy.ticket_type(), company_id, assignee_id);
        let stored = if policy.uniqueness_constrained() {
            self.ticket_repo.insert_unique(ticket).await
        } else {
            self.ticket_repo.insert(ticket).await
        };

        stored.map_err(|error| match error {
            TicketRepositoryError::Duplicate { .. } => TicketCreationError::DuplicateTicket {
                company_id,
                ticket_type: policy.ticket_type(),
            }
            .into(),
            other => DispatchError::Store(other),
        })
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
    use crate::domain::ports::MockTicketRepository;
    use crate::domain::{TicketCategory, TicketId, TicketStatus, TicketType};

    #[rstest]
    #[tokio::test]
    async fn plain_types_use_insert() {
        let mut repo = MockTicketRepository::new();
        repo.expect_insert_unique().times(0);
        repo.expect_insert()
            .times(1)
            .returning(|ticket| Ok(ticket.into_ticket(TicketId::new(11))));

        let factory = TicketFactory::new(Arc::new(repo));
        let ticket = factory
            .create(
                &TicketPolicy::for_type(TicketType::ManagementReport),
                CompanyId::new(1),
                UserId::new(2),
            )
            .await
            .expect("ticket created");

        assert_eq!(ticket.id, TicketId::new(11));
        assert_eq!(ticket.category, TicketCategory::Accounting);
        assert_eq!(ticket.status, TicketStatus::Open);
    }

    #[rstest]
    #[tokio::test]
    async fn unique_types_report_store_conflict_as_duplicate() {
        let mut repo = MockTicketRepository::new();
        repo.expect_insert().times(0);
        repo.expect_insert_unique().times(1).returning(|ticket| {
            Err(TicketRepositoryError::duplicate(
                ticket.company_id(),
                ticket.ticket_type(),
            ))
        });

        let factory = TicketFactory::new(Arc::new(repo));
        let error = factory
            .create(
                &TicketPolicy::for_type(TicketType::RegistrationAddressChange),
                CompanyId::new(3),
                UserId::new(4),
            )
            .await
            .expect_err("duplicate");

        assert_eq!(
            error,
            DispatchError::Rejected(TicketCreationError::DuplicateTicket {
                company_id: CompanyId::new(3),
                ticket_type: TicketType::RegistrationAddressChange,
            })
        );
    }

    #[rstest]
    #[tokio::test]
    async fn store_faults_pass_through() {
        let mut repo = MockTicketRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(TicketRepositoryError::connection("pool timed out")));

        let factory = TicketFactory::new(Arc::new(repo));
        let error = factory
            .create(
                &TicketPolicy::for_type(TicketType::StrikeOff),
                CompanyId::new(3),
                UserId::new(4),
            )
            .await
            .expect_err("store fault");

        assert!(matches!(error, DispatchError::Store(TicketRepositoryError::Connection { .. })));
    }
}
