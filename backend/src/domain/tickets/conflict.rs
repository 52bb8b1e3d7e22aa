//! Pre-check for uniqueness-constrained ticket types.
//!
//! The check is advisory: the authoritative guard is the store's atomic
//! `insert_unique`.

use std::sync::Arc;

use crate::domain::ports::{TicketRepository, TicketRepositoryError};
use crate::domain::{CompanyId, TicketType};

/// Reports whether a company already holds a ticket of a given type.
pub struct ConflictDetector<T> {
    ticket_repo: Arc<T>,
}

impl<T> Clone for ConflictDetector<T> {
    fn clone(&self) -> Self {
        Self {
            ticket_repo: Arc::clone(&self.ticket_repo),
        }
    }
}

impl<T> ConflictDetector<T>
where
    T: TicketRepository,
{
    /// Wrap a ticket repository.
    #[must_use]
    pub const fn new(ticket_repo: Arc<T>) -> Self {
        Self { ticket_repo }
    }

    /// True when at least one ticket of `ticket_type` exists for
    /// `company_id`, whatever its status.
    ///
    /// # Errors
    /// Propagates repository failures unchanged.
    pub async fn has_existing(
        &self,
        company_id: CompanyId,
        ticket_type: TicketType,
    ) -> Result<bool, TicketRepositoryError> {
        self.ticket_repo.exists(company_id, ticket_type).await
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Regression coverage for this module.

    use mockall::predicate::eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::MockTicketRepository;

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[tokio::test]
    async fn forwards_existence_for_company_and_type(#[case] exists: bool) {
        let mut repo = MockTicketRepository::new();
        repo.expect_exists()
            .with(eq(CompanyId::new(7)), eq(TicketType::RegistrationAddressChange))
            .times(1)
            .return_once(move |_, _| Ok(exists));

        let detector = ConflictDetector::new(Arc::new(repo));
        let found = detector
            .has_existing(CompanyId::new(7), TicketType::RegistrationAddressChange)
            .await
            .expect("existence check");

        assert_eq!(found, exists);
    }
}
