//! Ordered candidate lookup over a company roster.

use std::cmp::Reverse;
use std::sync::Arc;

use crate::domain::ports::{RosterRepository, RosterRepositoryError};
use crate::domain::{CompanyId, RosterEntry, UserRole};

/// Reads roster candidates newest first.
pub struct RosterReader<R> {
    roster_repo: Arc<R>,
}

impl<R> Clone for RosterReader<R> {
    fn clone(&self) -> Self {
        Self {
            roster_repo: Arc::clone(&self.roster_repo),
        }
    }
}

impl<R> RosterReader<R>
where
    R: RosterRepository,
{
    /// Wrap a roster repository.
    #[must_use]
    pub const fn new(roster_repo: Arc<R>) -> Self {
        Self { roster_repo }
    }

    /// Entries of `company_id` holding one of `roles`, ordered by creation
    /// time descending with identifier descending as the tie-break.
    ///
    /// # Errors
    /// Propagates repository failures unchanged.
    pub async fn find_candidates(
        &self,
        company_id: CompanyId,
        roles: &[UserRole],
    ) -> Result<Vec<RosterEntry>, RosterRepositoryError> {
        let mut entries = self
            .roster_repo
            .list_by_company_and_roles(company_id, roles)
            .await?;
        entries.sort_by_key(|entry| Reverse((entry.created_at, entry.id)));
        Ok(entries)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Regression coverage for this module.

    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::UserId;
    use crate::domain::ports::FixtureRosterRepository;

    fn entry(id: i64, seconds: i64) -> RosterEntry {
        RosterEntry {
            id: UserId::new(id),
            name: format!("user-{id}"),
            role: UserRole::Accountant,
            company_id: CompanyId::new(1),
            created_at: Utc.timestamp_opt(seconds, 0).single().expect("timestamp"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn orders_newest_first_with_id_tie_break() {
        let reader = RosterReader::new(Arc::new(FixtureRosterRepository::new(vec![
            entry(1, 100),
            entry(2, 300),
            entry(3, 200),
            entry(4, 300),
        ])));

        let ids: Vec<_> = reader
            .find_candidates(CompanyId::new(1), &[UserRole::Accountant])
            .await
            .expect("roster read")
            .into_iter()
            .map(|e| e.id.get())
            .collect();

        assert_eq!(ids, vec![4, 2, 3, 1]);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_roster_is_not_an_error() {
        let reader = RosterReader::new(Arc::new(FixtureRosterRepository::default()));
        let found = reader
            .find_candidates(CompanyId::new(1), &[UserRole::Director])
            .await
            .expect("roster read");
        assert!(found.is_empty());
    }
}
