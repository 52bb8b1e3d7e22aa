//! Port for reading company rosters.

use async_trait::async_trait;

use crate::domain::{CompanyId, RosterEntry, UserRole};

use super::define_port_error;

define_port_error! {
    /// Errors raised by roster repository adapters.
    pub enum RosterRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "roster repository connection failed: {message}",
        /// Query failed during execution or returned unreadable rows.
        Query { message: String } =>
            "roster repository query failed: {message}",
    }
}

/// Read-only access to the personnel of a company.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Entries belonging to `company_id` whose role is in `roles`.
    ///
    /// Adapters return an empty list when nothing matches. Ordering is not
    /// part of the contract; callers sort.
    async fn list_by_company_and_roles(
        &self,
        company_id: CompanyId,
        roles: &[UserRole],
    ) -> Result<Vec<RosterEntry>, RosterRepositoryError>;
}

/// Fixture implementation serving a fixed roster.
///
/// Filtering by company and role is applied, so a single fixture can back
/// several scenarios.
#[derive(Debug, Default, Clone)]
pub struct FixtureRosterRepository {
    entries: Vec<RosterEntry>,
}

impl FixtureRosterRepository {
    /// Serve `entries`.
    #[must_use]
    pub const fn new(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl RosterRepository for FixtureRosterRepository {
    async fn list_by_company_and_roles(
        &self,
        company_id: CompanyId,
        roles: &[UserRole],
    ) -> Result<Vec<RosterEntry>, RosterRepositoryError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.company_id == company_id && roles.contains(&entry.role))
            .cloned()
            .collect())
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

    fn entry(id: i64, company: i64, role: UserRole) -> RosterEntry {
        RosterEntry {
            id: UserId::new(id),
            name: format!("user-{id}"),
            role,
            company_id: CompanyId::new(company),
            created_at: Utc.timestamp_opt(1_700_000_000 + id, 0).single().expect("timestamp"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_filters_by_company_and_role() {
        let repo = FixtureRosterRepository::new(vec![
            entry(1, 1, UserRole::Accountant),
            entry(2, 1, UserRole::Director),
            entry(3, 2, UserRole::Accountant),
        ]);

        let found = repo
            .list_by_company_and_roles(CompanyId::new(1), &[UserRole::Accountant])
            .await
            .expect("fixture read");

        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|e| e.id), Some(UserId::new(1)));
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_returns_empty_for_unknown_company() {
        let repo = FixtureRosterRepository::default();
        let found = repo
            .list_by_company_and_roles(CompanyId::new(9), &UserRole::ALL)
            .await
            .expect("fixture read");
        assert!(found.is_empty());
    }

    #[rstest]
    fn error_messages_name_the_repository() {
        let err = RosterRepositoryError::connection("refused");
        assert_eq!(err.to_string(), "roster repository connection failed: refused");
    }
}
