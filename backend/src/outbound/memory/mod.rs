//! In-memory implementation of the roster and ticket ports.
//!
//! Used by tests and by the server when no database is configured. All
//! state sits behind one async mutex, so `insert_unique` checks and inserts
//! under a single guard.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::ports::{
    RosterRepository, RosterRepositoryError, TicketRepository, TicketRepositoryError,
};
use crate::domain::{
    Company, CompanyId, NewTicket, RosterEntry, Ticket, TicketDetails, TicketId, TicketType,
    UserId, UserRole,
};

#[derive(Debug, Default)]
struct State {
    companies: Vec<Company>,
    users: Vec<RosterEntry>,
    tickets: Vec<Ticket>,
}

impl State {
    fn next_id(len: usize) -> i64 {
        i64::try_from(len).map_or(i64::MAX, |n| n.saturating_add(1))
    }

    fn has_ticket(&self, company_id: CompanyId, ticket_type: TicketType) -> bool {
        self.tickets
            .iter()
            .any(|ticket| ticket.company_id == company_id && ticket.ticket_type == ticket_type)
    }

    fn push_ticket(&mut self, ticket: NewTicket) -> Result<Ticket, TicketRepositoryError> {
        let company_known = self.companies.iter().any(|c| c.id == ticket.company_id());
        let assignee_known = self.users.iter().any(|u| u.id == ticket.assignee_id());
        if !company_known || !assignee_known {
            return Err(TicketRepositoryError::query(
                "referenced company or user does not exist",
            ));
        }
        let stored = ticket.into_ticket(TicketId::new(Self::next_id(self.tickets.len())));
        self.tickets.push(stored.clone());
        Ok(stored)
    }

    fn details(&self, ticket: &Ticket) -> Option<TicketDetails> {
        let company = self.companies.iter().find(|c| c.id == ticket.company_id)?;
        let assignee = self.users.iter().find(|u| u.id == ticket.assignee_id)?;
        Some(TicketDetails {
            ticket: ticket.clone(),
            company: company.clone(),
            assignee: assignee.clone(),
        })
    }
}

/// Shared in-memory store implementing [`RosterRepository`] and
/// [`TicketRepository`].
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTicketStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryTicketStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a company and return its identifier.
    pub async fn add_company(&self, name: impl Into<String>) -> CompanyId {
        let mut state = self.state.lock().await;
        let id = CompanyId::new(State::next_id(state.companies.len()));
        state.companies.push(Company::new(id, name));
        id
    }

    /// Add a roster entry created at `created_at`.
    pub async fn add_user(
        &self,
        company_id: CompanyId,
        name: impl Into<String>,
        role: UserRole,
        created_at: DateTime<Utc>,
    ) -> UserId {
        let mut state = self.state.lock().await;
        let id = UserId::new(State::next_id(state.users.len()));
        state.users.push(RosterEntry {
            id,
            name: name.into(),
            role,
            company_id,
            created_at,
        });
        id
    }

    /// Number of stored tickets.
    pub async fn ticket_count(&self) -> usize {
        self.state.lock().await.tickets.len()
    }
}

#[async_trait]
impl RosterRepository for InMemoryTicketStore {
    async fn list_by_company_and_roles(
        &self,
        company_id: CompanyId,
        roles: &[UserRole],
    ) -> Result<Vec<RosterEntry>, RosterRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .filter(|entry| entry.company_id == company_id && roles.contains(&entry.role))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketStore {
    async fn exists(
        &self,
        company_id: CompanyId,
        ticket_type: TicketType,
    ) -> Result<bool, TicketRepositoryError> {
        Ok(self.state.lock().await.has_ticket(company_id, ticket_type))
    }

    async fn insert(&self, ticket: NewTicket) -> Result<Ticket, TicketRepositoryError> {
        self.state.lock().await.push_ticket(ticket)
    }

    async fn insert_unique(&self, ticket: NewTicket) -> Result<Ticket, TicketRepositoryError> {
        let mut state = self.state.lock().await;
        if state.has_ticket(ticket.company_id(), ticket.ticket_type()) {
            return Err(TicketRepositoryError::duplicate(
                ticket.company_id(),
                ticket.ticket_type(),
            ));
        }
        state.push_ticket(ticket)
    }

    async fn list_all(&self) -> Result<Vec<TicketDetails>, TicketRepositoryError> {
        let state = self.state.lock().await;
        state
            .tickets
            .iter()
            .map(|ticket| {
                state.details(ticket).ok_or_else(|| {
                    TicketRepositoryError::query(format!(
                        "ticket {} has dangling references",
                        ticket.id
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Store behaviour coverage.

    use futures_util::future::join_all;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn store() -> InMemoryTicketStore {
        InMemoryTicketStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn roster_filters_by_company_and_role(store: InMemoryTicketStore) {
        let acme = store.add_company("Acme").await;
        let other = store.add_company("Other").await;
        let now = Utc::now();
        let accountant = store.add_user(acme, "Ada", UserRole::Accountant, now).await;
        store.add_user(acme, "Dan", UserRole::Director, now).await;
        store.add_user(other, "Eve", UserRole::Accountant, now).await;

        let found = store
            .list_by_company_and_roles(acme, &[UserRole::Accountant])
            .await
            .expect("roster read");

        assert_eq!(found.iter().map(|e| e.id).collect::<Vec<_>>(), vec![accountant]);
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_insert_unique_admits_one(store: InMemoryTicketStore) {
        let acme = store.add_company("Acme").await;
        let secretary = store
            .add_user(acme, "Sam", UserRole::CorporateSecretary, Utc::now())
            .await;
        let ticket = NewTicket::new(TicketType::RegistrationAddressChange, acme, secretary);

        let outcomes = join_all((0..8).map(|_| {
            let shared = store.clone();
            tokio::spawn(async move { shared.insert_unique(ticket).await })
        }))
        .await;

        let succeeded = outcomes
            .into_iter()
            .map(|joined| joined.expect("task completes"))
            .filter(Result::is_ok)
            .count();
        assert_eq!(succeeded, 1);
        assert_eq!(store.ticket_count().await, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_allows_repeated_types(store: InMemoryTicketStore) {
        let acme = store.add_company("Acme").await;
        let accountant = store.add_user(acme, "Ada", UserRole::Accountant, Utc::now()).await;
        let ticket = NewTicket::new(TicketType::ManagementReport, acme, accountant);

        let first = store.insert(ticket).await.expect("first insert");
        let second = store.insert(ticket).await.expect("second insert");

        assert_ne!(first.id, second.id);
        assert!(store.exists(acme, TicketType::ManagementReport).await.expect("exists"));
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_unknown_assignee(store: InMemoryTicketStore) {
        let acme = store.add_company("Acme").await;
        let err = store
            .insert(NewTicket::new(TicketType::ManagementReport, acme, UserId::new(99)))
            .await
            .expect_err("dangling assignee");
        assert!(matches!(err, TicketRepositoryError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn list_all_joins_company_and_assignee(store: InMemoryTicketStore) {
        let acme = store.add_company("Acme").await;
        let accountant = store.add_user(acme, "Ada", UserRole::Accountant, Utc::now()).await;
        store
            .insert(NewTicket::new(TicketType::ManagementReport, acme, accountant))
            .await
            .expect("insert");

        let listed = store.list_all().await.expect("list");

        let details = listed.first().expect("one ticket");
        assert_eq!(details.company.name, "Acme");
        assert_eq!(details.assignee.id, accountant);
    }
}
