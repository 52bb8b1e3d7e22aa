//! Ticket dispatcher implementing the ticket driving ports.
//!
//! A request flows through type validation, policy lookup, the duplicate
//! pre-check (uniqueness-constrained types only), the roster read, assignee
//! resolution and finally the factory. Any stage may end the pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CreateTicketRequest, CreateTicketResponse, ListTicketsResponse, RosterRepository,
    TicketCommand, TicketQuery, TicketRepository,
};
use crate::domain::{CompanyId, DomainError, Ticket, TicketType};

use super::error::map_ticket_error;
use super::{
    ConflictDetector, DispatchError, PolicyLookup, PolicyTable, RosterReader, TicketCreationError,
    TicketFactory, resolve_assignee,
};

/// Ticket service wiring the decision engine to its repositories.
pub struct TicketService<R, T> {
    policies: PolicyTable,
    roster: RosterReader<R>,
    conflicts: ConflictDetector<T>,
    factory: TicketFactory<T>,
    ticket_repo: Arc<T>,
}

impl<R, T> Clone for TicketService<R, T> {
    fn clone(&self) -> Self {
        Self {
            policies: self.policies.clone(),
            roster: self.roster.clone(),
            conflicts: self.conflicts.clone(),
            factory: self.factory.clone(),
            ticket_repo: Arc::clone(&self.ticket_repo),
        }
    }
}

impl<R, T> TicketService<R, T>
where
    R: RosterRepository,
    T: TicketRepository,
{
    /// Create a service routing the types wired in `policies`.
    #[must_use]
    pub fn new(roster_repo: Arc<R>, ticket_repo: Arc<T>, policies: PolicyTable) -> Self {
        Self {
            policies,
            roster: RosterReader::new(roster_repo),
            conflicts: ConflictDetector::new(Arc::clone(&ticket_repo)),
            factory: TicketFactory::new(Arc::clone(&ticket_repo)),
            ticket_repo,
        }
    }

    /// Open a ticket of `raw_type` for `company_id`.
    ///
    /// # Errors
    /// [`DispatchError::Rejected`] for policy rejections; roster and store
    /// faults as the matching variants.
    pub async fn dispatch(
        &self,
        raw_type: &str,
        company_id: CompanyId,
    ) -> Result<Ticket, DispatchError> {
        let ticket_type = raw_type
            .parse::<TicketType>()
            .map_err(|_| TicketCreationError::InvalidTicketType(raw_type.to_owned()))?;

        let policy = match self.policies.lookup(ticket_type) {
            PolicyLookup::Wired(policy) => policy,
            PolicyLookup::Unwired(unwired) => {
                return Err(TicketCreationError::UnsupportedTicketType(unwired).into());
            }
        };

        if policy.uniqueness_constrained()
            && self.conflicts.has_existing(company_id, ticket_type).await?
        {
            return Err(TicketCreationError::DuplicateTicket {
                company_id,
                ticket_type,
            }
            .into());
        }

        let candidates = self
            .roster
            .find_candidates(company_id, policy.eligible_roles())
            .await?;
        debug!(
            %company_id,
            %ticket_type,
            candidates = candidates.len(),
            "roster candidates loaded"
        );

        let assignee_id = resolve_assignee(&policy, company_id, &candidates)?;
        debug!(%company_id, %ticket_type, %assignee_id, "assignee resolved");

        self.factory.create(&policy, company_id, assignee_id).await
    }
}

#[async_trait]
impl<R, T> TicketCommand for TicketService<R, T>
where
    R: RosterRepository,
    T: TicketRepository,
{
    async fn create_ticket(
        &self,
        request: CreateTicketRequest,
    ) -> Result<CreateTicketResponse, DomainError> {
        let company_id = request.company_id;
        let ticket_type = request.ticket_type.as_str();
        match self.dispatch(ticket_type, company_id).await {
            Ok(ticket) => {
                info!(
                    %company_id,
                    ticket_type,
                    ticket_id = %ticket.id,
                    assignee_id = %ticket.assignee_id,
                    "ticket created"
                );
                Ok(CreateTicketResponse { ticket })
            }
            Err(error) => {
                if let Some(rejection) = error.rejection() {
                    warn!(
                        %company_id,
                        ticket_type,
                        kind = rejection.kind(),
                        %rejection,
                        "ticket rejected"
                    );
                } else {
                    warn!(%company_id, ticket_type, %error, "ticket dispatch failed");
                }
                Err(error.into())
            }
        }
    }
}

#[async_trait]
impl<R, T> TicketQuery for TicketService<R, T>
where
    R: RosterRepository,
    T: TicketRepository,
{
    async fn list_tickets(&self) -> Result<ListTicketsResponse, DomainError> {
        let tickets = self
            .ticket_repo
            .list_all()
            .await
            .map_err(map_ticket_error)?;
        Ok(ListTicketsResponse { tickets })
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
