//! Builders wiring the ticket service onto its repositories.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use ticketing::domain::tickets::TicketService;
use ticketing::inbound::http::state::HttpState;
use ticketing::outbound::memory::InMemoryTicketStore;
use ticketing::outbound::persistence::{DieselRosterRepository, DieselTicketRepository};

use super::ServerConfig;

/// Build handler state backed by PostgreSQL when a pool is configured and by
/// an empty in-memory store otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let policies = config.policies.clone();
    let state = match &config.db_pool {
        Some(pool) => HttpState::from_service(Arc::new(TicketService::new(
            Arc::new(DieselRosterRepository::new(pool.clone())),
            Arc::new(DieselTicketRepository::new(pool.clone())),
            policies,
        ))),
        None => {
            warn!("no database configured; tickets are held in memory and lost on restart");
            let store = Arc::new(InMemoryTicketStore::new());
            HttpState::from_service(Arc::new(TicketService::new(
                store.clone(),
                store,
                policies,
            )))
        }
    };
    web::Data::new(state)
}
