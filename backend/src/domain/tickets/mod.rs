//! Ticket assignment decision engine.
//!
//! Given a company and a ticket type, the engine resolves exactly one
//! eligible assignee from the company roster, enforces per-type uniqueness
//! and persists an open ticket, or rejects the request with a
//! [`TicketCreationError`].

mod conflict;
mod error;
mod factory;
mod policy;
mod resolver;
mod roster_reader;
mod service;

pub use conflict::ConflictDetector;
pub use error::{DispatchError, TicketCreationError};
pub use factory::TicketFactory;
pub use policy::{PolicyLookup, PolicyTable, ResolutionStrategy, TicketPolicy};
pub use resolver::resolve_assignee;
pub use roster_reader::RosterReader;
pub use service::TicketService;
