//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`RosterRepository`, `TicketRepository`) are implemented by
//! outbound adapters. Driving ports (`TicketCommand`, `TicketQuery`) are
//! implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod roster_repository;
mod ticket_command;
mod ticket_query;
mod ticket_repository;

#[cfg(test)]
pub use roster_repository::MockRosterRepository;
pub use roster_repository::{FixtureRosterRepository, RosterRepository, RosterRepositoryError};
#[cfg(test)]
pub use ticket_command::MockTicketCommand;
pub use ticket_command::{
    CreateTicketRequest, CreateTicketResponse, FixtureTicketCommand, TicketCommand,
};
#[cfg(test)]
pub use ticket_query::MockTicketQuery;
pub use ticket_query::{FixtureTicketQuery, ListTicketsResponse, TicketQuery};
#[cfg(test)]
pub use ticket_repository::MockTicketRepository;
pub use ticket_repository::{FixtureTicketRepository, TicketRepository, TicketRepositoryError};
