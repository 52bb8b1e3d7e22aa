//! Domain primitives, the ticket decision engine and its ports.
//!
//! Purpose: define strongly typed entities shared by the HTTP and
//! persistence adapters and the engine that assigns tickets. Types are
//! immutable once built; wire spelling is camelCase throughout.
//!
//! Public surface:
//! - DomainError / ErrorCode: transport-agnostic failure payload.
//! - Company, RosterEntry, Ticket and their identifier newtypes.
//! - tickets: policy table, resolver and the `TicketService` dispatcher.
//! - ports: repository and driving-port traits.

pub mod company;
pub mod error;
pub mod ports;
pub mod roster;
pub mod ticket;
pub mod tickets;
pub mod trace_id;

pub use self::company::{Company, CompanyId};
pub use self::error::{DomainError, ErrorCode};
pub use self::roster::{RosterEntry, UnknownUserRole, UserId, UserRole};
pub use self::ticket::{
    NewTicket, Ticket, TicketCategory, TicketDetails, TicketId, TicketStatus, TicketType,
    UnknownVariant,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
