//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the roster and ticket ports backed by
//! PostgreSQL through `diesel-async` with `bb8` pooling.
//!
//! - Repositories only translate between Diesel rows and domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Driver errors are mapped onto the ports' `Connection`/`Query` errors.
//!
//! ```no_run
//! use ticketing::outbound::persistence::{DbPool, DieselTicketRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), ticketing::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tickets")).await?;
//! let tickets = DieselTicketRepository::new(pool);
//! # let _ = tickets;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_roster_repository;
mod diesel_ticket_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_roster_repository::DieselRosterRepository;
pub use diesel_ticket_repository::DieselTicketRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
