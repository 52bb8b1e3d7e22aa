//! Role-based ticket assignment service.
//!
//! The [`domain`] module holds the ticket decision engine and its ports;
//! [`inbound`] exposes it over HTTP and [`outbound`] implements the roster
//! and ticket stores against PostgreSQL or memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
