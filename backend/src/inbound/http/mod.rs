//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod tickets;

use actix_web::web;
use tracing::debug;

use crate::domain::DomainError;

pub use error::ApiResult;

/// JSON extractor configuration rejecting malformed bodies as
/// `invalid_request`.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use ticketing::inbound::http::json_config;
///
/// let _app = App::new().app_data(json_config());
/// ```
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejecting malformed JSON body");
        DomainError::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}
