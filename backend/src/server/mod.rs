//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use ticketing::Trace;
#[cfg(debug_assertions)]
use ticketing::doc::ApiDoc;
use ticketing::inbound::http::health::{HealthState, live, ready};
use ticketing::inbound::http::json_config;
use ticketing::inbound::http::state::HttpState;
use ticketing::inbound::http::tickets::{create_ticket, list_tickets};

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(create_ticket)
        .service(list_tickets);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live)
        .configure(configure_docs)
}

#[cfg(debug_assertions)]
fn configure_docs(cfg: &mut web::ServiceConfig) {
    cfg.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
}

#[cfg(not(debug_assertions))]
const fn configure_docs(_cfg: &mut web::ServiceConfig) {}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Server wiring over the in-memory store.

    use std::net::SocketAddr;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use super::*;

    #[fixture]
    fn health_state() -> web::Data<HealthState> {
        web::Data::new(HealthState::new())
    }

    #[fixture]
    fn config() -> ServerConfig {
        ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)))
    }

    #[rstest]
    #[actix_rt::test]
    async fn create_server_marks_ready(health_state: web::Data<HealthState>, config: ServerConfig) {
        assert!(!health_state.is_ready(), "state should start unready");

        let _server = create_server(health_state.clone(), config).expect("server should build");

        assert!(health_state.is_ready(), "server creation should mark readiness");
    }

    #[rstest]
    #[actix_rt::test]
    async fn in_memory_app_serves_ticket_routes(
        health_state: web::Data<HealthState>,
        config: ServerConfig,
    ) {
        let http_state = build_http_state(&config);
        let app = actix_test::init_service(build_app(health_state, http_state)).await;

        let list = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/tickets").to_request(),
        )
        .await;
        assert_eq!(list.status(), StatusCode::OK);
        let listed: Value = actix_test::read_body_json(list).await;
        assert_eq!(listed, json!([]));

        let create = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/tickets")
                .set_json(json!({"type": "managementReport", "companyId": 1}))
                .to_request(),
        )
        .await;
        assert_eq!(create.status(), StatusCode::CONFLICT);
        let rejected: Value = actix_test::read_body_json(create).await;
        assert_eq!(rejected.pointer("/details/code"), Some(&json!("no_eligible_assignee")));
    }
}
