//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the ticket and health endpoints plus the error schema
//! wrappers from [`crate::inbound::http::schemas`]. The document backs
//! Swagger UI in debug builds and is printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::tickets::{
    AssigneeResponseBody, CompanyResponseBody, CreateTicketRequestBody,
    TicketDetailsResponseBody, TicketResponseBody,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ticketing API",
        description = "Open company tickets and assign them from the company roster."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tickets::create_ticket,
        crate::inbound::http::tickets::list_tickets,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateTicketRequestBody,
        TicketResponseBody,
        TicketDetailsResponseBody,
        CompanyResponseBody,
        AssigneeResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "tickets", description = "Ticket creation and listing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    const ERROR_SCHEMA_NAME: &str = "crate.domain.DomainError";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn ticket_request_uses_type_key() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let request = schemas
            .get("CreateTicketRequestBody")
            .expect("request schema");

        assert_object_schema_has_field(request, "type");
        assert_object_schema_has_field(request, "companyId");
    }

    #[test]
    fn ticket_paths_are_documented() {
        let doc = ApiDoc::openapi();
        let tickets = doc
            .paths
            .paths
            .get("/api/v1/tickets")
            .expect("tickets path");
        assert!(tickets.post.is_some(), "POST /api/v1/tickets documented");
        assert!(tickets.get.is_some(), "GET /api/v1/tickets documented");
    }
}
