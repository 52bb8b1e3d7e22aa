//! Ticket HTTP handlers.
//!
//! ```text
//! POST /api/v1/tickets
//! GET  /api/v1/tickets
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateTicketRequest;
use crate::domain::{CompanyId, Ticket, TicketDetails};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for opening a ticket.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequestBody {
    /// Ticket type, one of `managementReport`, `registrationAddressChange`
    /// or `strikeOff`.
    #[serde(rename = "type")]
    #[schema(example = "managementReport")]
    pub ticket_type: String,
    /// Company the ticket is opened for.
    #[schema(example = 1)]
    pub company_id: i64,
}

/// Ticket projection returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponseBody {
    /// Ticket identifier.
    pub id: i64,
    /// Ticket type.
    #[serde(rename = "type")]
    #[schema(example = "registrationAddressChange")]
    pub ticket_type: String,
    /// Owning company.
    pub company_id: i64,
    /// Roster entry responsible for the ticket.
    pub assignee_id: i64,
    /// Lifecycle state; always `open` on creation.
    #[schema(example = "open")]
    pub status: String,
    /// Department derived from the type.
    #[schema(example = "corporate")]
    pub category: String,
}

/// Company summary embedded in ticket listings.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponseBody {
    /// Company identifier.
    pub id: i64,
    /// Registered name.
    pub name: String,
}

/// Assignee embedded in ticket listings.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeResponseBody {
    /// Roster entry identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Role within the company.
    #[schema(example = "corporateSecretary")]
    pub role: String,
    /// Company the entry belongs to.
    pub company_id: i64,
    /// RFC 3339 creation timestamp.
    #[schema(format = "date-time")]
    pub created_at: String,
}

/// Ticket listing entry with its company and assignee.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetailsResponseBody {
    /// Ticket fields, flattened into the entry.
    #[serde(flatten)]
    pub ticket: TicketResponseBody,
    /// Owning company.
    pub company: CompanyResponseBody,
    /// Assigned roster entry.
    pub assignee: AssigneeResponseBody,
}

impl From<Ticket> for TicketResponseBody {
    fn from(value: Ticket) -> Self {
        Self {
            id: value.id.get(),
            ticket_type: value.ticket_type.to_string(),
            company_id: value.company_id.get(),
            assignee_id: value.assignee_id.get(),
            status: value.status.to_string(),
            category: value.category.to_string(),
        }
    }
}

impl From<TicketDetails> for TicketDetailsResponseBody {
    fn from(value: TicketDetails) -> Self {
        let TicketDetails {
            ticket,
            company,
            assignee,
        } = value;
        Self {
            ticket: TicketResponseBody::from(ticket),
            company: CompanyResponseBody {
                id: company.id.get(),
                name: company.name,
            },
            assignee: AssigneeResponseBody {
                id: assignee.id.get(),
                name: assignee.name,
                role: assignee.role.to_string(),
                company_id: assignee.company_id.get(),
                created_at: assignee.created_at.to_rfc3339(),
            },
        }
    }
}

/// Open a ticket for a company and assign it from the company roster.
///
/// # Examples
/// ```no_run
/// use actix_web::web;
/// use ticketing::inbound::http::tickets::{
///     CreateTicketRequestBody, TicketResponseBody, create_ticket,
/// };
/// use ticketing::inbound::http::{ApiResult, state::HttpState};
///
/// async fn call_handler(state: web::Data<HttpState>) -> ApiResult<web::Json<TicketResponseBody>> {
///     let payload = web::Json(CreateTicketRequestBody {
///         ticket_type: "managementReport".to_owned(),
///         company_id: 1,
///     });
///     create_ticket(state, payload).await
/// }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    request_body = CreateTicketRequestBody,
    responses(
        (status = 200, description = "Ticket opened", body = TicketResponseBody),
        (status = 400, description = "Unknown or unsupported ticket type", body = ErrorSchema),
        (status = 409, description = "Duplicate ticket or no single assignee", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "createTicket"
)]
#[post("/tickets")]
pub async fn create_ticket(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTicketRequestBody>,
) -> ApiResult<web::Json<TicketResponseBody>> {
    let CreateTicketRequestBody {
        ticket_type,
        company_id,
    } = payload.into_inner();

    let response = state
        .tickets
        .create_ticket(CreateTicketRequest::new(
            ticket_type,
            CompanyId::new(company_id),
        ))
        .await?;

    Ok(web::Json(TicketResponseBody::from(response.ticket)))
}

/// List every ticket with its company and assignee, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    responses(
        (status = 200, description = "All tickets", body = [TicketDetailsResponseBody]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "listTickets"
)]
#[get("/tickets")]
pub async fn list_tickets(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<TicketDetailsResponseBody>>> {
    let response = state.tickets_query.list_tickets().await?;
    Ok(web::Json(
        response
            .tickets
            .into_iter()
            .map(TicketDetailsResponseBody::from)
            .collect(),
    ))
}

#[cfg(test)]
#[path = "tickets_tests.rs"]
mod tests;
