//! End-to-end ticket scenarios over the HTTP stack and the in-memory store.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Duration, TimeZone, Utc};
use futures_util::future::join_all;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use ticketing::Trace;
use ticketing::domain::tickets::{PolicyTable, TicketService};
use ticketing::domain::{CompanyId, UserRole};
use ticketing::inbound::http::json_config;
use ticketing::inbound::http::state::HttpState;
use ticketing::inbound::http::tickets::{create_ticket, list_tickets};
use ticketing::outbound::memory::InMemoryTicketStore;

#[fixture]
fn store() -> InMemoryTicketStore {
    InMemoryTicketStore::new()
}

#[fixture]
fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn app(
    store: &InMemoryTicketStore,
    policies: PolicyTable,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let shared = Arc::new(store.clone());
    let service = Arc::new(TicketService::new(shared.clone(), shared, policies));
    App::new()
        .app_data(web::Data::new(HttpState::from_service(service)))
        .app_data(json_config())
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .service(create_ticket)
                .service(list_tickets),
        )
}

fn open(ticket_type: &str, company_id: CompanyId) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/v1/tickets")
        .set_json(json!({"type": ticket_type, "companyId": company_id.get()}))
        .to_request()
}

async fn read(response: ServiceResponse) -> (StatusCode, Value) {
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn latest_accountant_is_assigned(store: InMemoryTicketStore, epoch: DateTime<Utc>) {
    let company = store.add_company("Ledger Ltd").await;
    store
        .add_user(company, "Older", UserRole::Accountant, epoch)
        .await;
    let newer = store
        .add_user(company, "Newer", UserRole::Accountant, epoch + Duration::days(30))
        .await;
    let service = actix_test::init_service(app(&store, PolicyTable::standard())).await;

    let (status, body) =
        read(actix_test::call_service(&service, open("managementReport", company)).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.pointer("/assigneeId"), Some(&json!(newer.get())));
    assert_eq!(body.pointer("/category"), Some(&json!("accounting")));
    assert_eq!(body.pointer("/status"), Some(&json!("open")));
}

#[rstest]
#[actix_web::test]
async fn missing_accountant_leaves_no_ticket(store: InMemoryTicketStore, epoch: DateTime<Utc>) {
    let company = store.add_company("Empty Ltd").await;
    store
        .add_user(company, "Dana", UserRole::Director, epoch)
        .await;
    let service = actix_test::init_service(app(&store, PolicyTable::standard())).await;

    for _ in 0..2 {
        let (status, body) =
            read(actix_test::call_service(&service, open("managementReport", company)).await)
                .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.pointer("/details/code"), Some(&json!("no_eligible_assignee")));
    }
    assert_eq!(store.ticket_count().await, 0);
}

#[rstest]
#[actix_web::test]
async fn second_address_change_is_a_duplicate(store: InMemoryTicketStore, epoch: DateTime<Utc>) {
    let company = store.add_company("Moving Ltd").await;
    let secretary = store
        .add_user(company, "Sam", UserRole::CorporateSecretary, epoch)
        .await;
    let service = actix_test::init_service(app(&store, PolicyTable::standard())).await;

    let (first_status, first_body) = read(
        actix_test::call_service(&service, open("registrationAddressChange", company)).await,
    )
    .await;
    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(first_body.pointer("/assigneeId"), Some(&json!(secretary.get())));
    assert_eq!(first_body.pointer("/category"), Some(&json!("corporate")));

    store
        .add_user(company, "Sky", UserRole::CorporateSecretary, epoch)
        .await;
    let (status, body) = read(
        actix_test::call_service(&service, open("registrationAddressChange", company)).await,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.pointer("/details/code"), Some(&json!("duplicate_ticket")));
    assert_eq!(store.ticket_count().await, 1);
}

#[rstest]
#[actix_web::test]
async fn concurrent_address_changes_open_one_ticket(
    store: InMemoryTicketStore,
    epoch: DateTime<Utc>,
) {
    let company = store.add_company("Racing Ltd").await;
    store
        .add_user(company, "Dee", UserRole::Director, epoch)
        .await;
    let service = actix_test::init_service(app(&store, PolicyTable::standard())).await;

    let responses = join_all((0..4).map(|_| {
        actix_test::call_service(&service, open("registrationAddressChange", company))
    }))
    .await;

    let created = responses
        .iter()
        .filter(|response| response.status() == StatusCode::OK)
        .count();
    assert_eq!(created, 1);
    assert!(
        responses
            .iter()
            .all(|response| response.status().is_success()
                || response.status() == StatusCode::CONFLICT)
    );
    assert_eq!(store.ticket_count().await, 1);
}

#[rstest]
#[case(
    &[UserRole::CorporateSecretary, UserRole::CorporateSecretary, UserRole::Director],
    "corporateSecretary"
)]
#[case(&[UserRole::CorporateSecretary, UserRole::Director, UserRole::Director], "director")]
#[actix_web::test]
async fn ambiguous_roster_is_rejected(
    store: InMemoryTicketStore,
    epoch: DateTime<Utc>,
    #[case] roles: &[UserRole],
    #[case] ambiguous: &str,
) {
    let company = store.add_company("Crowded Ltd").await;
    for (offset, role) in (0_i64..).zip(roles) {
        store
            .add_user(company, "Member", *role, epoch + Duration::hours(offset))
            .await;
    }
    let service = actix_test::init_service(app(&store, PolicyTable::standard())).await;

    let (status, body) = read(
        actix_test::call_service(&service, open("registrationAddressChange", company)).await,
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.pointer("/details/code"), Some(&json!("multiple_candidates")));
    assert_eq!(body.pointer("/details/role"), Some(&json!(ambiguous)));
    assert_eq!(store.ticket_count().await, 0);
}

#[rstest]
#[actix_web::test]
async fn director_covers_missing_secretary(store: InMemoryTicketStore, epoch: DateTime<Utc>) {
    let company = store.add_company("Small Ltd").await;
    let director = store
        .add_user(company, "Dee", UserRole::Director, epoch)
        .await;
    let service = actix_test::init_service(app(&store, PolicyTable::standard())).await;

    let (status, body) = read(
        actix_test::call_service(&service, open("registrationAddressChange", company)).await,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.pointer("/assigneeId"), Some(&json!(director.get())));
}

#[rstest]
#[actix_web::test]
async fn strike_off_follows_wiring(store: InMemoryTicketStore, epoch: DateTime<Utc>) {
    let company = store.add_company("Closing Ltd").await;
    let director = store
        .add_user(company, "Dee", UserRole::Director, epoch)
        .await;

    let unwired = actix_test::init_service(app(&store, PolicyTable::standard())).await;
    let (unwired_status, unwired_body) =
        read(actix_test::call_service(&unwired, open("strikeOff", company)).await).await;
    assert_eq!(unwired_status, StatusCode::BAD_REQUEST);
    assert_eq!(unwired_body.pointer("/details/code"), Some(&json!("unsupported_ticket_type")));

    let wired =
        actix_test::init_service(app(&store, PolicyTable::standard().with_strike_off())).await;
    let (status, body) =
        read(actix_test::call_service(&wired, open("strikeOff", company)).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.pointer("/assigneeId"), Some(&json!(director.get())));
    assert_eq!(body.pointer("/category"), Some(&json!("management")));
}

#[rstest]
#[actix_web::test]
async fn unknown_type_is_invalid(store: InMemoryTicketStore) {
    let company = store.add_company("Any Ltd").await;
    let service = actix_test::init_service(app(&store, PolicyTable::standard())).await;

    let (status, body) =
        read(actix_test::call_service(&service, open("payroll", company)).await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.pointer("/code"), Some(&json!("invalid_request")));
    assert_eq!(body.pointer("/details/code"), Some(&json!("invalid_ticket_type")));
}

#[rstest]
#[actix_web::test]
async fn listing_joins_company_and_assignee(store: InMemoryTicketStore, epoch: DateTime<Utc>) {
    let company = store.add_company("Listed Ltd").await;
    store
        .add_user(company, "Ada", UserRole::Accountant, epoch)
        .await;
    let service = actix_test::init_service(app(&store, PolicyTable::standard())).await;
    let (created, _) =
        read(actix_test::call_service(&service, open("managementReport", company)).await).await;
    assert_eq!(created, StatusCode::OK);

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/tickets")
        .to_request();
    let (status, body) = read(actix_test::call_service(&service, request).await).await;

    assert_eq!(status, StatusCode::OK);
    let tickets = body.as_array().expect("ticket array");
    assert_eq!(tickets.len(), 1);
    let ticket = tickets.first().expect("one ticket");
    assert_eq!(ticket.pointer("/company/name"), Some(&json!("Listed Ltd")));
    assert_eq!(ticket.pointer("/assignee/name"), Some(&json!("Ada")));
    assert_eq!(ticket.pointer("/assignee/role"), Some(&json!("accountant")));
}
