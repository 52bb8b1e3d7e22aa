//! Tests for the ticket dispatcher.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::ports::{
    FixtureRosterRepository, MockRosterRepository, MockTicketRepository, RosterRepositoryError,
    TicketRepositoryError,
};
use crate::domain::{
    ErrorCode, RosterEntry, TicketCategory, TicketId, TicketStatus, UserId, UserRole,
};

const COMPANY: CompanyId = CompanyId::new(1);

fn entry(id: i64, role: UserRole, seconds: i64) -> RosterEntry {
    RosterEntry {
        id: UserId::new(id),
        name: format!("user-{id}"),
        role,
        company_id: COMPANY,
        created_at: Utc.timestamp_opt(seconds, 0).single().expect("timestamp"),
    }
}

fn details_code(error: &DomainError) -> Option<String> {
    error
        .details()
        .and_then(|details| details.get("code"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn accepting_tickets() -> MockTicketRepository {
    let mut repo = MockTicketRepository::new();
    repo.expect_exists().returning(|_, _| Ok(false));
    repo.expect_insert()
        .returning(|ticket| Ok(ticket.into_ticket(TicketId::new(100))));
    repo.expect_insert_unique()
        .returning(|ticket| Ok(ticket.into_ticket(TicketId::new(200))));
    repo
}

fn service_with(
    roster: Vec<RosterEntry>,
    tickets: MockTicketRepository,
    policies: PolicyTable,
) -> TicketService<FixtureRosterRepository, MockTicketRepository> {
    TicketService::new(
        Arc::new(FixtureRosterRepository::new(roster)),
        Arc::new(tickets),
        policies,
    )
}

#[rstest]
#[tokio::test]
async fn management_report_assigns_latest_accountant() {
    let service = service_with(
        vec![
            entry(1, UserRole::Accountant, 100),
            entry(2, UserRole::Accountant, 200),
        ],
        accepting_tickets(),
        PolicyTable::standard(),
    );

    let response = service
        .create_ticket(CreateTicketRequest::new("managementReport", COMPANY))
        .await
        .expect("ticket created");

    assert_eq!(response.ticket.assignee_id, UserId::new(2));
    assert_eq!(response.ticket.category, TicketCategory::Accounting);
    assert_eq!(response.ticket.status, TicketStatus::Open);
    assert_eq!(response.ticket.id, TicketId::new(100));
}

#[rstest]
#[tokio::test]
async fn unknown_type_is_rejected_before_any_read() {
    let mut tickets = MockTicketRepository::new();
    tickets.expect_exists().times(0);
    tickets.expect_insert().times(0);
    tickets.expect_insert_unique().times(0);
    let mut roster = MockRosterRepository::new();
    roster.expect_list_by_company_and_roles().times(0);

    let service = TicketService::new(Arc::new(roster), Arc::new(tickets), PolicyTable::standard());
    let error = service
        .create_ticket(CreateTicketRequest::new("payroll", COMPANY))
        .await
        .expect_err("invalid type");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(details_code(&error).as_deref(), Some("invalid_ticket_type"));
}

#[rstest]
#[tokio::test]
async fn unwired_strike_off_is_unsupported() {
    let mut tickets = MockTicketRepository::new();
    tickets.expect_insert().times(0);
    let service = service_with(
        vec![entry(1, UserRole::Director, 100)],
        tickets,
        PolicyTable::standard(),
    );

    let error = service
        .dispatch("strikeOff", COMPANY)
        .await
        .expect_err("unsupported");

    assert_eq!(
        error,
        DispatchError::Rejected(TicketCreationError::UnsupportedTicketType(
            TicketType::StrikeOff
        ))
    );
}

#[rstest]
#[case(vec![entry(1, UserRole::Director, 100)], Ok(UserId::new(1)))]
#[case(vec![], Err(TicketCreationError::NoEligibleAssignee(vec![UserRole::Director])))]
#[case(
    vec![entry(1, UserRole::Director, 100), entry(2, UserRole::Director, 200)],
    Err(TicketCreationError::MultipleCandidates(UserRole::Director))
)]
#[tokio::test]
async fn wired_strike_off_requires_single_director(
    #[case] roster: Vec<RosterEntry>,
    #[case] expected: Result<UserId, TicketCreationError>,
) {
    let service = service_with(
        roster,
        accepting_tickets(),
        PolicyTable::standard().with_strike_off(),
    );

    let outcome = service.dispatch("strikeOff", COMPANY).await;

    match expected {
        Ok(assignee) => {
            let ticket = outcome.expect("ticket created");
            assert_eq!(ticket.assignee_id, assignee);
            assert_eq!(ticket.category, TicketCategory::Management);
        }
        Err(rejection) => {
            assert_eq!(outcome, Err(DispatchError::Rejected(rejection)));
        }
    }
}

#[rstest]
#[tokio::test]
async fn existing_registration_ticket_blocks_before_roster_read() {
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_exists()
        .with(eq(COMPANY), eq(TicketType::RegistrationAddressChange))
        .times(1)
        .returning(|_, _| Ok(true));
    tickets.expect_insert_unique().times(0);
    let mut roster = MockRosterRepository::new();
    roster.expect_list_by_company_and_roles().times(0);

    let service = TicketService::new(Arc::new(roster), Arc::new(tickets), PolicyTable::standard());
    let error = service
        .create_ticket(CreateTicketRequest::new("registrationAddressChange", COMPANY))
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(details_code(&error).as_deref(), Some("duplicate_ticket"));
}

#[rstest]
#[tokio::test]
async fn registration_uses_insert_unique_and_queries_both_roles() {
    let mut roster = MockRosterRepository::new();
    roster
        .expect_list_by_company_and_roles()
        .withf(|company_id, roles| {
            *company_id == COMPANY
                && roles.to_vec() == [UserRole::CorporateSecretary, UserRole::Director]
        })
        .times(1)
        .returning(|_, _| Ok(vec![entry(5, UserRole::Director, 100)]));
    let mut tickets = MockTicketRepository::new();
    tickets.expect_exists().returning(|_, _| Ok(false));
    tickets.expect_insert().times(0);
    tickets
        .expect_insert_unique()
        .times(1)
        .returning(|ticket| Ok(ticket.into_ticket(TicketId::new(7))));

    let service = TicketService::new(Arc::new(roster), Arc::new(tickets), PolicyTable::standard());
    let ticket = service
        .dispatch("registrationAddressChange", COMPANY)
        .await
        .expect("ticket created");

    assert_eq!(ticket.assignee_id, UserId::new(5));
    assert_eq!(ticket.category, TicketCategory::Corporate);
}

#[rstest]
#[tokio::test]
async fn failures_repeat_with_the_same_kind() {
    let service = service_with(Vec::new(), accepting_tickets(), PolicyTable::standard());

    let first = service.dispatch("managementReport", COMPANY).await;
    let second = service.dispatch("managementReport", COMPANY).await;

    assert_eq!(first, second);
    assert!(matches!(
        first,
        Err(DispatchError::Rejected(TicketCreationError::NoEligibleAssignee(_)))
    ));
}

#[rstest]
#[case(RosterRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(RosterRepositoryError::query("bad role"), ErrorCode::InternalError)]
#[tokio::test]
async fn roster_faults_map_to_error_codes(
    #[case] fault: RosterRepositoryError,
    #[case] code: ErrorCode,
) {
    let mut roster = MockRosterRepository::new();
    roster
        .expect_list_by_company_and_roles()
        .return_once(move |_, _| Err(fault));
    let service = TicketService::new(
        Arc::new(roster),
        Arc::new(accepting_tickets()),
        PolicyTable::standard(),
    );

    let error = service
        .create_ticket(CreateTicketRequest::new("managementReport", COMPANY))
        .await
        .expect_err("roster fault");

    assert_eq!(error.code(), code);
}

#[rstest]
#[tokio::test]
async fn list_tickets_maps_store_connection_error() {
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_list_all()
        .return_once(|| Err(TicketRepositoryError::connection("down")));
    let service = service_with(Vec::new(), tickets, PolicyTable::standard());

    let error = service.list_tickets().await.expect_err("store fault");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn list_tickets_returns_store_rows() {
    let mut tickets = MockTicketRepository::new();
    tickets.expect_list_all().return_once(|| Ok(Vec::new()));
    let service = service_with(Vec::new(), tickets, PolicyTable::standard());

    let response = service.list_tickets().await.expect("list tickets");

    assert!(response.tickets.is_empty());
}
