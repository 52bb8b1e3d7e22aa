//! Rejection kinds raised while opening a ticket, and their mapping onto
//! the transport-agnostic [`DomainError`].

use serde_json::json;
use thiserror::Error as ThisError;

use crate::domain::ports::{RosterRepositoryError, TicketRepositoryError};
use crate::domain::{CompanyId, DomainError, TicketType, UserRole};

fn join_roles(roles: &[UserRole]) -> String {
    roles
        .iter()
        .map(|role| role.as_str())
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Terminal rejection of a ticket request. None of these leave a ticket
/// behind.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum TicketCreationError {
    /// The submitted type is not a known ticket type.
    #[error("invalid ticket type: {0}")]
    InvalidTicketType(String),
    /// The type is known but the dispatcher does not route it.
    #[error("unsupported ticket type: {0}")]
    UnsupportedTicketType(TicketType),
    /// A uniqueness-constrained type already has a ticket for the company.
    #[error("ticket {ticket_type} already exists for company {company_id}")]
    DuplicateTicket {
        /// Company holding the existing ticket.
        company_id: CompanyId,
        /// Conflicting type.
        ticket_type: TicketType,
    },
    /// No roster entry holds any of the eligible roles.
    #[error("cannot find user with role {}", join_roles(.0))]
    NoEligibleAssignee(Vec<UserRole>),
    /// More than one roster entry holds a role that must be unique.
    #[error("multiple users with role {0}, cannot create a ticket")]
    MultipleCandidates(UserRole),
}

impl TicketCreationError {
    /// Stable snake_case identifier carried in `details.code`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidTicketType(_) => "invalid_ticket_type",
            Self::UnsupportedTicketType(_) => "unsupported_ticket_type",
            Self::DuplicateTicket { .. } => "duplicate_ticket",
            Self::NoEligibleAssignee(_) => "no_eligible_assignee",
            Self::MultipleCandidates(_) => "multiple_candidates",
        }
    }
}

impl From<TicketCreationError> for DomainError {
    fn from(value: TicketCreationError) -> Self {
        let code = value.kind();
        let message = value.to_string();
        match value {
            TicketCreationError::InvalidTicketType(raw) => Self::invalid_request(message)
                .with_details(json!({ "code": code, "ticketType": raw })),
            TicketCreationError::UnsupportedTicketType(ticket_type) => {
                Self::invalid_request(message)
                    .with_details(json!({ "code": code, "ticketType": ticket_type }))
            }
            TicketCreationError::DuplicateTicket {
                company_id,
                ticket_type,
            } => Self::conflict(message).with_details(json!({
                "code": code,
                "companyId": company_id,
                "ticketType": ticket_type,
            })),
            TicketCreationError::NoEligibleAssignee(roles) => {
                Self::conflict(message).with_details(json!({ "code": code, "roles": roles }))
            }
            TicketCreationError::MultipleCandidates(role) => {
                Self::conflict(message).with_details(json!({ "code": code, "role": role }))
            }
        }
    }
}

/// Failure of the dispatch pipeline: a rejection or a collaborator fault.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum DispatchError {
    /// The request was rejected by a policy rule.
    #[error(transparent)]
    Rejected(#[from] TicketCreationError),
    /// The roster could not be read.
    #[error(transparent)]
    Roster(#[from] RosterRepositoryError),
    /// The ticket store failed.
    #[error(transparent)]
    Store(#[from] TicketRepositoryError),
}

impl DispatchError {
    /// The rejection, when the failure is a policy rule rather than a fault.
    #[must_use]
    pub const fn rejection(&self) -> Option<&TicketCreationError> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            Self::Roster(_) | Self::Store(_) => None,
        }
    }
}

pub(crate) fn map_roster_error(error: RosterRepositoryError) -> DomainError {
    match error {
        RosterRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("roster repository unavailable: {message}"))
        }
        RosterRepositoryError::Query { message } => {
            DomainError::internal(format!("roster repository error: {message}"))
        }
    }
}

pub(crate) fn map_ticket_error(error: TicketRepositoryError) -> DomainError {
    match error {
        TicketRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("ticket repository unavailable: {message}"))
        }
        TicketRepositoryError::Query { message } => {
            DomainError::internal(format!("ticket repository error: {message}"))
        }
        TicketRepositoryError::Duplicate {
            company_id,
            ticket_type,
        } => TicketCreationError::DuplicateTicket {
            company_id,
            ticket_type,
        }
        .into(),
    }
}

impl From<DispatchError> for DomainError {
    fn from(value: DispatchError) -> Self {
        match value {
            DispatchError::Rejected(rejection) => rejection.into(),
            DispatchError::Roster(error) => map_roster_error(error),
            DispatchError::Store(error) => map_ticket_error(error),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ErrorCode;

    fn details_code(error: &DomainError) -> Option<&str> {
        error
            .details()
            .and_then(|details| details.get("code"))
            .and_then(Value::as_str)
    }

    #[rstest]
    #[case(
        TicketCreationError::InvalidTicketType("payroll".to_owned()),
        ErrorCode::InvalidRequest,
        "invalid_ticket_type"
    )]
    #[case(
        TicketCreationError::UnsupportedTicketType(TicketType::StrikeOff),
        ErrorCode::InvalidRequest,
        "unsupported_ticket_type"
    )]
    #[case(
        TicketCreationError::DuplicateTicket {
            company_id: CompanyId::new(1),
            ticket_type: TicketType::RegistrationAddressChange,
        },
        ErrorCode::Conflict,
        "duplicate_ticket"
    )]
    #[case(
        TicketCreationError::NoEligibleAssignee(vec![UserRole::Accountant]),
        ErrorCode::Conflict,
        "no_eligible_assignee"
    )]
    #[case(
        TicketCreationError::MultipleCandidates(UserRole::Director),
        ErrorCode::Conflict,
        "multiple_candidates"
    )]
    fn rejections_map_to_codes_and_details(
        #[case] rejection: TicketCreationError,
        #[case] code: ErrorCode,
        #[case] kind: &str,
    ) {
        let error = DomainError::from(rejection);
        assert_eq!(error.code(), code);
        assert_eq!(details_code(&error), Some(kind));
    }

    #[rstest]
    fn no_eligible_assignee_names_every_role() {
        let rejection = TicketCreationError::NoEligibleAssignee(vec![
            UserRole::CorporateSecretary,
            UserRole::Director,
        ]);
        assert_eq!(
            rejection.to_string(),
            "cannot find user with role corporateSecretary or director"
        );
        let error = DomainError::from(rejection);
        assert_eq!(
            error.details().and_then(|d| d.get("roles")),
            Some(&serde_json::json!(["corporateSecretary", "director"]))
        );
    }

    #[rstest]
    #[case(
        DispatchError::Roster(RosterRepositoryError::connection("refused")),
        ErrorCode::ServiceUnavailable
    )]
    #[case(
        DispatchError::Roster(RosterRepositoryError::query("bad row")),
        ErrorCode::InternalError
    )]
    #[case(
        DispatchError::Store(TicketRepositoryError::connection("refused")),
        ErrorCode::ServiceUnavailable
    )]
    #[case(
        DispatchError::Store(TicketRepositoryError::query("constraint")),
        ErrorCode::InternalError
    )]
    #[case(
        DispatchError::Store(TicketRepositoryError::duplicate(
            CompanyId::new(2),
            TicketType::RegistrationAddressChange,
        )),
        ErrorCode::Conflict
    )]
    fn collaborator_faults_map_by_kind(#[case] error: DispatchError, #[case] code: ErrorCode) {
        assert!(error.rejection().is_none());
        assert_eq!(DomainError::from(error).code(), code);
    }
}
