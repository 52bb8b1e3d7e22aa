//! Tickets: company-scoped work items with a single responsible assignee.
//!
//! A ticket's category is a pure function of its type; [`TicketType::category`]
//! is the only place that mapping lives.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Company, CompanyId, RosterEntry, UserId};

/// Stable ticket identifier, serialised as a bare JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(i64);

impl TicketId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when a stored or submitted enumeration value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// Name of the enumeration being parsed.
    pub kind: &'static str,
    /// Rejected input.
    pub value: String,
}

macro_rules! wire_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident as $kind:literal {
            $( $(#[$variant_meta:meta])* $variant:ident => $spelling:literal ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum $name {
            $( $(#[$variant_meta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire and database spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $spelling),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_owned(),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Kind of work a ticket represents.
    pub enum TicketType as "ticket type" {
        /// Periodic management accounts.
        ManagementReport => "managementReport",
        /// Change of the registered office address.
        RegistrationAddressChange => "registrationAddressChange",
        /// Removal of the company from the register.
        StrikeOff => "strikeOff",
    }
}

wire_enum! {
    /// Department responsible for a ticket.
    pub enum TicketCategory as "ticket category" {
        /// Finance and reporting.
        Accounting => "accounting",
        /// Statutory corporate filings.
        Corporate => "corporate",
        /// Board-level decisions.
        Management => "management",
    }
}

wire_enum! {
    /// Ticket lifecycle state. New tickets are always `Open`.
    pub enum TicketStatus as "ticket status" {
        /// Awaiting work.
        Open => "open",
        /// Completed outside this service.
        Resolved => "resolved",
    }
}

impl TicketType {
    /// Category owning tickets of this type.
    ///
    /// # Examples
    /// ```
    /// use ticketing::domain::{TicketCategory, TicketType};
    ///
    /// assert_eq!(TicketType::StrikeOff.category(), TicketCategory::Management);
    /// ```
    #[must_use]
    pub const fn category(self) -> TicketCategory {
        match self {
            Self::ManagementReport => TicketCategory::Accounting,
            Self::RegistrationAddressChange => TicketCategory::Corporate,
            Self::StrikeOff => TicketCategory::Management,
        }
    }
}

/// A ticket ready to be persisted.
///
/// Construction derives the category from the type and fixes the status to
/// [`TicketStatus::Open`], so callers cannot build an inconsistent ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTicket {
    ticket_type: TicketType,
    company_id: CompanyId,
    assignee_id: UserId,
}

impl NewTicket {
    /// Prepare an open ticket of `ticket_type` assigned to `assignee_id`.
    #[must_use]
    pub const fn new(ticket_type: TicketType, company_id: CompanyId, assignee_id: UserId) -> Self {
        Self {
            ticket_type,
            company_id,
            assignee_id,
        }
    }

    /// Ticket type.
    #[must_use]
    pub const fn ticket_type(&self) -> TicketType {
        self.ticket_type
    }

    /// Category derived from the type.
    #[must_use]
    pub const fn category(&self) -> TicketCategory {
        self.ticket_type.category()
    }

    /// Always [`TicketStatus::Open`].
    #[must_use]
    pub const fn status(&self) -> TicketStatus {
        TicketStatus::Open
    }

    /// Owning company.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Resolved assignee.
    #[must_use]
    pub const fn assignee_id(&self) -> UserId {
        self.assignee_id
    }

    /// Attach the identifier assigned by the store.
    #[must_use]
    pub const fn into_ticket(self, id: TicketId) -> Ticket {
        Ticket {
            id,
            ticket_type: self.ticket_type,
            company_id: self.company_id,
            assignee_id: self.assignee_id,
            status: TicketStatus::Open,
            category: self.ticket_type.category(),
        }
    }
}

/// Persisted ticket projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Ticket identifier.
    pub id: TicketId,
    /// Ticket type.
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    /// Owning company.
    pub company_id: CompanyId,
    /// Responsible roster entry.
    pub assignee_id: UserId,
    /// Lifecycle state.
    pub status: TicketStatus,
    /// Responsible department.
    pub category: TicketCategory,
}

/// Ticket joined with its company and assignee for the read path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetails {
    /// Ticket projection.
    #[serde(flatten)]
    pub ticket: Ticket,
    /// Owning company.
    pub company: Company,
    /// Assigned roster entry.
    pub assignee: RosterEntry,
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(TicketType::ManagementReport, TicketCategory::Accounting)]
    #[case(TicketType::RegistrationAddressChange, TicketCategory::Corporate)]
    #[case(TicketType::StrikeOff, TicketCategory::Management)]
    fn category_is_determined_by_type(
        #[case] ticket_type: TicketType,
        #[case] category: TicketCategory,
    ) {
        let ticket = NewTicket::new(ticket_type, CompanyId::new(1), UserId::new(2))
            .into_ticket(TicketId::new(3));
        assert_eq!(ticket.category, category);
        assert_eq!(ticket.status, TicketStatus::Open);
    }

    #[rstest]
    #[case("managementReport", Some(TicketType::ManagementReport))]
    #[case("registrationAddressChange", Some(TicketType::RegistrationAddressChange))]
    #[case("strikeOff", Some(TicketType::StrikeOff))]
    #[case("ManagementReport", None)]
    #[case("payroll", None)]
    fn parses_wire_spelling_only(#[case] raw: &str, #[case] expected: Option<TicketType>) {
        assert_eq!(raw.parse::<TicketType>().ok(), expected);
    }

    #[rstest]
    fn ticket_serialises_with_type_key() {
        let ticket = NewTicket::new(
            TicketType::RegistrationAddressChange,
            CompanyId::new(4),
            UserId::new(9),
        )
        .into_ticket(TicketId::new(1));

        let value = serde_json::to_value(&ticket).expect("serialise ticket");
        assert_eq!(
            value,
            json!({
                "id": 1,
                "type": "registrationAddressChange",
                "companyId": 4,
                "assigneeId": 9,
                "status": "open",
                "category": "corporate",
            })
        );
    }

    #[rstest]
    fn unknown_status_reports_kind() {
        let err = "closed".parse::<TicketStatus>().expect_err("unknown status");
        assert_eq!(err.to_string(), "unknown ticket status: closed");
    }
}
