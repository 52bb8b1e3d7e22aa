//! Internal Diesel row structs.
//!
//! Rows are never exposed to the domain. Conversions parse the text-encoded
//! enum columns and report unknown spellings as [`RowDecodeError`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use thiserror::Error;

use crate::domain::{
    Company, CompanyId, RosterEntry, Ticket, TicketCategory, TicketDetails, TicketId,
    TicketType, UnknownUserRole, UnknownVariant, UserId,
};

use super::schema::{companies, tickets, users};

/// A row holding a value the domain does not recognise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum RowDecodeError {
    #[error(transparent)]
    Role(#[from] UnknownUserRole),
    #[error(transparent)]
    Variant(#[from] UnknownVariant),
    #[error("ticket type {ticket_type} stored with category {stored}")]
    CategoryMismatch {
        ticket_type: TicketType,
        stored: TicketCategory,
    },
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyRow {
    pub id: i64,
    pub name: String,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self::new(CompanyId::new(row.id), row.name)
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub company_id: i64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for RosterEntry {
    type Error = RowDecodeError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(row.id),
            name: row.name,
            role: row.role.parse()?,
            company_id: CompanyId::new(row.company_id),
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TicketRow {
    pub id: i64,
    pub ticket_type: String,
    pub category: String,
    pub status: String,
    pub company_id: i64,
    pub assignee_id: i64,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = RowDecodeError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        let ticket_type: TicketType = row.ticket_type.parse()?;
        let stored: TicketCategory = row.category.parse()?;
        if stored != ticket_type.category() {
            return Err(RowDecodeError::CategoryMismatch {
                ticket_type,
                stored,
            });
        }
        Ok(Self {
            id: TicketId::new(row.id),
            ticket_type,
            company_id: CompanyId::new(row.company_id),
            assignee_id: UserId::new(row.assignee_id),
            status: row.status.parse()?,
            category: ticket_type.category(),
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tickets)]
pub(crate) struct NewTicketRow<'a> {
    pub ticket_type: &'a str,
    pub category: &'a str,
    pub status: &'a str,
    pub company_id: i64,
    pub assignee_id: i64,
}

/// Decode one row of the `tickets ⋈ companies ⋈ users` read view.
pub(crate) fn ticket_details_from_rows(
    (ticket, company, assignee): (TicketRow, CompanyRow, UserRow),
) -> Result<TicketDetails, RowDecodeError> {
    Ok(TicketDetails {
        ticket: ticket.try_into()?,
        company: company.into(),
        assignee: assignee.try_into()?,
    })
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Row decoding coverage.

    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::{TicketStatus, UserRole};

    fn user_row(role: &str) -> UserRow {
        UserRow {
            id: 3,
            name: "Ada".to_owned(),
            role: role.to_owned(),
            company_id: 1,
            created_at: Utc.timestamp_opt(1_700_000_000, 0).single().expect("timestamp"),
        }
    }

    #[rstest]
    fn user_row_decodes_role() {
        let entry = RosterEntry::try_from(user_row("corporateSecretary")).expect("decode row");
        assert_eq!(entry.role, UserRole::CorporateSecretary);
        assert_eq!(entry.company_id, CompanyId::new(1));
    }

    #[rstest]
    fn user_row_rejects_unknown_role() {
        let err = RosterEntry::try_from(user_row("auditor")).expect_err("unknown role");
        assert_eq!(err, RowDecodeError::Role(UnknownUserRole("auditor".to_owned())));
    }

    #[rstest]
    fn ticket_row_decodes_enums() {
        let ticket = Ticket::try_from(TicketRow {
            id: 9,
            ticket_type: "strikeOff".to_owned(),
            category: "management".to_owned(),
            status: "resolved".to_owned(),
            company_id: 1,
            assignee_id: 3,
        })
        .expect("decode row");

        assert_eq!(ticket.ticket_type, TicketType::StrikeOff);
        assert_eq!(ticket.category, TicketCategory::Management);
        assert_eq!(ticket.status, TicketStatus::Resolved);
    }

    #[rstest]
    #[case("strikeOff", "accounting", TicketType::StrikeOff, TicketCategory::Accounting)]
    #[case(
        "managementReport",
        "corporate",
        TicketType::ManagementReport,
        TicketCategory::Corporate
    )]
    fn ticket_row_rejects_category_contradicting_type(
        #[case] raw_type: &str,
        #[case] raw_category: &str,
        #[case] ticket_type: TicketType,
        #[case] stored: TicketCategory,
    ) {
        let err = Ticket::try_from(TicketRow {
            id: 9,
            ticket_type: raw_type.to_owned(),
            category: raw_category.to_owned(),
            status: "open".to_owned(),
            company_id: 1,
            assignee_id: 3,
        })
        .expect_err("category must follow type");

        assert_eq!(
            err,
            RowDecodeError::CategoryMismatch {
                ticket_type,
                stored
            }
        );
    }

    #[rstest]
    fn ticket_row_rejects_unknown_status() {
        let result = Ticket::try_from(TicketRow {
            id: 9,
            ticket_type: "strikeOff".to_owned(),
            category: "management".to_owned(),
            status: "archived".to_owned(),
            company_id: 1,
            assignee_id: 3,
        });

        assert!(matches!(result, Err(RowDecodeError::Variant(_))));
    }
}
