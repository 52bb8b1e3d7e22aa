//! PostgreSQL-backed `TicketRepository` implementation using Diesel ORM.
//!
//! `insert_unique` serialises competing writers per company by locking the
//! company row (`SELECT ... FOR UPDATE`) before re-checking for an existing
//! ticket of the same type.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{TicketRepository, TicketRepositoryError};
use crate::domain::{CompanyId, NewTicket, Ticket, TicketDetails, TicketType};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    CompanyRow, NewTicketRow, TicketRow, UserRow, ticket_details_from_rows,
};
use super::pool::{DbPool, PoolError};
use super::schema::{companies, tickets, users};

/// Diesel-backed ticket store.
#[derive(Clone)]
pub struct DieselTicketRepository {
    pool: DbPool,
}

impl DieselTicketRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: &PoolError) -> TicketRepositoryError {
    map_pool_error(error, TicketRepositoryError::connection)
}

fn diesel_error(error: &diesel::result::Error) -> TicketRepositoryError {
    map_diesel_error(
        error,
        TicketRepositoryError::query,
        TicketRepositoryError::connection,
    )
}

fn decode_ticket(row: TicketRow) -> Result<Ticket, TicketRepositoryError> {
    Ticket::try_from(row).map_err(|err| TicketRepositoryError::query(err.to_string()))
}

const fn new_row(ticket: &NewTicket) -> NewTicketRow<'static> {
    NewTicketRow {
        ticket_type: ticket.ticket_type().as_str(),
        category: ticket.category().as_str(),
        status: ticket.status().as_str(),
        company_id: ticket.company_id().get(),
        assignee_id: ticket.assignee_id().get(),
    }
}

async fn insert_row(
    conn: &mut AsyncPgConnection,
    row: &NewTicketRow<'_>,
) -> QueryResult<TicketRow> {
    diesel::insert_into(tickets::table)
        .values(row)
        .returning(TicketRow::as_returning())
        .get_result(conn)
        .await
}

#[async_trait]
impl TicketRepository for DieselTicketRepository {
    async fn exists(
        &self,
        company_id: CompanyId,
        ticket_type: TicketType,
    ) -> Result<bool, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| pool_error(&err))?;

        diesel::select(exists(
            tickets::table
                .filter(tickets::company_id.eq(company_id.get()))
                .filter(tickets::ticket_type.eq(ticket_type.as_str())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|err| diesel_error(&err))
    }

    async fn insert(&self, ticket: NewTicket) -> Result<Ticket, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| pool_error(&err))?;
        let row = insert_row(&mut conn, &new_row(&ticket))
            .await
            .map_err(|err| diesel_error(&err))?;
        decode_ticket(row)
    }

    async fn insert_unique(&self, ticket: NewTicket) -> Result<Ticket, TicketRepositoryError> {
        let company_id = ticket.company_id();
        let ticket_type = ticket.ticket_type();
        let pending = new_row(&ticket);
        let mut conn = self.pool.get().await.map_err(|err| pool_error(&err))?;

        let inserted = conn
            .transaction(|tx| {
                async move {
                    companies::table
                        .filter(companies::id.eq(company_id.get()))
                        .select(companies::id)
                        .for_update()
                        .first::<i64>(tx)
                        .await
                        .optional()?;

                    let taken = diesel::select(exists(
                        tickets::table
                            .filter(tickets::company_id.eq(company_id.get()))
                            .filter(tickets::ticket_type.eq(ticket_type.as_str())),
                    ))
                    .get_result::<bool>(tx)
                    .await?;
                    if taken {
                        return Ok(None);
                    }

                    insert_row(tx, &pending).await.map(Some)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| diesel_error(&err))?;

        match inserted {
            Some(row) => decode_ticket(row),
            None => Err(TicketRepositoryError::duplicate(company_id, ticket_type)),
        }
    }

    async fn list_all(&self) -> Result<Vec<TicketDetails>, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| pool_error(&err))?;

        let rows: Vec<(TicketRow, CompanyRow, UserRow)> = tickets::table
            .inner_join(companies::table.on(companies::id.eq(tickets::company_id)))
            .inner_join(users::table.on(users::id.eq(tickets::assignee_id)))
            .order((tickets::created_at.asc(), tickets::id.asc()))
            .select((
                TicketRow::as_select(),
                CompanyRow::as_select(),
                UserRow::as_select(),
            ))
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;

        rows.into_iter()
            .map(|joined| {
                ticket_details_from_rows(joined)
                    .map_err(|err| TicketRepositoryError::query(err.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Row conversion coverage.

    use rstest::rstest;

    use super::*;
    use crate::domain::{TicketId, UserId};

    #[rstest]
    fn new_row_uses_wire_spelling() {
        let ticket = NewTicket::new(
            TicketType::RegistrationAddressChange,
            CompanyId::new(4),
            UserId::new(6),
        );
        let row = new_row(&ticket);

        assert_eq!(row.ticket_type, "registrationAddressChange");
        assert_eq!(row.category, "corporate");
        assert_eq!(row.status, "open");
        assert_eq!((row.company_id, row.assignee_id), (4, 6));
    }

    #[rstest]
    fn decode_rejects_unknown_type() {
        let err = decode_ticket(TicketRow {
            id: 1,
            ticket_type: "payroll".to_owned(),
            category: "accounting".to_owned(),
            status: "open".to_owned(),
            company_id: 1,
            assignee_id: 1,
        })
        .expect_err("bad row");

        assert!(matches!(err, TicketRepositoryError::Query { .. }));
    }

    #[rstest]
    fn decode_round_trips_written_row() {
        let ticket = NewTicket::new(
            TicketType::ManagementReport,
            CompanyId::new(2),
            UserId::new(3),
        );
        let written = new_row(&ticket);
        let decoded = decode_ticket(TicketRow {
            id: 10,
            ticket_type: written.ticket_type.to_owned(),
            category: written.category.to_owned(),
            status: written.status.to_owned(),
            company_id: written.company_id,
            assignee_id: written.assignee_id,
        })
        .expect("decode row");

        assert_eq!(decoded, ticket.into_ticket(TicketId::new(10)));
    }
}
