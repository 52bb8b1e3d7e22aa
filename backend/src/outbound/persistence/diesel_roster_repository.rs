//! PostgreSQL-backed `RosterRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RosterRepository, RosterRepositoryError};
use crate::domain::{CompanyId, RosterEntry, UserRole};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed roster reader.
#[derive(Clone)]
pub struct DieselRosterRepository {
    pool: DbPool,
}

impl DieselRosterRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn decode_rows(rows: Vec<UserRow>) -> Result<Vec<RosterEntry>, RosterRepositoryError> {
    rows.into_iter()
        .map(|row| {
            RosterEntry::try_from(row)
                .map_err(|err| RosterRepositoryError::query(err.to_string()))
        })
        .collect()
}

#[async_trait]
impl RosterRepository for DieselRosterRepository {
    async fn list_by_company_and_roles(
        &self,
        company_id: CompanyId,
        roles: &[UserRole],
    ) -> Result<Vec<RosterEntry>, RosterRepositoryError> {
        let role_names: Vec<&'static str> = roles.iter().map(|role| role.as_str()).collect();
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(&err, RosterRepositoryError::connection))?;

        let rows: Vec<UserRow> = users::table
            .filter(users::company_id.eq(company_id.get()))
            .filter(users::role.eq_any(role_names))
            .order((users::created_at.desc(), users::id.desc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    &err,
                    RosterRepositoryError::query,
                    RosterRepositoryError::connection,
                )
            })?;

        decode_rows(rows)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Row decoding and error mapping coverage.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::outbound::persistence::pool::PoolError;

    fn row(role: &str) -> UserRow {
        UserRow {
            id: 1,
            name: "Grace".to_owned(),
            role: role.to_owned(),
            company_id: 2,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn unknown_role_is_a_query_error() {
        let err = decode_rows(vec![row("director"), row("chairman")]).expect_err("bad row");
        assert!(matches!(err, RosterRepositoryError::Query { .. }));
        assert!(err.to_string().contains("chairman"));
    }

    #[rstest]
    fn pool_checkout_is_a_connection_error() {
        let err = map_pool_error(
            &PoolError::checkout("timed out"),
            RosterRepositoryError::connection,
        );
        assert_eq!(err, RosterRepositoryError::connection("timed out"));
    }
}
