//! Company roster: personnel eligible to be assigned tickets.
//!
//! Roster entries are immutable once created and belong to exactly one
//! company. Roles are a closed set; the wire and database spelling is
//! camelCase.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CompanyId;

/// Stable roster entry identifier, serialised as a bare JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
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

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role a person holds within a company.
///
/// `Shareholder` is not used by any current ticket policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    /// Prepares management reports.
    Accountant,
    /// Handles statutory filings such as address changes.
    CorporateSecretary,
    /// Board member; fallback for corporate filings.
    Director,
    /// Holds equity in the company.
    Shareholder,
}

impl UserRole {
    /// Every role, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Accountant,
        Self::CorporateSecretary,
        Self::Director,
        Self::Shareholder,
    ];

    /// Wire and database spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accountant => "accountant",
            Self::CorporateSecretary => "corporateSecretary",
            Self::Director => "director",
            Self::Shareholder => "shareholder",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or submitted role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown user role: {0}")]
pub struct UnknownUserRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownUserRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownUserRole(s.to_owned()))
    }
}

/// A person on a company's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    /// Roster entry identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Role held within the company.
    pub role: UserRole,
    /// Owning company.
    pub company_id: CompanyId,
    /// Creation timestamp; later entries win tie-breaks.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(UserRole::Accountant, "accountant")]
    #[case(UserRole::CorporateSecretary, "corporateSecretary")]
    #[case(UserRole::Director, "director")]
    #[case(UserRole::Shareholder, "shareholder")]
    fn role_spelling_is_stable(#[case] role: UserRole, #[case] spelling: &str) {
        assert_eq!(role.as_str(), spelling);
        assert_eq!(spelling.parse::<UserRole>(), Ok(role));
        let json = serde_json::to_value(role).expect("serialise role");
        assert_eq!(json, serde_json::Value::from(spelling));
    }

    #[rstest]
    #[case("Director")]
    #[case("corporate_secretary")]
    #[case("")]
    fn unknown_roles_are_rejected(#[case] raw: &str) {
        let err = raw.parse::<UserRole>().expect_err("unknown role");
        assert_eq!(err.0, raw);
    }

    #[rstest]
    fn identifiers_serialise_as_integers() {
        let json = serde_json::to_value(UserId::new(7)).expect("serialise id");
        assert_eq!(json, serde_json::json!(7));
    }
}
