//! Assignee selection: applies a policy's strategy to roster candidates.

use crate::domain::{CompanyId, RosterEntry, UserId, UserRole};

use super::{ResolutionStrategy, TicketCreationError, TicketPolicy};

fn role_holders(
    candidates: &[RosterEntry],
    company_id: CompanyId,
    role: UserRole,
) -> impl Iterator<Item = &RosterEntry> {
    candidates
        .iter()
        .filter(move |entry| entry.company_id == company_id && entry.role == role)
}

/// Choose exactly one assignee for `policy` from `candidates`.
///
/// `candidates` must be ordered newest first, as returned by
/// [`RosterReader::find_candidates`](super::RosterReader::find_candidates).
/// Entries from another company or with a role outside the policy are
/// ignored.
///
/// # Errors
/// [`TicketCreationError::NoEligibleAssignee`] when nobody qualifies and
/// [`TicketCreationError::MultipleCandidates`] when a role that must be
/// unique is held by more than one entry.
pub fn resolve_assignee(
    policy: &TicketPolicy,
    company_id: CompanyId,
    candidates: &[RosterEntry],
) -> Result<UserId, TicketCreationError> {
    let holders = |role: UserRole| role_holders(candidates, company_id, role);

    match policy.strategy() {
        ResolutionStrategy::SingleRoleLatest {
            role,
            require_single,
        } => {
            let mut matching = holders(role);
            let latest = matching
                .next()
                .ok_or_else(|| TicketCreationError::NoEligibleAssignee(vec![role]))?;
            if require_single && matching.next().is_some() {
                return Err(TicketCreationError::MultipleCandidates(role));
            }
            Ok(latest.id)
        }
        ResolutionStrategy::PreferenceOrder { roles } => {
            if let Some(role) = roles
                .iter()
                .copied()
                .find(|role| holders(*role).nth(1).is_some())
            {
                return Err(TicketCreationError::MultipleCandidates(role));
            }
            roles
                .iter()
                .find_map(|role| holders(*role).next())
                .map(|entry| entry.id)
                .ok_or_else(|| TicketCreationError::NoEligibleAssignee(roles.to_vec()))
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Regression coverage for this module.

    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::TicketType;

    fn entry(id: i64, role: UserRole) -> RosterEntry {
        RosterEntry {
            id: UserId::new(id),
            name: format!("user-{id}"),
            role,
            company_id: CompanyId::new(1),
            created_at: Utc.timestamp_opt(1_700_000_000 - id, 0).single().expect("timestamp"),
        }
    }

    fn resolve(
        ticket_type: TicketType,
        candidates: &[RosterEntry],
    ) -> Result<UserId, TicketCreationError> {
        resolve_assignee(
            &TicketPolicy::for_type(ticket_type),
            CompanyId::new(1),
            candidates,
        )
    }

    #[rstest]
    fn management_report_takes_latest_accountant() {
        let candidates = [entry(2, UserRole::Accountant), entry(1, UserRole::Accountant)];
        assert_eq!(resolve(TicketType::ManagementReport, &candidates), Ok(UserId::new(2)));
    }

    #[rstest]
    fn management_report_without_accountant_fails() {
        assert_eq!(
            resolve(TicketType::ManagementReport, &[]),
            Err(TicketCreationError::NoEligibleAssignee(vec![UserRole::Accountant]))
        );
    }

    #[rstest]
    #[case(vec![entry(1, UserRole::CorporateSecretary)], Ok(UserId::new(1)))]
    #[case(vec![entry(2, UserRole::Director)], Ok(UserId::new(2)))]
    #[case(
        vec![entry(2, UserRole::Director), entry(3, UserRole::CorporateSecretary)],
        Ok(UserId::new(3))
    )]
    #[case(
        vec![
            entry(1, UserRole::CorporateSecretary),
            entry(2, UserRole::CorporateSecretary),
            entry(3, UserRole::Director),
        ],
        Err(TicketCreationError::MultipleCandidates(UserRole::CorporateSecretary))
    )]
    #[case(
        vec![
            entry(1, UserRole::CorporateSecretary),
            entry(2, UserRole::Director),
            entry(3, UserRole::Director),
        ],
        Err(TicketCreationError::MultipleCandidates(UserRole::Director))
    )]
    #[case(
        vec![],
        Err(TicketCreationError::NoEligibleAssignee(vec![
            UserRole::CorporateSecretary,
            UserRole::Director,
        ]))
    )]
    fn registration_address_change_preference_order(
        #[case] candidates: Vec<RosterEntry>,
        #[case] expected: Result<UserId, TicketCreationError>,
    ) {
        assert_eq!(resolve(TicketType::RegistrationAddressChange, &candidates), expected);
    }

    #[rstest]
    #[case(vec![entry(4, UserRole::Director)], Ok(UserId::new(4)))]
    #[case(vec![], Err(TicketCreationError::NoEligibleAssignee(vec![UserRole::Director])))]
    #[case(
        vec![entry(4, UserRole::Director), entry(5, UserRole::Director)],
        Err(TicketCreationError::MultipleCandidates(UserRole::Director))
    )]
    fn strike_off_requires_exactly_one_director(
        #[case] candidates: Vec<RosterEntry>,
        #[case] expected: Result<UserId, TicketCreationError>,
    ) {
        assert_eq!(resolve(TicketType::StrikeOff, &candidates), expected);
    }

    #[rstest]
    fn ignores_foreign_and_ineligible_entries() {
        let mut foreign = entry(9, UserRole::Accountant);
        foreign.company_id = CompanyId::new(2);
        let candidates = [foreign, entry(8, UserRole::Director), entry(7, UserRole::Accountant)];

        assert_eq!(resolve(TicketType::ManagementReport, &candidates), Ok(UserId::new(7)));
    }
}
