//! Per-type assignment policies and the table of wired types.

use crate::domain::{TicketCategory, TicketType, UserRole};

const REGISTRATION_ROLES: &[UserRole] = &[UserRole::CorporateSecretary, UserRole::Director];

/// How a single assignee is chosen from roster candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// One role; the most recently created candidate wins.
    SingleRoleLatest {
        /// Eligible role.
        role: UserRole,
        /// Reject when more than one candidate holds the role.
        require_single: bool,
    },
    /// Several roles in priority order, each capped at one candidate; the
    /// first role with a candidate wins.
    PreferenceOrder {
        /// Eligible roles, highest priority first.
        roles: &'static [UserRole],
    },
}

/// Fixed rule set governing one ticket type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketPolicy {
    ticket_type: TicketType,
    uniqueness_constrained: bool,
    strategy: ResolutionStrategy,
}

impl TicketPolicy {
    /// Policy for `ticket_type`.
    ///
    /// # Examples
    /// ```
    /// use ticketing::domain::tickets::TicketPolicy;
    /// use ticketing::domain::{TicketType, UserRole};
    ///
    /// let policy = TicketPolicy::for_type(TicketType::RegistrationAddressChange);
    /// assert!(policy.uniqueness_constrained());
    /// assert_eq!(
    ///     policy.eligible_roles(),
    ///     &[UserRole::CorporateSecretary, UserRole::Director]
    /// );
    /// ```
    #[must_use]
    pub const fn for_type(ticket_type: TicketType) -> Self {
        match ticket_type {
            TicketType::ManagementReport => Self {
                ticket_type,
                uniqueness_constrained: false,
                strategy: ResolutionStrategy::SingleRoleLatest {
                    role: UserRole::Accountant,
                    require_single: false,
                },
            },
            TicketType::RegistrationAddressChange => Self {
                ticket_type,
                uniqueness_constrained: true,
                strategy: ResolutionStrategy::PreferenceOrder {
                    roles: REGISTRATION_ROLES,
                },
            },
            TicketType::StrikeOff => Self {
                ticket_type,
                uniqueness_constrained: false,
                strategy: ResolutionStrategy::SingleRoleLatest {
                    role: UserRole::Director,
                    require_single: true,
                },
            },
        }
    }

    /// Ticket type governed by this policy.
    #[must_use]
    pub const fn ticket_type(&self) -> TicketType {
        self.ticket_type
    }

    /// Category assigned to created tickets.
    #[must_use]
    pub const fn category(&self) -> TicketCategory {
        self.ticket_type.category()
    }

    /// Whether an existing ticket of the same type blocks creation.
    #[must_use]
    pub const fn uniqueness_constrained(&self) -> bool {
        self.uniqueness_constrained
    }

    /// Candidate selection rule.
    #[must_use]
    pub const fn strategy(&self) -> ResolutionStrategy {
        self.strategy
    }

    /// Roles queried from the roster, in priority order.
    #[must_use]
    pub const fn eligible_roles(&self) -> &[UserRole] {
        match &self.strategy {
            ResolutionStrategy::SingleRoleLatest { role, .. } => std::slice::from_ref(role),
            ResolutionStrategy::PreferenceOrder { roles } => *roles,
        }
    }
}

/// Outcome of looking up a ticket type in a [`PolicyTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyLookup {
    /// The dispatcher routes this type to the contained policy.
    Wired(TicketPolicy),
    /// The type is known but not routed.
    Unwired(TicketType),
}

/// The set of ticket types the dispatcher accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    wired: Vec<TicketType>,
}

impl PolicyTable {
    /// Management reports and registration address changes.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            wired: vec![
                TicketType::ManagementReport,
                TicketType::RegistrationAddressChange,
            ],
        }
    }

    /// Additionally route strike-off tickets.
    #[must_use]
    pub fn with_strike_off(mut self) -> Self {
        if !self.wired.contains(&TicketType::StrikeOff) {
            self.wired.push(TicketType::StrikeOff);
        }
        self
    }

    /// Resolve the policy for `ticket_type`.
    #[must_use]
    pub fn lookup(&self, ticket_type: TicketType) -> PolicyLookup {
        if self.wired.contains(&ticket_type) {
            PolicyLookup::Wired(TicketPolicy::for_type(ticket_type))
        } else {
            PolicyLookup::Unwired(ticket_type)
        }
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}
