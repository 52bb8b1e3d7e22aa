//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Enumerated
//! columns are stored as text in their camelCase wire spelling and parsed
//! back into domain enums by the repositories.

diesel::table! {
    /// Companies owning rosters and tickets.
    companies (id) {
        /// Primary key.
        id -> Int8,
        /// Registered company name.
        name -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Company personnel eligible for assignment.
    users (id) {
        /// Primary key.
        id -> Int8,
        /// Display name.
        name -> Text,
        /// Role spelling, e.g. `corporateSecretary`.
        role -> Text,
        /// Owning company.
        company_id -> Int8,
        /// Record creation timestamp; drives tie-breaks.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tickets created by the assignment engine.
    tickets (id) {
        /// Primary key.
        id -> Int8,
        /// Ticket type spelling, e.g. `managementReport`.
        ticket_type -> Text,
        /// Category spelling derived from the type.
        category -> Text,
        /// Lifecycle status spelling.
        status -> Text,
        /// Owning company.
        company_id -> Int8,
        /// Assigned user.
        assignee_id -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(users -> companies (company_id));
diesel::joinable!(tickets -> companies (company_id));

diesel::allow_tables_to_appear_in_same_query!(companies, users, tickets);
