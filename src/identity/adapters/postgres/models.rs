//! Diesel row models for account persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row and insert model for accounts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Account identifier.
    pub id: uuid::Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Opaque credential hash.
    pub credential_hash: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
