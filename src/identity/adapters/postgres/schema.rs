//! Diesel schema for account persistence.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Account identifier.
        id -> Uuid,
        /// Lower-cased unique email address.
        #[max_length = 320]
        email -> Varchar,
        /// Display name.
        #[max_length = 255]
        display_name -> Varchar,
        /// Opaque credential hash.
        credential_hash -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
