//! Diesel schema for local task persistence.

diesel::table! {
    /// Locally owned tasks.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Monotonic insertion sequence used for creation ordering.
        seq -> Int8,
        /// Owning account.
        owner_id -> Uuid,
        /// Task title.
        title -> Text,
        /// Priority (`low`, `medium`, `high`).
        #[max_length = 16]
        priority -> Varchar,
        /// Free-form schedule hint.
        schedule_hint -> Text,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
