//! Diesel schema for provider links.

diesel::table! {
    /// Provider access tokens keyed by user and provider.
    provider_links (user_id, provider) {
        /// Owning account.
        user_id -> Uuid,
        /// Canonical provider name.
        #[max_length = 32]
        provider -> Varchar,
        /// Provider access token.
        access_token -> Text,
        /// Provider account hint.
        #[max_length = 255]
        account_hint -> Nullable<Varchar>,
        /// Link timestamp.
        linked_at -> Timestamptz,
    }
}
