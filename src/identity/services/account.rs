//! Account registration.

use crate::identity::{
    domain::{EmailAddress, IdentityDomainError, User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering an account.
///
/// The credential hash is produced by the caller's password hashing
/// collaborator and stored verbatim.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    email: String,
    display_name: String,
    credential_hash: String,
}

impl RegisterUserRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        credential_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            credential_hash: credential_hash.into(),
        }
    }
}

impl std::fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

/// Account registration and lookup service.
#[derive(Clone)]
pub struct AccountService<U, C>
where
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    clock: Arc<C>,
}

impl<U, C> AccountService<U, C>
where
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(users: Arc<U>, clock: Arc<C>) -> Self {
        Self { users, clock }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Domain`] for invalid input and
    /// [`AccountError::Repository`] when the email is taken or storage fails.
    pub async fn register(&self, request: RegisterUserRequest) -> AccountResult<User> {
        let email = EmailAddress::new(request.email)?;
        let user = User::new(
            email,
            request.display_name,
            request.credential_hash,
            &*self.clock,
        )?;
        self.users.store(&user).await?;
        info!(user_id = %user.id(), "registered account");
        Ok(user)
    }

    /// Finds an account by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Repository`] when storage fails.
    pub async fn find(&self, id: UserId) -> AccountResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }

    /// Finds an account by email address.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Domain`] for an invalid address and
    /// [`AccountError::Repository`] when storage fails.
    pub async fn find_by_email(&self, email: &str) -> AccountResult<Option<User>> {
        let email = EmailAddress::new(email)?;
        Ok(self.users.find_by_email(&email).await?)
    }
}
