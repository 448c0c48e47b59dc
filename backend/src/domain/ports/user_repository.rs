//! Driven port for account persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            InternalError: "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            InternalError: "user repository query failed: {message}",
        /// Another account already uses this email.
        DuplicateEmail { email: String } =>
            Conflict: "an account with email {email} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account, failing with `DuplicateEmail` when the email is taken.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Overwrite the mutable fields of an existing account.
    async fn update(&self, user: &User) -> Result<(), UserPersistenceError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Resolve several accounts at once; unknown ids are skipped.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError>;

    /// Every account except `excluded`, ordered by display name.
    async fn list_except(&self, excluded: &UserId) -> Result<Vec<User>, UserPersistenceError>;
}
