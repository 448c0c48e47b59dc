//! Driving port for authentication.
//!
//! Inbound adapters call this to turn credentials into an identity without
//! knowing how digests are stored or verified.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserProfile};

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "invalid email or password";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching account.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserProfile, Error>;
}
