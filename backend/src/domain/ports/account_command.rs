//! Driving port for account mutations: sign-up and profile edits.

use async_trait::async_trait;

use crate::domain::{DisplayName, Error, Registration, UserId, UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account. Fails with `conflict` when the email is taken.
    async fn register(&self, registration: &Registration) -> Result<UserProfile, Error>;

    /// Rename the caller. `None` keeps the current name.
    async fn update_profile(
        &self,
        caller: &UserId,
        display_name: Option<DisplayName>,
    ) -> Result<UserProfile, Error>;
}
