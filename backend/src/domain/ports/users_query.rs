//! Driving port for reading account projections.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every account except the caller, ordered by display name.
    async fn list_users(&self, caller: &UserId) -> Result<Vec<UserProfile>, Error>;

    /// The caller's own profile.
    async fn me(&self, caller: &UserId) -> Result<UserProfile, Error>;
}
