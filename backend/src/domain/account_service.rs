//! Account use cases: registration, login and profile reads/edits.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountCommand, INVALID_CREDENTIALS, LoginService, PasswordHasher, UserRepository,
    UsersQuery,
};
use crate::domain::{
    DisplayName, EmailAddress, Error, LoginCredentials, Registration, User, UserId, UserProfile,
};

/// Implements the account driving ports over a user repository.
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountService<U> {
    pub fn new(users: Arc<U>, hasher: Arc<dyn PasswordHasher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

impl<U> AccountService<U>
where
    U: UserRepository,
{
    async fn load(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<UserProfile, Error> {
        if self.users.find_by_email(registration.email()).await?.is_some() {
            return Err(Error::conflict(format!(
                "an account with email {} already exists",
                registration.email()
            )));
        }
        let digest = self.hasher.hash(registration.password()).await?;
        let user = User::new(
            UserId::random(),
            registration.display_name().clone(),
            registration.email().clone(),
            digest,
            self.clock.utc(),
        );
        // The insert re-checks uniqueness for concurrent sign-ups.
        self.users.insert(&user).await?;
        info!(user_id = %user.id(), "account registered");
        Ok(user.profile())
    }

    async fn update_profile(
        &self,
        caller: &UserId,
        display_name: Option<DisplayName>,
    ) -> Result<UserProfile, Error> {
        let mut user = self.load(caller).await?;
        if let Some(display_name) = display_name {
            user.rename(display_name);
            self.users.update(&user).await?;
            info!(user_id = %caller, "profile updated");
        }
        Ok(user.profile())
    }
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserProfile, Error> {
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let Some(user) = self.users.find_by_email(&email).await? else {
            debug!("login attempt for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        if !self
            .hasher
            .verify(credentials.password(), user.password())
            .await?
        {
            debug!(user_id = %user.id(), "login attempt with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(user.profile())
    }
}

#[async_trait]
impl<U> UsersQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn list_users(&self, caller: &UserId) -> Result<Vec<UserProfile>, Error> {
        let users = self.users.list_except(caller).await?;
        Ok(users.iter().map(User::profile).collect())
    }

    async fn me(&self, caller: &UserId) -> Result<UserProfile, Error> {
        self.load(caller).await.map(|user| user.profile())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
