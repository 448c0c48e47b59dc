//! Argon2id implementation of the password hashing port.
//!
//! Digests are stored as PHC strings, so the salt and cost parameters travel
//! with each hash. Hashing is CPU bound and runs on the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use tokio::task;
use zeroize::Zeroizing;

use crate::domain::PasswordDigest;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Hasher using the crate's recommended Argon2id cost by default.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Use explicit cost parameters, e.g. cheap ones in tests.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

fn hash_blocking(
    argon2: &Argon2<'_>,
    password: &str,
) -> Result<PasswordDigest, PasswordHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordDigest::new(hash.to_string()))
        .map_err(|err| PasswordHasherError::hash(err.to_string()))
}

fn verify_blocking(
    argon2: &Argon2<'_>,
    password: &str,
    digest: &str,
) -> Result<bool, PasswordHasherError> {
    let parsed = PasswordHash::new(digest)
        .map_err(|err| PasswordHasherError::malformed_digest(err.to_string()))?;
    match argon2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHasherError::hash(err.to_string())),
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHasherError> {
        let argon2 = self.argon2();
        let password = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || hash_blocking(&argon2, &password))
            .await
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?
    }

    async fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHasherError> {
        let argon2 = self.argon2();
        let password = Zeroizing::new(password.to_owned());
        let digest = digest.as_str().to_owned();
        task::spawn_blocking(move || verify_blocking(&argon2, &password, &digest))
            .await
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?
    }
}
