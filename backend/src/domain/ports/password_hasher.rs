//! Driven port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Failures raised by hashing adapters.
    pub enum PasswordHasherError {
        /// The hasher could not produce a digest.
        Hash { message: String } => InternalError: "password hashing failed: {message}",
        /// The stored digest could not be parsed.
        MalformedDigest { message: String } =>
            InternalError: "stored password digest is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHasherError>;

    /// Check `password` against `digest`. A mismatch is `Ok(false)`.
    async fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHasherError>;
}
