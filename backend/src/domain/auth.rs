//! Credential payloads accepted by the account use cases.
//!
//! Handlers build these from raw request strings so that services only ever
//! see validated input.

use zeroize::Zeroizing;

use super::{DisplayName, EmailAddress, UserValidationError};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error(transparent)]
    Account(#[from] UserValidationError),
}

impl CredentialValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail
            | Self::Account(
                UserValidationError::EmptyEmail | UserValidationError::MalformedEmail,
            ) => "email",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
            Self::Account(_) => "name",
        }
    }
}

/// Login credentials.
///
/// ## Invariants
/// - `email` is trimmed and lower-cased; it is not checked for shape, so a
///   malformed address simply fails to authenticate.
/// - `password` is non-empty and keeps caller whitespace.
///
/// # Examples
/// ```
/// use bug_tracker::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.com ", "hunter22").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(CredentialValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    display_name: DisplayName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let display_name = DisplayName::new(name)?;
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(CredentialValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(Self {
            display_name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialValidationError::EmptyEmail)]
    #[case("   ", "pw", CredentialValidationError::EmptyEmail)]
    #[case("ada@example.com", "", CredentialValidationError::EmptyPassword)]
    fn invalid_login_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn login_keeps_password_whitespace() {
        let creds = LoginCredentials::try_from_parts("ADA@example.com", " pass ")
            .expect("valid inputs");
        assert_eq!(creds.email(), "ada@example.com");
        assert_eq!(creds.password(), " pass ");
    }

    #[rstest]
    #[case("", "ada@example.com", "longenough", "name")]
    #[case("Ada", "not-an-email", "longenough", "email")]
    #[case("Ada", "ada@example.com", "short", "password")]
    #[case("Ada", "ada@example.com", "", "password")]
    fn registration_failures_name_their_field(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let err = Registration::try_from_parts(name, email, password)
            .expect_err("invalid registration");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn registration_normalises_fields() {
        let registration = Registration::try_from_parts(" Ada ", " ADA@Example.com", "longenough")
            .expect("valid registration");
        assert_eq!(registration.display_name().as_str(), "Ada");
        assert_eq!(registration.email().as_str(), "ada@example.com");
        assert_eq!(registration.password(), "longenough");
    }
}
