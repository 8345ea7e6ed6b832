use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::ids::UserId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("email must not be empty")]
    EmptyEmail,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("unknown role: {0}")]
    UnknownRole(String),
}

//
// ─── ROLE ─────────────────────────────────────────────────────────────────────
//

/// Which side of the product a signed-in user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Candidate,
    Recruiter,
}

impl UserRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Recruiter => "recruiter",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "candidate" => Ok(Self::Candidate),
            "recruiter" => Ok(Self::Recruiter),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

//
// ─── AUTH USER ────────────────────────────────────────────────────────────────
//

/// The signed-in identity, handed to every view that needs one.
///
/// There is no ambient session: whoever needs the user receives this
/// value explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub role: UserRole,
}

//
// ─── CREDENTIALS ──────────────────────────────────────────────────────────────
//

/// Validated login form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Builds credentials from the raw form fields.
    ///
    /// The email is trimmed; the password is taken verbatim.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmptyEmail` or `AuthError::EmptyPassword`.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, AuthError> {
        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(AuthError::EmptyEmail);
        }
        let password = password.into();
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        Ok(Self { email, password })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

//
// ─── SIGNUP ───────────────────────────────────────────────────────────────────
//

/// Validated signup form input. New accounts are always candidates;
/// recruiter accounts are provisioned out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    name: String,
    credentials: Credentials,
}

impl Signup {
    /// # Errors
    ///
    /// Returns `AuthError::EmptyName` or a credential error.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(AuthError::EmptyName);
        }
        let credentials = Credentials::new(email, password)?;
        Ok(Self { name, credentials })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.credentials.email()
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.credentials.password()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
