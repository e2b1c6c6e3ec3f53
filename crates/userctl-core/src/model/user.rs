use serde::Serialize;
use userctl_core_types::Sensitive;

use crate::errors::{Result, UserError};
use crate::password::hash_password;

/// A persisted user row
///
/// Only the store constructs these; `id` is the surrogate key it assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,

    /// Unique, non-empty
    pub username: String,

    /// Unique, non-empty
    pub email: String,

    /// Argon2 PHC string; never serialized or displayed
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Replace the email, trimming surrounding whitespace
    ///
    /// The change is in memory only until the session writes it back.
    pub fn set_email(&mut self, email: &str) -> Result<()> {
        self.email = validate_email(email)?;
        Ok(())
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "id={} username='{}' email='{}'",
            self.id, self.username, self.email
        )
    }
}

/// A user that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Validate identity fields and hash the password
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty username or email, `Crypto` if hashing fails.
    pub fn new(username: &str, email: &str, password: &Sensitive<String>) -> Result<Self> {
        let username = validate_username(username)?;
        let email = validate_email(email)?;
        let password_hash = hash_password(password)?;

        Ok(Self {
            username,
            email,
            password_hash,
        })
    }

    /// Attach the id the store assigned on insert
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

fn validate_username(username: &str) -> Result<String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(UserError::InvalidUsername {
            reason: "username cannot be empty".to_string(),
        }
        .into());
    }
    Ok(trimmed.to_string())
}

fn validate_email(email: &str) -> Result<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(UserError::InvalidEmail {
            reason: "email cannot be empty".to_string(),
        }
        .into());
    }
    Ok(trimmed.to_string())
}
