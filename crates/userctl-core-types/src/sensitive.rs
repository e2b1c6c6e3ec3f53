//! Redacting wrapper for secrets
//!
//! Clear-text passwords enter the program as command-line arguments and
//! must never be echoed back, logged, or written to the store. Wrapping
//! them in `Sensitive<T>` makes `{:?}` and `{}` safe by construction.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Wrapper for secret data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use userctl_core_types::Sensitive;
///
/// let password = Sensitive::new(String::from("bobpass"));
/// assert_eq!(format!("{:?}", password), "***REDACTED***");
/// assert_eq!(password.expose(), "bobpass");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the secret. Call sites should be limited to hashing.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl From<String> for Sensitive<String> {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Sensitive<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
