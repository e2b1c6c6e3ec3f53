//! Error types
//!
//! `ExError` is the only error that crosses crate boundaries. Domain code
//! raises `UserError` and converts it; the store builds `ExError`s
//! directly from SQLite failures.

use thiserror::Error;
use userctl_core_types::RequestId;

/// Result type alias using the structured error facility
pub type Result<T> = std::result::Result<T, ExError>;

/// What went wrong, coarsely
///
/// `code()` is stable and shows up in logs as `err_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Rejected before touching the store (blank username or email)
    InvalidInput,
    /// The user to change or delete has no row
    NotFound,
    /// SQLite, migration, or schema failure
    Persistence,
    /// Filesystem failure outside SQLite
    Io,
    /// Argon2 failure
    Crypto,
    /// A state the program should never reach
    Internal,
}

impl ExErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Crypto => "ERR_CRYPTO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// A kind, a message, and whatever context the failing layer knew
///
/// ```
/// use userctl_core::errors::{ExError, ExErrorKind};
///
/// let err = ExError::new(ExErrorKind::Persistence, "database is locked").in_op("user_insert");
/// assert_eq!(err.to_string(), "ERR_PERSISTENCE: database is locked (op=user_insert)");
/// ```
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    message: String,
    op: Option<String>,
    entity: Option<String>,
    request_id: Option<RequestId>,
    cause: Option<Box<ExError>>,
}

impl ExError {
    pub fn new(kind: ExErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            op: None,
            entity: None,
            request_id: None,
            cause: None,
        }
    }

    /// Name the operation that failed (`user_insert`, `migration`, ...)
    pub fn in_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Name the thing the operation was about: a username or a path
    pub fn for_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Tag with the invocation's correlation id; done once, in `main`
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn caused_by(mut self, cause: ExError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message)?;

        let mut context = Vec::new();
        if let Some(op) = &self.op {
            context.push(format!("op={}", op));
        }
        if let Some(entity) = &self.entity {
            context.push(format!("entity={}", entity));
        }
        if let Some(request_id) = &self.request_id {
            context.push(format!("request_id={}", request_id));
        }
        if !context.is_empty() {
            write!(f, " ({})", context.join(", "))?;
        }

        if let Some(cause) = &self.cause {
            write!(f, ": caused by {}", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Domain errors raised by user operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UserError {
    /// No user with this username
    #[error("User not found: {username}")]
    NotFound { username: String },

    #[error("Invalid username: {reason}")]
    InvalidUsername { reason: String },

    #[error("Invalid email: {reason}")]
    InvalidEmail { reason: String },

    /// Argon2 rejected the input or its parameters
    #[error("Password hashing failed: {reason}")]
    PasswordHash { reason: String },
}

impl From<UserError> for ExError {
    fn from(err: UserError) -> Self {
        let message = err.to_string();
        match err {
            UserError::NotFound { username } => {
                ExError::new(ExErrorKind::NotFound, message).for_entity(username)
            }
            UserError::InvalidUsername { .. } | UserError::InvalidEmail { .. } => {
                ExError::new(ExErrorKind::InvalidInput, message)
            }
            UserError::PasswordHash { .. } => {
                ExError::new(ExErrorKind::Crypto, message).in_op("hash_password")
            }
        }
    }
}
