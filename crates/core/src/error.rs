use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// No user is registered under the given email.
    #[error("No user registered with email {0}")]
    UnknownEmail(String),

    #[error("Password does not match")]
    BadCredential,

    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Progress {progress} is outside the range 0..={target}")]
    InvalidProgress { progress: i64, target: i32 },

    #[error("Internal error: {0}")]
    Internal(String),
}
