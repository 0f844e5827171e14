//! Credential store operations: registration and password verification.
//!
//! Hashing and verification run before/after the single-statement reads and
//! writes, never inside a transaction.

use okr_core::error::CoreError;
use okr_core::okr::{normalize_email, validate_email, validate_password};
use okr_core::types::DbId;
use okr_db::models::user::CreateUser;
use okr_db::repositories::user_repo::EMAIL_UNIQUE_CONSTRAINT;
use okr_db::repositories::UserRepo;
use okr_db::DbPool;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

/// Register a new user and return its id.
///
/// Fails with [`CoreError::InvalidEmail`] for malformed addresses and
/// [`CoreError::DuplicateEmail`] when the email is taken, including when a
/// concurrent registration wins the race on the unique constraint.
pub async fn register(pool: &DbPool, email: &str, password: &str) -> AppResult<DbId> {
    let email = validate_email(email)?;
    validate_password(password)?;

    if UserRepo::find_by_email(pool, &email).await?.is_some() {
        return Err(CoreError::DuplicateEmail(email).into());
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        email: email.clone(),
        password_hash,
    };
    match UserRepo::create(pool, &input).await {
        Ok(user) => Ok(user.id),
        Err(err) if okr_db::is_unique_violation(&err, EMAIL_UNIQUE_CONSTRAINT) => {
            Err(CoreError::DuplicateEmail(email).into())
        }
        Err(err) => Err(err.into()),
    }
}

/// Check an email/password pair and return the matching user's id.
///
/// Fails with [`CoreError::UnknownEmail`] or [`CoreError::BadCredential`].
pub async fn verify(pool: &DbPool, email: &str, password: &str) -> AppResult<DbId> {
    let email = normalize_email(email);

    let user = UserRepo::find_by_email(pool, &email)
        .await?
        .ok_or_else(|| CoreError::UnknownEmail(email.clone()))?;

    let matches = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !matches {
        return Err(CoreError::BadCredential.into());
    }

    Ok(user.id)
}
