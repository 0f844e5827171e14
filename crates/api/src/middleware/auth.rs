//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use okr_core::error::CoreError;
use okr_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Legacy header some clients use to carry the raw token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated user extracted from a bearer token.
///
/// The token is read from `Authorization: Bearer <token>` or, failing that,
/// from the `x-auth-token` header. The resolved `user_id` is the only
/// identity handlers act on.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|e| AppError::Core(CoreError::InvalidToken(e.to_string())))?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

/// Pull the raw token out of the request headers.
fn extract_token(headers: &HeaderMap) -> Result<&str, AppError> {
    if let Some(value) = headers.get("authorization") {
        let value = value
            .to_str()
            .map_err(|_| CoreError::InvalidToken("non-ASCII Authorization header".into()))?;
        return value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::InvalidToken(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            });
    }

    match headers.get(AUTH_TOKEN_HEADER) {
        Some(value) => value
            .to_str()
            .map(str::trim)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Core(CoreError::InvalidToken("malformed x-auth-token".into()))),
        None => Err(AppError::Core(CoreError::MissingToken)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn bearer_header_is_preferred() {
        let h = headers(&[("authorization", "Bearer abc"), (AUTH_TOKEN_HEADER, "xyz")]);
        assert_eq!(extract_token(&h).unwrap(), "abc");
    }

    #[test]
    fn legacy_header_is_accepted() {
        let h = headers(&[(AUTH_TOKEN_HEADER, "xyz")]);
        assert_eq!(extract_token(&h).unwrap(), "xyz");
    }

    #[test]
    fn no_header_is_missing_token() {
        assert_matches!(
            extract_token(&HeaderMap::new()),
            Err(AppError::Core(CoreError::MissingToken))
        );
    }

    #[test]
    fn wrong_scheme_is_invalid_token() {
        let h = headers(&[("authorization", "Basic dXNlcjpwdw==")]);
        assert_matches!(extract_token(&h), Err(AppError::Core(CoreError::InvalidToken(_))));
    }
}
