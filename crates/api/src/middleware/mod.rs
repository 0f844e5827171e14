//! Request extractors enforcing authentication.
//!
//! - [`auth::AuthUser`] -- Resolves the acting user from a bearer token.

pub mod auth;
