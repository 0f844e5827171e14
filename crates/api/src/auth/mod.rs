//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed, expiring bearer tokens (issue + validate).
//! - [`credentials`] -- register / verify against the `users` table.

pub mod credentials;
pub mod jwt;
pub mod password;
