//! Domain core for the OKR backend.
//!
//! Pure logic only: shared types, the error taxonomy, goal-hierarchy
//! validation rules, and the conversational external-service interface.
//! Nothing in this crate touches the database.

pub mod conversation;
pub mod error;
pub mod okr;
pub mod types;
