//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Entities serialize with camelCase keys, the shape API clients expect.

pub mod key_result;
pub mod objective;
pub mod task;
pub mod user;
