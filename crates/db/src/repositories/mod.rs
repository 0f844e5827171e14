//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod key_result_repo;
pub mod objective_repo;
pub mod task_repo;
pub mod user_repo;

pub use key_result_repo::KeyResultRepo;
pub use objective_repo::ObjectiveRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
