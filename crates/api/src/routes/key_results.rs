use axum::routing::{get, put};
use axum::Router;

use crate::handlers::key_results;
use crate::state::AppState;

/// Key result routes mounted at `/keyresults`.
///
/// ```text
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// PUT    /{id}/progress   -> update_progress
/// GET    /{id}/tasks      -> list_tasks
/// POST   /{id}/tasks      -> create_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(key_results::update).delete(key_results::delete))
        .route("/{id}/progress", put(key_results::update_progress))
        .route(
            "/{id}/tasks",
            get(key_results::list_tasks).post(key_results::create_task),
        )
}
