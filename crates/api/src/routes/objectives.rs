use axum::routing::{get, post};
use axum::Router;

use crate::handlers::objectives;
use crate::state::AppState;

/// Objective routes mounted at `/objectives`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// POST   /{id}/keyresults   -> create_key_result
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(objectives::list).post(objectives::create))
        .route(
            "/{id}",
            get(objectives::get_by_id)
                .put(objectives::update)
                .delete(objectives::delete),
        )
        .route("/{id}/keyresults", post(objectives::create_key_result))
}
