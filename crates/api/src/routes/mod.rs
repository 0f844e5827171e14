pub mod converse;
pub mod health;
pub mod key_results;
pub mod objectives;
pub mod tasks;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/register                  register (public)
/// /users/login                     login (public)
///
/// /objectives                      list, create
/// /objectives/{id}                 get (with tree), update, delete
/// /objectives/{id}/keyresults      add key result
///
/// /keyresults/{id}                 update, delete
/// /keyresults/{id}/progress        update progress (PUT)
/// /keyresults/{id}/tasks           list, create
///
/// /tasks/{id}                      update, delete
///
/// /converse                        conversational reply (POST)
/// ```
///
/// Everything except `/users/*` requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/objectives", objectives::router())
        .nest("/keyresults", key_results::router())
        .nest("/tasks", tasks::router())
        .merge(converse::router())
}
